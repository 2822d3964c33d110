use serde::Serialize;
use sqlx::PgPool;

use crate::models::{AssessmentResult, CategorizedResult, NewResult, ResultWithAssessment};

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SkillStat {
    pub skill_category: Option<String>,
    pub average_score: f64,
    pub total_attempts: i64,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct LeaderboardRow {
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub average_percentage: i64,
    pub attempts: i64,
}

pub async fn create(pool: &PgPool, result: &NewResult) -> Result<AssessmentResult, sqlx::Error> {
    sqlx::query_as::<_, AssessmentResult>(
        "INSERT INTO assessment_results (user_id, assessment_id, earned_points, total_points,
                                         percentage, correct_answers, total_questions, answers)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(result.user_id)
    .bind(result.assessment_id)
    .bind(result.earned_points)
    .bind(result.total_points)
    .bind(result.percentage)
    .bind(result.correct_answers)
    .bind(result.total_questions)
    .bind(sqlx::types::Json(&result.answers))
    .fetch_one(pool)
    .await
}

pub async fn list_for_user(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<ResultWithAssessment>, sqlx::Error> {
    sqlx::query_as::<_, ResultWithAssessment>(
        "SELECT ar.*, a.title AS assessment_title, a.description AS assessment_description
         FROM assessment_results ar
         JOIN assessments a ON a.id = ar.assessment_id
         WHERE ar.user_id = $1
         ORDER BY ar.submitted_at DESC, ar.id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn list_categorized_for_user(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<CategorizedResult>, sqlx::Error> {
    sqlx::query_as::<_, CategorizedResult>(
        "SELECT ar.percentage, a.skill_category, ar.submitted_at
         FROM assessment_results ar
         JOIN assessments a ON a.id = ar.assessment_id
         WHERE ar.user_id = $1
         ORDER BY ar.submitted_at DESC, ar.id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM assessment_results")
        .fetch_one(pool)
        .await
}

pub async fn skill_stats(pool: &PgPool) -> Result<Vec<SkillStat>, sqlx::Error> {
    sqlx::query_as::<_, SkillStat>(
        "SELECT a.skill_category,
                AVG(ar.percentage)::float8 AS average_score,
                COUNT(ar.id) AS total_attempts
         FROM assessment_results ar
         JOIN assessments a ON a.id = ar.assessment_id
         GROUP BY a.skill_category
         ORDER BY a.skill_category NULLS LAST",
    )
    .fetch_all(pool)
    .await
}

pub async fn leaderboard(pool: &PgPool, limit: i64) -> Result<Vec<LeaderboardRow>, sqlx::Error> {
    sqlx::query_as::<_, LeaderboardRow>(
        "SELECT u.id AS user_id, u.name AS user_name, u.email AS user_email,
                ROUND(AVG(ar.percentage))::int8 AS average_percentage,
                COUNT(ar.id) AS attempts
         FROM assessment_results ar
         JOIN users u ON u.id = ar.user_id
         GROUP BY u.id, u.name, u.email
         ORDER BY average_percentage DESC, attempts DESC, u.id
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
