use sqlx::PgPool;

use crate::models::{Assessment, AssessmentSummary};

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    title: &str,
    description: &str,
    skill_category: &str,
) -> Result<Assessment, sqlx::Error> {
    sqlx::query_as::<_, Assessment>(
        "INSERT INTO assessments (title, description, skill_category, is_active)
         VALUES ($1, $2, $3, TRUE) RETURNING *",
    )
    .bind(title)
    .bind(description)
    .bind(skill_category)
    .fetch_one(executor)
    .await
}

pub async fn find_active(pool: &PgPool, id: i64) -> Result<Option<Assessment>, sqlx::Error> {
    sqlx::query_as::<_, Assessment>("SELECT * FROM assessments WHERE id = $1 AND is_active")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<AssessmentSummary>, sqlx::Error> {
    sqlx::query_as::<_, AssessmentSummary>(
        "SELECT a.*, COUNT(q.id) AS question_count
         FROM assessments a
         LEFT JOIN questions q ON q.assessment_id = a.id
         WHERE a.is_active
         GROUP BY a.id
         ORDER BY a.created_at DESC, a.id DESC",
    )
    .fetch_all(pool)
    .await
}

/// Every assessment, active or not. Admin only.
pub async fn list_all(pool: &PgPool) -> Result<Vec<AssessmentSummary>, sqlx::Error> {
    sqlx::query_as::<_, AssessmentSummary>(
        "SELECT a.*, COUNT(q.id) AS question_count
         FROM assessments a
         LEFT JOIN questions q ON q.assessment_id = a.id
         GROUP BY a.id
         ORDER BY a.created_at DESC, a.id DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn count_all(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM assessments")
        .fetch_one(pool)
        .await
}
