use sqlx::PgPool;

use crate::models::{NewQuestion, Question};

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    assessment_id: i64,
    question: &NewQuestion,
    points: i32,
    order: i32,
) -> Result<Question, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        "INSERT INTO questions (assessment_id, question_text, option_a, option_b, option_c,
                                option_d, correct_answer, points, question_order)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
    )
    .bind(assessment_id)
    .bind(question.question_text.trim())
    .bind(question.option_a.trim())
    .bind(question.option_b.trim())
    .bind(question.option_c.trim())
    .bind(question.option_d.trim())
    .bind(&question.correct_answer)
    .bind(points)
    .bind(order)
    .fetch_one(executor)
    .await
}

pub async fn list_by_assessment(
    pool: &PgPool,
    assessment_id: i64,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(
        "SELECT * FROM questions WHERE assessment_id = $1 ORDER BY question_order, id",
    )
    .bind(assessment_id)
    .fetch_all(pool)
    .await
}
