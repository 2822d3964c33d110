use async_trait::async_trait;
use sqlx::PgPool;

use crate::db;
use crate::models::{AssessmentResult, CategorizedResult, NewResult, Question};

use super::{QuestionBank, ResultStore};

#[async_trait]
impl QuestionBank for PgPool {
    async fn fetch_questions(&self, assessment_id: i64) -> Result<Vec<Question>, sqlx::Error> {
        db::questions::list_by_assessment(self, assessment_id).await
    }
}

#[async_trait]
impl ResultStore for PgPool {
    async fn fetch_results_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<CategorizedResult>, sqlx::Error> {
        db::results::list_categorized_for_user(self, user_id).await
    }

    async fn insert_result(&self, result: &NewResult) -> Result<AssessmentResult, sqlx::Error> {
        db::results::create(self, result).await
    }
}
