//! Scoring of submissions and per-category skill breakdowns.
//!
//! Both routines talk to storage only through [`QuestionBank`] and
//! [`ResultStore`], so they run the same against Postgres and against the
//! in-memory stores used in tests.

pub mod score;
pub mod skills;
mod store;

use async_trait::async_trait;

use crate::models::{AssessmentResult, CategorizedResult, NewResult, Question};

pub use score::{ScoreSummary, Tally, percentage, score, tally};
pub use skills::{DEFAULT_CATEGORY, SkillSummary, aggregate, analyze};

/// Read access to authored questions.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Every question of the assessment, in display order.
    async fn fetch_questions(&self, assessment_id: i64) -> Result<Vec<Question>, sqlx::Error>;
}

/// Append-only storage of scored submissions.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// The user's results, newest first, each tagged with its assessment's category.
    async fn fetch_results_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<CategorizedResult>, sqlx::Error>;

    async fn insert_result(&self, result: &NewResult) -> Result<AssessmentResult, sqlx::Error>;
}
