use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Assessment {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub skill_category: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Listing row: an assessment plus how many questions it holds.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub skill_category: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub question_count: i64,
}
