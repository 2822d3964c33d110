use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: i64,
    pub answer: String,
}

/// A scored submission, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResult {
    pub user_id: i64,
    pub assessment_id: i64,
    pub earned_points: i64,
    pub total_points: i64,
    pub percentage: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub id: i64,
    pub user_id: i64,
    pub assessment_id: i64,
    #[serde(rename = "score")]
    pub earned_points: i64,
    #[serde(rename = "total_score")]
    pub total_points: i64,
    pub percentage: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub answers: serde_json::Value,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ResultWithAssessment {
    pub id: i64,
    pub user_id: i64,
    pub assessment_id: i64,
    #[serde(rename = "score")]
    pub earned_points: i64,
    #[serde(rename = "total_score")]
    pub total_points: i64,
    pub percentage: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub answers: serde_json::Value,
    pub submitted_at: DateTime<Utc>,
    pub assessment_title: String,
    pub assessment_description: String,
}

/// What the skill breakdown needs from a result row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CategorizedResult {
    pub percentage: i32,
    pub skill_category: Option<String>,
    pub submitted_at: DateTime<Utc>,
}
