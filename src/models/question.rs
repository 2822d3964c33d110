use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

pub fn is_option_label(s: &str) -> bool {
    OPTION_LABELS.contains(&s)
}

/// A stored question, answer key included. Never sent to students as-is.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub assessment_id: i64,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
    pub points: i32,
    pub question_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Student-facing question without the correct label.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: i64,
    pub assessment_id: i64,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub points: i32,
    pub question_order: i32,
}

impl From<Question> for QuestionView {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            assessment_id: q.assessment_id,
            question_text: q.question_text,
            option_a: q.option_a,
            option_b: q.option_b,
            option_c: q.option_c,
            option_d: q.option_d,
            points: q.points,
            question_order: q.question_order,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewQuestion {
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
    pub points: Option<i32>,
}
