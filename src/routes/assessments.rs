use std::collections::HashSet;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::grading::{self, ScoreSummary};
use crate::models::{Assessment, AssessmentSummary, QuestionView, SubmittedAnswer, is_option_label};
use crate::state::SharedState;

#[derive(Serialize)]
pub struct AssessmentDetail {
    pub assessment: Assessment,
    pub questions: Vec<QuestionView>,
}

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub message: String,
    pub result: ScoreSummary,
}

pub async fn list(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<AssessmentSummary>>, AppError> {
    let assessments = db::assessments::list_active(&state.pool).await?;
    Ok(Json(assessments))
}

pub async fn get(
    _auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<AssessmentDetail>, AppError> {
    let assessment = db::assessments::find_active(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assessment not found".to_string()))?;

    let questions = db::questions::list_by_assessment(&state.pool, id)
        .await?
        .into_iter()
        .map(QuestionView::from)
        .collect();

    Ok(Json(AssessmentDetail {
        assessment,
        questions,
    }))
}

pub async fn submit(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    validate_answers(&req.answers)?;

    db::assessments::find_active(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assessment not found".to_string()))?;

    let result = grading::score(&state.pool, auth.user_id, id, &req.answers).await?;

    tracing::info!(
        user_id = auth.user_id,
        assessment_id = id,
        result_id = result.id,
        percentage = result.percentage,
        "assessment submitted"
    );

    Ok(Json(SubmitResponse {
        message: "Assessment submitted successfully".to_string(),
        result: ScoreSummary::from(&result),
    }))
}

fn validate_answers(answers: &[SubmittedAnswer]) -> Result<(), AppError> {
    if answers.is_empty() {
        return Err(AppError::BadRequest("At least one answer is required".to_string()));
    }

    let mut seen = HashSet::with_capacity(answers.len());
    for submitted in answers {
        if !is_option_label(&submitted.answer) {
            return Err(AppError::BadRequest(format!(
                "Answer for question {} must be one of A, B, C or D",
                submitted.question_id
            )));
        }
        if !seen.insert(submitted.question_id) {
            return Err(AppError::BadRequest(format!(
                "Question {} was answered more than once",
                submitted.question_id
            )));
        }
    }
    Ok(())
}
