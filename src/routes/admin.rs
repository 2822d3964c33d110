use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::results::SkillStat;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::{AssessmentSummary, NewQuestion, User, is_option_label};
use crate::state::SharedState;
use crate::validation;

#[derive(Deserialize)]
pub struct CreateAssessment {
    pub title: String,
    pub description: String,
    pub skill_category: String,
    pub questions: Vec<NewQuestion>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAssessment {
    pub message: String,
    pub assessment_id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_users: i64,
    pub total_assessments: i64,
    pub total_results: i64,
    pub skill_stats: Vec<SkillStat>,
}

pub async fn list_assessments(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<AssessmentSummary>>, AppError> {
    auth.require_admin()?;
    let assessments = db::assessments::list_all(&state.pool).await?;
    Ok(Json(assessments))
}

pub async fn create_assessment(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<CreateAssessment>,
) -> Result<(StatusCode, Json<CreatedAssessment>), AppError> {
    auth.require_admin()?;

    let title = validation::required("Title", &req.title)?;
    let description = validation::required("Description", &req.description)?;
    let skill_category = validation::required("Skill category", &req.skill_category)?;

    if req.questions.is_empty() {
        return Err(AppError::BadRequest(
            "An assessment needs at least one question".to_string(),
        ));
    }
    let points = req
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| validate_question(i + 1, q))
        .collect::<Result<Vec<_>, _>>()?;

    let mut tx = state.pool.begin().await?;

    let assessment = db::assessments::create(&mut *tx, title, description, skill_category).await?;
    for (i, (question, points)) in req.questions.iter().zip(points).enumerate() {
        db::questions::create(&mut *tx, assessment.id, question, points, i as i32 + 1).await?;
    }

    tx.commit().await?;

    tracing::info!(
        admin_id = auth.user_id,
        assessment_id = assessment.id,
        questions = req.questions.len(),
        "assessment created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedAssessment {
            message: "Assessment created successfully".to_string(),
            assessment_id: assessment.id,
        }),
    ))
}

pub async fn list_users(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<User>>, AppError> {
    auth.require_admin()?;
    let users = db::users::list_all(&state.pool).await?;
    Ok(Json(users))
}

pub async fn analytics(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Analytics>, AppError> {
    auth.require_admin()?;

    Ok(Json(Analytics {
        total_users: db::users::count_all(&state.pool).await?,
        total_assessments: db::assessments::count_all(&state.pool).await?,
        total_results: db::results::count_all(&state.pool).await?,
        skill_stats: db::results::skill_stats(&state.pool).await?,
    }))
}

/// Returns the point value to store, defaulting to 1.
fn validate_question(position: usize, q: &NewQuestion) -> Result<i32, AppError> {
    let fields = [
        ("question_text", &q.question_text),
        ("option_a", &q.option_a),
        ("option_b", &q.option_b),
        ("option_c", &q.option_c),
        ("option_d", &q.option_d),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!(
                "Question {position}: {name} is required"
            )));
        }
    }

    if !is_option_label(&q.correct_answer) {
        return Err(AppError::BadRequest(format!(
            "Question {position}: correct_answer must be one of A, B, C or D"
        )));
    }

    match q.points {
        None => Ok(1),
        Some(points) if points >= 1 => Ok(points),
        Some(_) => Err(AppError::BadRequest(format!(
            "Question {position}: points must be at least 1"
        ))),
    }
}
