use axum::Json;
use axum::extract::State;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::results::LeaderboardRow;
use crate::error::AppError;
use crate::grading::{self, SkillSummary};
use crate::models::ResultWithAssessment;
use crate::state::SharedState;

const LEADERBOARD_SIZE: i64 = 10;

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<ResultWithAssessment>>, AppError> {
    let results = db::results::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(results))
}

pub async fn skill_analysis(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<SkillSummary>>, AppError> {
    let skills = grading::analyze(&state.pool, auth.user_id).await?;
    Ok(Json(skills))
}

pub async fn leaderboard(
    _auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<LeaderboardRow>>, AppError> {
    let rows = db::results::leaderboard(&state.pool, LEADERBOARD_SIZE).await?;
    Ok(Json(rows))
}
