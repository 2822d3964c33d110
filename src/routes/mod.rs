pub mod admin;
pub mod assessments;
pub mod auth;
pub mod results;

use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use serde_json::{Value, json};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/profile", get(auth::profile))
        // Assessments
        .route("/api/assessments", get(assessments::list))
        .route("/api/assessments/{id}", get(assessments::get))
        .route("/api/assessments/{id}/submit", post(assessments::submit))
        // Results
        .route("/api/results", get(results::list))
        .route("/api/skills/analysis", get(results::skill_analysis))
        .route("/api/leaderboard", get(results::leaderboard))
        // Admin
        .route(
            "/api/admin/assessments",
            get(admin::list_assessments).post(admin::create_assessment),
        )
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/analytics", get(admin::analytics))
        .route("/api/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "message": "EDUASSESS API is running" }))
}
