use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{Claims, encode_token};
use crate::auth::password;
use crate::config::AdminSignup;
use crate::db;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::{Role, User};
use crate::state::SharedState;
use crate::validation;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: UserInfo,
}

fn issue_token(state: &SharedState, user: &User) -> Result<String, AppError> {
    let role = Role::parse(&user.role)
        .ok_or_else(|| AppError::Internal(format!("User {} has unknown role", user.id)))?;
    let claims = Claims::new(user.id, &user.email, role, state.config.token_ttl_hours);
    encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)
}

pub async fn register(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let email = validation::normalize_email(&req.email)?;
    let name = validation::required("Name", &req.name)?;
    password::check_strength(&req.password)?;
    let role = Role::parse(&req.role)
        .ok_or_else(|| AppError::BadRequest("Role must be 'student' or 'admin'".to_string()))?;

    let pw_hash = password::hash(&req.password)?;

    let mut tx = state.pool.begin().await?;

    if role == Role::Admin && state.config.admin_signup == AdminSignup::Bootstrap {
        // Serializes concurrent bootstrap attempts
        sqlx::query("SELECT pg_advisory_xact_lock(1)")
            .execute(&mut *tx)
            .await?;
        if db::users::count_admins(&mut *tx).await? > 0 {
            return Err(AppError::Forbidden(
                "Admin registration is closed. Ask an existing admin.".to_string(),
            ));
        }
    }

    if db::users::find_by_email(&mut *tx, &email).await?.is_some() {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    let user = db::users::create(&mut *tx, &email, &pw_hash, name, role.as_str())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::BadRequest("User already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    tx.commit().await?;

    tracing::info!(user_id = user.id, role = %user.role, "user registered");

    let token = issue_token(&state, &user)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: UserInfo::from(&user),
        }),
    ))
}

pub async fn login(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = validation::normalize_email(&req.email)?;
    validation::required("Password", &req.password)?;

    if let Err(retry_after) = state.login_limiter.check(&email) {
        return Err(AppError::RateLimited(format!(
            "Too many login attempts. Try again in {retry_after}s."
        )));
    }

    let Some(user) = db::users::find_by_email(&state.pool, &email).await? else {
        state.login_limiter.record_failure(&email);
        return Err(AppError::BadRequest("Invalid credentials".to_string()));
    };

    if !password::verify(&req.password, &user.password_hash)? {
        state.login_limiter.record_failure(&email);
        tracing::warn!(user_id = user.id, "failed login");
        return Err(AppError::BadRequest("Invalid credentials".to_string()));
    }

    state.login_limiter.clear(&email);

    let token = issue_token(&state, &user)?;
    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: UserInfo::from(&user),
    }))
}

pub async fn profile(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        user: UserInfo::from(&user),
    }))
}
