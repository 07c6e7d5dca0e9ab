use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::{hash_password, issue_token, verify_password};
use crate::error::ApiError;
use crate::models::User;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

// Поля опциональны, чтобы на отсутствующие вернуть 400, а не 422 от экстрактора
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserPayload,
    pub token: String,
}

fn require_credentials(req: CredentialsRequest) -> Result<(String, String), ApiError> {
    match (req.email, req.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(ApiError::Validation(
            "Email and password required".to_string(),
        )),
    }
}

// POST /api/auth/register
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (email, password) = require_credentials(req)?;

    if User::find_by_email(&email, &state.db).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    // Хешируем до записи, сырой пароль нигде не сохраняется
    let password_hash = hash_password(&password)?;
    let user_id = User::create(&email, &password_hash, &state.db).await?;

    let token = issue_token(user_id, &state.config.jwt.secret, state.config.jwt.expires_in_days);
    tracing::info!("registered user {}", user_id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserPayload { id: user_id, email },
            token,
        }),
    ))
}

// POST /api/auth/login
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (email, password) = require_credentials(req)?;

    // Один и тот же ответ для неизвестного email и неверного пароля
    let user = User::find_by_email(&email, &state.db)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&password, &user.password_hash) {
        return Err(invalid_credentials());
    }

    let token = issue_token(user.id, &state.config.jwt.secret, state.config.jwt.expires_in_days);

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            user: UserPayload {
                id: user.id,
                email: user.email,
            },
            token,
        }),
    ))
}

fn invalid_credentials() -> ApiError {
    ApiError::Auth("Invalid email or password".to_string())
}
