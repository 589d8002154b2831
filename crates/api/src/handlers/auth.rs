use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use courtside_core::{
    errors::CourtsideError,
    models::user::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User},
};
use courtside_db::repositories::user;
use tracing::info;

use crate::{
    middleware::{
        auth,
        error_handling::{AppError, ErrorResponse},
    },
    response::ApiResponse,
    ApiState,
};

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisterResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Missing name, malformed email or short password", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiResponse<RegisterResponse>, AppError> {
    let Json(payload) = payload?;
    let request = payload.validated()?;

    let password_hash = auth::hash_password(&request.password)?;
    let created = user::create_user(&state.db_pool, &request.name, &request.email, &password_hash)
        .await?
        .ok_or_else(|| CourtsideError::Conflict("Email already registered".to_string()))?;

    info!("Registered user {}", created.id);

    Ok(ApiResponse::created(RegisterResponse {
        id: created.id,
        name: created.name,
        email: created.email,
    }))
}

/// Checks the credentials and issues a new bearer token, replacing the old one.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "The user and a bearer token", body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse),
        (status = 422, description = "Missing email or password", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let Json(payload) = payload?;
    let email = payload.email.trim().to_ascii_lowercase();
    if email.is_empty() || payload.password.is_empty() {
        return Err(CourtsideError::Validation("email and password are required".to_string()).into());
    }

    let db_user = user::verify_credentials(&state.db_pool, &email, &payload.password)
        .await?
        .ok_or_else(|| CourtsideError::Authentication("Invalid credentials".to_string()))?;

    let token = auth::generate_token();
    user::set_api_token(&state.db_pool, db_user.id, &token).await?;

    Ok(ApiResponse::success(LoginResponse {
        user: User::try_from(db_user)?,
        token,
    }))
}
