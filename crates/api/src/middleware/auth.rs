//! # Authentication Module
//!
//! Password hashing for registration, bearer token issuance for login and the
//! [`AuthUser`] extractor that resolves `Authorization: Bearer <token>` to the
//! calling user.
//!
//! Tokens are opaque random strings stored on the user row; there is no
//! expiry or signing.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use courtside_core::{errors::CourtsideError, models::user::Actor};
use eyre::Result;
use rand::{distributions::Alphanumeric, Rng};
use tracing::debug;

use crate::{middleware::error_handling::AppError, ApiState};

pub const TOKEN_LENGTH: usize = 48;

/// Hashes a password using the Argon2 algorithm
///
/// Returns the PHC string (algorithm, parameters, salt and hash), which is
/// what `users.password_hash` stores.
///
/// ```
/// let hashed = courtside_api::middleware::auth::hash_password("correct horse").unwrap();
/// assert!(hashed.starts_with("$argon2"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// A fresh random alphanumeric bearer token.
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// The token of an `Authorization: Bearer <token>` header, if there is one.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// The authenticated caller.
///
/// Rejects with `AUTH_REQUIRED` when no bearer token is sent and with
/// `AUTH_INVALID` when the token matches no user.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Actor);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            CourtsideError::AuthRequired("Missing bearer token".to_string())
        })?;

        let user = courtside_db::repositories::user::get_user_by_token(&state.db_pool, token)
            .await?
            .ok_or_else(|| {
                debug!("Rejected unknown bearer token");
                CourtsideError::Authentication("Invalid token".to_string())
            })?;

        Ok(AuthUser(Actor {
            user_id: user.id,
            role: user.role()?,
        }))
    }
}
