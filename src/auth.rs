//! Password hashing and bearer-token auth for the admin surface.
//!
//! Handlers that need a logged-in caller take [`Claims`] as an extractor;
//! everything else stays open. The signing secret lives in `config`.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier};
use argon2::{password_hash::SaltString, Argon2};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config;

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    Hashing(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Missing or malformed Authorization header",
            ),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            AuthError::Hashing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Password hashing failed"),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Token payload: who is calling (by email) and what they may do.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user email
    pub role: String,
    pub exp: usize,
}

impl Claims {
    fn new(email: &str, role: &str) -> Self {
        let exp = (chrono::Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp();
        Self {
            sub: email.to_owned(),
            role: role.to_owned(),
            exp: exp as usize,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingToken)?;
        verify_token(token)
    }
}

pub fn issue_token(email: &str, role: &str) -> Result<String, AuthError> {
    let secret = config::jwt_secret();
    encode(
        &Header::default(),
        &Claims::new(email, role),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

pub fn verify_token(token: &str) -> Result<Claims, AuthError> {
    let secret = config::jwt_secret();
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// An unparseable stored hash counts as a mismatch, not an error.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
