use crate::auth::{hash_password, issue_token, verify_password, Claims};
use crate::models::choices::validate_mobile_number;
use crate::models::user::{self, Entity as User};
use crate::services::ServiceError;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

pub async fn login(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    tracing::info!("Login attempt for {}", payload.email);

    let user = match User::find()
        .filter(user::Column::Email.eq(&payload.email))
        .one(&db)
        .await
    {
        Ok(Some(u)) => u,
        _ => {
            tracing::warn!("User not found: {}", payload.email);
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response();
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        tracing::warn!("Password verification failed for {}", user.email);
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        )
            .into_response();
    }

    match issue_token(&user.email, &user.role) {
        Ok(token) => (StatusCode::OK, Json(json!({ "token": token }))).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    username: String,
    email: String,
    mobile_number: Option<String>,
    password: String,
}

pub async fn create_admin(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateUserRequest>,
) -> impl IntoResponse {
    if let Some(number) = &payload.mobile_number {
        if let Err(msg) = validate_mobile_number(number) {
            return crate::api::service_error(ServiceError::Validation(msg)).into_response();
        }
    }

    let exists = User::find()
        .filter(user::Column::Email.eq(&payload.email))
        .one(&db)
        .await
        .unwrap_or(None);
    if exists.is_some() {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "A user with this email already exists" })),
        )
            .into_response();
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => return e.into_response(),
    };

    let now = chrono::Utc::now().to_rfc3339();
    let user = user::ActiveModel {
        username: Set(payload.username),
        email: Set(payload.email),
        mobile_number: Set(payload.mobile_number),
        password_hash: Set(password_hash),
        role: Set("admin".to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match user.insert(&db).await {
        Ok(_) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Admin created" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    current_password: String,
    new_password: String,
    retype_new_password: String,
}

pub async fn change_password(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    if payload.new_password != payload.retype_new_password {
        return crate::api::service_error(ServiceError::Validation(
            "New password and retype password do not match".to_string(),
        ))
        .into_response();
    }

    let user = match User::find()
        .filter(user::Column::Email.eq(&claims.sub))
        .one(&db)
        .await
    {
        Ok(Some(u)) => u,
        _ => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "User not found" })),
            )
                .into_response()
        }
    };

    if !verify_password(&payload.current_password, &user.password_hash) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Current password is invalid" })),
        )
            .into_response();
    }

    let password_hash = match hash_password(&payload.new_password) {
        Ok(h) => h,
        Err(e) => return e.into_response(),
    };

    let mut active: user::ActiveModel = user.into();
    active.password_hash = Set(password_hash);
    active.updated_at = Set(chrono::Utc::now().to_rfc3339());

    match active.update(&db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Password successfully changed" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
