//! Admin-only user management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{hash_password, Claims};
use crate::domain::{CreateUserInput, UpdateUserInput};
use crate::infrastructure::AppState;
use crate::utils::validation::{normalize_email, validate_email, validate_password};

#[derive(Deserialize)]
pub struct AdminCreateUserRequest {
    email: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
    #[serde(default)]
    is_admin: bool,
}

/// Create a user with an arbitrary admin flag. Unlike public registration,
/// this endpoint may mint admins.
pub async fn create_user(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<AdminCreateUserRequest>,
) -> impl IntoResponse {
    if !claims.is_admin {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin privileges required" })),
        )
            .into_response();
    }

    if let Err(msg) = validate_email(&payload.email) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response();
    }
    if let Err(msg) = validate_password(&payload.password) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response();
    }

    let email = normalize_email(&payload.email);

    match state.user_repo.find_by_email(&email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({ "error": "Email already registered" })),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => return super::domain_error_response(e),
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response();
        }
    };

    let input = CreateUserInput {
        email,
        password_hash,
        first_name: payload.first_name,
        last_name: payload.last_name,
        is_admin: payload.is_admin,
    };

    match state.user_repo.create(input).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "User created successfully",
                "user": user
            })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct AdminUpdateUserRequest {
    email: Option<String>,
    password: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    is_admin: Option<bool>,
}

/// Update any user, including the admin flag
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    claims: Claims,
    Json(payload): Json<AdminUpdateUserRequest>,
) -> impl IntoResponse {
    if !claims.is_admin {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin privileges required" })),
        )
            .into_response();
    }

    let mut input = UpdateUserInput::default();

    if let Some(email) = payload.email {
        if let Err(msg) = validate_email(&email) {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response();
        }
        let email = normalize_email(&email);

        match state.user_repo.find_by_email(&email).await {
            Ok(Some(existing)) if existing.id != id => {
                return (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Email already registered" })),
                )
                    .into_response();
            }
            Ok(_) => {}
            Err(e) => return super::domain_error_response(e),
        }

        input.email = Some(email);
    }

    if let Some(password) = payload.password {
        if let Err(msg) = validate_password(&password) {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response();
        }
        match hash_password(&password) {
            Ok(h) => input.password_hash = Some(h),
            Err(e) => {
                tracing::error!("Password hashing failed: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response();
            }
        }
    }

    if payload.first_name.is_some() {
        input.first_name = Some(payload.first_name);
    }
    if payload.last_name.is_some() {
        input.last_name = Some(payload.last_name);
    }
    input.is_admin = payload.is_admin;

    match state.user_repo.update(&id, input).await {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "message": "User updated successfully",
                "user": user
            })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}
