use axum::{
    extract::{Path, Query, State},
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
pub struct RegisterRequest {
    email: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

fn normalize_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

/// Public registration. `is_admin` is never settable here; admins are
/// created through the admin endpoints or the seeder.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
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
        first_name: normalize_name(payload.first_name),
        last_name: normalize_name(payload.last_name),
        is_admin: false,
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

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> impl IntoResponse {
    match state
        .user_repo
        .find_all(pagination.page, pagination.limit)
        .await
    {
        Ok(result) => Json(json!({
            "users": result.users,
            "total": result.total
        }))
        .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.user_repo.find_by_id(&id).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "User not found" })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    email: Option<String>,
    password: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    is_admin: Option<bool>,
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    claims: Claims,
    Json(payload): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    if !claims.can_modify(&id) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "You can only modify your own account" })),
        )
            .into_response();
    }

    // Only admins may grant or revoke admin rights
    if payload.is_admin.is_some() && !claims.is_admin {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin privileges required to change is_admin" })),
        )
            .into_response();
    }

    let mut input = UpdateUserInput::default();

    if let Some(email) = payload.email {
        if let Err(msg) = validate_email(&email) {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response();
        }
        let email = normalize_email(&email);

        // Reject emails already taken by someone else
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
        input.first_name = Some(normalize_name(payload.first_name));
    }
    if payload.last_name.is_some() {
        input.last_name = Some(normalize_name(payload.last_name));
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

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    claims: Claims,
) -> impl IntoResponse {
    if !claims.can_modify(&id) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "You can only delete your own account" })),
        )
            .into_response();
    }

    match state.user_repo.delete(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "User deleted successfully" })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}
