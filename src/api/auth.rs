use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{
    create_jwt, create_refresh_jwt, decode_jwt, verify_password, Claims, ACCESS_TOKEN_TTL_SECS,
};
use crate::infrastructure::AppState;
use crate::utils::validation::normalize_email;

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let email = normalize_email(&payload.email);
    tracing::info!("Login attempt for {}", email);

    let user = match state.user_repo.find_by_email(&email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            tracing::warn!("User not found: {}", email);
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response();
        }
        Err(e) => return super::domain_error_response(e),
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {
            let access_token = match create_jwt(&user.id, user.is_admin) {
                Ok(t) => t,
                Err(e) => {
                    tracing::error!("Token creation failed: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Token creation failed" })),
                    )
                        .into_response();
                }
            };
            let refresh_token = match create_refresh_jwt(&user.id, user.is_admin) {
                Ok(t) => t,
                Err(e) => {
                    tracing::error!("Token creation failed: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": "Token creation failed" })),
                    )
                        .into_response();
                }
            };

            (
                StatusCode::OK,
                Json(json!({
                    "access_token": access_token,
                    "refresh_token": refresh_token,
                    "token_type": "Bearer",
                    "expires_in": ACCESS_TOKEN_TTL_SECS
                })),
            )
                .into_response()
        }
        _ => {
            tracing::warn!("Password verification failed for {}", email);
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response()
        }
    }
}

/// Exchange a refresh token for a new access token.
///
/// The Claims extractor rejects refresh tokens on purpose, so this handler
/// reads the Authorization header itself.
pub async fn refresh(headers: HeaderMap) -> impl IntoResponse {
    let token = match headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        Some(t) => t,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Missing Authorization header" })),
            )
                .into_response();
        }
    };

    let claims = match decode_jwt(token) {
        Ok(c) => c,
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid or expired token" })),
            )
                .into_response();
        }
    };

    if !claims.refresh {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "A refresh token is required" })),
        )
            .into_response();
    }

    match create_jwt(&claims.sub, claims.is_admin) {
        Ok(access_token) => (
            StatusCode::OK,
            Json(json!({
                "access_token": access_token,
                "token_type": "Bearer",
                "expires_in": ACCESS_TOKEN_TTL_SECS
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Token creation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Token creation failed" })),
            )
                .into_response()
        }
    }
}

pub async fn get_me(State(state): State<AppState>, claims: Claims) -> impl IntoResponse {
    match state.user_repo.find_by_id(&claims.sub).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "User not found" })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

/// Advisory logout. Tokens stay valid until expiry; there is no blacklist.
pub async fn logout(_claims: Claims) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "message": "Successfully logged out" })),
    )
}
