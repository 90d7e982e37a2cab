use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::domain::{CreateAmenityInput, UpdateAmenityInput};
use crate::infrastructure::AppState;

pub async fn list_amenities(State(state): State<AppState>) -> impl IntoResponse {
    match state.amenity_repo.find_all().await {
        Ok(amenities) => Json(json!({
            "total": amenities.len(),
            "amenities": amenities
        }))
        .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

pub async fn get_amenity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.amenity_repo.find_by_id(&id).await {
        Ok(Some(amenity)) => (StatusCode::OK, Json(amenity)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Amenity not found" })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct CreateAmenityRequest {
    name: String,
    description: Option<String>,
}

/// Amenity management is admin-only
pub async fn create_amenity(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreateAmenityRequest>,
) -> impl IntoResponse {
    if !claims.is_admin {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin privileges required" })),
        )
            .into_response();
    }

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Amenity name is required" })),
        )
            .into_response();
    }

    match state.amenity_repo.find_by_name(&name).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({ "error": "Amenity already exists" })),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => return super::domain_error_response(e),
    }

    let input = CreateAmenityInput {
        name,
        description: payload.description,
    };

    match state.amenity_repo.create(input).await {
        Ok(amenity) => (StatusCode::CREATED, Json(amenity)).into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct UpdateAmenityRequest {
    name: Option<String>,
    description: Option<String>,
}

pub async fn update_amenity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    claims: Claims,
    Json(payload): Json<UpdateAmenityRequest>,
) -> impl IntoResponse {
    if !claims.is_admin {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin privileges required" })),
        )
            .into_response();
    }

    let name = match payload.name {
        Some(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Amenity name cannot be empty" })),
                )
                    .into_response();
            }

            // Reject names already taken by another amenity
            match state.amenity_repo.find_by_name(&name).await {
                Ok(Some(existing)) if existing.id != id => {
                    return (
                        StatusCode::CONFLICT,
                        Json(json!({ "error": "Amenity already exists" })),
                    )
                        .into_response();
                }
                Ok(_) => {}
                Err(e) => return super::domain_error_response(e),
            }

            Some(name)
        }
        None => None,
    };

    let input = UpdateAmenityInput {
        name,
        description: payload.description.map(Some),
    };

    match state.amenity_repo.update(&id, input).await {
        Ok(amenity) => (
            StatusCode::OK,
            Json(json!({
                "message": "Amenity updated successfully",
                "amenity": amenity
            })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

pub async fn delete_amenity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    claims: Claims,
) -> impl IntoResponse {
    if !claims.is_admin {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin privileges required" })),
        )
            .into_response();
    }

    match state.amenity_repo.delete(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Amenity deleted successfully" })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}
