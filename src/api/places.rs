use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::domain::{CreatePlaceInput, PlaceFilter, UpdatePlaceInput};
use crate::infrastructure::AppState;
use crate::utils::validation::{validate_coordinates, validate_max_guests, validate_price};

#[derive(Debug, Deserialize)]
pub struct PlaceListQuery {
    pub owner_id: Option<String>,
    pub max_price: Option<f64>,
    pub min_guests: Option<i32>,
    pub q: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/places",
    responses(
        (status = 200, description = "List all places")
    )
)]
pub async fn list_places(
    State(state): State<AppState>,
    Query(query): Query<PlaceListQuery>,
) -> impl IntoResponse {
    let filter = PlaceFilter {
        owner_id: query.owner_id,
        max_price: query.max_price,
        min_guests: query.min_guests,
        query: query.q,
        page: query.page,
        limit: query.limit,
    };

    match state.place_repo.find_all(filter).await {
        Ok(result) => Json(json!({
            "places": result.places,
            "total": result.total
        }))
        .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaceRequest {
    pub name: String,
    pub description: String,
    pub address: String,
    pub price_per_night: f64,
    pub max_guests: i32,
    pub latitude: f64,
    pub longitude: f64,
}

fn validate_place_fields(
    price_per_night: Option<f64>,
    max_guests: Option<i32>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<(), String> {
    if let Some(price) = price_per_night {
        validate_price(price)?;
    }
    if let Some(guests) = max_guests {
        validate_max_guests(guests)?;
    }
    // Both coordinates checked together; an absent one keeps its stored value
    if let Some(lat) = latitude {
        validate_coordinates(lat, longitude.unwrap_or(0.0))?;
    }
    if let Some(lon) = longitude {
        validate_coordinates(latitude.unwrap_or(0.0), lon)?;
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/v1/places",
    responses(
        (status = 201, description = "Place created successfully"),
        (status = 400, description = "Invalid place data"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_place(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreatePlaceRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Place name is required" })),
        )
            .into_response();
    }

    if let Err(msg) = validate_place_fields(
        Some(payload.price_per_night),
        Some(payload.max_guests),
        Some(payload.latitude),
        Some(payload.longitude),
    ) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response();
    }

    let input = CreatePlaceInput {
        name: payload.name.trim().to_string(),
        description: payload.description,
        address: payload.address,
        price_per_night: payload.price_per_night,
        max_guests: payload.max_guests,
        latitude: payload.latitude,
        longitude: payload.longitude,
        owner_id: claims.sub,
    };

    match state.place_repo.create(input).await {
        Ok(place) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Place created successfully",
                "place": place
            })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

pub async fn get_place(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.place_repo.find_by_id(&id).await {
        Ok(Some(place)) => (StatusCode::OK, Json(place)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Place not found" })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub price_per_night: Option<f64>,
    pub max_guests: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub async fn update_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
    claims: Claims,
    Json(payload): Json<UpdatePlaceRequest>,
) -> impl IntoResponse {
    let place = match state.place_repo.find_by_id(&id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Place not found" })),
            )
                .into_response();
        }
        Err(e) => return super::domain_error_response(e),
    };

    if !claims.can_modify(&place.owner_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "You can only modify your own places" })),
        )
            .into_response();
    }

    if let Some(name) = &payload.name
        && name.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Place name cannot be empty" })),
        )
            .into_response();
    }

    if let Err(msg) = validate_place_fields(
        payload.price_per_night,
        payload.max_guests,
        payload.latitude,
        payload.longitude,
    ) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response();
    }

    let input = UpdatePlaceInput {
        name: payload.name.map(|n| n.trim().to_string()),
        description: payload.description,
        address: payload.address,
        price_per_night: payload.price_per_night,
        max_guests: payload.max_guests,
        latitude: payload.latitude,
        longitude: payload.longitude,
    };

    match state.place_repo.update(&id, input).await {
        Ok(place) => (
            StatusCode::OK,
            Json(json!({
                "message": "Place updated successfully",
                "place": place
            })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

pub async fn delete_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
    claims: Claims,
) -> impl IntoResponse {
    let place = match state.place_repo.find_by_id(&id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Place not found" })),
            )
                .into_response();
        }
        Err(e) => return super::domain_error_response(e),
    };

    if !claims.can_modify(&place.owner_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "You can only delete your own places" })),
        )
            .into_response();
    }

    match state.place_repo.delete(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Place deleted successfully" })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

pub async fn list_place_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.place_repo.find_by_id(&id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Place not found" })),
            )
                .into_response();
        }
        Err(e) => return super::domain_error_response(e),
    }

    match state.review_repo.find_by_place(&id).await {
        Ok(reviews) => Json(json!({
            "total": reviews.len(),
            "reviews": reviews
        }))
        .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

pub async fn list_place_amenities(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.place_repo.amenities(&id).await {
        Ok(amenities) => Json(json!({
            "total": amenities.len(),
            "amenities": amenities
        }))
        .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

pub async fn attach_amenity(
    State(state): State<AppState>,
    Path((id, amenity_id)): Path<(String, String)>,
    claims: Claims,
) -> impl IntoResponse {
    let place = match state.place_repo.find_by_id(&id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Place not found" })),
            )
                .into_response();
        }
        Err(e) => return super::domain_error_response(e),
    };

    if !claims.can_modify(&place.owner_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "You can only modify your own places" })),
        )
            .into_response();
    }

    match state.amenity_repo.find_by_id(&amenity_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Amenity not found" })),
            )
                .into_response();
        }
        Err(e) => return super::domain_error_response(e),
    }

    match state.place_repo.attach_amenity(&id, &amenity_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Amenity attached successfully" })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

pub async fn detach_amenity(
    State(state): State<AppState>,
    Path((id, amenity_id)): Path<(String, String)>,
    claims: Claims,
) -> impl IntoResponse {
    let place = match state.place_repo.find_by_id(&id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Place not found" })),
            )
                .into_response();
        }
        Err(e) => return super::domain_error_response(e),
    };

    if !claims.can_modify(&place.owner_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "You can only modify your own places" })),
        )
            .into_response();
    }

    match state.place_repo.detach_amenity(&id, &amenity_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Amenity detached successfully" })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}
