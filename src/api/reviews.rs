use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::infrastructure::AppState;
use crate::services::review_service;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub place_id: String,
    pub rating: i32,
    pub comment: Option<String>,
}

pub async fn create_review(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<CreateReviewRequest>,
) -> impl IntoResponse {
    match review_service::create_review(
        state.place_repo.as_ref(),
        state.review_repo.as_ref(),
        &claims.sub,
        &payload.place_id,
        payload.rating,
        payload.comment,
    )
    .await
    {
        Ok(review) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Review created successfully",
                "review": review
            })),
        )
            .into_response(),
        Err(e) => super::service_error_response(e),
    }
}

pub async fn list_reviews(State(state): State<AppState>) -> impl IntoResponse {
    match state.review_repo.find_all().await {
        Ok(reviews) => Json(json!({
            "total": reviews.len(),
            "reviews": reviews
        }))
        .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.review_repo.find_by_id(&id).await {
        Ok(Some(review)) => (StatusCode::OK, Json(review)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Review not found" })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    claims: Claims,
    Json(payload): Json<UpdateReviewRequest>,
) -> impl IntoResponse {
    let review = match state.review_repo.find_by_id(&id).await {
        Ok(Some(r)) => r,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Review not found" })),
            )
                .into_response();
        }
        Err(e) => return super::domain_error_response(e),
    };

    if !claims.can_modify(&review.user_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "You can only modify your own reviews" })),
        )
            .into_response();
    }

    match review_service::update_review(
        state.review_repo.as_ref(),
        &id,
        payload.rating,
        payload.comment.map(Some),
    )
    .await
    {
        Ok(review) => (
            StatusCode::OK,
            Json(json!({
                "message": "Review updated successfully",
                "review": review
            })),
        )
            .into_response(),
        Err(e) => super::service_error_response(e),
    }
}

pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    claims: Claims,
) -> impl IntoResponse {
    let review = match state.review_repo.find_by_id(&id).await {
        Ok(Some(r)) => r,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Review not found" })),
            )
                .into_response();
        }
        Err(e) => return super::domain_error_response(e),
    };

    if !claims.can_modify(&review.user_id) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "You can only delete your own reviews" })),
        )
            .into_response();
    }

    match state.review_repo.delete(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Review deleted successfully" })),
        )
            .into_response(),
        Err(e) => super::domain_error_response(e),
    }
}
