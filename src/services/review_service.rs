//! Review Service - Pure business logic without HTTP layer
//!
//! Enforces the review rules: the place must exist, ratings stay in range,
//! owners cannot review their own place, and a user reviews a place at most
//! once.

use crate::domain::{
    CreateReviewInput, DomainError, PlaceRepository, ReviewRepository, UpdateReviewInput,
};
use crate::models::review;
use crate::utils::validation::validate_rating;

/// Error type for service operations
#[derive(Debug)]
pub enum ServiceError {
    NotFound,
    Validation(String),
    Conflict(String),
    Database(String),
}

impl From<DomainError> for ServiceError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => ServiceError::NotFound,
            DomainError::Validation(msg) => ServiceError::Validation(msg),
            DomainError::Conflict(msg) => ServiceError::Conflict(msg),
            DomainError::Database(msg) | DomainError::Internal(msg) => {
                ServiceError::Database(msg)
            }
        }
    }
}

/// Create a review on behalf of `user_id`
pub async fn create_review(
    place_repo: &dyn PlaceRepository,
    review_repo: &dyn ReviewRepository,
    user_id: &str,
    place_id: &str,
    rating: i32,
    comment: Option<String>,
) -> Result<review::Model, ServiceError> {
    validate_rating(rating).map_err(ServiceError::Validation)?;

    // 1. The place must exist
    let place = place_repo
        .find_by_id(place_id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    // 2. Owners cannot review their own place
    if place.owner_id == user_id {
        return Err(ServiceError::Validation(
            "You cannot review your own place".to_string(),
        ));
    }

    // 3. One review per (user, place)
    if review_repo
        .find_by_user_and_place(user_id, place_id)
        .await?
        .is_some()
    {
        return Err(ServiceError::Conflict(
            "You have already reviewed this place".to_string(),
        ));
    }

    let review = review_repo
        .create(CreateReviewInput {
            rating,
            comment,
            place_id: place_id.to_owned(),
            user_id: user_id.to_owned(),
        })
        .await?;

    Ok(review)
}

/// Update a review's rating and/or comment
pub async fn update_review(
    review_repo: &dyn ReviewRepository,
    id: &str,
    rating: Option<i32>,
    comment: Option<Option<String>>,
) -> Result<review::Model, ServiceError> {
    if let Some(rating) = rating {
        validate_rating(rating).map_err(ServiceError::Validation)?;
    }

    let review = review_repo
        .update(id, UpdateReviewInput { rating, comment })
        .await?;

    Ok(review)
}
