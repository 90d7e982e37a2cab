//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::amenity;
use crate::models::review;
use crate::models::user;
use crate::models::{PlaceDto, UserDto};

/// Input for creating a user (password already hashed by the caller)
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: bool,
}

/// Input for updating a user
#[derive(Debug, Default, Clone)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
    pub is_admin: Option<bool>,
}

/// Paginated users result with total count
#[derive(Debug)]
pub struct PaginatedUsers {
    pub users: Vec<UserDto>,
    pub total: u64,
}

/// Repository trait for User entity
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find all users with pagination support
    async fn find_all(
        &self,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Result<PaginatedUsers, DomainError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<UserDto>, DomainError>;

    /// Find a user by email, including the password hash (login path)
    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DomainError>;

    /// Create a new user
    async fn create(&self, input: CreateUserInput) -> Result<UserDto, DomainError>;

    /// Update an existing user
    async fn update(&self, id: &str, input: UpdateUserInput) -> Result<UserDto, DomainError>;

    /// Delete a user by ID
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

/// Filter criteria for place queries
#[derive(Debug, Default, Clone)]
pub struct PlaceFilter {
    pub owner_id: Option<String>,
    pub max_price: Option<f64>,
    pub min_guests: Option<i32>,
    pub query: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Input for creating a place
#[derive(Debug, Clone)]
pub struct CreatePlaceInput {
    pub name: String,
    pub description: String,
    pub address: String,
    pub price_per_night: f64,
    pub max_guests: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: String,
}

/// Input for updating a place
#[derive(Debug, Default, Clone)]
pub struct UpdatePlaceInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub price_per_night: Option<f64>,
    pub max_guests: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Paginated places result with total count
#[derive(Debug)]
pub struct PaginatedPlaces {
    pub places: Vec<PlaceDto>,
    pub total: u64,
}

/// Repository trait for Place entity
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Find all places matching the filter criteria with pagination support
    async fn find_all(&self, filter: PlaceFilter) -> Result<PaginatedPlaces, DomainError>;

    /// Find a single place by ID (amenity names populated)
    async fn find_by_id(&self, id: &str) -> Result<Option<PlaceDto>, DomainError>;

    /// Create a new place
    async fn create(&self, input: CreatePlaceInput) -> Result<PlaceDto, DomainError>;

    /// Update an existing place
    async fn update(&self, id: &str, input: UpdatePlaceInput) -> Result<PlaceDto, DomainError>;

    /// Delete a place by ID
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    /// List amenities attached to a place
    async fn amenities(&self, place_id: &str) -> Result<Vec<amenity::Model>, DomainError>;

    /// Attach an amenity to a place (no-op if already attached)
    async fn attach_amenity(&self, place_id: &str, amenity_id: &str) -> Result<(), DomainError>;

    /// Detach an amenity from a place
    async fn detach_amenity(&self, place_id: &str, amenity_id: &str) -> Result<(), DomainError>;
}

/// Input for creating a review
#[derive(Debug, Clone)]
pub struct CreateReviewInput {
    pub rating: i32,
    pub comment: Option<String>,
    pub place_id: String,
    pub user_id: String,
}

/// Input for updating a review
#[derive(Debug, Default, Clone)]
pub struct UpdateReviewInput {
    pub rating: Option<i32>,
    pub comment: Option<Option<String>>,
}

/// Repository trait for Review entity
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find all reviews
    async fn find_all(&self) -> Result<Vec<review::Model>, DomainError>;

    /// Find a review by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<review::Model>, DomainError>;

    /// Find all reviews for a place
    async fn find_by_place(&self, place_id: &str) -> Result<Vec<review::Model>, DomainError>;

    /// Find the review a user left on a place, if any
    async fn find_by_user_and_place(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> Result<Option<review::Model>, DomainError>;

    /// Create a new review
    async fn create(&self, input: CreateReviewInput) -> Result<review::Model, DomainError>;

    /// Update a review
    async fn update(&self, id: &str, input: UpdateReviewInput)
        -> Result<review::Model, DomainError>;

    /// Delete a review by ID
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

/// Input for creating an amenity
#[derive(Debug, Clone)]
pub struct CreateAmenityInput {
    pub name: String,
    pub description: Option<String>,
}

/// Input for updating an amenity
#[derive(Debug, Default, Clone)]
pub struct UpdateAmenityInput {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

/// Repository trait for Amenity entity
#[async_trait]
pub trait AmenityRepository: Send + Sync {
    /// Find all amenities
    async fn find_all(&self) -> Result<Vec<amenity::Model>, DomainError>;

    /// Find an amenity by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<amenity::Model>, DomainError>;

    /// Find an amenity by name
    async fn find_by_name(&self, name: &str) -> Result<Option<amenity::Model>, DomainError>;

    /// Create a new amenity
    async fn create(&self, input: CreateAmenityInput) -> Result<amenity::Model, DomainError>;

    /// Update an amenity
    async fn update(
        &self,
        id: &str,
        input: UpdateAmenityInput,
    ) -> Result<amenity::Model, DomainError>;

    /// Delete an amenity by ID
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}
