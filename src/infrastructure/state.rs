//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{AmenityRepository, PlaceRepository, ReviewRepository, UserRepository};
use crate::infrastructure::{
    SeaOrmAmenityRepository, SeaOrmPlaceRepository, SeaOrmReviewRepository, SeaOrmUserRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection (seed and ad-hoc queries)
    db: DatabaseConnection,
    /// User repository
    pub user_repo: Arc<dyn UserRepository>,
    /// Place repository
    pub place_repo: Arc<dyn PlaceRepository>,
    /// Review repository
    pub review_repo: Arc<dyn ReviewRepository>,
    /// Amenity repository
    pub amenity_repo: Arc<dyn AmenityRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(SeaOrmUserRepository::new(db.clone()));
        let place_repo = Arc::new(SeaOrmPlaceRepository::new(db.clone()));
        let review_repo = Arc::new(SeaOrmReviewRepository::new(db.clone()));
        let amenity_repo = Arc::new(SeaOrmAmenityRepository::new(db.clone()));

        Self {
            db,
            user_repo,
            place_repo,
            review_repo,
            amenity_repo,
        }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl AsRef<DatabaseConnection> for AppState {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.db
    }
}

// Implement FromRef to allow extracting DatabaseConnection from AppState
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
