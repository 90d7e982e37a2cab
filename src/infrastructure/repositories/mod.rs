//! Repository implementations using SeaORM

pub mod amenity_repository;
pub mod place_repository;
pub mod review_repository;
pub mod user_repository;

pub use amenity_repository::SeaOrmAmenityRepository;
pub use place_repository::SeaOrmPlaceRepository;
pub use review_repository::SeaOrmReviewRepository;
pub use user_repository::SeaOrmUserRepository;
