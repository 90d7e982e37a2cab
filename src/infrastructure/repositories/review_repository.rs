//! SeaORM implementation of ReviewRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{CreateReviewInput, DomainError, ReviewRepository, UpdateReviewInput};
use crate::models::review::{self, ActiveModel, Column, Entity as ReviewEntity};

/// SeaORM-based implementation of ReviewRepository
pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn find_all(&self) -> Result<Vec<review::Model>, DomainError> {
        let reviews = ReviewEntity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(reviews)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<review::Model>, DomainError> {
        let review = ReviewEntity::find_by_id(id).one(&self.db).await?;
        Ok(review)
    }

    async fn find_by_place(&self, place_id: &str) -> Result<Vec<review::Model>, DomainError> {
        let reviews = ReviewEntity::find()
            .filter(Column::PlaceId.eq(place_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(reviews)
    }

    async fn find_by_user_and_place(
        &self,
        user_id: &str,
        place_id: &str,
    ) -> Result<Option<review::Model>, DomainError> {
        let review = ReviewEntity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::PlaceId.eq(place_id))
            .one(&self.db)
            .await?;
        Ok(review)
    }

    async fn create(&self, input: CreateReviewInput) -> Result<review::Model, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let new_review = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            rating: Set(input.rating),
            comment: Set(input.comment),
            place_id: Set(input.place_id),
            user_id: Set(input.user_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = new_review.insert(&self.db).await?;
        Ok(result)
    }

    async fn update(
        &self,
        id: &str,
        input: UpdateReviewInput,
    ) -> Result<review::Model, DomainError> {
        let existing = ReviewEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(rating) = input.rating {
            active.rating = Set(rating);
        }
        if let Some(comment) = input.comment {
            active.comment = Set(comment);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        Ok(result)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = ReviewEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
