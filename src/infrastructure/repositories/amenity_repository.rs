//! SeaORM implementation of AmenityRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{AmenityRepository, CreateAmenityInput, DomainError, UpdateAmenityInput};
use crate::models::amenity::{self, ActiveModel, Column, Entity as AmenityEntity};

/// SeaORM-based implementation of AmenityRepository
pub struct SeaOrmAmenityRepository {
    db: DatabaseConnection,
}

impl SeaOrmAmenityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AmenityRepository for SeaOrmAmenityRepository {
    async fn find_all(&self) -> Result<Vec<amenity::Model>, DomainError> {
        let amenities = AmenityEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;
        Ok(amenities)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<amenity::Model>, DomainError> {
        let amenity = AmenityEntity::find_by_id(id).one(&self.db).await?;
        Ok(amenity)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<amenity::Model>, DomainError> {
        let amenity = AmenityEntity::find()
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(amenity)
    }

    async fn create(&self, input: CreateAmenityInput) -> Result<amenity::Model, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let new_amenity = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = new_amenity.insert(&self.db).await?;
        Ok(result)
    }

    async fn update(
        &self,
        id: &str,
        input: UpdateAmenityInput,
    ) -> Result<amenity::Model, DomainError> {
        let existing = AmenityEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        Ok(result)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = AmenityEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
