//! SeaORM implementation of PlaceRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    CreatePlaceInput, DomainError, PaginatedPlaces, PlaceFilter, PlaceRepository, UpdatePlaceInput,
};
use crate::models::place::{ActiveModel, Column, Entity as PlaceEntity};
use crate::models::{amenity, place_amenity, PlaceDto};

/// SeaORM-based implementation of PlaceRepository
pub struct SeaOrmPlaceRepository {
    db: DatabaseConnection,
}

impl SeaOrmPlaceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlaceRepository for SeaOrmPlaceRepository {
    async fn find_all(&self, filter: PlaceFilter) -> Result<PaginatedPlaces, DomainError> {
        let mut query = PlaceEntity::find().order_by_desc(Column::CreatedAt);

        // Apply filters
        if let Some(owner_id) = &filter.owner_id
            && !owner_id.is_empty()
        {
            query = query.filter(Column::OwnerId.eq(owner_id));
        }

        if let Some(max_price) = filter.max_price {
            query = query.filter(Column::PricePerNight.lte(max_price));
        }

        if let Some(min_guests) = filter.min_guests {
            query = query.filter(Column::MaxGuests.gte(min_guests));
        }

        if let Some(q) = &filter.query
            && !q.is_empty()
        {
            let cond = Condition::any()
                .add(Column::Name.contains(q))
                .add(Column::Description.contains(q))
                .add(Column::Address.contains(q));
            query = query.filter(cond);
        }

        // Fetch with pagination and total count
        let (places, total) = if let Some(limit) = filter.limit {
            let page = filter.page.unwrap_or(0);
            let paginator = query.paginate(&self.db, limit);
            let total = paginator.num_items().await.unwrap_or(0);
            let items = paginator.fetch_page(page).await?;
            (items, total)
        } else {
            let items = query.all(&self.db).await?;
            let total = items.len() as u64;
            (items, total)
        };

        Ok(PaginatedPlaces {
            places: places.into_iter().map(PlaceDto::from).collect(),
            total,
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PlaceDto>, DomainError> {
        let place_model = PlaceEntity::find_by_id(id).one(&self.db).await?;

        match place_model {
            Some(model) => {
                let mut place_dto = PlaceDto::from(model.clone());

                // Fetch amenity names
                if let Ok(amenities) = model
                    .find_related(amenity::Entity)
                    .all(&self.db)
                    .await
                    && !amenities.is_empty()
                {
                    place_dto.amenities =
                        Some(amenities.into_iter().map(|a| a.name).collect());
                }

                Ok(Some(place_dto))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, input: CreatePlaceInput) -> Result<PlaceDto, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();

        let new_place = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(input.name),
            description: Set(input.description),
            address: Set(input.address),
            price_per_night: Set(input.price_per_night),
            max_guests: Set(input.max_guests),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            owner_id: Set(input.owner_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = new_place.insert(&self.db).await?;
        Ok(PlaceDto::from(result))
    }

    async fn update(&self, id: &str, input: UpdatePlaceInput) -> Result<PlaceDto, DomainError> {
        let existing = PlaceEntity::find_by_id(id)
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
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(price_per_night) = input.price_per_night {
            active.price_per_night = Set(price_per_night);
        }
        if let Some(max_guests) = input.max_guests {
            active.max_guests = Set(max_guests);
        }
        if let Some(latitude) = input.latitude {
            active.latitude = Set(latitude);
        }
        if let Some(longitude) = input.longitude {
            active.longitude = Set(longitude);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;
        Ok(PlaceDto::from(result))
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = PlaceEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn amenities(&self, place_id: &str) -> Result<Vec<amenity::Model>, DomainError> {
        let place = PlaceEntity::find_by_id(place_id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let amenities = place.find_related(amenity::Entity).all(&self.db).await?;
        Ok(amenities)
    }

    async fn attach_amenity(&self, place_id: &str, amenity_id: &str) -> Result<(), DomainError> {
        let existing = place_amenity::Entity::find_by_id((place_id.to_owned(), amenity_id.to_owned()))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Ok(());
        }

        let link = place_amenity::ActiveModel {
            place_id: Set(place_id.to_owned()),
            amenity_id: Set(amenity_id.to_owned()),
        };
        place_amenity::Entity::insert(link)
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }

    async fn detach_amenity(&self, place_id: &str, amenity_id: &str) -> Result<(), DomainError> {
        let result =
            place_amenity::Entity::delete_by_id((place_id.to_owned(), amenity_id.to_owned()))
                .exec(&self.db)
                .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
