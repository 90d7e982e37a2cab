use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "places")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub price_per_night: f64,
    pub max_guests: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::amenity::Entity> for Entity {
    fn to() -> RelationDef {
        super::place_amenity::Relation::Amenity.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::place_amenity::Relation::Place.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// DTO for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub price_per_night: f64,
    pub max_guests: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Model> for PlaceDto {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            address: model.address,
            price_per_night: model.price_per_night,
            max_guests: model.max_guests,
            latitude: model.latitude,
            longitude: model.longitude,
            owner_id: model.owner_id,
            amenities: None,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
