use crate::auth::hash_password;
use crate::models::{amenity, place, review, user};
use sea_orm::*;

/// Seed demo data: an admin, a host, a guest, two places with amenities and
/// a review. Safe to run on an existing database (upserts by unique column).
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    // 1. Create Users
    let admin_id = uuid::Uuid::new_v4().to_string();
    let host_id = uuid::Uuid::new_v4().to_string();
    let guest_id = uuid::Uuid::new_v4().to_string();

    let users = vec![
        ("admin@hbnb.io", &admin_id, "Admin", true),
        ("host@hbnb.io", &host_id, "Holly", false),
        ("guest@hbnb.io", &guest_id, "Gus", false),
    ];

    for (email, id, first_name, is_admin) in users {
        let password_hash = hash_password("password")
            .map_err(|e| DbErr::Custom(format!("Failed to hash seed password: {}", e)))?;

        let model = user::ActiveModel {
            id: Set(id.clone()),
            email: Set(email.to_owned()),
            password_hash: Set(password_hash),
            first_name: Set(Some(first_name.to_owned())),
            last_name: Set(None),
            is_admin: Set(is_admin),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
        };

        user::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(user::Column::Email)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    // 2. Create Amenities
    for name in ["WiFi", "Pool", "Kitchen"] {
        let model = amenity::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_owned()),
            description: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
        };
        amenity::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(amenity::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    // 3. Create Places owned by the host
    let place_id = uuid::Uuid::new_v4().to_string();
    let places = vec![
        (
            place_id.clone(),
            "Cozy Apartment",
            "A beautiful apartment in the city center",
            "123 Main St, New York, USA",
            100.50,
            4,
            40.7128,
            -74.0060,
        ),
        (
            uuid::Uuid::new_v4().to_string(),
            "Beach House",
            "Steps from the sand",
            "7 Ocean Dr, Miami, USA",
            250.0,
            6,
            25.7617,
            -80.1918,
        ),
    ];

    for (id, name, description, address, price, guests, lat, lon) in places {
        let model = place::ActiveModel {
            id: Set(id),
            name: Set(name.to_owned()),
            description: Set(description.to_owned()),
            address: Set(address.to_owned()),
            price_per_night: Set(price),
            max_guests: Set(guests),
            latitude: Set(lat),
            longitude: Set(lon),
            owner_id: Set(host_id.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
        };
        let _ = place::Entity::insert(model).exec_without_returning(db).await;
    }

    // 4. Guest reviews the first place
    let model = review::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        rating: Set(5),
        comment: Set(Some("Great stay, would book again".to_owned())),
        place_id: Set(place_id),
        user_id: Set(guest_id),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };
    let _ = review::Entity::insert(model)
        .on_conflict(
            sea_orm::sea_query::OnConflict::columns([
                review::Column::UserId,
                review::Column::PlaceId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    Ok(())
}
