use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use hbnb::auth::hash_password;
use hbnb::infrastructure::AppState;
use hbnb::{api, db};
use sea_orm::{ActiveModelTrait, Set};
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test app state
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

fn app(state: AppState) -> Router {
    api::api_router(state)
}

// Helper to seed an admin directly (public registration can't mint admins)
async fn create_test_admin(state: &AppState) -> String {
    let now = chrono::Utc::now().to_rfc3339();
    let id = uuid::Uuid::new_v4().to_string();
    let admin = hbnb::models::user::ActiveModel {
        id: Set(id.clone()),
        email: Set("admin@example.com".to_string()),
        password_hash: Set(hash_password("admin_password").unwrap()),
        first_name: Set(Some("Admin".to_string())),
        last_name: Set(None),
        is_admin: Set(true),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };
    admin
        .insert(state.db())
        .await
        .expect("Failed to create admin");
    id
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    payload: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match payload {
        Some(payload) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&payload).unwrap())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

// Register a user through the public endpoint and log them in
async fn register_and_login(app: &Router, email: &str) -> (String, String) {
    let payload = serde_json::json!({
        "email": email,
        "password": "password1",
        "first_name": "Test"
    });
    let (status, json) = send(app, "POST", "/users", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    let user_id = json["user"]["id"].as_str().unwrap().to_string();

    let payload = serde_json::json!({
        "email": email,
        "password": "password1"
    });
    let (status, json) = send(app, "POST", "/auth/login", None, Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    let token = json["access_token"].as_str().unwrap().to_string();

    (user_id, token)
}

#[tokio::test]
async fn test_health_check() {
    let state = setup_test_state().await;
    let app = app(state);

    let (status, json) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "hbnb");
}

#[tokio::test]
async fn test_registration_never_grants_admin() {
    let state = setup_test_state().await;
    let app = app(state);

    // is_admin in the payload is ignored by public registration
    let payload = serde_json::json!({
        "email": "sneaky@example.com",
        "password": "password1",
        "is_admin": true
    });
    let (status, json) = send(&app, "POST", "/users", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["user"]["is_admin"], false);
}

#[tokio::test]
async fn test_full_booking_flow() {
    let state = setup_test_state().await;
    create_test_admin(&state).await;
    let app = app(state);

    // Register a host and a guest
    let (host_id, host_token) = register_and_login(&app, "host@example.com").await;
    let (_guest_id, guest_token) = register_and_login(&app, "guest@example.com").await;

    // Admin logs in
    let payload = serde_json::json!({
        "email": "admin@example.com",
        "password": "admin_password"
    });
    let (status, json) = send(&app, "POST", "/auth/login", None, Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    let admin_token = json["access_token"].as_str().unwrap().to_string();

    // Host creates a place
    let payload = serde_json::json!({
        "name": "Cozy Apartment",
        "description": "A beautiful apartment in the city center",
        "address": "123 Main St, City, Country",
        "price_per_night": 100.50,
        "max_guests": 4,
        "latitude": 40.7128,
        "longitude": -74.0060
    });
    let (status, json) = send(&app, "POST", "/places", Some(&host_token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    let place_id = json["place"]["id"].as_str().unwrap().to_string();
    assert_eq!(json["place"]["owner_id"], host_id.as_str());

    // Admin creates an amenity
    let payload = serde_json::json!({ "name": "WiFi", "description": "Fast fiber" });
    let (status, json) = send(&app, "POST", "/amenities", Some(&admin_token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    let amenity_id = json["id"].as_str().unwrap().to_string();

    // Host attaches the amenity to the place
    let uri = format!("/places/{}/amenities/{}", place_id, amenity_id);
    let (status, _) = send(&app, "POST", &uri, Some(&host_token), None).await;
    assert_eq!(status, StatusCode::OK);

    // Attaching twice is a no-op
    let (status, _) = send(&app, "POST", &uri, Some(&host_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let uri = format!("/places/{}/amenities", place_id);
    let (status, json) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["amenities"][0]["name"], "WiFi");

    // The place detail includes amenity names
    let (status, json) = send(&app, "GET", &format!("/places/{}", place_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["amenities"][0], "WiFi");

    // Guest reviews the place
    let payload = serde_json::json!({
        "place_id": place_id,
        "rating": 5,
        "comment": "Great stay!"
    });
    let (status, json) = send(&app, "POST", "/reviews", Some(&guest_token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    let review_id = json["review"]["id"].as_str().unwrap().to_string();

    // The place's reviews include it
    let uri = format!("/places/{}/reviews", place_id);
    let (status, json) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["reviews"][0]["rating"], 5);

    // Guest updates their review
    let payload = serde_json::json!({ "rating": 4, "comment": "Still good" });
    let uri = format!("/reviews/{}", review_id);
    let (status, json) = send(&app, "PUT", &uri, Some(&guest_token), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["review"]["rating"], 4);

    // Guest deletes their review
    let (status, _) = send(&app, "DELETE", &uri, Some(&guest_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Host detaches the amenity
    let uri = format!("/places/{}/amenities/{}", place_id, amenity_id);
    let (status, _) = send(&app, "DELETE", &uri, Some(&host_token), None).await;
    assert_eq!(status, StatusCode::OK);

    // Admin promotes the host
    let payload = serde_json::json!({ "is_admin": true });
    let uri = format!("/admin/users/{}", host_id);
    let (status, json) = send(&app, "PUT", &uri, Some(&admin_token), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user"]["is_admin"], true);

    // Users list contains admin, host and guest
    let (status, json) = send(&app, "GET", "/users", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 3);
}

#[tokio::test]
async fn test_place_listing_filters_and_pagination() {
    let state = setup_test_state().await;
    let app = app(state);

    let (_, token) = register_and_login(&app, "host@example.com").await;

    let places = [
        ("Cheap Room", 40.0, 2),
        ("Family House", 150.0, 6),
        ("Penthouse", 400.0, 4),
    ];
    for (name, price, guests) in places {
        let payload = serde_json::json!({
            "name": name,
            "description": "d",
            "address": "a",
            "price_per_night": price,
            "max_guests": guests,
            "latitude": 10.0,
            "longitude": 20.0
        });
        let (status, _) = send(&app, "POST", "/places", Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // Unfiltered list
    let (status, json) = send(&app, "GET", "/places", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 3);

    // Price filter
    let (status, json) = send(&app, "GET", "/places?max_price=200", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);

    // Guest capacity filter
    let (status, json) = send(&app, "GET", "/places?min_guests=5", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["places"][0]["name"], "Family House");

    // Text search
    let (status, json) = send(&app, "GET", "/places?q=Penthouse", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);

    // Pagination: total stays 3, page holds 2
    let (status, json) = send(&app, "GET", "/places?limit=2&page=0", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 3);
    assert_eq!(json["places"].as_array().unwrap().len(), 2);

    let (status, json) = send(&app, "GET", "/places?limit=2&page=1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["places"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_user_update_and_delete() {
    let state = setup_test_state().await;
    let app = app(state);

    let (user_id, token) = register_and_login(&app, "user@example.com").await;

    // Update own profile
    let payload = serde_json::json!({
        "first_name": "Updated",
        "last_name": "Name"
    });
    let uri = format!("/users/{}", user_id);
    let (status, json) = send(&app, "PUT", &uri, Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user"]["first_name"], "Updated");
    assert_eq!(json["user"]["last_name"], "Name");

    // Change own password, then log in with it
    let payload = serde_json::json!({ "password": "new_password" });
    let (status, _) = send(&app, "PUT", &uri, Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);

    let payload = serde_json::json!({
        "email": "user@example.com",
        "password": "new_password"
    });
    let (status, _) = send(&app, "POST", "/auth/login", None, Some(payload)).await;
    assert_eq!(status, StatusCode::OK);

    // Delete own account
    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reviews_listing() {
    let state = setup_test_state().await;
    let app = app(state);

    let (_, host_token) = register_and_login(&app, "host@example.com").await;
    let (_, guest_token) = register_and_login(&app, "guest@example.com").await;

    let payload = serde_json::json!({
        "name": "Reviewed Place",
        "description": "d",
        "address": "a",
        "price_per_night": 75.0,
        "max_guests": 3,
        "latitude": 0.0,
        "longitude": 0.0
    });
    let (status, json) = send(&app, "POST", "/places", Some(&host_token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    let place_id = json["place"]["id"].as_str().unwrap().to_string();

    let payload = serde_json::json!({
        "place_id": place_id,
        "rating": 3,
        "comment": "Average"
    });
    let (status, _) = send(&app, "POST", "/reviews", Some(&guest_token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(&app, "GET", "/reviews", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["reviews"][0]["comment"], "Average");
}
