use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use hbnb::auth::{create_jwt, create_refresh_jwt, decode_jwt, hash_password, verify_password};
use hbnb::infrastructure::AppState;
use hbnb::{api, db};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test app state
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

// Helper to create a user directly in the database
async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    is_admin: bool,
) -> String {
    let now = chrono::Utc::now().to_rfc3339();
    let id = uuid::Uuid::new_v4().to_string();
    let user = hbnb::models::user::ActiveModel {
        id: Set(id.clone()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password(password).unwrap()),
        first_name: Set(None),
        last_name: Set(None),
        is_admin: Set(is_admin),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };
    user.insert(db).await.expect("Failed to create user");
    id
}

fn app(state: AppState) -> Router {
    api::api_router(state)
}

#[tokio::test]
async fn test_password_hashing() {
    let password = "super_secret_password";
    let hash = hash_password(password).expect("Failed to hash password");

    assert_ne!(password, hash);
    assert!(verify_password(password, &hash).unwrap());
    assert!(!verify_password("wrong_password", &hash).unwrap());
}

#[tokio::test]
async fn test_jwt_creation_and_verification() {
    let user_id = "some-user-id";

    let token = create_jwt(user_id, true).expect("Failed to create JWT");
    assert!(!token.is_empty());

    let claims = decode_jwt(&token).expect("Failed to verify JWT");
    assert_eq!(claims.sub, user_id);
    assert!(claims.is_admin);
    assert!(!claims.refresh);

    let refresh_token = create_refresh_jwt(user_id, false).expect("Failed to create refresh JWT");
    let refresh_claims = decode_jwt(&refresh_token).expect("Failed to verify refresh JWT");
    assert!(refresh_claims.refresh);
    assert!(!refresh_claims.is_admin);
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let token = create_jwt("user-id", false).unwrap();

    // Flip a character in the signature
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'a' { 'b' } else { 'a' });

    assert!(decode_jwt(&tampered).is_err());
    assert!(decode_jwt("not.a.token").is_err());
}

#[tokio::test]
async fn test_login_flow() {
    let state = setup_test_state().await;
    create_test_user(state.db(), "admin@example.com", "admin_password", true).await;
    let app = app(state);

    // Success
    let payload = serde_json::json!({
        "email": "admin@example.com",
        "password": "admin_password"
    });
    let req = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["access_token"].as_str().is_some());
    assert!(json["refresh_token"].as_str().is_some());
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 3600);

    // Email lookup is case-insensitive
    let payload = serde_json::json!({
        "email": "Admin@Example.COM",
        "password": "admin_password"
    });
    let req = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Wrong password
    let payload = serde_json::json!({
        "email": "admin@example.com",
        "password": "wrong_password"
    });
    let req = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Unknown user
    let payload = serde_json::json!({
        "email": "nobody@example.com",
        "password": "password"
    });
    let req = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let state = setup_test_state().await;
    let user_id = create_test_user(state.db(), "user@example.com", "password1", false).await;
    let app = app(state);

    // No Authorization header
    let req = Request::builder()
        .uri("/auth/me")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Malformed header
    let req = Request::builder()
        .uri("/auth/me")
        .method("GET")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let req = Request::builder()
        .uri("/auth/me")
        .method("GET")
        .header(header::AUTHORIZATION, "Bearer garbage")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Refresh token is not an access token
    let refresh_token = create_refresh_jwt(&user_id, false).unwrap();
    let req = Request::builder()
        .uri("/auth/me")
        .method("GET")
        .header(header::AUTHORIZATION, format!("Bearer {}", refresh_token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Valid access token
    let token = create_jwt(&user_id, false).unwrap();
    let req = Request::builder()
        .uri("/auth/me")
        .method("GET")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["email"], "user@example.com");
    // Password hash must never be serialized
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn test_refresh_token_flow() {
    let state = setup_test_state().await;
    let user_id = create_test_user(state.db(), "user@example.com", "password1", false).await;
    let app = app(state);

    let refresh_token = create_refresh_jwt(&user_id, false).unwrap();

    // Exchange refresh token for a new access token
    let req = Request::builder()
        .uri("/auth/refresh")
        .method("POST")
        .header(header::AUTHORIZATION, format!("Bearer {}", refresh_token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let access_token = json["access_token"].as_str().unwrap().to_string();

    // The new access token works on protected routes
    let req = Request::builder()
        .uri("/auth/me")
        .method("GET")
        .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // An access token is rejected by /auth/refresh
    let req = Request::builder()
        .uri("/auth/refresh")
        .method("POST")
        .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
