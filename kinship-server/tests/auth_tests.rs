//! Tests for signup, login and token handling

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use jsonwebtoken::{DecodingKey, Validation, decode};
use kinship_server::{
    api::auth::{Claims, generate_jwt_token},
    config::ServerConfig,
    state::AppState,
};

const SECRET: &str = "test-secret-key-for-jwt-token-generation";

async fn create_test_server(allow_signup: bool) -> (TestServer, Arc<AppState>) {
    let config = kinship::config::ConfigBuilder::new()
        .with_memory_storage()
        .with_password_hash_cost(4)
        .build()
        .expect("Failed to create config");

    let manager = kinship::init(config)
        .await
        .expect("Failed to initialize manager");

    let server_config = ServerConfig {
        jwt_secret: SECRET.to_string(),
        allow_signup,
        ..Default::default()
    };

    let state = Arc::new(AppState::new(manager, server_config));
    let server = TestServer::new(kinship_server::create_router(state.clone())).unwrap();

    (server, state)
}

#[tokio::test]
async fn test_jwt_token_claims_structure() {
    let (token, expires_at) =
        generate_jwt_token("subject-9", "claimstest", "admin", SECRET, 24).unwrap();

    let decoding_key = DecodingKey::from_secret(SECRET.as_ref());
    let token_data = decode::<Claims>(&token, &decoding_key, &Validation::default()).unwrap();

    assert_eq!(token_data.claims.sub, "subject-9");
    assert_eq!(token_data.claims.username, "claimstest");
    assert_eq!(token_data.claims.role, "admin");
    assert_eq!(token_data.claims.exp as i64, expires_at);
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[tokio::test]
async fn test_signup_endpoint() {
    let (server, _state) = create_test_server(true).await;

    let response = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({
            "username": "historian",
            "password": "password123",
            "email": "historian@example.org"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["username"], "historian");
    assert_eq!(body["role"], "researcher");
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let (server, _state) = create_test_server(true).await;
    let request = serde_json::json!({ "username": "dup", "password": "password123" });

    server
        .post("/api/auth/signup")
        .json(&request)
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/api/auth/signup")
        .json(&request)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_validation() {
    let (server, _state) = create_test_server(true).await;

    server
        .post("/api/auth/signup")
        .json(&serde_json::json!({ "username": "shorty", "password": "short" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_disabled() {
    let (server, _state) = create_test_server(false).await;

    server
        .post("/api/auth/signup")
        .json(&serde_json::json!({ "username": "late", "password": "password123" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_and_use_token() {
    let (server, state) = create_test_server(true).await;

    let signup: serde_json::Value = server
        .post("/api/auth/signup")
        .json(&serde_json::json!({ "username": "reader", "password": "password123" }))
        .await
        .json();

    let response = server
        .post("/api/auth/login")
        .json(&serde_json::json!({ "username": "reader", "password": "password123" }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["userId"], signup["userId"]);
    let token = body["token"].as_str().unwrap();

    // The token's subject resolves back to the same local user
    let claims = kinship_server::api::auth::validate_jwt_token(token, SECRET).unwrap();
    let user = state
        .manager
        .resolve_local_user(&claims.sub, &claims.username)
        .await
        .unwrap();
    assert_eq!(serde_json::Value::from(user.id), body["userId"]);

    server
        .get("/api/persons")
        .add_header("Authorization", format!("Bearer {}", token))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let (server, _state) = create_test_server(true).await;

    server
        .post("/api/auth/login")
        .json(&serde_json::json!({ "username": "ghost", "password": "password123" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let (server, _state) = create_test_server(true).await;

    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "subject-old".to_string(),
        username: "old".to_string(),
        role: "researcher".to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(SECRET.as_ref()),
    )
    .unwrap();

    server
        .get("/api/persons")
        .add_header("Authorization", format!("Bearer {}", token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_endpoints_need_no_token() {
    let (server, _state) = create_test_server(true).await;

    server.get("/api/health").await.assert_status_ok();
    server.get("/api/persons").await.assert_status(StatusCode::UNAUTHORIZED);
}
