use std::sync::Arc;

use axum_test::TestServer;
use http::{Method, StatusCode};
use kinship_server::{api::auth::generate_jwt_token, config::ServerConfig, create_router};
use serde_json::{Value, json};

const SECRET: &str = "integration-test-secret";

/// Helper function to create a test server over in-memory storage
async fn create_test_server() -> TestServer {
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
        ..Default::default()
    };

    let state = Arc::new(kinship_server::AppState::new(manager, server_config));
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

fn bearer(subject: &str) -> String {
    let (token, _) = generate_jwt_token(subject, subject, "researcher", SECRET, 1).unwrap();
    format!("Bearer {}", token)
}

async fn create_person(server: &TestServer, auth: &str, first: &str, last: &str) -> String {
    let response = server
        .post("/api/persons")
        .add_header("Authorization", auth.to_string())
        .json(&json!({ "firstName": first, "lastName": last }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

async fn relate(
    server: &TestServer,
    auth: &str,
    from: &str,
    to: &str,
    kind: &str,
) -> axum_test::TestResponse {
    server
        .post("/api/person-relations")
        .add_header("Authorization", auth.to_string())
        .json(&json!({ "fromPersonId": from, "toPersonId": to, "relationType": kind }))
        .await
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "OK");
    assert_eq!(json["storage"], true);
}

#[tokio::test]
async fn test_openapi_spec_available() {
    let server = create_test_server().await;

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["info"]["title"], "Kinship Research API");
    assert!(json["paths"]["/api/person-relations"].is_object());
}

mod person_relations {
    use super::*;

    #[tokio::test]
    async fn test_unauthenticated_requests_rejected_before_validation() {
        let server = create_test_server().await;

        // No personId, which would otherwise be a 400
        server
            .get("/api/person-relations")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        // Invalid body, which would otherwise be a 400
        server
            .post("/api/person-relations")
            .json(&json!({ "relationType": "alien" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .method(Method::OPTIONS, "/api/person-relations")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_rejected() {
        let server = create_test_server().await;
        let (token, _) = generate_jwt_token("someone", "someone", "researcher", "wrong", 1).unwrap();

        server
            .get("/api/person-relations?personId=abc")
            .add_header("Authorization", format!("Bearer {}", token))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_father_child_perspectives() {
        let server = create_test_server().await;
        let auth = bearer("subject-a");

        let ada = create_person(&server, &auth, "Ada", "Byron").await;
        let george = create_person(&server, &auth, "George", "Byron").await;

        let response = relate(&server, &auth, &ada, &george, "father").await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        assert_eq!(created["relationType"], "father");
        assert_eq!(created["reciprocalType"], "child");
        assert_eq!(created["fromPerson"]["name"], "Ada Byron");
        assert_eq!(created["toPerson"]["id"], george.as_str());

        let from_ada: Value = server
            .get(&format!("/api/person-relations?personId={}", ada))
            .add_header("Authorization", auth.clone())
            .await
            .json();
        assert_eq!(from_ada[0]["personId"], george.as_str());
        assert_eq!(from_ada[0]["relationType"], "father");
        assert_eq!(from_ada[0]["isOutgoing"], true);

        let from_george: Value = server
            .get(&format!("/api/person-relations?personId={}", george))
            .add_header("Authorization", auth.clone())
            .await
            .json();
        assert_eq!(from_george[0]["personId"], ada.as_str());
        assert_eq!(from_george[0]["personName"], "Ada Byron");
        assert_eq!(from_george[0]["relationType"], "child");
        assert_eq!(from_george[0]["isOutgoing"], false);
        assert_eq!(from_george[0]["otherPerson"]["firstName"], "Ada");
    }

    #[tokio::test]
    async fn test_missing_person_id_is_bad_request() {
        let server = create_test_server().await;

        server
            .get("/api/person-relations")
            .add_header("Authorization", bearer("subject-a"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_fields_are_bad_request() {
        let server = create_test_server().await;

        let response = server
            .post("/api/person-relations")
            .add_header("Authorization", bearer("subject-a"))
            .json(&json!({ "fromPersonId": "x" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("toPersonId"));
    }

    #[tokio::test]
    async fn test_invalid_type_lists_valid_types() {
        let server = create_test_server().await;
        let auth = bearer("subject-a");
        let a = create_person(&server, &auth, "Anne", "Lee").await;
        let b = create_person(&server, &auth, "Bill", "Lee").await;

        let response = relate(&server, &auth, &a, &b, "alien").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        let valid: Vec<String> = serde_json::from_value(body["validTypes"].clone()).unwrap();
        let expected: Vec<String> = kinship::relationships::RelationshipTypeRegistry::global()
            .labels()
            .into_iter()
            .map(str::to_string)
            .collect();
        assert_eq!(valid, expected);
    }

    #[tokio::test]
    async fn test_duplicate_in_either_order_conflicts() {
        let server = create_test_server().await;
        let auth = bearer("subject-a");
        let a = create_person(&server, &auth, "Anne", "Lee").await;
        let b = create_person(&server, &auth, "Bill", "Lee").await;

        relate(&server, &auth, &a, &b, "brother")
            .await
            .assert_status(StatusCode::CREATED);
        relate(&server, &auth, &a, &b, "brother")
            .await
            .assert_status(StatusCode::CONFLICT);
        relate(&server, &auth, &b, &a, "sister")
            .await
            .assert_status(StatusCode::CONFLICT);

        let listed: Value = server
            .get(&format!("/api/person-relations?personId={}", b))
            .add_header("Authorization", auth.clone())
            .await
            .json();
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["relationType"], "sibling");
    }

    #[tokio::test]
    async fn test_person_of_another_user_is_not_found() {
        let server = create_test_server().await;
        let alice = bearer("subject-alice");
        let bob = bearer("subject-bob");

        let mine = create_person(&server, &alice, "Anne", "Lee").await;
        let theirs = create_person(&server, &bob, "Carl", "Moss").await;

        relate(&server, &alice, &mine, &theirs, "friend")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        relate(&server, &alice, &mine, "no-such-person", "friend")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_options_returns_registry() {
        let server = create_test_server().await;

        let response = server
            .method(Method::OPTIONS, "/api/person-relations")
            .add_header("Authorization", bearer("subject-a"))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let types = body["relationshipTypes"].as_array().unwrap();
        assert_eq!(
            types.len(),
            kinship::relationships::RelationshipTypeRegistry::global().len()
        );
        assert_eq!(body["reciprocals"]["father"], "child");
        assert_eq!(body["reciprocals"]["friend"], "friend");
    }
}

mod persons {
    use super::*;

    #[tokio::test]
    async fn test_person_lifecycle() {
        let server = create_test_server().await;
        let auth = bearer("subject-a");

        let id = create_person(&server, &auth, "Mary", "Shelley").await;

        let updated: Value = server
            .put(&format!("/api/persons/{}", id))
            .add_header("Authorization", auth.clone())
            .json(&json!({ "birthPlace": "London" }))
            .await
            .json();
        assert_eq!(updated["birthPlace"], "London");
        assert_eq!(updated["firstName"], "Mary");

        let listed: Value = server
            .get("/api/persons")
            .add_header("Authorization", auth.clone())
            .await
            .json();
        assert_eq!(listed.as_array().unwrap().len(), 1);

        server
            .delete(&format!("/api/persons/{}", id))
            .add_header("Authorization", auth.clone())
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/persons/{}", id))
            .add_header("Authorization", auth.clone())
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_person_requires_first_name() {
        let server = create_test_server().await;

        server
            .post("/api/persons")
            .add_header("Authorization", bearer("subject-a"))
            .json(&json!({ "lastName": "Nobody" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_other_users_person_hidden() {
        let server = create_test_server().await;
        let id = create_person(&server, &bearer("subject-alice"), "Anne", "Lee").await;

        server
            .get(&format!("/api/persons/{}", id))
            .add_header("Authorization", bearer("subject-bob"))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .delete(&format!("/api/persons/{}", id))
            .add_header("Authorization", bearer("subject-bob"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_dashboard_stats() {
    let server = create_test_server().await;
    let auth = bearer("subject-a");
    let a = create_person(&server, &auth, "Anne", "Lee").await;
    let b = create_person(&server, &auth, "Bill", "Lee").await;
    relate(&server, &auth, &a, &b, "husband")
        .await
        .assert_status(StatusCode::CREATED);

    let stats: Value = server
        .get("/api/dashboard/stats")
        .add_header("Authorization", auth)
        .await
        .json();

    assert_eq!(stats["personCount"], 2);
    assert_eq!(stats["relationCount"], 1);
    assert_eq!(stats["relationsByType"]["husband"], 1);
    assert_eq!(stats["relationsByCategory"]["marital"], 1);
}

#[tokio::test]
async fn test_rocksdb_backed_server() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");

    let config = kinship::config::ConfigBuilder::new()
        .with_rocksdb_storage(temp_dir.path())
        .build()
        .expect("Failed to create config");
    let manager = kinship::init(config)
        .await
        .expect("Failed to initialize manager");

    let server_config = ServerConfig {
        jwt_secret: SECRET.to_string(),
        ..Default::default()
    };
    let state = Arc::new(kinship_server::AppState::new(manager, server_config));
    let server = TestServer::new(create_router(state)).unwrap();

    let auth = bearer("subject-disk");
    create_person(&server, &auth, "Rosa", "Parks").await;

    let listed: Value = server
        .get("/api/persons")
        .add_header("Authorization", auth)
        .await
        .json();
    assert_eq!(listed[0]["firstName"], "Rosa");
}
