//! API implementation for the Kinship HTTP server

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod auth;
pub mod auth_endpoints;
pub mod dashboard;
pub mod dto;
pub mod person_relations;
pub mod persons;

use auth::auth_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        auth_endpoints::signup,
        auth_endpoints::login,
        person_relations::list_person_relations,
        person_relations::create_person_relation,
        person_relations::relationship_types,
        persons::list_persons,
        persons::create_person,
        persons::get_person,
        persons::update_person,
        persons::delete_person,
        dashboard::dashboard_stats,
    ),
    components(
        schemas(
            auth::SignupRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            dto::RelationDto,
            dto::PersonSummaryDto,
            dto::CreateRelationRequest,
            dto::CreatedRelationDto,
            dto::PersonRefDto,
            dto::RelationshipTypesDto,
            dto::PersonDto,
            dto::CreatePersonRequest,
            dto::UpdatePersonRequest,
            dto::DashboardStatsDto,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Service status"),
        (name = "auth", description = "Password signup and login"),
        (name = "person-relations", description = "Relationships between persons"),
        (name = "persons", description = "Person records"),
        (name = "dashboard", description = "Research dashboard statistics"),
    ),
    info(
        title = "Kinship Research API",
        version = "1.0.0",
        description = "REST API for person records and the relationships between them. Every endpoint except health, signup and login requires a bearer token.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the main router with all API endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/health", get(health_check))
        .route("/auth/signup", post(auth_endpoints::signup))
        .route("/auth/login", post(auth_endpoints::login));

    // route_layer so unmatched paths still 404 rather than 401
    let protected = Router::new()
        .route(
            "/person-relations",
            get(person_relations::list_person_relations)
                .post(person_relations::create_person_relation)
                .options(person_relations::relationship_types),
        )
        .route(
            "/persons",
            get(persons::list_persons).post(persons::create_person),
        )
        .route(
            "/persons/{id}",
            get(persons::get_person)
                .put(persons::update_person)
                .delete(persons::delete_person),
        )
        .route("/dashboard/stats", get(dashboard::dashboard_stats))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_router = public.merge(protected).with_state(state);

    let swagger_router = SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new().nest("/api", api_router).merge(swagger_router)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health", body = serde_json::Value)
    )
)]
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let storage = match state.manager.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Storage health check failed: {}", e);
            false
        }
    };

    Json(serde_json::json!({
        "status": "OK",
        "version": kinship::VERSION,
        "storage": storage,
        "signup": state.config.allow_signup,
    }))
}
