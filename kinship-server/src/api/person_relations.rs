//! Person relation endpoints

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    api::auth::AuthContext,
    api::dto::{
        CreateRelationRequest, CreatedRelationDto, PersonRelationsQuery, RelationDto,
        RelationshipTypesDto,
    },
    error::{ServerResult, bad_request},
    state::AppState,
};

/// List a person's relations from that person's perspective
#[utoipa::path(
    get,
    path = "/api/person-relations",
    tag = "person-relations",
    params(PersonRelationsQuery),
    responses(
        (status = 200, description = "Relations sorted by type, then the other person's first name", body = Vec<RelationDto>),
        (status = 400, description = "personId missing", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_person_relations(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<PersonRelationsQuery>,
) -> ServerResult<Json<Vec<RelationDto>>> {
    let person_id = query
        .person_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| bad_request("personId is required"))?;

    let relations = state
        .manager
        .list_relations(&person_id, &auth.user_id)
        .await?;

    Ok(Json(relations.into_iter().map(RelationDto::from).collect()))
}

/// Create a directed relation between two of the caller's persons
#[utoipa::path(
    post,
    path = "/api/person-relations",
    tag = "person-relations",
    request_body = CreateRelationRequest,
    responses(
        (status = 201, description = "Relation created", body = CreatedRelationDto),
        (status = 400, description = "Missing fields or unknown relation type; the latter carries validTypes", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Person missing or not owned", body = crate::error::ErrorResponse),
        (status = 409, description = "The pair is already related", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_person_relation(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<CreateRelationRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<CreatedRelationDto>)> {
    let Json(request) = payload.map_err(|e| bad_request(&e.body_text()))?;

    let created = state
        .manager
        .create_relation(&auth.user_id, request.into())
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Valid relationship types and their reciprocals
#[utoipa::path(
    options,
    path = "/api/person-relations",
    tag = "person-relations",
    responses(
        (status = 200, description = "Registry contents", body = RelationshipTypesDto),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
    )
)]
pub async fn relationship_types(State(state): State<Arc<AppState>>) -> Json<RelationshipTypesDto> {
    Json(state.manager.relationship_types().into())
}
