//! Person management endpoints, scoped to the caller

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    api::auth::AuthContext,
    api::dto::{CreatePersonRequest, PersonDto, UpdatePersonRequest},
    error::{ServerResult, bad_request},
    state::AppState,
};

/// List the caller's persons
#[utoipa::path(
    get,
    path = "/api/persons",
    tag = "persons",
    responses(
        (status = 200, description = "Persons ordered by last then first name", body = Vec<PersonDto>),
    )
)]
pub async fn list_persons(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> ServerResult<Json<Vec<PersonDto>>> {
    let persons = state.manager.list_persons(&auth.user_id).await?;
    Ok(Json(persons.into_iter().map(PersonDto::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/persons",
    tag = "persons",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonDto),
        (status = 400, description = "firstName missing", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_person(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    payload: Result<Json<CreatePersonRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<PersonDto>)> {
    let Json(request) = payload.map_err(|e| bad_request(&e.body_text()))?;
    let person = request.into_person(&auth.user_id)?;

    let created = state.manager.create_person(&auth.user_id, person).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get,
    path = "/api/persons/{id}",
    tag = "persons",
    params(("id" = String, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person details", body = PersonDto),
        (status = 404, description = "Person missing or not owned", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_person(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ServerResult<Json<PersonDto>> {
    let person = state.manager.get_person(&id, &auth.user_id).await?;
    Ok(Json(person.into()))
}

/// Partially update a person; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/api/persons/{id}",
    tag = "persons",
    params(("id" = String, Path, description = "Person ID")),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Person updated", body = PersonDto),
        (status = 404, description = "Person missing or not owned", body = crate::error::ErrorResponse),
    )
)]
pub async fn update_person(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePersonRequest>, JsonRejection>,
) -> ServerResult<Json<PersonDto>> {
    let Json(request) = payload.map_err(|e| bad_request(&e.body_text()))?;

    let person = state
        .manager
        .update_person(&id, &auth.user_id, request.into())
        .await?;

    Ok(Json(person.into()))
}

/// Delete a person and every relation touching it
#[utoipa::path(
    delete,
    path = "/api/persons/{id}",
    tag = "persons",
    params(("id" = String, Path, description = "Person ID")),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 404, description = "Person missing or not owned", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    state.manager.delete_person(&id, &auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
