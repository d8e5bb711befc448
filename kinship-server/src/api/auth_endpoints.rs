//! Password signup and login

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use kinship::models::User;

use crate::{
    api::auth::{AuthResponse, LoginRequest, SignupRequest, generate_jwt_token},
    error::{ServerError, ServerResult},
    state::AppState,
};

/// User signup endpoint
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    summary = "Register a new user account",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Invalid input or username taken", body = crate::error::ErrorResponse),
        (status = 403, description = "Signup disabled", body = crate::error::ErrorResponse),
    )
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> ServerResult<(StatusCode, Json<AuthResponse>)> {
    if !state.config.allow_signup {
        return Err(ServerError::Forbidden("User signup is disabled".to_string()));
    }

    let user = state
        .manager
        .register_user(&request.username, &request.password, request.email)
        .await?;

    Ok((StatusCode::CREATED, Json(issue_token(&state, &user)?)))
}

/// User login endpoint
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    summary = "Exchange a username and password for a token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ServerResult<Json<AuthResponse>> {
    let user = state
        .manager
        .authenticate(&request.username, &request.password)
        .await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(issue_token(&state, &user)?))
}

fn issue_token(state: &AppState, user: &User) -> ServerResult<AuthResponse> {
    let role = user.role.to_string();
    let (token, expires_at) = generate_jwt_token(
        &user.external_id,
        &user.username,
        &role,
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;

    Ok(AuthResponse {
        token,
        user_id: user.id.clone(),
        username: user.username.clone(),
        role,
        expires_at,
    })
}
