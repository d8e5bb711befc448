//! Bearer token authentication for the Kinship API

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::ServerError, state::AppState};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identity-provider subject; mapped to a local user on every request
    pub sub: String,
    pub username: String,
    pub role: String,
    /// Issued at timestamp
    pub iat: usize,
    /// Expiration timestamp
    pub exp: usize,
}

/// The local user a request runs as
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Local user id; owner of the persons this request may touch
    pub user_id: String,
    pub external_id: String,
    pub username: String,
    pub role: String,
}

/// User signup request
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Username (must be unique)
    pub username: String,
    /// Password, at least 8 characters
    pub password: String,
    pub email: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Authentication response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// JWT token
    pub token: String,
    /// Local user ID
    pub user_id: String,
    pub username: String,
    pub role: String,
    /// Token expiration timestamp
    pub expires_at: i64,
}

/// Rejects requests without a valid bearer token and attaches the resolved
/// local user to the request. Runs before any body extractor.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let auth_header = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| ServerError::Auth("Missing authorization header".to_string()))?;

    let claims = validate_jwt_token(auth_header.token(), &state.config.jwt_secret)?;

    let user = state
        .manager
        .resolve_local_user(&claims.sub, &claims.username)
        .await?;

    tracing::debug!(user_id = %user.id, path = %request.uri().path(), "Authenticated request");

    request.extensions_mut().insert(AuthContext {
        user_id: user.id,
        external_id: user.external_id,
        username: user.username,
        role: user.role.to_string(),
    });

    Ok(next.run(request).await)
}

/// Validate a JWT token and return its claims
pub fn validate_jwt_token(token: &str, secret: &str) -> Result<Claims, ServerError> {
    let decoding_key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| ServerError::Auth(format!("Invalid token: {}", e)))?;

    Ok(token_data.claims)
}

/// Generate a JWT token for an identity subject
pub fn generate_jwt_token(
    subject: &str,
    username: &str,
    role: &str,
    secret: &str,
    expiration_hours: u64,
) -> Result<(String, i64), ServerError> {
    let now = chrono::Utc::now().timestamp() as usize;
    let exp = now + (expiration_hours * 3600) as usize;

    let claims = Claims {
        sub: subject.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        iat: now,
        exp,
    };

    let encoding_key = EncodingKey::from_secret(secret.as_ref());
    let token = encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| ServerError::Internal(format!("Failed to generate token: {}", e)))?;

    Ok((token, exp as i64))
}
