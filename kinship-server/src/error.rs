//! Error handling for the Kinship server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kinship::KinshipError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Present when a relationship type was rejected
    #[serde(rename = "validTypes", skip_serializing_if = "Option::is_none")]
    pub valid_types: Option<Vec<String>>,
}

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// Missing or invalid credentials
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Authenticated but not permitted
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid relationship type '{label}'")]
    InvalidRelationshipType {
        label: String,
        valid_types: Vec<String>,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Logged in full, reported to the client generically
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Auth(_) => StatusCode::UNAUTHORIZED,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::Validation(_)
            | ServerError::InvalidRelationshipType { .. }
            | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Auth(_) => "authentication_error",
            ServerError::Forbidden(_) => "forbidden",
            ServerError::Validation(_) => "validation_error",
            ServerError::InvalidRelationshipType { .. } => "invalid_relationship_type",
            ServerError::NotFound(_) => "not_found",
            ServerError::Conflict(_) => "conflict",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::Internal(_) => "internal_error",
        }
    }
}

impl From<KinshipError> for ServerError {
    fn from(err: KinshipError) -> Self {
        match err {
            KinshipError::Validation(msg) => ServerError::Validation(msg),
            KinshipError::InvalidRelationshipType { label, valid_types } => {
                ServerError::InvalidRelationshipType { label, valid_types }
            }
            KinshipError::NotFound(msg) => ServerError::NotFound(msg),
            KinshipError::Conflict(msg) => ServerError::Conflict(msg),
            KinshipError::Unauthorized(msg) => ServerError::Auth(msg),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.error_type();

        let message = match &self {
            ServerError::Internal(detail) => {
                tracing::error!("Request failed: {}", detail);
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let valid_types = match self {
            ServerError::InvalidRelationshipType { valid_types, .. } => Some(valid_types),
            _ => None,
        };

        let error_response = ErrorResponse {
            error: error.to_string(),
            message,
            valid_types,
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Helper function to create a bad request error
pub fn bad_request(message: &str) -> ServerError {
    ServerError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServerError::Auth("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServerError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServerError::InvalidRelationshipType {
                label: "alien".into(),
                valid_types: vec![]
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_storage_errors_become_internal() {
        let err: ServerError =
            KinshipError::Storage(kinship::storage::StorageError::Query("boom".into())).into();
        assert!(matches!(err, ServerError::Internal(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_carries_valid_types_only_when_rejected() {
        let rejected = ErrorResponse {
            error: "validation_error".to_string(),
            message: "Invalid relationship type 'alien'".to_string(),
            valid_types: Some(vec!["father".to_string()]),
        };
        let body = serde_json::to_value(&rejected).unwrap();
        assert_eq!(body["validTypes"][0], "father");

        let plain = ErrorResponse {
            error: "not_found".to_string(),
            message: "Person 'p' not found".to_string(),
            valid_types: None,
        };
        let body = serde_json::to_value(&plain).unwrap();
        assert_eq!(body.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_not_found_maps_through() {
        let err: ServerError = KinshipError::NotFound("Person 'p' not found".into()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_type(), "not_found");
    }
}
