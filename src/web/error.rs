//! API error handling for the catalog Web API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::CatalogError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Not found (404).
    NotFound,
    /// Method not allowed (405).
    MethodNotAllowed,
    /// Validation error (422) - for field-level validation errors.
    ValidationError,
    /// Unprocessable entity (422).
    UnprocessableEntity,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failure envelope body.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Always `false`.
    pub success: bool,
    /// Human-readable message.
    pub error: String,
    /// Error code.
    pub code: ErrorCode,
    /// Field-level validation error details (only present for validation errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, Vec<String>>>,
}

/// Response extension marking a failure envelope.
///
/// The status-mode middleware only rewrites responses carrying it.
#[derive(Debug, Clone, Copy)]
pub struct FailureEnvelope;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a method not allowed error.
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MethodNotAllowed, message)
    }

    /// Create an unprocessable entity error.
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnprocessableEntity, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Create a validation error from validator::ValidationErrors.
    ///
    /// The envelope message is the first failing field's message; every
    /// message is listed under `details`.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut details: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect();
            details.insert(field.to_string(), messages);
        }

        let message = details
            .values()
            .flatten()
            .next()
            .cloned()
            .unwrap_or_else(|| "Validation failed".to_string());

        Self {
            code: ErrorCode::ValidationError,
            message,
            details: Some(details),
        }
    }

    /// Error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorEnvelope {
            success: false,
            error: self.message,
            code: self.code,
            details: self.details,
        };
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(FailureEnvelope);
        response
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => ApiError::not_found(err.to_string()),
            CatalogError::InvalidStructure(msg) => ApiError::unprocessable(msg),
            CatalogError::InvalidInput(msg) => ApiError::bad_request(msg),
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ErrorCode::ValidationError.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::UnprocessableEntity.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_catalog_error() {
        let err = ApiError::from(CatalogError::NotFound("Node".to_string()));
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Node not found");

        let err = ApiError::from(CatalogError::InvalidStructure(
            "Parent must be a folder".to_string(),
        ));
        assert_eq!(err.code(), ErrorCode::UnprocessableEntity);
        assert_eq!(err.message(), "Parent must be a folder");

        let err = ApiError::from(CatalogError::InvalidInput("Invalid node type".to_string()));
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert_eq!(err.message(), "Invalid node type");
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let err = ApiError::from(CatalogError::Database("no such table: nodes".to_string()));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "An internal error occurred");
    }

    #[test]
    fn test_validation_error_message() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "name",
            ValidationError::new("length").with_message("name is too long".into()),
        );

        let err = ApiError::from_validation_errors(errors);
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(err.message(), "name is too long");
        assert_eq!(
            err.details.unwrap().get("name").unwrap(),
            &vec!["name is too long".to_string()]
        );
    }

    #[test]
    fn test_into_response_is_marked() {
        let response = ApiError::not_found("Node not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<FailureEnvelope>().is_some());
    }
}
