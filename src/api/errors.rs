use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::errors::MarketError;

/// API error type with HTTP status code and message
///
/// Serialized as `{"error": message, "code": code}`, plus `"errors"` when
/// field-level validation messages are attached.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub code: &'static str,
    pub errors: Vec<String>,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code,
            errors: Vec::new(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_input", message)
    }

    /// Creates a 401 Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }
}

impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        let status = match &err {
            MarketError::InvalidInput(_)
            | MarketError::DomainRejected(_)
            | MarketError::WeakPassword
            | MarketError::InvalidId
            | MarketError::InvalidStatus
            | MarketError::InvalidFilter(_)
            | MarketError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            MarketError::Unauthorized => StatusCode::UNAUTHORIZED,
            MarketError::Forbidden => StatusCode::FORBIDDEN,
            MarketError::NotFound => StatusCode::NOT_FOUND,
            MarketError::Conflict => StatusCode::CONFLICT,
            MarketError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            MarketError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose store or internal details to clients
        let message = match &err {
            MarketError::StoreUnavailable(detail) => {
                tracing::error!(error = %detail, "Store unavailable");
                "Service temporarily unavailable, please retry".to_string()
            }
            MarketError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let errors = match err {
            MarketError::ValidationFailed(ref errors) => errors.clone(),
            _ => Vec::new(),
        };

        Self {
            status,
            message,
            code: err.code(),
            errors,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        MarketError::InvalidFilter(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = if self.errors.is_empty() {
            json!({ "error": self.message, "code": self.code })
        } else {
            json!({ "error": self.message, "code": self.code, "errors": self.errors })
        };

        (self.status, Json(body)).into_response()
    }
}
