//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::estimator::EstimateError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Malformed request (e.g. no usable `Host` header)
    BadRequest(String),
    /// A refraction field failed to parse
    Estimate(EstimateError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Estimate(e) => {
                let details = match &e {
                    EstimateError::InvalidNumber { field, value } => {
                        format!("field '{}' is not a number: {:?}", field, value)
                    }
                    EstimateError::Overflow { eye } => {
                        format!("{:?} equivalent sphere is out of numeric range", eye)
                    }
                };
                (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("INVALID_INPUT", e.to_string()).with_details(details),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<EstimateError> for AppError {
    fn from(err: EstimateError) -> Self {
        AppError::Estimate(err)
    }
}
