//! Unified error handling with consistent API response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Error detail in the API response envelope.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// Consistent JSON envelope for all API responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            data: Some(data),
            error: None,
        })
    }

    /// Wrap an error in the envelope.
    pub fn error(code: &str, message: &str) -> Json<Self> {
        Json(Self {
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
        })
    }
}

/// Failure to obtain a task list from ClickUp.
///
/// The `Display` output is the message shown to the person who entered the
/// list ID; none of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Please enter a list ID")]
    MissingListId,

    #[error("Please enter your ClickUp API key")]
    MissingCredential,

    #[error("List ID is not valid")]
    InvalidListId,

    #[error("ClickUp API URL is not valid: {0}")]
    InvalidBaseUrl(String),

    #[error("Could not reach ClickUp: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("No tasks found in this list")]
    EmptyResult,

    #[error("Unexpected response from ClickUp: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// HTTP status returned by ClickUp, when the failure came from the API itself.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the caller supplied blank or unusable identifiers.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingListId | Self::MissingCredential | Self::InvalidListId
        )
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl AppError {
    /// Check if this error represents an empty upstream list.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::Fetch(FetchError::EmptyResult))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Fetch(err) => {
                let (status, code) = match err {
                    FetchError::MissingListId
                    | FetchError::MissingCredential
                    | FetchError::InvalidListId => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                    FetchError::InvalidBaseUrl(url) => {
                        tracing::error!(url = %url, "ClickUp base URL misconfigured");
                        (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
                    }
                    FetchError::Network(e) => {
                        tracing::warn!(error = %e, "ClickUp unreachable");
                        (StatusCode::BAD_GATEWAY, "NETWORK_ERROR")
                    }
                    FetchError::Api { status: 401 | 403, .. } => {
                        (StatusCode::UNAUTHORIZED, "UPSTREAM_UNAUTHORIZED")
                    }
                    FetchError::Api { status: 404, .. } => {
                        (StatusCode::NOT_FOUND, "UPSTREAM_NOT_FOUND")
                    }
                    FetchError::Api { .. } => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
                    FetchError::EmptyResult => (StatusCode::NOT_FOUND, "NO_TASKS"),
                    FetchError::Decode(e) => {
                        tracing::error!(error = %e, "Malformed ClickUp response");
                        (StatusCode::BAD_GATEWAY, "INVALID_RESPONSE")
                    }
                };
                (status, code, err.to_string())
            }
        };

        (status, ApiResponse::<()>::error(code, &message)).into_response()
    }
}
