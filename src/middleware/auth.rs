//! ClickUp credential extractor for Axum handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::{AppError, FetchError};
use crate::AppState;

/// Opaque ClickUp API key for the current request.
///
/// Taken verbatim from the `Authorization` header, or from
/// `CLICKUP_API_KEY` when the header is absent or blank. The value is
/// forwarded to ClickUp untouched; no `Bearer` prefix is expected.
#[derive(Clone)]
pub struct Credential(pub String);

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl FromRequestParts<AppState> for Credential {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get("Authorization") {
            Some(value) => value
                .to_str()
                .map_err(|_| {
                    AppError::Validation("Authorization header must be plain text".to_string())
                })?
                .trim(),
            None => "",
        };

        if !header.is_empty() {
            return Ok(Credential(header.to_string()));
        }

        state
            .config
            .clickup_api_key
            .clone()
            .map(Credential)
            .ok_or(AppError::Fetch(FetchError::MissingCredential))
    }
}
