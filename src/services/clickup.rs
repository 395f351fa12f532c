//! ClickUp REST client for pulling a list's tasks.
//!
//! One GET per call, no retries and no pagination: the first page ClickUp
//! returns is treated as the whole list.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde_json::Value;

use crate::config::AppConfig;
use crate::errors::FetchError;
use crate::models::task::{TaskSnapshot, TasksResponse};

/// Thin wrapper around a shared `reqwest::Client` bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ClickUpClient {
    http: reqwest::Client,
    base_url: String,
}

impl ClickUpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from configuration, applying the optional timeout.
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.clickup_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = Self {
            http: builder.build()?,
            base_url: config
                .clickup_api_base_url
                .trim_end_matches('/')
                .to_string(),
        };
        client.base()?;
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every task of `list_id`, authenticating with `credential`.
    ///
    /// Both inputs are trimmed and must be non-empty; their format is left
    /// for ClickUp to judge. The list ID always fills exactly one path
    /// segment, so it can never reach a different endpoint.
    pub async fn fetch_tasks(
        &self,
        list_id: &str,
        credential: &str,
    ) -> Result<TaskSnapshot, FetchError> {
        let list_id = list_id.trim();
        let credential = credential.trim();
        if list_id.is_empty() {
            return Err(FetchError::MissingListId);
        }
        if credential.is_empty() {
            return Err(FetchError::MissingCredential);
        }

        let url = self.tasks_url(list_id)?;
        tracing::info!(list_id = %list_id, "Fetching ClickUp tasks");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, credential)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(&body, status.as_u16());
            tracing::warn!(
                list_id = %list_id,
                status = status.as_u16(),
                error = %message,
                "ClickUp rejected task request"
            );
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: TasksResponse = serde_json::from_slice(&body)?;
        let snapshot =
            TaskSnapshot::new(parsed.tasks.unwrap_or_default()).ok_or(FetchError::EmptyResult)?;

        tracing::debug!(
            list_id = %list_id,
            task_count = snapshot.task_count(),
            "Fetched ClickUp tasks"
        );
        Ok(snapshot)
    }

    fn base(&self) -> Result<Url, FetchError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        if url.cannot_be_a_base() {
            return Err(FetchError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(url)
    }

    /// `{base}/list/{list_id}/task` with the list ID percent-encoded.
    fn tasks_url(&self, list_id: &str) -> Result<Url, FetchError> {
        // Dot segments are dropped rather than encoded by `Url`.
        if matches!(list_id, "." | "..") {
            return Err(FetchError::InvalidListId);
        }
        let mut url = self.base()?;
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["list", list_id, "task"]);
        Ok(url)
    }
}

/// Best message from an error body: `err`, then `message`, then `ECODE`,
/// then a generic line naming the HTTP status.
pub fn error_message(body: &[u8], status: u16) -> String {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    parsed
        .as_ref()
        .and_then(|json| {
            ["err", "message", "ECODE"]
                .into_iter()
                .find_map(|key| message_field(json.get(key)?))
        })
        .unwrap_or_else(|| format!("Failed to fetch tasks from ClickUp (Status: {status})"))
}

fn message_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_err_field() {
        let body = br#"{"err":"Token invalid","message":"ignored","ECODE":"OAUTH_025"}"#;
        assert_eq!(error_message(body, 401), "Token invalid");
    }

    #[test]
    fn falls_back_to_message_then_ecode() {
        assert_eq!(
            error_message(br#"{"message":"List not found"}"#, 404),
            "List not found"
        );
        assert_eq!(
            error_message(br#"{"err":"","ECODE":"ITEM_015"}"#, 400),
            "ITEM_015"
        );
    }

    #[test]
    fn synthesizes_message_from_status() {
        assert_eq!(
            error_message(b"{}", 404),
            "Failed to fetch tasks from ClickUp (Status: 404)"
        );
        assert_eq!(
            error_message(b"<html>Bad Gateway</html>", 502),
            "Failed to fetch tasks from ClickUp (Status: 502)"
        );
        assert_eq!(
            error_message(br#"{"err":null}"#, 500),
            "Failed to fetch tasks from ClickUp (Status: 500)"
        );
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = ClickUpClient::new("http://localhost:9000/api/v2/");
        assert_eq!(client.base_url(), "http://localhost:9000/api/v2");
    }

    #[test]
    fn from_config_uses_configured_base() {
        let config = AppConfig {
            clickup_api_base_url: "http://127.0.0.1:1/api/v2".to_string(),
            clickup_timeout_secs: Some(5),
            ..AppConfig::default()
        };
        let client = ClickUpClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:1/api/v2");
    }

    #[test]
    fn list_id_fills_a_single_path_segment() {
        let client = ClickUpClient::new("http://localhost:9000/api/v2/");
        assert_eq!(
            client.tasks_url("901").unwrap().as_str(),
            "http://localhost:9000/api/v2/list/901/task"
        );
        assert_eq!(
            client.tasks_url("901/task?x=").unwrap().as_str(),
            "http://localhost:9000/api/v2/list/901%2Ftask%3Fx=/task"
        );
        assert_eq!(
            client.tasks_url("../team/7").unwrap().path(),
            "/api/v2/list/..%2Fteam%2F7/task"
        );
        assert!(matches!(
            client.tasks_url(".."),
            Err(FetchError::InvalidListId)
        ));
    }

    #[test]
    fn bare_host_base_url() {
        let client = ClickUpClient::new("http://localhost:9000");
        assert_eq!(
            client.tasks_url("901").unwrap().as_str(),
            "http://localhost:9000/list/901/task"
        );
    }

    #[test]
    fn from_config_rejects_unparseable_base() {
        let config = AppConfig {
            clickup_api_base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            ClickUpClient::from_config(&config),
            Err(FetchError::InvalidBaseUrl(_))
        ));
    }

    #[tokio::test]
    async fn rejects_blank_inputs_without_calling_out() {
        let client = ClickUpClient::new("http://127.0.0.1:1");
        assert!(matches!(
            client.fetch_tasks("   ", "pk_123").await,
            Err(FetchError::MissingListId)
        ));
        assert!(matches!(
            client.fetch_tasks("901", " ").await,
            Err(FetchError::MissingCredential)
        ));
    }
}
