use std::env;
use std::time::Duration;

/// Public ClickUp REST endpoint.
pub const DEFAULT_CLICKUP_API_BASE_URL: &str = "https://api.clickup.com/api/v2";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub clickup_api_base_url: String,
    pub clickup_api_key: Option<String>,
    pub clickup_timeout_secs: Option<u64>,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
}

impl AppConfig {
    /// Read configuration from the environment. Every variable is optional;
    /// unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            clickup_api_base_url: env::var("CLICKUP_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CLICKUP_API_BASE_URL.to_string()),
            clickup_api_key: env::var("CLICKUP_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            clickup_timeout_secs: env::var("CLICKUP_TIMEOUT_SECS")
                .ok()
                .and_then(|secs| secs.parse().ok()),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        }
    }

    /// Transport deadline for upstream calls, if one is configured.
    pub fn clickup_timeout(&self) -> Option<Duration> {
        self.clickup_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clickup_api_base_url: DEFAULT_CLICKUP_API_BASE_URL.to_string(),
            clickup_api_key: None,
            clickup_timeout_secs: None,
            host: "0.0.0.0".to_string(),
            port: 3000,
            frontend_url: "http://localhost:5173".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_api() {
        let config = AppConfig::default();
        assert_eq!(config.clickup_api_base_url, "https://api.clickup.com/api/v2");
        assert!(config.clickup_api_key.is_none());
        assert!(config.clickup_timeout().is_none());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn timeout_converts_to_duration() {
        let config = AppConfig {
            clickup_timeout_secs: Some(15),
            ..AppConfig::default()
        };
        assert_eq!(config.clickup_timeout(), Some(Duration::from_secs(15)));
    }
}
