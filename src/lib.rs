pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use services::clickup::ClickUpClient;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub clickup: ClickUpClient,
}

impl AppState {
    pub fn new(config: config::AppConfig) -> Result<Self, errors::FetchError> {
        let clickup = ClickUpClient::from_config(&config)?;
        Ok(Self { config, clickup })
    }
}
