//! Dashboard routes: list summary and chart series for one ClickUp list.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::Credential;
use crate::models::dashboard::{DashboardReport, DashboardSummary};
use crate::services::distribution;
use crate::services::summary::summarize;
use crate::AppState;

/// GET /api/v1/lists/{list_id}/summary: aggregated list summary with raw tasks.
pub async fn summary(
    State(state): State<AppState>,
    Credential(credential): Credential,
    Path(list_id): Path<String>,
) -> Result<Json<ApiResponse<DashboardSummary>>, AppError> {
    let snapshot = state.clickup.fetch_tasks(&list_id, &credential).await?;
    Ok(ApiResponse::success(summarize(snapshot)))
}

/// GET /api/v1/lists/{list_id}/dashboard: summary plus every chart series.
pub async fn report(
    State(state): State<AppState>,
    Credential(credential): Credential,
    Path(list_id): Path<String>,
) -> Result<Json<ApiResponse<DashboardReport>>, AppError> {
    let snapshot = state.clickup.fetch_tasks(&list_id, &credential).await?;
    let report = distribution::build_report(summarize(snapshot));
    Ok(ApiResponse::success(report))
}
