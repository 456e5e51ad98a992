//! Progress metric endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use rd_core::entities::ProgressMetric;
use rd_core::responses::SuccessResponse;
use rd_core::validation::MetricFields;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn configure_metric_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/projects/:id/metrics",
            get(list_metrics).post(record_metric),
        )
        .route(
            "/api/projects/:id/metrics/:metric_id",
            delete(delete_metric),
        )
}

async fn list_metrics(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<ProgressMetric>>, ApiError> {
    state.service().get_project(&project_id).await?;
    Ok(Json(state.service().list_metrics(&project_id).await?))
}

async fn record_metric(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
    ApiJson(fields): ApiJson<MetricFields>,
) -> Result<(StatusCode, Json<ProgressMetric>), ApiError> {
    let metric = state.service().record_metric(&project_id, &fields).await?;
    Ok((StatusCode::CREATED, Json(metric)))
}

async fn delete_metric(
    State(state): State<Arc<AppState>>,
    Path((project_id, metric_id)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.service().delete_metric(&project_id, &metric_id).await?;
    Ok(Json(SuccessResponse::with_message("Metric deleted")))
}
