//! Route table.
//!
//! Each submodule exposes a `configure_*_routes()` builder; [`api_router`]
//! merges them behind the auth and no-cache layers.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, header};
use axum::middleware;
use axum::routing::get;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_staff;
use crate::state::AppState;

pub mod documents;
pub mod evaluations;
pub mod metrics;
pub mod projects;
pub mod schedule;
pub mod survey;

/// Multipart framing overhead allowed on top of the configured upload size.
const MULTIPART_SLACK_BYTES: u64 = 64 * 1024;

/// The complete application router.
pub fn api_router(state: Arc<AppState>) -> Router {
    let body_limit = usize::try_from(
        state
            .documents
            .max_upload_bytes()
            .saturating_add(MULTIPART_SLACK_BYTES),
    )
    .unwrap_or(usize::MAX);

    let api = Router::new()
        .merge(projects::configure_project_routes())
        .merge(schedule::configure_schedule_routes())
        .merge(metrics::configure_metric_routes())
        .merge(documents::configure_document_routes())
        .merge(evaluations::configure_evaluation_routes())
        .merge(survey::configure_survey_routes())
        .layer(middleware::from_fn_with_state(Arc::clone(&state), require_staff))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
