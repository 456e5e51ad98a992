//! Evaluator roster and evaluation records.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rd_core::entities::{Evaluation, Evaluator};
use rd_core::responses::SuccessResponse;
use rd_core::validation::{EvaluationFields, EvaluatorFields};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn configure_evaluation_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/evaluators",
            get(list_evaluators).post(create_evaluator),
        )
        .route(
            "/api/evaluators/:id",
            get(get_evaluator)
                .put(update_evaluator)
                .delete(delete_evaluator),
        )
        .route(
            "/api/evaluations",
            get(list_evaluations).post(create_evaluation),
        )
        .route(
            "/api/evaluations/:id",
            get(get_evaluation)
                .put(update_evaluation)
                .delete(delete_evaluation),
        )
}

async fn list_evaluators(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Evaluator>>, ApiError> {
    Ok(Json(state.service().list_evaluators().await?))
}

async fn create_evaluator(
    State(state): State<Arc<AppState>>,
    ApiJson(fields): ApiJson<EvaluatorFields>,
) -> Result<(StatusCode, Json<Evaluator>), ApiError> {
    let evaluator = state.service().create_evaluator(&fields).await?;
    Ok((StatusCode::CREATED, Json(evaluator)))
}

async fn get_evaluator(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Evaluator>, ApiError> {
    Ok(Json(state.service().get_evaluator(&id).await?))
}

async fn update_evaluator(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(fields): ApiJson<EvaluatorFields>,
) -> Result<Json<Evaluator>, ApiError> {
    Ok(Json(state.service().update_evaluator(&id, &fields).await?))
}

async fn delete_evaluator(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.service().delete_evaluator(&id).await?;
    Ok(Json(SuccessResponse::with_message("Evaluator deleted")))
}

#[derive(Debug, Default, Deserialize)]
struct EvaluationQuery {
    project_id: Option<String>,
}

async fn list_evaluations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EvaluationQuery>,
) -> Result<Json<Vec<Evaluation>>, ApiError> {
    let project_id = query.project_id.as_deref().filter(|p| !p.is_empty());
    Ok(Json(state.service().list_evaluations(project_id).await?))
}

async fn create_evaluation(
    State(state): State<Arc<AppState>>,
    ApiJson(fields): ApiJson<EvaluationFields>,
) -> Result<(StatusCode, Json<Evaluation>), ApiError> {
    let evaluation = state.service().create_evaluation(&fields).await?;
    Ok((StatusCode::CREATED, Json(evaluation)))
}

async fn get_evaluation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Evaluation>, ApiError> {
    Ok(Json(state.service().get_evaluation(&id).await?))
}

async fn update_evaluation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(fields): ApiJson<EvaluationFields>,
) -> Result<Json<Evaluation>, ApiError> {
    Ok(Json(state.service().update_evaluation(&id, &fields).await?))
}

async fn delete_evaluation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.service().delete_evaluation(&id).await?;
    Ok(Json(SuccessResponse::with_message("Evaluation deleted")))
}
