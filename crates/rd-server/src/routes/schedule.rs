//! Phases, milestones and the project timeline.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use rd_core::entities::{EvaluationPhase, ProjectMilestone};
use rd_core::enums::MilestoneStatus;
use rd_core::milestone::StatusPatch;
use rd_core::responses::{MilestoneStatusResponse, ProjectTimeline, SuccessResponse};
use rd_core::timeline::TimelineOrderItem;
use rd_core::validation::{MilestoneFields, PhaseFields};
use rd_db::updates::milestone::MilestoneUpdate;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn configure_schedule_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/projects/:id/timeline", get(project_timeline))
        .route("/api/projects/:id/phases", post(create_phase))
        .route(
            "/api/projects/:id/phases/:phase_id",
            put(update_phase).delete(delete_phase),
        )
        .route("/api/phases/:id/status", patch(update_phase_status))
        .route("/api/projects/:id/milestones", post(create_milestone))
        .route(
            "/api/projects/:id/milestones/:milestone_id",
            put(update_milestone).delete(delete_milestone),
        )
        .route("/api/milestones/:id/status", patch(update_milestone_status))
        .route("/api/timeline/order", post(reorder_timeline))
}

async fn project_timeline(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProjectTimeline>, ApiError> {
    Ok(Json(state.service().project_timeline(&id).await?))
}

async fn create_phase(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
    ApiJson(fields): ApiJson<PhaseFields>,
) -> Result<(StatusCode, Json<EvaluationPhase>), ApiError> {
    let phase = state.service().create_phase(&project_id, &fields).await?;
    Ok((StatusCode::CREATED, Json(phase)))
}

async fn update_phase(
    State(state): State<Arc<AppState>>,
    Path((project_id, phase_id)): Path<(String, String)>,
    ApiJson(fields): ApiJson<PhaseFields>,
) -> Result<Json<EvaluationPhase>, ApiError> {
    let phase = state
        .service()
        .update_phase(&project_id, &phase_id, &fields)
        .await?;
    Ok(Json(phase))
}

async fn delete_phase(
    State(state): State<Arc<AppState>>,
    Path((project_id, phase_id)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state.service().delete_phase(&project_id, &phase_id).await?;
    Ok(Json(SuccessResponse::with_message("Phase deleted")))
}

#[derive(Debug, Deserialize)]
struct PhaseStatusBody {
    #[serde(default)]
    status: String,
}

/// `{"status": "completed"}` marks the phase done; any other value reopens it.
async fn update_phase_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<PhaseStatusBody>,
) -> Result<Json<Value>, ApiError> {
    let phase = state
        .service()
        .set_phase_completed(&id, body.status == "completed")
        .await?;
    Ok(Json(json!({"success": true, "completed": phase.completed})))
}

async fn create_milestone(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
    ApiJson(fields): ApiJson<MilestoneFields>,
) -> Result<(StatusCode, Json<ProjectMilestone>), ApiError> {
    let milestone = state
        .service()
        .create_milestone(&project_id, &fields)
        .await?;
    Ok((StatusCode::CREATED, Json(milestone)))
}

async fn update_milestone(
    State(state): State<Arc<AppState>>,
    Path((project_id, milestone_id)): Path<(String, String)>,
    ApiJson(fields): ApiJson<MilestoneFields>,
) -> Result<Json<ProjectMilestone>, ApiError> {
    let milestone = state
        .service()
        .update_milestone(&project_id, &milestone_id, &MilestoneUpdate::from(fields))
        .await?;
    Ok(Json(milestone))
}

async fn delete_milestone(
    State(state): State<Arc<AppState>>,
    Path((project_id, milestone_id)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .service()
        .delete_milestone(&project_id, &milestone_id)
        .await?;
    Ok(Json(SuccessResponse::with_message("Milestone deleted")))
}

#[derive(Debug, Default, Deserialize)]
struct MilestoneStatusBody {
    #[serde(default)]
    status: Option<MilestoneStatus>,
    #[serde(default)]
    completed_date: Option<NaiveDate>,
}

async fn update_milestone_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<MilestoneStatusBody>,
) -> Result<Json<MilestoneStatusResponse>, ApiError> {
    let milestone = state
        .service()
        .patch_milestone_status(
            &id,
            StatusPatch {
                status: body.status,
                completed_date: body.completed_date,
            },
        )
        .await?;
    Ok(Json(MilestoneStatusResponse::from(&milestone)))
}

#[derive(Debug, Deserialize)]
struct ReorderBody {
    #[serde(default)]
    items: Vec<TimelineOrderItem>,
}

async fn reorder_timeline(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<ReorderBody>,
) -> Result<Json<Value>, ApiError> {
    let updated = state.service().reorder_timeline(&body.items).await?;
    Ok(Json(json!({"success": true, "updated": updated})))
}
