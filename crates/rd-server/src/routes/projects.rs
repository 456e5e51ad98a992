//! Dashboard and project endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use rd_core::entities::ResearchProject;
use rd_core::enums::ProjectStatus;
use rd_core::identity::StaffIdentity;
use rd_core::responses::{DashboardFilter, DashboardResponse, ProjectOverview, SuccessResponse};
use rd_core::validation::ProjectFields;
use rd_db::updates::project::ProjectUpdate;
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn configure_project_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/dashboard", get(dashboard))
        .route("/api/projects", post(create_project))
        .route(
            "/api/projects/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/api/projects/:id/overview", get(project_overview))
}

/// Raw dashboard query; every value arrives as text from the filter form.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub project_name: Option<String>,
    pub page: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_date(label: &str, value: Option<&String>, errors: &mut Vec<String>) -> Option<NaiveDate> {
    let raw = non_blank(value)?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| errors.push(format!("{label} must be a date (YYYY-MM-DD)")))
        .ok()
}

impl DashboardQuery {
    /// Blank fields are absent; malformed ones are reported together.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for an unknown status or malformed date.
    pub fn to_filter(&self) -> Result<DashboardFilter, ApiError> {
        let mut errors = Vec::new();
        let status = non_blank(self.status.as_ref()).and_then(|raw| {
            let found = ProjectStatus::ALL.into_iter().find(|s| s.as_str() == raw);
            if found.is_none() {
                errors.push(format!("Unknown status '{raw}'"));
            }
            found
        });
        let date_from = parse_date("Date from", self.date_from.as_ref(), &mut errors);
        let date_to = parse_date("Date to", self.date_to.as_ref(), &mut errors);

        if errors.is_empty() {
            Ok(DashboardFilter {
                status,
                date_from,
                date_to,
                project_name: non_blank(self.project_name.as_ref()).map(String::from),
            })
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let filter = query.to_filter()?;
    let response = state
        .service()
        .dashboard(&filter, query.page.as_deref())
        .await?;
    Ok(Json(response))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    identity: Option<Extension<StaffIdentity>>,
    ApiJson(fields): ApiJson<ProjectFields>,
) -> Result<(StatusCode, Json<ResearchProject>), ApiError> {
    let lead = identity.as_ref().map(|Extension(staff)| staff.username.as_str());
    let project = state.service().create_project(&fields, lead).await?;
    tracing::info!(id = %project.id, lead = ?lead, "project created");
    Ok((StatusCode::CREATED, Json(project)))
}

async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ResearchProject>, ApiError> {
    Ok(Json(state.service().get_project(&id).await?))
}

async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(fields): ApiJson<ProjectFields>,
) -> Result<Json<ResearchProject>, ApiError> {
    let project = state
        .service()
        .update_project(&id, &ProjectUpdate::from(fields))
        .await?;
    Ok(Json(project))
}

async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let files = state.service().delete_project(&id).await?;
    for file in &files {
        if let Err(e) = state.documents.remove(file).await {
            tracing::warn!(path = %file, error = %e, "could not remove document file");
        }
    }
    tracing::info!(%id, files = files.len(), "project deleted");
    Ok(Json(SuccessResponse::with_message("Project deleted")))
}

async fn project_overview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProjectOverview>, ApiError> {
    Ok(Json(state.service().project_overview(&id).await?))
}
