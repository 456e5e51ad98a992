//! Survey reporting data and county boundaries.
//!
//! Filters arrive as repeated query keys (`county=Kitui&county=Nairobi`).

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use rd_survey::{
    Dimension, FilterOptions, FilterSelection, GroupedLoad, PatientLoad, average_patient_loads,
    dependent_filters, mean_by,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

pub fn configure_survey_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/geo/counties", get(county_boundaries))
        .route("/api/survey/filters", get(survey_filters))
        .route("/api/survey/patient-load", get(patient_load))
}

async fn county_boundaries(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let collection = state.boundaries.get().await.map_err(ApiError::Boundaries)?;
    Ok(Json(Value::clone(&collection)))
}

#[derive(Debug, Serialize)]
struct FiltersResponse {
    filters: FilterOptions,
    facility_count: usize,
}

async fn survey_filters(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<FiltersResponse>, ApiError> {
    let data = state.survey.get().await?;
    let (filters, rows) = dependent_filters(&data.table, &FilterSelection::from_pairs(pairs))?;
    Ok(Json(FiltersResponse {
        filters,
        facility_count: rows.len(),
    }))
}

#[derive(Debug, Serialize)]
struct PatientLoadResponse {
    filters: FilterOptions,
    facilities: Vec<PatientLoad>,
    by_county: Vec<GroupedLoad>,
    by_level: Vec<GroupedLoad>,
    by_ownership: Vec<GroupedLoad>,
}

async fn patient_load(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PatientLoadResponse>, ApiError> {
    let data = state.survey.get().await?;
    let (filters, rows) = dependent_filters(&data.table, &FilterSelection::from_pairs(pairs))?;
    let facilities = average_patient_loads(&rows);
    Ok(Json(PatientLoadResponse {
        filters,
        by_county: mean_by(&facilities, Dimension::County),
        by_level: mean_by(&facilities, Dimension::Level),
        by_ownership: mean_by(&facilities, Dimension::Ownership),
        facilities,
    }))
}
