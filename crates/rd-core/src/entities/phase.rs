use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PhaseType;

/// A dated stage of project evaluation (baseline, midline, ...).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvaluationPhase {
    pub id: String,
    pub project_id: String,
    pub phase_type: PhaseType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub completed: bool,
    pub notes: String,
    pub sort_order: i64,
}
