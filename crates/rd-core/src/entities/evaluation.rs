use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EvaluationStage;

/// A scored evaluation of a project.
///
/// Percentage fields are validated to `0..=100` before persistence, see
/// [`crate::validation::EvaluationFields::validate`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Evaluation {
    pub id: String,
    pub project_id: String,
    pub phase: EvaluationStage,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub objectives: String,
    pub patient_outcomes: u8,
    pub compliance: u8,
    pub safety: u8,
    pub efficacy: Option<u8>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
