use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::MilestoneStatus;

/// A dated project deliverable with a completion status.
///
/// Persisted milestones always satisfy the save invariant enforced by
/// [`crate::milestone::normalize_milestone`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectMilestone {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub status: MilestoneStatus,
    pub completed_date: Option<NaiveDate>,
    pub sort_order: i64,
}
