//! Response types returned as JSON by the HTTP API and the `rdash` CLI.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    EvaluationPhase, ProgressMetric, ProjectMilestone, ResearchDocument, ResearchProject,
};
use crate::enums::{MilestoneStatus, ProjectStatus};
use crate::timeline::TimelineTask;

/// A project row on the dashboard with its computed aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub project: ResearchProject,
    /// Phases not yet marked completed.
    pub active_phases: u32,
    pub completed_milestones: u32,
    pub total_milestones: u32,
    pub completion_percent: u8,
}

/// Number of projects in one status.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub label: String,
    pub count: u32,
}

/// Filters applied to the dashboard project list, echoed back to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardFilter {
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub project_name: Option<String>,
}

/// Pagination position of a dashboard response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PageInfo {
    pub number: u32,
    pub num_pages: u32,
    pub page_size: u32,
    /// Projects matching the filter, across all pages.
    pub total_items: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Response from `GET /api/dashboard` and `rdash dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardResponse {
    pub projects: Vec<ProjectSummary>,
    pub page: PageInfo,
    /// Counts over all projects, ignoring filters.
    pub status_counts: Vec<StatusCount>,
    pub total_projects: u32,
    /// Distinct project titles, sorted.
    pub project_names: Vec<String>,
    pub filter: DashboardFilter,
}

/// Response from `GET /api/projects/:id/overview`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProjectOverview {
    pub summary: ProjectSummary,
    pub documents: Vec<ResearchDocument>,
    pub metrics: Vec<ProgressMetric>,
    pub evaluator_names: Vec<String>,
}

/// Response from `GET /api/projects/:id/timeline`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectTimeline {
    pub project: ResearchProject,
    /// Ordered by `sort_order`, then start date.
    pub phases: Vec<EvaluationPhase>,
    /// Ordered by `sort_order`, then due date.
    pub milestones: Vec<ProjectMilestone>,
    pub tasks: Vec<TimelineTask>,
}

/// Response from `PATCH /api/milestones/:id/status`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MilestoneStatusResponse {
    pub success: bool,
    pub status: MilestoneStatus,
    pub status_display: String,
    pub completed_date: Option<NaiveDate>,
}

impl From<&ProjectMilestone> for MilestoneStatusResponse {
    fn from(milestone: &ProjectMilestone) -> Self {
        Self {
            success: true,
            status: milestone.status,
            status_display: milestone.status.label().to_string(),
            completed_date: milestone.completed_date,
        }
    }
}

/// Generic acknowledgement for mutations without a richer payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}
