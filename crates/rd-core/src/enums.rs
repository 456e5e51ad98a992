//! Status enums and kind tags for the research dashboard.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! which is also the representation stored in SQL. `label()` returns the
//! human-readable name shown in dashboards and Gantt task labels.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a research project.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planned,
    Active,
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    /// Every status, in dashboard display order.
    pub const ALL: [Self; 5] = [
        Self::Planned,
        Self::Active,
        Self::OnHold,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Active => "Active",
            Self::OnHold => "On Hold",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PhaseType
// ---------------------------------------------------------------------------

/// Kind of dated evaluation stage on a project timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PhaseType {
    Baseline,
    Midline,
    Endline,
    Inception,
    Design,
    DataCollection,
    Analysis,
    Reporting,
    Dissemination,
}

impl PhaseType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Midline => "midline",
            Self::Endline => "endline",
            Self::Inception => "inception",
            Self::Design => "design",
            Self::DataCollection => "data_collection",
            Self::Analysis => "analysis",
            Self::Reporting => "reporting",
            Self::Dissemination => "dissemination",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Baseline => "Baseline Evaluation",
            Self::Midline => "Midline Evaluation",
            Self::Endline => "Endline Evaluation",
            Self::Inception => "Inception",
            Self::Design => "Design",
            Self::DataCollection => "Data Collection",
            Self::Analysis => "Analysis",
            Self::Reporting => "Reporting",
            Self::Dissemination => "Dissemination",
        }
    }
}

impl fmt::Display for PhaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MilestoneStatus
// ---------------------------------------------------------------------------

/// Status of a project milestone.
///
/// ```text
/// pending ──(user)──▶ completed ──(user revert)──▶ pending
///    │  ▲                 ▲
///    │  └──(save: due date no longer past)
///    ▼                    │
/// overdue ──(user)────────┘
///    (save: due date past, not completed)
/// ```
///
/// `completed` is only left through an explicit user edit; the save-time
/// overdue check never touches it. See [`crate::milestone::normalize_milestone`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    #[default]
    Pending,
    Completed,
    Overdue,
}

impl MilestoneStatus {
    /// States reachable from `self`, either by a user edit or by the save-time check.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Completed, Self::Overdue],
            Self::Overdue => &[Self::Completed, Self::Pending],
            Self::Completed => &[Self::Pending],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self == next || self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EvaluationStage
// ---------------------------------------------------------------------------

/// Stage an evaluation record is in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStage {
    #[default]
    Planning,
    DataCollection,
    Analysis,
    Reporting,
    Completed,
}

impl EvaluationStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::DataCollection => "data_collection",
            Self::Analysis => "analysis",
            Self::Reporting => "reporting",
            Self::Completed => "completed",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::DataCollection => "Data Collection",
            Self::Analysis => "Analysis",
            Self::Reporting => "Reporting",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for EvaluationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TimelineKind
// ---------------------------------------------------------------------------

/// Which timeline table a task or reorder item refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    Phase,
    Milestone,
}

impl TimelineKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phase => "phase",
            Self::Milestone => "milestone",
        }
    }
}

impl fmt::Display for TimelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskState
// ---------------------------------------------------------------------------

/// Schedule state of a Gantt task relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Completed,
    Overdue,
    InProgress,
}

impl TaskState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::InProgress => "in_progress",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_matches_as_str() {
        for status in ProjectStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::String(status.as_str().into()));
        }
        let json = serde_json::to_value(PhaseType::DataCollection).unwrap();
        assert_eq!(json, "data_collection");
        let json = serde_json::to_value(EvaluationStage::DataCollection).unwrap();
        assert_eq!(json, "data_collection");
    }

    #[test]
    fn completed_milestone_only_reverts_to_pending() {
        assert!(MilestoneStatus::Completed.can_transition_to(MilestoneStatus::Pending));
        assert!(!MilestoneStatus::Completed.can_transition_to(MilestoneStatus::Overdue));
        assert!(MilestoneStatus::Overdue.can_transition_to(MilestoneStatus::Completed));
        assert!(MilestoneStatus::Pending.can_transition_to(MilestoneStatus::Pending));
    }

    #[test]
    fn defaults_match_new_records() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::Planned);
        assert_eq!(MilestoneStatus::default(), MilestoneStatus::Pending);
        assert_eq!(EvaluationStage::default(), EvaluationStage::Planning);
    }

    #[test]
    fn phase_labels_are_human_readable() {
        assert_eq!(PhaseType::Baseline.label(), "Baseline Evaluation");
        assert_eq!(PhaseType::DataCollection.label(), "Data Collection");
    }

    #[test]
    fn timeline_kind_serializes_snake_case() {
        assert_eq!(TimelineKind::Phase.to_string(), "phase");
        assert_eq!(
            serde_json::to_string(&TimelineKind::Milestone).unwrap(),
            "\"milestone\""
        );
    }
}
