//! Save-time invariant for project milestones.
//!
//! Every write of a milestone passes through [`normalize_milestone`]:
//! - `completed` requires a completion date, defaulting to today;
//! - any other status clears the completion date;
//! - a non-completed milestone past its due date becomes `overdue`;
//! - an `overdue` milestone whose due date is no longer past (or was cleared)
//!   becomes `pending`.

use chrono::NaiveDate;

use crate::enums::MilestoneStatus;

/// Status and completion date after the save invariant has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedMilestone {
    pub status: MilestoneStatus,
    pub completed_date: Option<NaiveDate>,
}

/// Apply the milestone save invariant.
#[must_use]
pub fn normalize_milestone(
    status: MilestoneStatus,
    completed_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    today: NaiveDate,
) -> NormalizedMilestone {
    if status.is_completed() {
        return NormalizedMilestone {
            status,
            completed_date: Some(completed_date.unwrap_or(today)),
        };
    }

    let status = match due_date {
        Some(due) if due < today => MilestoneStatus::Overdue,
        _ if status == MilestoneStatus::Overdue => MilestoneStatus::Pending,
        _ => status,
    };

    NormalizedMilestone {
        status,
        completed_date: None,
    }
}

/// Fields of a partial status update. `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusPatch {
    pub status: Option<MilestoneStatus>,
    pub completed_date: Option<NaiveDate>,
}

/// Merge a partial status update into the stored state, then normalize.
#[must_use]
pub fn apply_status_patch(
    current_status: MilestoneStatus,
    current_completed_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    patch: StatusPatch,
    today: NaiveDate,
) -> NormalizedMilestone {
    let status = patch.status.unwrap_or(current_status);
    let completed_date = patch.completed_date.or(current_completed_date);
    normalize_milestone(status, completed_date, due_date, today)
}
