//! Timeline aggregation for Gantt-style views.
//!
//! Phases and milestones are merged into one chronological task list. A phase
//! needs both boundary dates to appear; a milestone needs a due date and spans
//! a single day.

use chrono::{Days, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{EvaluationPhase, ProjectMilestone};
use crate::enums::{TaskState, TimelineKind};

/// One bar or marker on the project Gantt chart.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimelineTask {
    /// `phase-<id>` or `milestone-<id>`.
    pub id: String,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub percent_complete: u8,
    pub kind: TimelineKind,
    pub sort_order: i64,
    pub duration_days: i64,
    pub state: TaskState,
}

impl TimelineTask {
    fn new(
        id: String,
        label: String,
        (start, end): (NaiveDate, NaiveDate),
        done: bool,
        kind: TimelineKind,
        sort_order: i64,
        today: NaiveDate,
    ) -> Self {
        let percent_complete = if done { 100 } else { 0 };
        let state = if done {
            TaskState::Completed
        } else if end < today {
            TaskState::Overdue
        } else {
            TaskState::InProgress
        };
        Self {
            id,
            label,
            start,
            end,
            percent_complete,
            kind,
            sort_order,
            duration_days: (end - start).num_days(),
            state,
        }
    }
}

/// Task for a phase, if it has both boundary dates.
#[must_use]
pub fn phase_task(phase: &EvaluationPhase, today: NaiveDate) -> Option<TimelineTask> {
    let (start, end) = (phase.start_date?, phase.end_date?);
    Some(TimelineTask::new(
        format!("phase-{}", phase.id),
        phase.phase_type.label().to_string(),
        (start, end),
        phase.completed,
        TimelineKind::Phase,
        phase.sort_order,
        today,
    ))
}

/// Task for a milestone, if it has a due date.
#[must_use]
pub fn milestone_task(milestone: &ProjectMilestone, today: NaiveDate) -> Option<TimelineTask> {
    let due = milestone.due_date?;
    let end = due.checked_add_days(Days::new(1)).unwrap_or(due);
    Some(TimelineTask::new(
        format!("milestone-{}", milestone.id),
        format!("★ {}", milestone.name),
        (due, end),
        milestone.status.is_completed(),
        TimelineKind::Milestone,
        milestone.sort_order,
        today,
    ))
}

/// Merge phases and milestones into a single task list.
///
/// Ordered by start date, then `sort_order`, then phases before milestones,
/// then ID, so the output is deterministic for equal dates.
#[must_use]
pub fn build_timeline(
    phases: &[EvaluationPhase],
    milestones: &[ProjectMilestone],
    today: NaiveDate,
) -> Vec<TimelineTask> {
    let mut tasks: Vec<TimelineTask> = phases
        .iter()
        .filter_map(|phase| phase_task(phase, today))
        .chain(milestones.iter().filter_map(|m| milestone_task(m, today)))
        .collect();

    tasks.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.sort_order.cmp(&b.sort_order))
            .then(kind_rank(a.kind).cmp(&kind_rank(b.kind)))
            .then_with(|| a.id.cmp(&b.id))
    });
    tasks
}

/// One entry of a drag-and-drop reorder request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimelineOrderItem {
    #[serde(rename = "type", alias = "kind")]
    pub kind: TimelineKind,
    /// Entity ID, or the task ID (`phase-<id>`) the Gantt chart knows it by.
    pub id: String,
    pub order: i64,
}

impl TimelineOrderItem {
    /// The entity ID with any task-ID prefix removed.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        self.id
            .strip_prefix(self.kind.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .unwrap_or(&self.id)
    }
}

const fn kind_rank(kind: TimelineKind) -> u8 {
    match kind {
        TimelineKind::Phase => 0,
        TimelineKind::Milestone => 1,
    }
}
