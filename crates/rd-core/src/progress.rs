//! Project completion calculation.
//!
//! A project with both boundary dates reports schedule progress: how far
//! `today` lies between start and end. Without both dates, progress falls back
//! to the share of completed milestones.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Milestone counts for one project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MilestoneTally {
    pub completed: u32,
    pub total: u32,
}

/// Completion percentage (`0..=100`) of a project as of `today`.
///
/// Integer arithmetic throughout, truncating toward zero.
#[must_use]
pub fn completion_percent(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
    milestones: MilestoneTally,
) -> u8 {
    match (start_date, end_date) {
        (Some(start), Some(end)) => schedule_percent(start, end, today),
        _ => milestone_percent(milestones),
    }
}

/// Elapsed share of the `start..end` span, clamped to `0..=100`.
///
/// A non-positive span counts as done once `today` reaches `start`.
#[must_use]
pub fn schedule_percent(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> u8 {
    let total_days = (end - start).num_days();
    let elapsed_days = (today - start).num_days();

    if total_days <= 0 {
        return if elapsed_days >= 0 { 100 } else { 0 };
    }

    let percent = (elapsed_days.saturating_mul(100) / total_days).clamp(0, 100);
    u8::try_from(percent).unwrap_or(100)
}

/// Completed share of milestones, or 0 when there are none.
#[must_use]
pub fn milestone_percent(tally: MilestoneTally) -> u8 {
    if tally.total == 0 {
        return 0;
    }
    let completed = u64::from(tally.completed.min(tally.total));
    let percent = completed * 100 / u64::from(tally.total);
    u8::try_from(percent).unwrap_or(100)
}
