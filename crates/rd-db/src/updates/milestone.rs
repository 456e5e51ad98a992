//! Milestone update builder.

use chrono::NaiveDate;
use serde::Serialize;

use rd_core::entities::ProjectMilestone;
use rd_core::enums::MilestoneStatus;
use rd_core::validation::MilestoneFields;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MilestoneUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MilestoneStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<Option<NaiveDate>>,
}

impl MilestoneUpdate {
    /// The full field set after applying this update to `current`.
    #[must_use]
    pub fn merged_with(&self, current: &ProjectMilestone) -> MilestoneFields {
        MilestoneFields {
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            due_date: self.due_date.unwrap_or(current.due_date),
            status: self.status.unwrap_or(current.status),
            completed_date: self.completed_date.unwrap_or(current.completed_date),
        }
    }
}

impl From<MilestoneFields> for MilestoneUpdate {
    fn from(fields: MilestoneFields) -> Self {
        Self {
            name: Some(fields.name),
            description: Some(fields.description),
            due_date: Some(fields.due_date),
            status: Some(fields.status),
            completed_date: Some(fields.completed_date),
        }
    }
}

pub struct MilestoneUpdateBuilder(MilestoneUpdate);

impl Default for MilestoneUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MilestoneUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(MilestoneUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.0.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn status(mut self, status: MilestoneStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn completed_date(mut self, completed_date: Option<NaiveDate>) -> Self {
        self.0.completed_date = Some(completed_date);
        self
    }

    #[must_use]
    pub fn build(self) -> MilestoneUpdate {
        self.0
    }
}
