//! Project update builder.

use chrono::NaiveDate;
use serde::Serialize;

use rd_core::entities::ResearchProject;
use rd_core::enums::ProjectStatus;
use rd_core::validation::ProjectFields;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<Option<String>>,
}

impl ProjectUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.dashboard_url.is_none()
    }

    /// The full field set after applying this update to `current`.
    #[must_use]
    pub fn merged_with(&self, current: &ResearchProject) -> ProjectFields {
        ProjectFields {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| current.description.clone()),
            status: self.status.unwrap_or(current.status),
            start_date: self.start_date.unwrap_or(current.start_date),
            end_date: self.end_date.unwrap_or(current.end_date),
            dashboard_url: self
                .dashboard_url
                .clone()
                .unwrap_or_else(|| current.dashboard_url.clone()),
        }
    }
}

/// A full replacement (HTTP `PUT`) touches every editable field.
impl From<ProjectFields> for ProjectUpdate {
    fn from(fields: ProjectFields) -> Self {
        Self {
            title: Some(fields.title),
            description: Some(fields.description),
            status: Some(fields.status),
            start_date: Some(fields.start_date),
            end_date: Some(fields.end_date),
            dashboard_url: Some(fields.dashboard_url),
        }
    }
}

pub struct ProjectUpdateBuilder(ProjectUpdate);

impl Default for ProjectUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ProjectUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn start_date(mut self, start_date: Option<NaiveDate>) -> Self {
        self.0.start_date = Some(start_date);
        self
    }

    #[must_use]
    pub fn end_date(mut self, end_date: Option<NaiveDate>) -> Self {
        self.0.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn dashboard_url(mut self, dashboard_url: Option<String>) -> Self {
        self.0.dashboard_url = Some(dashboard_url);
        self
    }

    #[must_use]
    pub fn build(self) -> ProjectUpdate {
        self.0
    }
}
