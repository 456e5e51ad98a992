//! Input field sets and their validation rules.
//!
//! Each `*Fields` struct is the full set of user-editable fields for one
//! entity, deserialized from HTTP bodies or assembled from CLI flags. Creates
//! and full updates both go through `validate()`, which reports every problem
//! at once as a `CoreError::Validation`.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EvaluationStage, MilestoneStatus, PhaseType, ProjectStatus};
use crate::errors::CoreError;

fn finish(errors: Vec<String>) -> Result<(), CoreError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(errors))
    }
}

fn require_text(errors: &mut Vec<String>, field: &str, value: &str, max_len: usize) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(format!("{field} is required"));
    } else if trimmed.chars().count() > max_len {
        errors.push(format!("{field} must be at most {max_len} characters"));
    }
}

fn check_date_order(
    errors: &mut Vec<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.push("End date cannot be before start date".to_string());
        }
    }
}

/// Whether `value` looks like an absolute http(s) URL.
#[must_use]
pub fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty() && !host.starts_with('/') && !host.contains(' '))
}

/// Minimal structural email check: one `@`, non-empty local part, dotted domain.
#[must_use]
pub fn is_email(value: &str) -> bool {
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !value.contains(char::is_whitespace)
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectFields {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub dashboard_url: Option<String>,
}

impl ProjectFields {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` listing every invalid field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "Title", &self.title, 200);
        check_date_order(&mut errors, self.start_date, self.end_date);
        if let Some(url) = self.dashboard_url.as_deref().filter(|u| !u.is_empty()) {
            if !is_http_url(url) || url.len() > 500 {
                errors.push("Dashboard URL must be a valid http(s) URL".to_string());
            }
        }
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PhaseFields {
    pub phase_type: PhaseType,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
}

impl PhaseFields {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the end date precedes the start date.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = Vec::new();
        check_date_order(&mut errors, self.start_date, self.end_date);
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Milestone
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MilestoneFields {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: MilestoneStatus,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
}

impl MilestoneFields {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the name is missing or too long.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "Name", &self.name, 100);
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MetricFields {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub target: Option<f64>,
    pub date_recorded: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl MetricFields {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a missing name or non-finite numbers.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "Name", &self.name, 100);
        if !self.value.is_finite() {
            errors.push("Value must be a finite number".to_string());
        }
        if self.target.is_some_and(|t| !t.is_finite()) {
            errors.push("Target must be a finite number".to_string());
        }
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvaluatorFields {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub project_ids: Vec<String>,
}

impl EvaluatorFields {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` listing every invalid field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = Vec::new();
        require_text(&mut errors, "Name", &self.name, 100);
        if self.phone.chars().count() > 20 {
            errors.push("Phone must be at most 20 characters".to_string());
        }
        if !is_email(self.email.trim()) {
            errors.push("Enter a valid email address".to_string());
        }
        finish(errors)
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EvaluationFields {
    pub project_id: String,
    #[serde(default)]
    pub phase: EvaluationStage,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub objectives: String,
    #[serde(default)]
    pub patient_outcomes: i64,
    #[serde(default)]
    pub compliance: i64,
    #[serde(default)]
    pub safety: i64,
    #[serde(default)]
    pub efficacy: Option<i64>,
    #[serde(default)]
    pub notes: String,
}

/// Percentage scores that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationScores {
    pub patient_outcomes: u8,
    pub compliance: u8,
    pub safety: u8,
    pub efficacy: Option<u8>,
}

fn percentage(errors: &mut Vec<String>, label: &str, value: i64) -> u8 {
    match u8::try_from(value) {
        Ok(pct) if pct <= 100 => pct,
        _ => {
            errors.push(format!("{label} must be between 0 and 100"));
            0
        }
    }
}

impl EvaluationFields {
    /// Validate the date range and all percentage scores.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` listing every invalid field.
    pub fn validate(&self) -> Result<EvaluationScores, CoreError> {
        let mut errors = Vec::new();
        if self.project_id.trim().is_empty() {
            errors.push("Project is required".to_string());
        }
        if self.objectives.trim().is_empty() {
            errors.push("Objectives is required".to_string());
        }
        check_date_order(&mut errors, Some(self.start_date), self.end_date);

        let scores = EvaluationScores {
            patient_outcomes: percentage(&mut errors, "Patient Outcomes", self.patient_outcomes),
            compliance: percentage(&mut errors, "Compliance", self.compliance),
            safety: percentage(&mut errors, "Safety", self.safety),
            efficacy: self
                .efficacy
                .map(|value| percentage(&mut errors, "Efficacy", value)),
        };

        finish(errors).map(|()| scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn evaluation() -> EvaluationFields {
        EvaluationFields {
            project_id: "prj-00000001".into(),
            phase: EvaluationStage::Analysis,
            start_date: d(2024, 1, 1),
            end_date: Some(d(2024, 2, 1)),
            objectives: "Assess integrated NCD care".into(),
            patient_outcomes: 80,
            compliance: 100,
            safety: 0,
            efficacy: None,
            notes: String::new(),
        }
    }

    fn messages(err: CoreError) -> Vec<String> {
        match err {
            CoreError::Validation(msgs) => msgs,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_evaluation_yields_scores() {
        let scores = evaluation().validate().unwrap();
        assert_eq!(scores.patient_outcomes, 80);
        assert_eq!(scores.compliance, 100);
        assert_eq!(scores.efficacy, None);
    }

    #[test]
    fn end_before_start_rejected() {
        let mut fields = evaluation();
        fields.end_date = Some(d(2023, 12, 31));
        let msgs = messages(fields.validate().unwrap_err());
        assert_eq!(msgs, vec!["End date cannot be before start date"]);
    }

    #[test]
    fn same_day_range_accepted() {
        let mut fields = evaluation();
        fields.end_date = Some(fields.start_date);
        assert!(fields.validate().is_ok());
    }

    #[rstest]
    #[case("patient_outcomes", 101, "Patient Outcomes must be between 0 and 100")]
    #[case("compliance", -1, "Compliance must be between 0 and 100")]
    #[case("safety", 250, "Safety must be between 0 and 100")]
    #[case("efficacy", -5, "Efficacy must be between 0 and 100")]
    fn out_of_range_percentages_rejected(
        #[case] field: &str,
        #[case] value: i64,
        #[case] expected: &str,
    ) {
        let mut fields = evaluation();
        match field {
            "patient_outcomes" => fields.patient_outcomes = value,
            "compliance" => fields.compliance = value,
            "safety" => fields.safety = value,
            _ => fields.efficacy = Some(value),
        }
        let msgs = messages(fields.validate().unwrap_err());
        assert_eq!(msgs, vec![expected.to_string()]);
    }

    #[test]
    fn reports_every_problem() {
        let mut fields = evaluation();
        fields.objectives = "  ".into();
        fields.safety = 120;
        fields.end_date = Some(d(2020, 1, 1));
        let msgs = messages(fields.validate().unwrap_err());
        assert_eq!(msgs.len(), 3);
    }

    #[test]
    fn project_requires_title_and_valid_url() {
        let fields = ProjectFields {
            title: String::new(),
            dashboard_url: Some("app.powerbi.com/report".into()),
            ..ProjectFields::default()
        };
        let msgs = messages(fields.validate().unwrap_err());
        assert_eq!(
            msgs,
            vec![
                "Title is required".to_string(),
                "Dashboard URL must be a valid http(s) URL".to_string()
            ]
        );
    }

    #[test]
    fn project_empty_url_is_ignored() {
        let fields = ProjectFields {
            title: "Baseline survey".into(),
            dashboard_url: Some(String::new()),
            ..ProjectFields::default()
        };
        assert!(fields.validate().is_ok());
    }

    #[rstest]
    #[case("jane@example.org", true)]
    #[case("jane@example", false)]
    #[case("@example.org", false)]
    #[case("jane@@example.org", false)]
    #[case("jane doe@example.org", false)]
    fn email_shapes(#[case] email: &str, #[case] ok: bool) {
        assert_eq!(is_email(email), ok);
    }

    #[test]
    fn evaluator_checks_email_and_phone() {
        let fields = EvaluatorFields {
            name: "Jane".into(),
            phone: "+2547".repeat(5),
            email: "nope".into(),
            project_ids: vec![],
        };
        let msgs = messages(fields.validate().unwrap_err());
        assert_eq!(msgs.len(), 2);
    }

    #[test]
    fn metric_rejects_non_finite() {
        let fields = MetricFields {
            name: "Coverage".into(),
            value: f64::NAN,
            target: Some(f64::INFINITY),
            date_recorded: d(2024, 1, 1),
            notes: String::new(),
        };
        assert_eq!(messages(fields.validate().unwrap_err()).len(), 2);
    }
}
