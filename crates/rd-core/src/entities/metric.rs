use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A measured progress value, optionally against a target.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProgressMetric {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub value: f64,
    pub target: Option<f64>,
    pub date_recorded: NaiveDate,
    pub notes: String,
}

impl ProgressMetric {
    /// Percentage of target reached, when a non-zero target is set.
    #[must_use]
    pub fn percent_of_target(&self) -> Option<f64> {
        self.target
            .filter(|target| *target != 0.0)
            .map(|target| self.value / target * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(value: f64, target: Option<f64>) -> ProgressMetric {
        ProgressMetric {
            id: "met-00000001".into(),
            project_id: "prj-00000001".into(),
            name: "Facilities surveyed".into(),
            value,
            target,
            date_recorded: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            notes: String::new(),
        }
    }

    #[test]
    fn percent_of_target_requires_nonzero_target() {
        assert_eq!(metric(30.0, Some(60.0)).percent_of_target(), Some(50.0));
        assert_eq!(metric(30.0, Some(0.0)).percent_of_target(), None);
        assert_eq!(metric(30.0, None).percent_of_target(), None);
    }
}
