//! Average monthly patient load per condition group.
//!
//! Each group sums its twelve monthly columns per facility and divides by 12.
//! Overlapping prefixes (`hiv_` vs `hiv_htn_dm_`) are separated by exclusion
//! rules so every monthly column lands in exactly one group.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::{Cell, SurveyTable};

/// Columns copied alongside the averages.
pub const IDENTIFIER_COLUMNS: [&str; 5] =
    ["facility_mfl", "facility_name", "county", "level", "ownership"];

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ConditionGroup {
    #[serde(rename = "Outpatient")]
    Outpatient,
    #[serde(rename = "HIV")]
    Hiv,
    #[serde(rename = "Diabetes")]
    Diabetes,
    #[serde(rename = "Hypertension")]
    Hypertension,
    #[serde(rename = "DM + HTN")]
    DmHtn,
    #[serde(rename = "HIV + DM")]
    HivDm,
    #[serde(rename = "HIV + HTN")]
    HivHtn,
    #[serde(rename = "HIV + HTN + DM")]
    HivHtnDm,
}

impl ConditionGroup {
    pub const ALL: [Self; 8] = [
        Self::Outpatient,
        Self::Hiv,
        Self::Diabetes,
        Self::Hypertension,
        Self::DmHtn,
        Self::HivDm,
        Self::HivHtn,
        Self::HivHtnDm,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Outpatient => "Outpatient",
            Self::Hiv => "HIV",
            Self::Diabetes => "Diabetes",
            Self::Hypertension => "Hypertension",
            Self::DmHtn => "DM + HTN",
            Self::HivDm => "HIV + DM",
            Self::HivHtn => "HIV + HTN",
            Self::HivHtnDm => "HIV + HTN + DM",
        }
    }

    /// Whether a survey column counts toward this group.
    #[must_use]
    pub fn includes(self, column: &str) -> bool {
        match self {
            Self::Outpatient => column.starts_with("outpatient_"),
            Self::Hiv => {
                column.starts_with("hiv_") && !column.contains("_dm") && !column.contains("_htn")
            }
            Self::Diabetes => column.starts_with("diabetes_"),
            Self::Hypertension => column.starts_with("htn_") && !column.contains("dm_htn"),
            Self::DmHtn => column.starts_with("dm_htn"),
            Self::HivDm => column.starts_with("hiv_dm"),
            Self::HivHtn => column.starts_with("hiv_htn") && !column.contains("_dm"),
            Self::HivHtnDm => column.starts_with("hiv_htn_dm"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionLoad {
    pub condition: ConditionGroup,
    pub average_monthly: f64,
}

/// Averages for one facility.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientLoad {
    pub facility_mfl: Cell,
    pub facility_name: Cell,
    pub county: Cell,
    pub level: Cell,
    pub ownership: Cell,
    pub loads: Vec<ConditionLoad>,
}

impl PatientLoad {
    #[must_use]
    pub fn load(&self, condition: ConditionGroup) -> Option<f64> {
        self.loads
            .iter()
            .find(|l| l.condition == condition)
            .map(|l| l.average_monthly)
    }

    fn dimension(&self, dimension: Dimension) -> Option<String> {
        match dimension {
            Dimension::County => self.county.as_text(),
            Dimension::Level => self.level.as_text(),
            Dimension::Ownership => self.ownership.as_text(),
        }
    }
}

/// Column names per condition group, in table order. Groups with no columns
/// are left out.
#[must_use]
pub fn condition_columns(table: &SurveyTable) -> Vec<(ConditionGroup, Vec<&str>)> {
    ConditionGroup::ALL
        .iter()
        .filter_map(|&group| {
            let cols: Vec<&str> = table.column_names().filter(|c| group.includes(c)).collect();
            (!cols.is_empty()).then_some((group, cols))
        })
        .collect()
}

/// Per-facility average monthly load for every condition group present.
#[must_use]
pub fn average_patient_loads(table: &SurveyTable) -> Vec<PatientLoad> {
    let groups = condition_columns(table);
    (0..table.len())
        .map(|row| {
            let loads = groups
                .iter()
                .map(|(condition, cols)| {
                    let total: f64 = cols
                        .iter()
                        .filter_map(|c| table.cell(c, row).as_number())
                        .sum();
                    ConditionLoad {
                        condition: *condition,
                        average_monthly: total / MONTHS_PER_YEAR,
                    }
                })
                .collect();
            PatientLoad {
                facility_mfl: table.cell(IDENTIFIER_COLUMNS[0], row).clone(),
                facility_name: table.cell(IDENTIFIER_COLUMNS[1], row).clone(),
                county: table.cell(IDENTIFIER_COLUMNS[2], row).clone(),
                level: table.cell(IDENTIFIER_COLUMNS[3], row).clone(),
                ownership: table.cell(IDENTIFIER_COLUMNS[4], row).clone(),
                loads,
            }
        })
        .collect()
}

/// Facility attribute used to group loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    County,
    Level,
    Ownership,
}

/// Mean facility load per condition within one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedLoad {
    pub group: String,
    pub facilities: usize,
    pub loads: Vec<ConditionLoad>,
}

/// Average the per-facility loads within each value of `dimension`.
///
/// Facilities with no value for the dimension are skipped. Groups come back
/// sorted by name.
#[must_use]
pub fn mean_by(loads: &[PatientLoad], dimension: Dimension) -> Vec<GroupedLoad> {
    let mut groups: BTreeMap<String, Vec<&PatientLoad>> = BTreeMap::new();
    for load in loads {
        if let Some(key) = load.dimension(dimension) {
            groups.entry(key).or_default().push(load);
        }
    }

    groups
        .into_iter()
        .map(|(group, members)| {
            let conditions: Vec<ConditionGroup> = members
                .first()
                .map(|m| m.loads.iter().map(|l| l.condition).collect())
                .unwrap_or_default();
            #[allow(clippy::cast_precision_loss)]
            let count = members.len() as f64;
            let loads = conditions
                .into_iter()
                .map(|condition| ConditionLoad {
                    condition,
                    average_monthly: members
                        .iter()
                        .filter_map(|m| m.load(condition))
                        .sum::<f64>()
                        / count,
                })
                .collect();
            GroupedLoad {
                group,
                facilities: members.len(),
                loads,
            }
        })
        .collect()
}
