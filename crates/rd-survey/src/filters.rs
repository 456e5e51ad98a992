//! Dependent report filters.
//!
//! Counties narrow the level and ownership choices: the options offered for
//! those two come only from facilities in the selected counties.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::dataset::SurveyTable;
use crate::error::SurveyError;

/// Requested filter values. Empty lists (or lists of blanks) select everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub county: Vec<String>,
    #[serde(default)]
    pub level: Vec<String>,
    #[serde(default)]
    pub ownership: Vec<String>,
}

impl FilterSelection {
    /// Build a selection from repeated query pairs (`county=A&county=B`).
    /// Unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut selection = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "county" => selection.county.push(value.into()),
                "level" => selection.level.push(value.into()),
                "ownership" => selection.ownership.push(value.into()),
                _ => {}
            }
        }
        selection
    }
}

/// Options and effective selections for the filter form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub distinct_counties: Vec<String>,
    pub distinct_levels: Vec<String>,
    pub distinct_owners: Vec<String>,
    pub selected_counties: Vec<String>,
    pub selected_levels: Vec<String>,
    pub selected_owners: Vec<String>,
}

/// Resolve a selection against the table.
///
/// Returns the filter options and the facilities matching all three
/// selections.
///
/// # Errors
///
/// Returns [`SurveyError::MissingColumn`] if `county`, `level`, or
/// `ownership` is absent.
pub fn dependent_filters(
    table: &SurveyTable,
    selection: &FilterSelection,
) -> Result<(FilterOptions, SurveyTable), SurveyError> {
    for name in ["county", "level", "ownership"] {
        table.require(name)?;
    }

    let distinct_counties = distinct(table, "county");
    let selected_counties = effective(&selection.county, &distinct_counties);

    let by_county = table.filter_rows(|row| is_selected(table, "county", row, &selected_counties));

    let distinct_levels = distinct(&by_county, "level");
    let distinct_owners = distinct(&by_county, "ownership");
    let selected_levels = effective(&selection.level, &distinct_levels);
    let selected_owners = effective(&selection.ownership, &distinct_owners);

    let filtered = by_county.filter_rows(|row| {
        is_selected(&by_county, "level", row, &selected_levels)
            && is_selected(&by_county, "ownership", row, &selected_owners)
    });

    tracing::debug!(
        counties = selected_counties.len(),
        levels = selected_levels.len(),
        owners = selected_owners.len(),
        facilities = filtered.len(),
        "resolved survey filters"
    );

    Ok((
        FilterOptions {
            distinct_counties,
            distinct_levels,
            distinct_owners,
            selected_counties,
            selected_levels,
            selected_owners,
        },
        filtered,
    ))
}

/// Sorted distinct present values of a column.
fn distinct(table: &SurveyTable, column: &str) -> Vec<String> {
    (0..table.len())
        .filter_map(|row| table.cell(column, row).as_text())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn effective(requested: &[String], available: &[String]) -> Vec<String> {
    let chosen: Vec<String> = requested.iter().filter(|v| !v.is_empty()).cloned().collect();
    if chosen.is_empty() {
        available.to_vec()
    } else {
        chosen
    }
}

fn is_selected(table: &SurveyTable, column: &str, row: usize, selected: &[String]) -> bool {
    table
        .cell(column, row)
        .as_text()
        .is_some_and(|v| selected.contains(&v))
}
