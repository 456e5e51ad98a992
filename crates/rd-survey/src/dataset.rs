//! Survey CSV loading and cleaning.
//!
//! The table is stored column-major: every report reads a handful of columns
//! across all facilities, and cleaning rules are defined per column.

use std::io::Read;
use std::path::Path;

use serde::{Serialize, Serializer};

use crate::error::SurveyError;

/// Placeholder codes the survey tool writes for "not recorded".
pub const PLACEHOLDER_VALUES: [f64; 4] = [9999.0, 99999.0, 999_999.0, 9_999_999.0];

/// Substrings marking staffing count columns.
pub const STAFF_MARKERS: [&str; 7] = [
    "employed", "_start", "_end", "_hiv", "_ncd", "_trained", "_left",
];

/// Prefixes of monthly patient count columns.
pub const PATIENT_PREFIXES: [&str; 8] = [
    "outpatient_",
    "hiv_",
    "diabetes_",
    "htn_",
    "dm_htn_",
    "hiv_dm_",
    "hiv_htn_",
    "hiv_htn_dm_",
];

/// Spreadsheet exports carry a leading index column under one of these headers.
const INDEX_HEADERS: [&str; 2] = ["", "Unnamed: 0"];

/// Raw strings read as missing values.
const MISSING_MARKERS: [&str; 6] = ["", "NA", "N/A", "NaN", "nan", "null"];

/// One value of the survey table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Number(f64),
    Text(String),
}

impl Cell {
    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if MISSING_MARKERS.contains(&trimmed) {
            return Self::Missing;
        }
        trimmed
            .parse::<f64>()
            .map_or_else(|_| Self::Text(raw.to_string()), Self::Number)
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Display form used for filter matching. Whole numbers print without a
    /// fractional part.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(format_number(*n)),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Missing => serializer.serialize_none(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => match whole_number(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn whole_number(n: f64) -> Option<i64> {
    // 2^53: beyond this f64 no longer represents every integer.
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;
    (n.fract() == 0.0 && n.abs() < EXACT_LIMIT).then(|| n as i64)
}

fn format_number(n: f64) -> String {
    whole_number(n).map_or_else(|| n.to_string(), |i| i.to_string())
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    /// Every present value is a number.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.cells
            .iter()
            .all(|c| matches!(c, Cell::Missing | Cell::Number(_)))
    }

    fn is_staff(&self) -> bool {
        STAFF_MARKERS.iter().any(|m| self.name.contains(m))
    }

    fn is_patient_count(&self) -> bool {
        PATIENT_PREFIXES.iter().any(|p| self.name.starts_with(p))
    }

    /// Median of present numeric values.
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        let mut values: Vec<f64> = self.cells.iter().filter_map(Cell::as_number).collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        let mid = values.len() / 2;
        if values.len() % 2 == 0 {
            Some((values[mid - 1] + values[mid]) / 2.0)
        } else {
            Some(values[mid])
        }
    }
}

/// The cleaned facility survey.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyTable {
    columns: Vec<Column>,
    row_count: usize,
}

impl SurveyTable {
    /// Build a table from raw CSV cells without applying cleaning rules.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Csv`] if the input is not valid CSV.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SurveyError> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column {
                name,
                cells: Vec::new(),
            })
            .collect();

        let mut row_count = 0;
        for record in rdr.records() {
            let record = record?;
            for (idx, column) in columns.iter_mut().enumerate() {
                column
                    .cells
                    .push(record.get(idx).map_or(Cell::Missing, Cell::parse));
            }
            row_count += 1;
        }

        Ok(Self { columns, row_count })
    }

    /// Read and clean a survey export in one step.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Io`] if the file cannot be opened, or
    /// [`SurveyError::Csv`] if it cannot be parsed.
    pub fn load_and_clean(path: &Path) -> Result<Self, SurveyError> {
        let file = std::fs::File::open(path)?;
        let mut table = Self::from_reader(file)?;
        table.clean();
        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            columns = table.columns.len(),
            "loaded survey data"
        );
        Ok(table)
    }

    /// Apply the cleaning rules in order: drop the index column, zero-fill
    /// and truncate staffing counts, blank out placeholder codes, coerce and
    /// median-impute patient counts, then shorten ownership labels.
    pub fn clean(&mut self) {
        self.columns
            .retain(|c| !INDEX_HEADERS.contains(&c.name.as_str()));

        for column in &mut self.columns {
            if column.is_staff() && column.is_numeric() {
                for cell in &mut column.cells {
                    *cell = Cell::Number(cell.as_number().map_or(0.0, f64::trunc));
                }
            }
        }

        for column in &mut self.columns {
            if column.is_numeric() {
                for cell in &mut column.cells {
                    if cell
                        .as_number()
                        .is_some_and(|n| PLACEHOLDER_VALUES.contains(&n))
                    {
                        *cell = Cell::Missing;
                    }
                }
            }
        }

        for column in &mut self.columns {
            if !column.is_patient_count() {
                continue;
            }
            for cell in &mut column.cells {
                if matches!(cell, Cell::Text(_)) {
                    *cell = Cell::Missing;
                }
            }
            if let Some(median) = column.median() {
                for cell in &mut column.cells {
                    if cell.is_missing() {
                        *cell = Cell::Number(median);
                    }
                }
            }
        }

        if let Some(ownership) = self.columns.iter_mut().find(|c| c.name == "ownership") {
            for cell in &mut ownership.cells {
                if let Cell::Text(value) = cell {
                    match value.as_str() {
                        "Ministry of Health" => *value = "MOH".into(),
                        "Private Practice" => *value = "Private".into(),
                        _ => {}
                    }
                }
            }
        }
    }

    /// Number of facility rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.row_count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`column`](Self::column), but absence is an error.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::MissingColumn`] if no column has this name.
    pub fn require(&self, name: &str) -> Result<&Column, SurveyError> {
        self.column(name)
            .ok_or_else(|| SurveyError::MissingColumn(name.to_string()))
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Cell at `row` in the named column; `Missing` if either is absent.
    #[must_use]
    pub fn cell(&self, name: &str, row: usize) -> &Cell {
        self.column(name)
            .and_then(|c| c.cells.get(row))
            .unwrap_or(&Cell::Missing)
    }

    /// Copy of the table keeping only rows for which `keep` holds.
    #[must_use]
    pub fn filter_rows(&self, keep: impl Fn(usize) -> bool) -> Self {
        let kept: Vec<usize> = (0..self.row_count).filter(|&row| keep(row)).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                cells: kept.iter().map(|&row| c.cells[row].clone()).collect(),
            })
            .collect();
        Self {
            columns,
            row_count: kept.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn cleaned(csv: &str) -> SurveyTable {
        let mut table = SurveyTable::from_reader(csv.as_bytes()).unwrap();
        table.clean();
        table
    }

    #[rstest]
    #[case("", Cell::Missing)]
    #[case("NA", Cell::Missing)]
    #[case("12", Cell::Number(12.0))]
    #[case(" 3.5 ", Cell::Number(3.5))]
    #[case("Kiambu", Cell::Text("Kiambu".into()))]
    fn parses_raw_values(#[case] raw: &str, #[case] expected: Cell) {
        assert_eq!(Cell::parse(raw), expected);
    }

    #[test]
    fn drops_index_column() {
        let table = cleaned(",county\n0,Kitui\n1,Nairobi\n");
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["county"]);

        let table = cleaned("Unnamed: 0,county\n0,Kitui\n");
        assert!(table.column("Unnamed: 0").is_none());
    }

    #[test]
    fn staff_columns_zero_filled_and_truncated() {
        let table = cleaned("nurses_employed\n2.7\n\n4\n");
        assert_eq!(
            table.column("nurses_employed").unwrap().cells,
            vec![Cell::Number(2.0), Cell::Number(0.0), Cell::Number(4.0)]
        );
    }

    #[test]
    fn placeholders_become_missing_after_staff_fill() {
        let table = cleaned("staff_left,beds\n9999,99999\n,3\n");
        assert_eq!(
            table.column("staff_left").unwrap().cells,
            vec![Cell::Missing, Cell::Number(0.0)]
        );
        assert_eq!(
            table.column("beds").unwrap().cells,
            vec![Cell::Missing, Cell::Number(3.0)]
        );
    }

    #[test]
    fn text_columns_keep_placeholder_strings() {
        let table = cleaned("remarks\n9999\nnone\n");
        assert_eq!(
            table.column("remarks").unwrap().cells,
            vec![Cell::Number(9999.0), Cell::Text("none".into())]
        );
    }

    #[test]
    fn patient_counts_coerced_and_median_imputed() {
        let table = cleaned("diabetes_jan\n10\nabc\n30\n\n20\n");
        assert_eq!(
            table.column("diabetes_jan").unwrap().cells,
            vec![
                Cell::Number(10.0),
                Cell::Number(20.0),
                Cell::Number(30.0),
                Cell::Number(20.0),
                Cell::Number(20.0),
            ]
        );
    }

    #[test]
    fn even_count_median_averages_middle_pair() {
        let table = cleaned("htn_feb\n10\n\n20\n");
        assert_eq!(table.cell("htn_feb", 1), &Cell::Number(15.0));
    }

    #[test]
    fn all_missing_patient_column_stays_missing() {
        let table = cleaned("hiv_mar,county\n,Kitui\nNA,Nairobi\n");
        assert!(table.column("hiv_mar").unwrap().cells.iter().all(Cell::is_missing));
    }

    #[test]
    fn ownership_labels_shortened() {
        let table = cleaned("ownership\nMinistry of Health\nPrivate Practice\nFaith Based\n");
        assert_eq!(
            table.column("ownership").unwrap().cells,
            vec![
                Cell::Text("MOH".into()),
                Cell::Text("Private".into()),
                Cell::Text("Faith Based".into()),
            ]
        );
    }

    #[test]
    fn filter_rows_keeps_columns_aligned() {
        let table = cleaned("county,beds\nKitui,1\nNairobi,2\nKitui,3\n");
        let kitui = table.filter_rows(|row| {
            table.cell("county", row).as_text().as_deref() == Some("Kitui")
        });
        assert_eq!(kitui.len(), 2);
        assert_eq!(kitui.cell("beds", 1), &Cell::Number(3.0));
    }

    #[test]
    fn whole_numbers_serialize_as_integers() {
        let json = serde_json::to_value(vec![
            Cell::Number(15_001.0),
            Cell::Number(2.5),
            Cell::Missing,
        ])
        .unwrap();
        assert_eq!(json, serde_json::json!([15001, 2.5, null]));
    }

    #[test]
    fn load_and_clean_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.csv");
        std::fs::write(&path, ",county,outpatient_jan\n0,Kitui,\n1,Kitui,40\n").unwrap();
        let table = SurveyTable::load_and_clean(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell("outpatient_jan", 0), &Cell::Number(40.0));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = SurveyTable::load_and_clean(Path::new("/nonexistent/survey.csv")).unwrap_err();
        assert!(matches!(err, SurveyError::Io(_)));
    }
}
