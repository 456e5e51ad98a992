//! Survey data error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurveyError {
    /// The survey export could not be read or parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the reports depend on is absent.
    #[error("Survey data has no '{0}' column")]
    MissingColumn(String),

    /// File system error outside the CSV reader.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// County boundary file is unusable.
    #[error("County boundaries: {0}")]
    Geo(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A background load task panicked or was cancelled.
    #[error("Survey load task failed: {0}")]
    Task(String),
}
