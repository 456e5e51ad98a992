//! Time-limited shared copy of the cleaned survey.
//!
//! The entry is replaced wholesale when it expires; readers holding an
//! `Arc` to the previous copy keep using it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::averages::{PatientLoad, average_patient_loads};
use crate::dataset::SurveyTable;
use crate::error::SurveyError;

/// The cleaned table and its per-facility averages.
#[derive(Debug)]
pub struct SurveyData {
    pub table: SurveyTable,
    pub averages: Vec<PatientLoad>,
}

impl SurveyData {
    #[must_use]
    pub fn new(table: SurveyTable) -> Self {
        let averages = average_patient_loads(&table);
        Self { table, averages }
    }
}

#[derive(Debug)]
struct Entry {
    data: Arc<SurveyData>,
    loaded_at: Instant,
}

#[derive(Debug)]
pub struct SurveyCache {
    path: PathBuf,
    ttl: Duration,
    entry: RwLock<Option<Entry>>,
}

impl SurveyCache {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
            entry: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current survey data, loading it if absent or expired.
    ///
    /// # Errors
    ///
    /// Returns the load error if the CSV cannot be read. The previous entry,
    /// if any, is left in place.
    pub async fn get(&self) -> Result<Arc<SurveyData>, SurveyError> {
        if let Some(data) = self.fresh(self.entry.read().await.as_ref()) {
            return Ok(data);
        }

        let mut slot = self.entry.write().await;
        if let Some(data) = self.fresh(slot.as_ref()) {
            return Ok(data);
        }

        let path = self.path.clone();
        let table = tokio::task::spawn_blocking(move || SurveyTable::load_and_clean(&path))
            .await
            .map_err(|e| SurveyError::Task(e.to_string()))??;
        let data = Arc::new(SurveyData::new(table));
        tracing::debug!(
            facilities = data.table.len(),
            ttl_secs = self.ttl.as_secs(),
            "survey cache refreshed"
        );

        *slot = Some(Entry {
            data: Arc::clone(&data),
            loaded_at: Instant::now(),
        });
        Ok(data)
    }

    /// Drop the cached entry so the next [`get`](Self::get) reloads.
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }

    fn fresh(&self, entry: Option<&Entry>) -> Option<Arc<SurveyData>> {
        entry
            .filter(|e| e.loaded_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.data))
    }
}
