//! County boundary `GeoJSON`.
//!
//! Reads an administrative-level-1 `FeatureCollection`, keeps the target
//! counties, and reduces each feature's properties to `{"name": ...}`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value, json};
use tokio::sync::RwLock;

use crate::error::SurveyError;

/// Property holding the English county name in the source data.
pub const NAME_PROPERTY: &str = "ADM1_EN";

/// Filter a `FeatureCollection` down to `targets`.
///
/// # Errors
///
/// Returns [`SurveyError::Geo`] if the input is not a `FeatureCollection` or
/// no feature matches.
pub fn filter_counties(collection: &Value, targets: &[String]) -> Result<Value, SurveyError> {
    let features = collection
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| SurveyError::Geo("input has no features array".into()))?;

    let kept: Vec<Value> = features
        .iter()
        .filter_map(|feature| {
            let name = feature
                .get("properties")
                .and_then(|p| p.get(NAME_PROPERTY))
                .and_then(Value::as_str)?;
            if !targets.iter().any(|t| t == name) {
                return None;
            }
            let mut properties = Map::new();
            properties.insert("name".into(), Value::String(name.to_string()));
            Some(json!({
                "type": "Feature",
                "properties": properties,
                "geometry": feature.get("geometry").cloned().unwrap_or(Value::Null),
            }))
        })
        .collect();

    if kept.is_empty() {
        return Err(SurveyError::Geo("no boundaries for the target counties".into()));
    }

    Ok(json!({
        "type": "FeatureCollection",
        "features": kept,
    }))
}

/// Lazily loaded, cached county boundaries.
///
/// Only a successful load is cached; a failure is retried on the next call.
#[derive(Debug)]
pub struct CountyBoundaries {
    path: PathBuf,
    targets: Vec<String>,
    cached: RwLock<Option<Arc<Value>>>,
}

impl CountyBoundaries {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, targets: Vec<String>) -> Self {
        Self {
            path: path.into(),
            targets,
            cached: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The filtered `FeatureCollection`.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Io`], [`SurveyError::Json`], or
    /// [`SurveyError::Geo`] if the file cannot be turned into a non-empty
    /// collection.
    pub async fn get(&self) -> Result<Arc<Value>, SurveyError> {
        if let Some(value) = self.cached.read().await.as_ref() {
            return Ok(Arc::clone(value));
        }

        let mut slot = self.cached.write().await;
        if let Some(value) = slot.as_ref() {
            return Ok(Arc::clone(value));
        }

        let raw = tokio::fs::read_to_string(&self.path).await?;
        let collection: Value = serde_json::from_str(&raw)?;
        let filtered = Arc::new(filter_counties(&collection, &self.targets)?);
        tracing::info!(
            path = %self.path.display(),
            counties = self.targets.len(),
            "loaded county boundaries"
        );
        *slot = Some(Arc::clone(&filtered));
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feature(name: &str) -> Value {
        json!({
            "type": "Feature",
            "properties": {"ADM1_EN": name, "ADM1_PCODE": "KE047", "Shape_Area": 0.05},
            "geometry": {"type": "Polygon", "coordinates": [[[36.8, -1.3], [36.9, -1.3], [36.9, -1.2], [36.8, -1.3]]]},
        })
    }

    fn collection(names: &[&str]) -> Value {
        json!({
            "type": "FeatureCollection",
            "features": names.iter().map(|n| feature(n)).collect::<Vec<_>>(),
        })
    }

    fn targets() -> Vec<String> {
        vec!["Nairobi".into(), "Kiambu".into(), "Kitui".into()]
    }

    #[test]
    fn keeps_targets_and_renames_property() {
        let out = filter_counties(&collection(&["Nairobi", "Mombasa", "Kitui"]), &targets()).unwrap();
        let features = out["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0]["properties"], json!({"name": "Nairobi"}));
        assert_eq!(features[1]["properties"]["name"], "Kitui");
        assert_eq!(features[0]["geometry"]["type"], "Polygon");
    }

    #[test]
    fn empty_result_is_an_error() {
        let err = filter_counties(&collection(&["Mombasa"]), &targets()).unwrap_err();
        assert!(matches!(err, SurveyError::Geo(_)));
    }

    #[test]
    fn non_collection_is_an_error() {
        assert!(filter_counties(&json!({"type": "Feature"}), &targets()).is_err());
    }

    #[tokio::test]
    async fn caches_successful_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counties.geojson");
        std::fs::write(&path, collection(&["Kiambu"]).to_string()).unwrap();

        let boundaries = CountyBoundaries::new(&path, targets());
        let first = boundaries.get().await.unwrap();
        std::fs::remove_file(&path).unwrap();
        let second = boundaries.get().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counties.geojson");

        let boundaries = CountyBoundaries::new(&path, targets());
        assert!(matches!(boundaries.get().await, Err(SurveyError::Io(_))));

        std::fs::write(&path, collection(&["Kitui"]).to_string()).unwrap();
        let loaded = boundaries.get().await.unwrap();
        assert_eq!(loaded["features"][0]["properties"]["name"], "Kitui");
    }
}
