//! Facility survey data sources for the reporting endpoints.

use serde::{Deserialize, Serialize};

fn default_csv_path() -> String {
    "redcap_baseline_complete.csv".to_string()
}

/// One hour.
const fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_geojson_path() -> String {
    "data/ken_admbnda_adm1.geojson".to_string()
}

fn default_target_counties() -> Vec<String> {
    ["Nairobi", "Kiambu", "Kitui"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SurveyConfig {
    /// REDCap facility survey export.
    #[serde(default = "default_csv_path")]
    pub csv_path: String,

    /// How long the cleaned survey table stays cached.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// County boundaries as a GeoJSON `FeatureCollection`.
    #[serde(default = "default_geojson_path")]
    pub geojson_path: String,

    /// Counties kept from the boundary file.
    #[serde(default = "default_target_counties")]
    pub target_counties: Vec<String>,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            cache_ttl_secs: default_cache_ttl_secs(),
            geojson_path: default_geojson_path(),
            target_counties: default_target_counties(),
        }
    }
}
