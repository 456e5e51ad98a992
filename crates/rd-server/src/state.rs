//! Shared router state.

use std::sync::Arc;
use std::time::Duration;

use rd_config::DashConfig;
use rd_db::service::DashboardService;
use rd_survey::{CountyBoundaries, SurveyCache};

use crate::storage::DocumentStore;

pub struct AppState {
    pub service: Arc<DashboardService>,
    pub auth: rd_config::AuthConfig,
    pub documents: DocumentStore,
    pub survey: SurveyCache,
    pub boundaries: CountyBoundaries,
}

impl AppState {
    /// Assemble state from loaded configuration and an open service.
    #[must_use]
    pub fn new(config: &DashConfig, service: Arc<DashboardService>) -> Self {
        Self {
            service,
            auth: config.auth.clone(),
            documents: DocumentStore::new(
                config.storage.media_dir.clone(),
                config.storage.max_upload_bytes,
            ),
            survey: SurveyCache::new(
                config.survey.csv_path.clone(),
                Duration::from_secs(config.survey.cache_ttl_secs),
            ),
            boundaries: CountyBoundaries::new(
                config.survey.geojson_path.clone(),
                config.survey.target_counties.clone(),
            ),
        }
    }

    pub fn service(&self) -> &DashboardService {
        &self.service
    }
}
