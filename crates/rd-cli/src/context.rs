use std::sync::Arc;

use anyhow::Context;
use rd_config::DashConfig;
use rd_db::service::DashboardService;
use rd_server::storage::DocumentStore;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: Arc<DashboardService>,
    pub config: DashConfig,
}

impl AppContext {
    pub async fn init(config: DashConfig) -> anyhow::Result<Self> {
        if !config.database.is_in_memory() {
            if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create database directory {}", parent.display())
                    })?;
                }
            }
        }

        let service = DashboardService::new_local(&config.database.path, config.server.page_size)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;

        Ok(Self {
            service: Arc::new(service),
            config,
        })
    }

    /// File storage rooted at the configured media directory.
    pub fn documents(&self) -> DocumentStore {
        DocumentStore::new(
            self.config.storage.media_dir.clone(),
            self.config.storage.max_upload_bytes,
        )
    }
}
