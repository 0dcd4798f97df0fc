//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::{IdentifierGeneratorPort, ObjectStorePort};
use crate::application::services::{ExportService, ImportServiceImpl, ObjectServiceImpl};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::identifiers::UuidIdentifierGenerator;
use crate::infrastructure::persistence::{ObjectStoreBackend, ObjectStoreFactory};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    // Application services
    pub object_service: ObjectServiceImpl,
    pub import_service: ImportServiceImpl,
    pub export_service: ExportService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let store = ObjectStoreFactory::create(&config.store).await?;
        Ok(Self::with_store(config, store))
    }

    /// Wire services around an already constructed store
    pub fn with_store(config: AppConfig, store: ObjectStoreBackend) -> Self {
        let store: Arc<dyn ObjectStorePort> = Arc::new(store);
        let ids: Arc<dyn IdentifierGeneratorPort> = Arc::new(UuidIdentifierGenerator::new());

        let object_service = ObjectServiceImpl::new(store.clone(), ids.clone());
        let import_service =
            ImportServiceImpl::new(store.clone(), ids, config.max_import_bytes);
        let export_service = ExportService::new(store);

        Self {
            config,
            object_service,
            import_service,
            export_service,
        }
    }
}
