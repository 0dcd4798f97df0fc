//! Store factory - Creates the object store selected by configuration

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;

use crate::application::ports::outbound::{ObjectStorePort, StoreError};
use crate::domain::entities::{DomainObject, ObjectModel};
use crate::domain::value_objects::ObjectId;
use crate::infrastructure::config::{StoreBackend, StoreConfig};
use crate::infrastructure::persistence::{InMemoryObjectStore, SqliteObjectStore};

/// Enum wrapper for store backends to enable runtime selection
#[derive(Clone)]
pub enum ObjectStoreBackend {
    Memory(InMemoryObjectStore),
    Sqlite(SqliteObjectStore),
}

#[async_trait]
impl ObjectStorePort for ObjectStoreBackend {
    async fn materialize(
        &self,
        model: &ObjectModel,
        id: &ObjectId,
    ) -> Result<DomainObject, StoreError> {
        match self {
            ObjectStoreBackend::Memory(s) => s.materialize(model, id).await,
            ObjectStoreBackend::Sqlite(s) => s.materialize(model, id).await,
        }
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<DomainObject>, StoreError> {
        match self {
            ObjectStoreBackend::Memory(s) => s.get(id).await,
            ObjectStoreBackend::Sqlite(s) => s.get(id).await,
        }
    }

    async fn children(&self, id: &ObjectId) -> Result<Vec<ObjectId>, StoreError> {
        match self {
            ObjectStoreBackend::Memory(s) => s.children(id).await,
            ObjectStoreBackend::Sqlite(s) => s.children(id).await,
        }
    }

    async fn add_child(&self, parent: &ObjectId, child: &ObjectId) -> Result<(), StoreError> {
        match self {
            ObjectStoreBackend::Memory(s) => s.add_child(parent, child).await,
            ObjectStoreBackend::Sqlite(s) => s.add_child(parent, child).await,
        }
    }

    async fn set_location(&self, id: &ObjectId, parent: &ObjectId) -> Result<(), StoreError> {
        match self {
            ObjectStoreBackend::Memory(s) => s.set_location(id, parent).await,
            ObjectStoreBackend::Sqlite(s) => s.set_location(id, parent).await,
        }
    }
}

pub struct ObjectStoreFactory;

impl ObjectStoreFactory {
    pub async fn create(config: &StoreConfig) -> Result<ObjectStoreBackend> {
        match config.backend {
            StoreBackend::Memory => {
                tracing::info!("Using in-memory object store");
                Ok(ObjectStoreBackend::Memory(InMemoryObjectStore::new()))
            }
            StoreBackend::Sqlite => {
                tracing::info!("Using SQLite object store at {}", config.sqlite_url);
                let pool = SqlitePoolOptions::new()
                    .connect(&config.sqlite_url)
                    .await
                    .with_context(|| format!("Failed to open {}", config.sqlite_url))?;
                let store = SqliteObjectStore::new(pool)
                    .await
                    .context("Failed to initialize object table")?;
                Ok(ObjectStoreBackend::Sqlite(store))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_is_default_selection() {
        let config = StoreConfig {
            backend: StoreBackend::Memory,
            sqlite_url: String::new(),
        };
        let store = ObjectStoreFactory::create(&config).await.unwrap();
        assert!(matches!(store, ObjectStoreBackend::Memory(_)));

        let id = ObjectId::new("a");
        store
            .materialize(&ObjectModel::new("folder", "A").composable(), &id)
            .await
            .unwrap();
        assert!(store.get(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sqlite_backend_opens_pool() {
        let config = StoreConfig {
            backend: StoreBackend::Sqlite,
            sqlite_url: "sqlite::memory:".to_string(),
        };
        let store = ObjectStoreFactory::create(&config).await.unwrap();
        assert!(matches!(store, ObjectStoreBackend::Sqlite(_)));
    }
}
