//! SQLite object store
//!
//! Objects are kept as JSON models in a single table keyed by identifier.
//! Composition and location updates are read-modify-write on the model.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{ObjectStorePort, StoreError};
use crate::domain::entities::{DomainObject, ObjectModel};
use crate::domain::value_objects::ObjectId;

#[derive(Clone)]
pub struct SqliteObjectStore {
    pool: SqlitePool,
}

impl SqliteObjectStore {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS objects (
                id TEXT PRIMARY KEY,
                model TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    async fn load_model(&self, id: &ObjectId) -> Result<Option<ObjectModel>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT model FROM objects WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(|(json,)| {
            serde_json::from_str(&json).map_err(|e| StoreError::Serialization(e.to_string()))
        })
        .transpose()
    }

    async fn require_model(&self, id: &ObjectId) -> Result<ObjectModel, StoreError> {
        self.load_model(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn save_model(&self, id: &ObjectId, model: &ObjectModel) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(model).map_err(|e| StoreError::Serialization(e.to_string()))?;

        sqlx::query("UPDATE objects SET model = ?, updated_at = ? WHERE id = ?")
            .bind(json)
            .bind(Utc::now())
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ObjectStorePort for SqliteObjectStore {
    async fn materialize(
        &self,
        model: &ObjectModel,
        id: &ObjectId,
    ) -> Result<DomainObject, StoreError> {
        let json =
            serde_json::to_string(model).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let now = Utc::now();

        sqlx::query("INSERT INTO objects (id, model, created_at, updated_at) VALUES (?, ?, ?, ?)")
            .bind(id.as_str())
            .bind(json)
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::AlreadyExists(id.clone())
                }
                other => StoreError::Database(other.to_string()),
            })?;

        Ok(DomainObject::new(id.clone(), model.clone()))
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<DomainObject>, StoreError> {
        Ok(self
            .load_model(id)
            .await?
            .map(|model| DomainObject::new(id.clone(), model)))
    }

    async fn children(&self, id: &ObjectId) -> Result<Vec<ObjectId>, StoreError> {
        Ok(self.require_model(id).await?.children().to_vec())
    }

    async fn add_child(&self, parent: &ObjectId, child: &ObjectId) -> Result<(), StoreError> {
        let mut model = self.require_model(parent).await?;
        let composition = model
            .composition
            .as_mut()
            .ok_or_else(|| StoreError::NotComposable(parent.clone()))?;
        if composition.contains(child) {
            return Ok(());
        }
        composition.push(child.clone());
        self.save_model(parent, &model).await
    }

    async fn set_location(&self, id: &ObjectId, parent: &ObjectId) -> Result<(), StoreError> {
        let mut model = self.require_model(id).await?;
        model.location = Some(parent.clone());
        self.save_model(id, &model).await
    }
}
