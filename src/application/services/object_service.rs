//! Object Service - Creating and reading domain objects
//!
//! Gives the HTTP layer a way to build destinations for imports and to
//! browse what an import produced.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{IdentifierGeneratorPort, ObjectStorePort};
use crate::domain::entities::{DomainObject, ObjectModel};
use crate::domain::value_objects::ObjectId;

#[derive(Debug, Clone)]
pub struct CreateObjectRequest {
    pub parent_id: Option<ObjectId>,
    pub model: ObjectModel,
}

#[async_trait]
pub trait ObjectService: Send + Sync {
    /// Create an object under a fresh id, optionally attached to a parent
    async fn create_object(&self, request: CreateObjectRequest) -> Result<DomainObject>;

    /// Get an object by ID
    async fn get_object(&self, id: &ObjectId) -> Result<Option<DomainObject>>;

    /// Resolve the composition of an object, in order
    async fn list_children(&self, id: &ObjectId) -> Result<Vec<DomainObject>>;
}

pub struct ObjectServiceImpl {
    store: Arc<dyn ObjectStorePort>,
    ids: Arc<dyn IdentifierGeneratorPort>,
}

impl ObjectServiceImpl {
    pub fn new(store: Arc<dyn ObjectStorePort>, ids: Arc<dyn IdentifierGeneratorPort>) -> Self {
        Self { store, ids }
    }
}

#[async_trait]
impl ObjectService for ObjectServiceImpl {
    #[instrument(skip(self, request), fields(parent_id = ?request.parent_id))]
    async fn create_object(&self, request: CreateObjectRequest) -> Result<DomainObject> {
        if let Some(parent_id) = &request.parent_id {
            let parent = self
                .store
                .get(parent_id)
                .await?
                .with_context(|| format!("Parent not found: {}", parent_id))?;
            if !parent.has_composition() {
                anyhow::bail!("Parent cannot hold children: {}", parent_id);
            }
        }

        let id = self.ids.generate();
        let mut model = request.model;
        model.location = request.parent_id.clone();

        let object = self
            .store
            .materialize(&model, &id)
            .await
            .context("Failed to create object in store")?;

        if let Some(parent_id) = &request.parent_id {
            self.store.add_child(parent_id, &id).await?;
        }

        info!(object_id = %id, "Created object");
        Ok(object)
    }

    #[instrument(skip(self))]
    async fn get_object(&self, id: &ObjectId) -> Result<Option<DomainObject>> {
        debug!(object_id = %id, "Fetching object");
        self.store
            .get(id)
            .await
            .context("Failed to get object from store")
    }

    #[instrument(skip(self))]
    async fn list_children(&self, id: &ObjectId) -> Result<Vec<DomainObject>> {
        let mut children = Vec::new();
        for child_id in self.store.children(id).await? {
            if let Some(child) = self.store.get(&child_id).await? {
                children.push(child);
            }
        }
        Ok(children)
    }
}
