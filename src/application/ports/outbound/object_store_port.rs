//! Object store port - Capability surface of the destination store
//!
//! Import and export only need four things from a store: materialize a model
//! under an identity, read an object's children, append a child to a parent's
//! composition, and set an object's location.

use async_trait::async_trait;

use crate::domain::entities::{DomainObject, ObjectModel};
use crate::domain::value_objects::ObjectId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Object not found: {0}")]
    NotFound(ObjectId),

    #[error("Object already exists: {0}")]
    AlreadyExists(ObjectId),

    #[error("Object has no composition: {0}")]
    NotComposable(ObjectId),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[async_trait]
pub trait ObjectStorePort: Send + Sync {
    /// Create a live object from `model` under identity `id`
    async fn materialize(&self, model: &ObjectModel, id: &ObjectId)
        -> Result<DomainObject, StoreError>;

    /// Get an object by ID
    async fn get(&self, id: &ObjectId) -> Result<Option<DomainObject>, StoreError>;

    /// Ordered composition of an object (empty when it has none)
    async fn children(&self, id: &ObjectId) -> Result<Vec<ObjectId>, StoreError>;

    /// Append `child` to `parent`'s composition; no-op if already present
    async fn add_child(&self, parent: &ObjectId, child: &ObjectId) -> Result<(), StoreError>;

    /// Set the primary location of `id` to `parent`
    async fn set_location(&self, id: &ObjectId, parent: &ObjectId) -> Result<(), StoreError>;
}
