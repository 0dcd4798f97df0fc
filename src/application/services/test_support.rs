//! Test doubles shared by service tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::outbound::{IdentifierGeneratorPort, ObjectStorePort, StoreError};
use crate::domain::entities::{DomainObject, ObjectModel};
use crate::domain::value_objects::ObjectId;
use crate::infrastructure::persistence::InMemoryObjectStore;

/// Deterministic generator: `prefix-0`, `prefix-1`, ...
pub struct SequentialIds {
    prefix: String,
    next: AtomicUsize,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: AtomicUsize::new(0),
        }
    }

    /// Number of identifiers handed out so far
    pub fn count(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl IdentifierGeneratorPort for SequentialIds {
    fn generate(&self) -> ObjectId {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        ObjectId::new(format!("{}-{}", self.prefix, n))
    }
}

/// In-memory store that counts every call it receives
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub inner: InMemoryObjectStore,
    materialized: Arc<AtomicUsize>,
    attached: Arc<AtomicUsize>,
    relocated: Arc<AtomicUsize>,
    reads: Arc<AtomicUsize>,
    /// Fail `materialize` once this many objects have been created
    fail_after: Option<usize>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(materializations: usize) -> Self {
        Self {
            fail_after: Some(materializations),
            ..Self::default()
        }
    }

    pub fn materialized(&self) -> usize {
        self.materialized.load(Ordering::SeqCst)
    }

    pub fn attached(&self) -> usize {
        self.attached.load(Ordering::SeqCst)
    }

    pub fn mutations(&self) -> usize {
        self.materialized() + self.attached() + self.relocated.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.mutations() + self.reads.load(Ordering::SeqCst)
    }

    /// Seed an object without counting it as a mutation
    pub async fn seed(&self, id: &str, model: ObjectModel) -> ObjectId {
        let id = ObjectId::new(id);
        self.inner
            .materialize(&model, &id)
            .await
            .expect("seeding a fresh id");
        id
    }
}

#[async_trait]
impl ObjectStorePort for RecordingStore {
    async fn materialize(
        &self,
        model: &ObjectModel,
        id: &ObjectId,
    ) -> Result<DomainObject, StoreError> {
        if let Some(limit) = self.fail_after {
            if self.materialized() >= limit {
                return Err(StoreError::Database("disk full".to_string()));
            }
        }
        self.materialized.fetch_add(1, Ordering::SeqCst);
        self.inner.materialize(model, id).await
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<DomainObject>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(id).await
    }

    async fn children(&self, id: &ObjectId) -> Result<Vec<ObjectId>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.children(id).await
    }

    async fn add_child(&self, parent: &ObjectId, child: &ObjectId) -> Result<(), StoreError> {
        self.attached.fetch_add(1, Ordering::SeqCst);
        self.inner.add_child(parent, child).await
    }

    async fn set_location(&self, id: &ObjectId, parent: &ObjectId) -> Result<(), StoreError> {
        self.relocated.fetch_add(1, Ordering::SeqCst);
        self.inner.set_location(id, parent).await
    }
}
