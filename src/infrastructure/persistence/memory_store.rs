//! In-memory object store
//!
//! Holds every object in a `HashMap` behind a tokio `RwLock`. Used when no
//! database is configured and as the store double in tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{ObjectStorePort, StoreError};
use crate::domain::entities::{DomainObject, ObjectModel};
use crate::domain::value_objects::ObjectId;

#[derive(Clone, Default)]
pub struct InMemoryObjectStore {
    objects: Arc<RwLock<HashMap<ObjectId, ObjectModel>>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl InMemoryObjectStore {
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Every stored object, in no particular order
    pub async fn all(&self) -> Vec<DomainObject> {
        self.objects
            .read()
            .await
            .iter()
            .map(|(id, model)| DomainObject::new(id.clone(), model.clone()))
            .collect()
    }
}

#[async_trait]
impl ObjectStorePort for InMemoryObjectStore {
    async fn materialize(
        &self,
        model: &ObjectModel,
        id: &ObjectId,
    ) -> Result<DomainObject, StoreError> {
        let mut objects = self.objects.write().await;
        if objects.contains_key(id) {
            return Err(StoreError::AlreadyExists(id.clone()));
        }
        objects.insert(id.clone(), model.clone());
        Ok(DomainObject::new(id.clone(), model.clone()))
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<DomainObject>, StoreError> {
        Ok(self
            .objects
            .read()
            .await
            .get(id)
            .map(|model| DomainObject::new(id.clone(), model.clone())))
    }

    async fn children(&self, id: &ObjectId) -> Result<Vec<ObjectId>, StoreError> {
        let objects = self.objects.read().await;
        let model = objects
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(model.children().to_vec())
    }

    async fn add_child(&self, parent: &ObjectId, child: &ObjectId) -> Result<(), StoreError> {
        let mut objects = self.objects.write().await;
        let model = objects
            .get_mut(parent)
            .ok_or_else(|| StoreError::NotFound(parent.clone()))?;
        let composition = model
            .composition
            .as_mut()
            .ok_or_else(|| StoreError::NotComposable(parent.clone()))?;
        if !composition.contains(child) {
            composition.push(child.clone());
        }
        Ok(())
    }

    async fn set_location(&self, id: &ObjectId, parent: &ObjectId) -> Result<(), StoreError> {
        let mut objects = self.objects.write().await;
        let model = objects
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        model.location = Some(parent.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_materialize_rejects_duplicate_identity() {
        let store = InMemoryObjectStore::new();
        let id = ObjectId::new("a");
        store
            .materialize(&ObjectModel::new("folder", "A"), &id)
            .await
            .unwrap();

        let err = store
            .materialize(&ObjectModel::new("folder", "again"), &id)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_add_child_appends_once() {
        let store = InMemoryObjectStore::new();
        let parent = ObjectId::new("p");
        store
            .materialize(&ObjectModel::new("folder", "P").composable(), &parent)
            .await
            .unwrap();

        store.add_child(&parent, &"c1".into()).await.unwrap();
        store.add_child(&parent, &"c2".into()).await.unwrap();
        store.add_child(&parent, &"c1".into()).await.unwrap();

        assert_eq!(
            store.children(&parent).await.unwrap(),
            vec![ObjectId::new("c1"), ObjectId::new("c2")]
        );
    }

    #[tokio::test]
    async fn test_add_child_requires_composition() {
        let store = InMemoryObjectStore::new();
        let leaf = ObjectId::new("leaf");
        store
            .materialize(&ObjectModel::new("clock", "Leaf"), &leaf)
            .await
            .unwrap();

        let err = store.add_child(&leaf, &"x".into()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotComposable(_)));
    }

    #[tokio::test]
    async fn test_set_location_on_missing_object() {
        let store = InMemoryObjectStore::new();
        let err = store
            .set_location(&"ghost".into(), &"p".into())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
