//! Export Service - Serializes a stored subtree into a portable document
//!
//! Walks composition from a root, collecting each reachable object once. The
//! root goes under the `"root"` wrapper; every descendant is a top-level
//! entry keyed by its current identifier. Models are written as stored.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{ObjectStorePort, StoreError};
use crate::domain::entities::SerializedTree;
use crate::domain::value_objects::ObjectId;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Object not found: {0}")]
    NotFound(ObjectId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub struct ExportService {
    store: Arc<dyn ObjectStorePort>,
}

impl ExportService {
    pub fn new(store: Arc<dyn ObjectStorePort>) -> Self {
        Self { store }
    }

    /// Collect the subtree rooted at `root_id`
    #[instrument(skip(self), fields(root_id = %root_id))]
    pub async fn export_tree(&self, root_id: &ObjectId) -> Result<SerializedTree, ExportError> {
        let root = self
            .store
            .get(root_id)
            .await?
            .ok_or_else(|| ExportError::NotFound(root_id.clone()))?;

        let mut visited = HashSet::from([root.id.clone()]);
        let mut pending: Vec<ObjectId> = root.model.children().iter().rev().cloned().collect();
        let mut tree = SerializedTree::new(root.id, root.model);

        while let Some(id) = pending.pop() {
            if !visited.insert(id.clone()) {
                continue;
            }
            let Some(object) = self.store.get(&id).await? else {
                debug!(object_id = %id, "Skipping missing child during export");
                continue;
            };
            pending.extend(object.model.children().iter().rev().cloned());
            tree.objects.insert(object.id, object.model);
        }

        info!(objects = tree.objects.len() + 1, "Exported subtree");
        Ok(tree)
    }

    /// Export the subtree as a pretty-printed export file
    pub async fn export_to_json(&self, root_id: &ObjectId) -> Result<String, ExportError> {
        let tree = self.export_tree(root_id).await?;
        Ok(tree.to_export_json()?)
    }
}
