//! Import Service - Imports an exported subtree under a destination object
//!
//! The import is sequenced as:
//! 1. Validate the file (JSON, single marker key, single root entry)
//! 2. Check the destination exists and has a composition
//! 3. Relabel every identifier in the tree
//! 4. Materialize the root under its new id, located at the destination
//! 5. Flatten the root wrapper away
//! 6. Reconstruct the rest of the graph below the root
//! 7. Append the root to the destination's composition
//!
//! Steps 1-3 never write to the store. A store failure after that leaves
//! whatever was already materialized in place; imports are not rolled back.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::application::dto::ImportSummary;
use crate::application::ports::outbound::{IdentifierGeneratorPort, ObjectStorePort, StoreError};
use crate::application::services::graph_reconstructor::GraphReconstructor;
use crate::application::services::tree_rewriter::relabel_tree;
use crate::domain::entities::{DocumentError, DomainObject, SerializedTree};
use crate::domain::value_objects::ObjectId;

/// Message shown for any file that fails validation
pub const INVALID_FILE_MESSAGE: &str =
    "The selected file was either invalid JSON or was not formatted properly for import.";

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// File content is not JSON
    #[error("Invalid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// JSON does not have the export layout
    #[error("Invalid export format: {0}")]
    Format(String),

    #[error("Destination not found: {0}")]
    ParentNotFound(ObjectId),

    #[error("Destination cannot hold children: {0}")]
    NotComposable(ObjectId),

    /// Store failed mid-import; the destination may be partially populated
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ImportError {
    /// Whether the error was raised before anything was written
    pub fn is_validation(&self) -> bool {
        !matches!(self, ImportError::Store(_))
    }

    /// Text suitable for showing to the person who picked the file
    pub fn user_message(&self) -> String {
        match self {
            ImportError::Syntax(_) | ImportError::Format(_) => INVALID_FILE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<DocumentError> for ImportError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Syntax(e) => ImportError::Syntax(e),
            DocumentError::Format(msg) => ImportError::Format(msg),
        }
    }
}

#[async_trait]
pub trait ImportService: Send + Sync {
    /// Import the export file `raw` under `parent_id`
    async fn import_json(&self, parent_id: &ObjectId, raw: &str)
        -> Result<ImportSummary, ImportError>;

    /// Whether `parent_id` can receive an import
    async fn applies_to(&self, parent_id: &ObjectId) -> Result<bool, ImportError>;
}

pub struct ImportServiceImpl {
    store: Arc<dyn ObjectStorePort>,
    ids: Arc<dyn IdentifierGeneratorPort>,
    max_import_bytes: usize,
}

impl ImportServiceImpl {
    pub fn new(
        store: Arc<dyn ObjectStorePort>,
        ids: Arc<dyn IdentifierGeneratorPort>,
        max_import_bytes: usize,
    ) -> Self {
        Self {
            store,
            ids,
            max_import_bytes,
        }
    }

    fn parse(&self, raw: &str) -> Result<SerializedTree, ImportError> {
        if raw.len() > self.max_import_bytes {
            return Err(ImportError::Format(format!(
                "file is {} bytes, limit is {}",
                raw.len(),
                self.max_import_bytes
            )));
        }
        Ok(SerializedTree::from_export_json(raw)?)
    }

    async fn destination(&self, parent_id: &ObjectId) -> Result<DomainObject, ImportError> {
        let parent = self
            .store
            .get(parent_id)
            .await?
            .ok_or_else(|| ImportError::ParentNotFound(parent_id.clone()))?;
        if !parent.has_composition() {
            return Err(ImportError::NotComposable(parent_id.clone()));
        }
        Ok(parent)
    }
}

#[async_trait]
impl ImportService for ImportServiceImpl {
    #[instrument(skip(self, raw), fields(parent_id = %parent_id, bytes = raw.len()))]
    async fn import_json(
        &self,
        parent_id: &ObjectId,
        raw: &str,
    ) -> Result<ImportSummary, ImportError> {
        let tree = self.parse(raw).inspect_err(|e| warn!("Rejected import file: {}", e))?;
        let parent = self.destination(parent_id).await?;

        let relabeled = relabel_tree(tree, self.ids.as_ref())
            .ok_or_else(|| ImportError::Format("empty root wrapper".to_string()))?;
        let root_id = relabeled.root_id.clone();
        let root_model = relabeled
            .tree
            .root
            .get(&root_id)
            .map(|model| model.detached())
            .unwrap_or_default();

        let root = self.store.materialize(&root_model, &root_id).await?;
        self.store.set_location(&root_id, &parent.id).await?;

        let flat = relabeled.tree.flatten(root_id.clone());
        let report = GraphReconstructor::new(self.store.as_ref())
            .reconstruct(&root, &flat)
            .await?;

        self.store.add_child(&parent.id, &root_id).await?;

        info!(
            root_id = %root_id,
            created = report.created + 1,
            skipped = report.skipped,
            "Imported subtree"
        );

        Ok(ImportSummary {
            root_id: root_id.to_string(),
            parent_id: parent.id.to_string(),
            objects_created: report.created + 1,
            skipped_references: report.skipped,
        })
    }

    async fn applies_to(&self, parent_id: &ObjectId) -> Result<bool, ImportError> {
        match self.destination(parent_id).await {
            Ok(_) => Ok(true),
            Err(ImportError::ParentNotFound(_) | ImportError::NotComposable(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
