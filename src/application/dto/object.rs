use serde::{Deserialize, Serialize};

use crate::domain::entities::{DomainObject, ObjectModel};

#[derive(Debug, Deserialize)]
pub struct CreateObjectRequestDto {
    /// Object to attach the new one to, if any
    #[serde(default)]
    pub parent_id: Option<String>,
    pub model: ObjectModel,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ObjectResponseDto {
    pub id: String,
    pub model: ObjectModel,
}

impl From<DomainObject> for ObjectResponseDto {
    fn from(object: DomainObject) -> Self {
        Self {
            id: object.id.to_string(),
            model: object.model,
        }
    }
}

/// Outcome of a successful import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// New identifier of the imported root
    pub root_id: String,
    /// Destination the root was attached to
    pub parent_id: String,
    /// Objects materialized, root included
    pub objects_created: usize,
    /// Composition entries ignored as external or already imported
    pub skipped_references: usize,
}
