//! Serialized tree - The portable JSON form of an exported subtree
//!
//! An export file looks like:
//!
//! ```json
//! {
//!   "openmct": {
//!     "root": { "<root id>": { ...root model... } },
//!     "<child id>": { ...model... },
//!     "<grandchild id>": { ...model... }
//!   }
//! }
//! ```
//!
//! The single top-level key is a fixed marker. Inside it, the `"root"` wrapper
//! marks the top of the subtree and holds exactly one entry; every other key
//! is an object identifier.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::ObjectModel;
use crate::domain::value_objects::ObjectId;

/// Marker key wrapping the whole document
pub const EXPORT_MARKER: &str = "openmct";

/// Key of the wrapper entry holding the subtree root
pub const ROOT_WRAPPER_KEY: &str = "root";

/// Reasons an export file is refused before anything is imported
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("File is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    #[error("File is not formatted for import: {0}")]
    Format(String),
}

/// Export payload: the root wrapper plus every other object keyed by id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SerializedTree {
    #[serde(rename = "root")]
    pub root: BTreeMap<ObjectId, ObjectModel>,
    #[serde(flatten)]
    pub objects: BTreeMap<ObjectId, ObjectModel>,
}

impl SerializedTree {
    pub fn new(root_id: ObjectId, root_model: ObjectModel) -> Self {
        Self {
            root: BTreeMap::from([(root_id, root_model)]),
            objects: BTreeMap::new(),
        }
    }

    /// Parse and validate the contents of an export file
    ///
    /// The text must be JSON whose top level has exactly one key, the export
    /// marker, and whose root wrapper holds exactly one entry.
    pub fn from_export_json(raw: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(raw).map_err(DocumentError::Syntax)?;

        let Value::Object(mut top) = value else {
            return Err(DocumentError::Format(
                "top level must be a JSON object".to_string(),
            ));
        };
        if top.len() != 1 {
            return Err(DocumentError::Format(format!(
                "expected exactly one top-level key, found {}",
                top.len()
            )));
        }
        let body = top.remove(EXPORT_MARKER).ok_or_else(|| {
            DocumentError::Format(format!("missing \"{}\" marker key", EXPORT_MARKER))
        })?;

        let tree: SerializedTree = serde_json::from_value(body)
            .map_err(|e| DocumentError::Format(e.to_string()))?;

        if tree.root.len() != 1 {
            return Err(DocumentError::Format(format!(
                "\"{}\" must hold exactly one object, found {}",
                ROOT_WRAPPER_KEY,
                tree.root.len()
            )));
        }

        Ok(tree)
    }

    /// Render as an export file
    pub fn to_export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&ExportDocument { tree: self })
    }

    /// Render as an export document value
    pub fn to_export_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(ExportDocument { tree: self })
    }

    pub fn root_entry(&self) -> Option<(&ObjectId, &ObjectModel)> {
        self.root.iter().next()
    }

    /// Remove the root wrapper, keying the root model by `root_id`
    ///
    /// The wrapper must hold exactly one entry; this is checked when parsing.
    pub fn flatten(self, root_id: ObjectId) -> FlatTree {
        let mut objects = self.objects;
        if let Some(model) = self.root.into_values().next() {
            objects.insert(root_id.clone(), model);
        }
        FlatTree { root_id, objects }
    }
}

/// Borrowing wrapper used to write the marker key around a tree
#[derive(Serialize)]
struct ExportDocument<'a> {
    #[serde(rename = "openmct")]
    tree: &'a SerializedTree,
}

/// A tree with the root wrapper removed; the root is an ordinary entry
#[derive(Debug, Clone, PartialEq)]
pub struct FlatTree {
    pub root_id: ObjectId,
    pub objects: BTreeMap<ObjectId, ObjectModel>,
}

impl FlatTree {
    pub fn get(&self, id: &ObjectId) -> Option<&ObjectModel> {
        self.objects.get(id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> String {
        json!({
            "openmct": {
                "root": { "a": { "type": "folder", "composition": ["b"], "location": "mine" } },
                "b": { "type": "clock", "location": "a" }
            }
        })
        .to_string()
    }

    #[test]
    fn test_parse_valid_document() {
        let tree = SerializedTree::from_export_json(&sample()).unwrap();
        let (root_id, root_model) = tree.root_entry().unwrap();
        assert_eq!(root_id.as_str(), "a");
        assert_eq!(root_model.children(), &[ObjectId::new("b")]);
        assert_eq!(tree.objects.len(), 1);
        assert!(tree.objects.contains_key("b"));
    }

    #[test]
    fn test_rejects_non_json() {
        let err = SerializedTree::from_export_json("this is not json").unwrap_err();
        assert!(matches!(err, DocumentError::Syntax(_)));
    }

    #[test]
    fn test_rejects_wrong_marker() {
        let err = SerializedTree::from_export_json(r#"{"notTheMarker": {}}"#).unwrap_err();
        assert!(matches!(err, DocumentError::Format(_)));
    }

    #[test]
    fn test_rejects_extra_top_level_keys() {
        let raw = json!({ "openmct": { "root": { "a": {} } }, "other": 1 }).to_string();
        let err = SerializedTree::from_export_json(&raw).unwrap_err();
        assert!(matches!(err, DocumentError::Format(_)));
    }

    #[test]
    fn test_rejects_non_object_top_level() {
        let err = SerializedTree::from_export_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DocumentError::Format(_)));
    }

    #[test]
    fn test_rejects_root_wrapper_with_two_entries() {
        let raw = json!({ "openmct": { "root": { "a": {}, "b": {} } } }).to_string();
        let err = SerializedTree::from_export_json(&raw).unwrap_err();
        assert!(matches!(err, DocumentError::Format(_)));
    }

    #[test]
    fn test_flatten_moves_root_to_top_level() {
        let tree = SerializedTree::from_export_json(&sample()).unwrap();
        let flat = tree.flatten(ObjectId::new("a"));

        assert_eq!(flat.len(), 2);
        assert!(flat.contains(&ObjectId::new("a")));
        assert!(!flat.contains(&ObjectId::new(ROOT_WRAPPER_KEY)));
        assert_eq!(flat.get(&ObjectId::new("a")).unwrap().object_type(), Some("folder"));
    }

    #[test]
    fn test_export_json_round_trips_through_parser() {
        let tree = SerializedTree::from_export_json(&sample()).unwrap();
        let rendered = tree.to_export_json().unwrap();
        let reparsed = SerializedTree::from_export_json(&rendered).unwrap();
        assert_eq!(tree, reparsed);
    }
}
