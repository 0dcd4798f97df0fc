//! Domain object entity - Persisted objects with composition and location
//!
//! A model is opaque type/attribute data plus two structural fields. The
//! `composition` field doubles as the composition capability: an object can
//! hold children only when its model carries the sequence (even if empty).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::value_objects::ObjectId;

/// Stored model of a domain object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectModel {
    /// Ordered child identifiers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<Vec<ObjectId>>,
    /// Identifier of the primary parent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ObjectId>,
    /// Everything else (type, name, configuration...), kept verbatim
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ObjectModel {
    pub fn new(object_type: impl Into<String>, name: impl Into<String>) -> Self {
        let mut attributes = Map::new();
        attributes.insert("type".to_string(), Value::String(object_type.into()));
        attributes.insert("name".to_string(), Value::String(name.into()));
        Self {
            composition: None,
            location: None,
            attributes,
        }
    }

    /// Give the model an (empty) composition capability
    pub fn composable(mut self) -> Self {
        self.composition.get_or_insert_with(Vec::new);
        self
    }

    pub fn with_child(mut self, child: impl Into<ObjectId>) -> Self {
        self.composition.get_or_insert_with(Vec::new).push(child.into());
        self
    }

    pub fn with_location(mut self, parent: impl Into<ObjectId>) -> Self {
        self.location = Some(parent.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn has_composition(&self) -> bool {
        self.composition.is_some()
    }

    /// Composition entries, empty when the capability is absent
    pub fn children(&self) -> &[ObjectId] {
        self.composition.as_deref().unwrap_or(&[])
    }

    pub fn object_type(&self) -> Option<&str> {
        self.attributes.get("type").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }

    /// Copy of the model with structural references removed
    ///
    /// Composition stays present (but empty) when the capability exists, so
    /// the materialized object can still accept children.
    pub fn detached(&self) -> Self {
        Self {
            composition: self.composition.as_ref().map(|_| Vec::new()),
            location: None,
            attributes: self.attributes.clone(),
        }
    }
}

/// A live object in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainObject {
    pub id: ObjectId,
    pub model: ObjectModel,
}

impl DomainObject {
    pub fn new(id: ObjectId, model: ObjectModel) -> Self {
        Self { id, model }
    }

    pub fn has_composition(&self) -> bool {
        self.model.has_composition()
    }
}
