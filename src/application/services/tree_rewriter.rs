//! Tree Rewriter - Relabels every identifier in a serialized tree
//!
//! Relabeling works on the parsed structure. A mapping from every identifier
//! in the tree to a fresh one is built first, then only the fields known to
//! hold identifiers are reassigned: map keys, `composition` entries and
//! `location` values. Free-text attributes are never touched, so an id that
//! is a substring of another id (or of a name) cannot corrupt the payload.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::application::ports::outbound::IdentifierGeneratorPort;
use crate::domain::entities::{ObjectModel, SerializedTree};
use crate::domain::value_objects::ObjectId;

/// Mapping from pre-import identifiers to freshly generated ones
#[derive(Debug, Clone, Default)]
pub struct IdentifierMap {
    mapping: HashMap<ObjectId, ObjectId>,
}

impl IdentifierMap {
    /// Generate a new identifier for every distinct identifier in `tree`
    ///
    /// Covers the wrapper's root key, every top-level key, and every id
    /// referenced from `composition` or `location`, whether or not it is also
    /// a key. The generator is called exactly once per distinct identifier.
    pub fn build(tree: &SerializedTree, ids: &dyn IdentifierGeneratorPort) -> Self {
        let mut map = Self::default();

        for (id, model) in tree.root.iter().chain(tree.objects.iter()) {
            map.assign(id, ids);
            for child in model.children() {
                map.assign(child, ids);
            }
            if let Some(location) = &model.location {
                map.assign(location, ids);
            }
        }

        map
    }

    fn assign(&mut self, old: &ObjectId, ids: &dyn IdentifierGeneratorPort) {
        if !self.mapping.contains_key(old) {
            self.mapping.insert(old.clone(), ids.generate());
        }
    }

    pub fn get(&self, old: &ObjectId) -> Option<&ObjectId> {
        self.mapping.get(old)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    fn relabel(&self, id: &ObjectId) -> ObjectId {
        // Built from the same tree it rewrites, so every lookup hits.
        self.mapping.get(id).cloned().unwrap_or_else(|| id.clone())
    }

    fn relabel_model(&self, model: ObjectModel) -> ObjectModel {
        ObjectModel {
            composition: model
                .composition
                .map(|children| children.iter().map(|c| self.relabel(c)).collect()),
            location: model.location.as_ref().map(|l| self.relabel(l)),
            attributes: model.attributes,
        }
    }

    fn relabel_entries(
        &self,
        entries: BTreeMap<ObjectId, ObjectModel>,
    ) -> BTreeMap<ObjectId, ObjectModel> {
        entries
            .into_iter()
            .map(|(id, model)| (self.relabel(&id), self.relabel_model(model)))
            .collect()
    }
}

/// Result of relabeling a tree
#[derive(Debug, Clone)]
pub struct RelabeledTree {
    /// Same shape as the input, with every identifier replaced
    pub tree: SerializedTree,
    /// New identifier of the subtree root
    pub root_id: ObjectId,
    pub mapping: IdentifierMap,
}

/// Replace every identifier in `tree` with a freshly generated one
///
/// Returns `None` when the root wrapper is empty.
pub fn relabel_tree(
    tree: SerializedTree,
    ids: &dyn IdentifierGeneratorPort,
) -> Option<RelabeledTree> {
    let old_root = tree.root_entry()?.0.clone();
    let mapping = IdentifierMap::build(&tree, ids);
    let root_id = mapping.relabel(&old_root);

    let tree = SerializedTree {
        root: mapping.relabel_entries(tree.root),
        objects: mapping.relabel_entries(tree.objects),
    };

    debug!(
        old_root = %old_root,
        new_root = %root_id,
        identifiers = mapping.len(),
        "Relabeled serialized tree"
    );

    Some(RelabeledTree {
        tree,
        root_id,
        mapping,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::SequentialIds;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SerializedTree {
        SerializedTree::from_export_json(&value.to_string()).unwrap()
    }

    #[test]
    fn test_every_key_and_reference_is_relabeled() {
        let tree = parse(json!({
            "openmct": {
                "root": { "a": { "type": "folder", "composition": ["b", "c"], "location": "mine" } },
                "b": { "type": "folder", "composition": ["c"], "location": "a" },
                "c": { "type": "clock", "location": "b" }
            }
        }));
        let ids = SequentialIds::new("new");

        let relabeled = relabel_tree(tree, &ids).unwrap();
        let m = &relabeled.mapping;
        let a = m.get(&"a".into()).unwrap().clone();
        let b = m.get(&"b".into()).unwrap().clone();
        let c = m.get(&"c".into()).unwrap().clone();

        assert_eq!(relabeled.root_id, a);
        let root_model = &relabeled.tree.root[&a];
        assert_eq!(root_model.children(), &[b.clone(), c.clone()]);

        let b_model = &relabeled.tree.objects[&b];
        assert_eq!(b_model.children(), &[c.clone()]);
        assert_eq!(b_model.location.as_ref(), Some(&a));
        assert_eq!(relabeled.tree.objects[&c].location.as_ref(), Some(&b));

        for old in ["a", "b", "c"] {
            assert!(!relabeled.tree.objects.contains_key(old));
        }
    }

    #[test]
    fn test_generator_called_once_per_distinct_identifier() {
        let tree = parse(json!({
            "openmct": {
                "root": { "a": { "composition": ["b", "b", "ext"], "location": "mine" } },
                "b": { "composition": ["a"], "location": "a" }
            }
        }));
        let ids = SequentialIds::new("id");

        let relabeled = relabel_tree(tree, &ids).unwrap();

        // a, b, ext, mine
        assert_eq!(ids.count(), 4);
        assert_eq!(relabeled.mapping.len(), 4);
    }

    #[test]
    fn test_references_to_objects_not_yet_seen_as_keys_are_mapped() {
        let tree = parse(json!({
            "openmct": {
                "root": { "a": { "composition": ["z"] } },
                "z": { "location": "a" }
            }
        }));
        let ids = SequentialIds::new("id");

        let relabeled = relabel_tree(tree, &ids).unwrap();
        let z = relabeled.mapping.get(&"z".into()).unwrap();
        assert!(relabeled.tree.objects.contains_key(z));
        assert_eq!(relabeled.tree.root[&relabeled.root_id].children(), &[z.clone()]);
    }

    #[test]
    fn test_prefix_identifiers_do_not_cross_corrupt() {
        let tree = parse(json!({
            "openmct": {
                "root": { "1": { "name": "item 1 of 12", "composition": ["12"] } },
                "12": { "name": "twelve", "notes": "see 1 and 12", "location": "1" }
            }
        }));
        let ids = SequentialIds::new("x");

        let relabeled = relabel_tree(tree, &ids).unwrap();
        let one = relabeled.mapping.get(&"1".into()).unwrap().clone();
        let twelve = relabeled.mapping.get(&"12".into()).unwrap().clone();
        assert_ne!(one, twelve);

        let root = &relabeled.tree.root[&one];
        assert_eq!(root.children(), &[twelve.clone()]);
        assert_eq!(root.name(), Some("item 1 of 12"));

        let child = &relabeled.tree.objects[&twelve];
        assert_eq!(child.location.as_ref(), Some(&one));
        assert_eq!(child.attributes["notes"], json!("see 1 and 12"));
    }

    #[test]
    fn test_empty_wrapper_yields_none() {
        let ids = SequentialIds::new("x");
        assert!(relabel_tree(SerializedTree::default(), &ids).is_none());
        assert_eq!(ids.count(), 0);
    }
}
