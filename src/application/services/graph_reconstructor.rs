//! Graph Reconstructor - Materializes an imported tree into the store
//!
//! Walks composition edges depth-first from an already materialized root.
//! Each object in the tree is materialized at most once: the first time the
//! walk reaches it wins, and every later reference (a second parent sharing
//! it, or a cycle leading back to it) is skipped. References to identifiers
//! that are not keys of the tree point outside the payload and are skipped
//! as well.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::application::ports::outbound::{ObjectStorePort, StoreError};
use crate::domain::entities::{DomainObject, FlatTree, ObjectModel};
use crate::domain::value_objects::ObjectId;

/// What a reconstruction did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconstructionReport {
    /// Objects materialized below the root
    pub created: usize,
    /// Composition entries ignored (unresolvable or already visited)
    pub skipped: usize,
}

pub struct GraphReconstructor<'a> {
    store: &'a dyn ObjectStorePort,
}

impl<'a> GraphReconstructor<'a> {
    pub fn new(store: &'a dyn ObjectStorePort) -> Self {
        Self { store }
    }

    /// Materialize every descendant of `root` reachable through `tree`
    pub async fn reconstruct(
        &self,
        root: &DomainObject,
        tree: &FlatTree,
    ) -> Result<ReconstructionReport, StoreError> {
        debug!(root = %tree.root_id, objects = tree.len(), "Reconstructing imported graph");
        let mut visited = HashSet::from([root.id.clone()]);
        self.walk(&root.id, tree, &mut visited).await
    }

    /// Depth-first walk from `start`, skipping anything already in `visited`
    ///
    /// Uses an explicit stack of (parent, next composition index) so a child's
    /// subtree is finished before its next sibling is looked at, exactly as a
    /// recursive walk would, without recursing through async frames.
    pub async fn walk(
        &self,
        start: &ObjectId,
        tree: &FlatTree,
        visited: &mut HashSet<ObjectId>,
    ) -> Result<ReconstructionReport, StoreError> {
        let mut report = ReconstructionReport::default();
        let mut stack: Vec<(ObjectId, usize)> = vec![(start.clone(), 0)];

        while let Some((parent_id, index)) = stack.pop() {
            let composition = tree
                .get(&parent_id)
                .map(ObjectModel::children)
                .unwrap_or_default();
            let Some(child_id) = composition.get(index) else {
                continue;
            };
            stack.push((parent_id.clone(), index + 1));

            let Some(child_model) = tree.get(child_id) else {
                trace!(parent = %parent_id, child = %child_id, "Skipping reference outside payload");
                report.skipped += 1;
                continue;
            };
            if visited.contains(child_id) {
                trace!(parent = %parent_id, child = %child_id, "Skipping already materialized object");
                report.skipped += 1;
                continue;
            }

            self.store.materialize(&child_model.detached(), child_id).await?;
            self.store.add_child(&parent_id, child_id).await?;
            self.store.set_location(child_id, &parent_id).await?;
            visited.insert(child_id.clone());
            report.created += 1;

            debug!(parent = %parent_id, child = %child_id, "Materialized imported object");
            stack.push((child_id.clone(), 0));
        }

        Ok(report)
    }
}
