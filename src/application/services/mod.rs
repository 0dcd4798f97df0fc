//! Application services - Use case implementations
//!
//! Import is the involved one: it relabels an exported tree
//! ([`tree_rewriter`]), then rebuilds the object graph in the destination
//! store ([`graph_reconstructor`]). Both are driven by [`import_service`].

pub mod export_service;
pub mod graph_reconstructor;
pub mod import_service;
pub mod object_service;
pub mod tree_rewriter;

#[cfg(test)]
pub(crate) mod test_support;

pub use export_service::{ExportError, ExportService};
#[allow(unused_imports)]
pub use graph_reconstructor::{GraphReconstructor, ReconstructionReport};
pub use import_service::{ImportError, ImportService, ImportServiceImpl};
pub use object_service::{CreateObjectRequest, ObjectService, ObjectServiceImpl};
#[allow(unused_imports)]
pub use tree_rewriter::{relabel_tree, IdentifierMap, RelabeledTree};
