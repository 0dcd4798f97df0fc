//! Domain entities - Core business objects with identity

mod domain_object;
mod serialized_tree;

pub use domain_object::{DomainObject, ObjectModel};
#[allow(unused_imports)]
pub use serialized_tree::{
    DocumentError, FlatTree, SerializedTree, EXPORT_MARKER, ROOT_WRAPPER_KEY,
};
