//! Identifier port - Source of fresh object identifiers

use crate::domain::value_objects::ObjectId;

/// Produces identifiers that are unique across the whole store namespace
///
/// No two calls may ever return the same value, including identifiers handed
/// out by other generators sharing the namespace.
pub trait IdentifierGeneratorPort: Send + Sync {
    fn generate(&self) -> ObjectId;
}
