//! Domain layer - Core model with no infrastructure dependencies
//!
//! This layer contains:
//! - Entities: domain objects and the serialized tree document
//! - Value Objects: object identifiers

pub mod entities;
pub mod value_objects;
