//! Object store adapters
//!
//! Implementations of [`ObjectStorePort`](crate::application::ports::outbound::ObjectStorePort)
//! for an in-memory map and for SQLite, plus the enum that selects between
//! them at startup.

mod factory;
mod memory_store;
mod sqlite_store;

pub use factory::{ObjectStoreBackend, ObjectStoreFactory};
pub use memory_store::InMemoryObjectStore;
pub use sqlite_store::SqliteObjectStore;
