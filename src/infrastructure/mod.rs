//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: in-memory and SQLite object stores
//! - HTTP: REST API routes
//! - Identifiers: UUID identifier generator
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod identifiers;
pub mod persistence;
pub mod state;
