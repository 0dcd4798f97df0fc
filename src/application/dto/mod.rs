//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP) can
//! serialize/deserialize without shaping the domain model around it.

pub mod object;

pub use object::*;
