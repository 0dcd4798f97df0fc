//! Application layer - Use cases and the ports they depend on
//!
//! This layer contains:
//! - DTOs: request/response shapes for the HTTP boundary
//! - Ports: interfaces the use cases require from infrastructure
//! - Services: import, export and object management

pub mod dto;
pub mod ports;
pub mod services;
