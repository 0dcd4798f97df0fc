//! Outbound ports - Interfaces that the application requires from external systems

mod identifier_port;
mod object_store_port;

pub use identifier_port::IdentifierGeneratorPort;
pub use object_store_port::{ObjectStorePort, StoreError};
