//! Ports - Interfaces between the application and the outside world

pub mod outbound;
