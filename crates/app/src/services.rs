//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod actuation;
pub mod control_resolver;
pub mod gesture_service;
pub mod mapping_service;
pub mod mode_service;
pub mod statistics_service;
pub mod status_service;
