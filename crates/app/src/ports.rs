//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.
//!
//! Every port is also implemented for `Arc<T>` so one adapter instance can be
//! shared by several services.

pub mod actuation;
pub mod capability_store;
pub mod checkpoint_store;
pub mod event_log;
pub mod mapping_repo;
pub mod status_repo;
pub mod trainer;

pub use actuation::ActuationPublisher;
pub use capability_store::CapabilityStore;
pub use checkpoint_store::CheckpointStore;
pub use event_log::EventLog;
pub use mapping_repo::MappingRepository;
pub use status_repo::StatusRepository;
pub use trainer::ModelTrainer;
