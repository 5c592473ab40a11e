//! # gesturehub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the storage port traits defined in `gesturehub-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run the embedded schema and seed migrations
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `gesturehub-app` (for port traits) and `gesturehub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod capability_store;
mod checkpoint_store;
mod error;
mod event_log;
mod mapping_repo;
mod pool;
mod status_repo;

pub use capability_store::SqliteCapabilityStore;
pub use checkpoint_store::SqliteCheckpointStore;
pub use error::StorageError;
pub use event_log::SqliteEventLog;
pub use mapping_repo::SqliteMappingRepository;
pub use pool::{Config, Database};
pub use status_repo::SqliteStatusRepository;
