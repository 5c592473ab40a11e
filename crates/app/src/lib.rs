//! # gesturehub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CapabilityStore` — controls and IR codes per mode
//!   - `MappingRepository` — mode triggers and control mappings
//!   - `StatusRepository` — per-device status
//!   - `EventLog` — append & query handled gestures
//!   - `CheckpointStore` — retrain scheduler progress
//!   - `ActuationPublisher` — message bus
//!   - `ModelTrainer` — the external recommender
//! - Define **driving/inbound ports** as use-case structs:
//!   - `GestureService` — the gesture pipeline
//!   - `ModeService`, `StatusService`, `MappingService`, `StatisticsService`
//!   - `RetrainScheduler` — periodic background retraining
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `gesturehub-domain` only (plus `tokio` for locks, timers and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod retrain_scheduler;
pub mod services;

#[cfg(test)]
mod fakes;
