//! # gesturehub-adapter-trainer-process
//!
//! Model trainer adapter. The recommender itself lives outside this
//! workspace; this crate hands it the training dataset.
//!
//! ## Responsibilities
//! - Serialize training samples as JSON lines to a configured path
//! - Run the configured training command and report its exit status
//!
//! ## Dependency rule
//! Depends on `gesturehub-app` (for the `ModelTrainer` port) and
//! `gesturehub-domain`.

mod config;
mod error;
mod process;

pub use config::TrainerConfig;
pub use error::TrainerError;
pub use process::ProcessTrainer;
