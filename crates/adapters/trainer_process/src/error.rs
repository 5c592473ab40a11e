//! Trainer adapter error types.

use std::path::PathBuf;

use gesturehub_domain::error::HubError;

/// Errors raised while exporting the dataset or running the trainer.
#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    /// Writing the dataset file failed.
    #[error("failed to write dataset to {path}")]
    Dataset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding a sample failed.
    #[error("failed to encode training sample")]
    Encode(#[from] serde_json::Error),

    /// The training command could not be started.
    #[error("failed to start training command `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The training command exited unsuccessfully.
    #[error("training command exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
}

impl From<TrainerError> for HubError {
    fn from(err: TrainerError) -> Self {
        Self::Storage(Box::new(err))
    }
}
