//! Trainer process configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Configuration for the external training command.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Program to run after the dataset is written. When unset, training only
    /// exports the dataset.
    pub command: Option<String>,
    /// Arguments passed before the dataset path.
    pub args: Vec<String>,
    /// Where the JSON-lines dataset is written.
    pub dataset_path: PathBuf,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            dataset_path: PathBuf::from("data/training.jsonl"),
        }
    }
}
