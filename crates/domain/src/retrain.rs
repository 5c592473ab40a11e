//! Retrain policy — when accumulated history justifies retraining.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Maximum age, in hours, of the last training before a retrain is forced.
pub const MAX_MODEL_AGE_HOURS: i64 = 3;

/// Persisted progress of the retrain scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RetrainCheckpoint {
    pub last_count: u64,
    pub last_trained_at: Option<Timestamp>,
}

/// Why a retrain was (or was not) triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrainDecision {
    /// History grew by at least the threshold since the last training.
    Growth { delta: u64, threshold: u64 },
    /// No training has happened yet.
    FirstRun,
    /// The last training is older than [`MAX_MODEL_AGE_HOURS`].
    Stale { elapsed: TimeDelta },
    Skip,
}

impl RetrainDecision {
    #[must_use]
    pub fn should_train(self) -> bool {
        !matches!(self, Self::Skip)
    }
}

/// Minimum event growth required to retrain at a given history size.
#[must_use]
pub fn threshold(current_count: u64) -> u64 {
    match current_count {
        0..200 => 30,
        200..500 => 100,
        _ => 200,
    }
}

impl RetrainCheckpoint {
    /// Decide whether to retrain with `current_count` events at `now`.
    #[must_use]
    pub fn evaluate(&self, current_count: u64, now: Timestamp) -> RetrainDecision {
        let delta = current_count.saturating_sub(self.last_count);
        let threshold = threshold(current_count);
        if delta >= threshold {
            return RetrainDecision::Growth { delta, threshold };
        }
        let Some(last_trained_at) = self.last_trained_at else {
            return RetrainDecision::FirstRun;
        };
        let elapsed = now - last_trained_at;
        if elapsed >= TimeDelta::hours(MAX_MODEL_AGE_HOURS) {
            RetrainDecision::Stale { elapsed }
        } else {
            RetrainDecision::Skip
        }
    }

    /// The checkpoint written after a successful training.
    #[must_use]
    pub fn advanced(current_count: u64, now: Timestamp) -> Self {
        Self {
            last_count: current_count,
            last_trained_at: Some(now),
        }
    }
}
