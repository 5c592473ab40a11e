//! Retrain scheduler — periodically decides whether to retrain the recommender.
//!
//! Each tick counts the event history, compares it with the persisted
//! checkpoint and, when the retrain policy says so, hands the whole history to
//! the trainer. The checkpoint only moves forward after a successful training,
//! so a failed run is retried on the next tick.
//!
//! Ticks run one after another on a single task: a training run that outlives
//! the interval makes the scheduler skip the missed ticks instead of starting
//! a second run.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use gesturehub_domain::error::HubError;
use gesturehub_domain::retrain::RetrainCheckpoint;
use gesturehub_domain::time::{Timestamp, now};
use gesturehub_domain::training::dataset;

use crate::ports::{CheckpointStore, EventLog, ModelTrainer};

/// Timing of the scheduler loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Time between two ticks; the first tick happens one interval after start.
    pub interval: Duration,
    /// Upper bound for one training run.
    pub training_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(600),
            training_timeout: Duration::from_secs(300),
        }
    }
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The policy did not ask for a retrain.
    Skipped,
    /// The model was retrained and the checkpoint advanced.
    Trained {
        samples: usize,
        checkpoint: RetrainCheckpoint,
    },
    /// Training failed or timed out; the checkpoint is unchanged.
    Failed,
}

/// Background control loop around the retrain policy.
pub struct RetrainScheduler<L, K, T> {
    events: L,
    checkpoints: K,
    trainer: T,
    config: SchedulerConfig,
}

impl<L, K, T> RetrainScheduler<L, K, T>
where
    L: EventLog + Send + Sync + 'static,
    K: CheckpointStore + Send + Sync + 'static,
    T: ModelTrainer + Send + Sync + 'static,
{
    pub fn new(events: L, checkpoints: K, trainer: T, config: SchedulerConfig) -> Self {
        Self {
            events,
            checkpoints,
            trainer,
            config,
        }
    }

    /// Run one scheduling decision at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Data`] when the checkpoint cannot be parsed, or a
    /// storage error from the event log or checkpoint store. Training failures
    /// are not errors; they yield [`TickOutcome::Failed`].
    #[tracing::instrument(skip(self))]
    pub async fn tick(&self, now: Timestamp) -> Result<TickOutcome, HubError> {
        let current_count = self.events.count().await?;
        let checkpoint = self.checkpoints.load().await?;
        let decision = checkpoint.evaluate(current_count, now);
        if !decision.should_train() {
            tracing::debug!(
                current_count,
                last_count = checkpoint.last_count,
                "retrain not needed"
            );
            return Ok(TickOutcome::Skipped);
        }

        tracing::info!(
            ?decision,
            current_count,
            last_count = checkpoint.last_count,
            "retraining model"
        );
        let samples = dataset(&self.events.all().await?);
        let count = samples.len();

        match tokio::time::timeout(self.config.training_timeout, self.trainer.train(samples)).await
        {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "training failed, checkpoint left unchanged");
                return Ok(TickOutcome::Failed);
            }
            Err(_) => {
                tracing::warn!(
                    timeout = ?self.config.training_timeout,
                    "training timed out, checkpoint left unchanged"
                );
                return Ok(TickOutcome::Failed);
            }
        }

        let next = RetrainCheckpoint::advanced(current_count, now);
        self.checkpoints.save(next).await?;
        tracing::info!(samples = count, "model retrained");
        Ok(TickOutcome::Trained {
            samples: count,
            checkpoint: next,
        })
    }

    /// Spawn the periodic loop. Abort the returned handle to stop it.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        let period = self.config.interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if let Err(err) = self.tick(now()).await {
                    tracing::error!(error = %err, "retrain tick failed");
                }
            }
        })
    }
}
