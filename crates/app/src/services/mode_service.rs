//! Mode service — the process-wide active mode register.

use tokio::sync::Mutex;

use gesturehub_domain::active_mode::{ActiveMode, ModeChange};
use gesturehub_domain::error::{HubError, NotFoundError};
use gesturehub_domain::id::{Gesture, Mode};
use gesturehub_domain::mapping::ModeTrigger;

use crate::ports::MappingRepository;

/// Owns the single active mode and applies mode-trigger gestures to it.
///
/// Transitions happen under one lock, so concurrent triggers are applied one
/// after the other.
pub struct ModeService<M> {
    repo: M,
    active: Mutex<ActiveMode>,
}

impl<M: MappingRepository> ModeService<M> {
    /// Create a new service with no mode selected.
    pub fn new(repo: M) -> Self {
        Self {
            repo,
            active: Mutex::new(ActiveMode::default()),
        }
    }

    /// Interpret `gesture` as a mode trigger.
    ///
    /// Returns `None` when the gesture is not a mode trigger.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn handle(&self, gesture: &Gesture) -> Result<Option<ModeChange>, HubError> {
        let Some(trigger) = self.repo.find_mode_trigger(gesture).await? else {
            return Ok(None);
        };
        let change = self.active.lock().await.toggle(trigger.mode);
        tracing::info!(%change, "active mode changed");
        Ok(Some(change))
    }

    /// Select the mode owned by `gesture` without toggling.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NotFound`] when `gesture` is not a mode trigger,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn select(&self, gesture: &Gesture) -> Result<ModeChange, HubError> {
        let trigger = self
            .repo
            .find_mode_trigger(gesture)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "ModeTrigger",
                id: gesture.to_string(),
            })?;
        let change = self.active.lock().await.select(trigger.mode);
        tracing::info!(%change, "active mode selected");
        Ok(change)
    }

    /// The currently active mode.
    pub async fn current(&self) -> Option<Mode> {
        self.active.lock().await.current().cloned()
    }

    /// All mode-trigger gestures.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    pub async fn triggers(&self) -> Result<Vec<ModeTrigger>, HubError> {
        self.repo.list_mode_triggers().await
    }
}
