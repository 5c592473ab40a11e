//! Gesture service — the gesture pipeline.
//!
//! incoming gesture → mode trigger? → control resolution → status inference
//! and merge → publish → event record.
//!
//! The device's status is locked from inference until the new status is
//! stored, and it is only stored once the publish succeeded. Every dispatched
//! gesture produces an event record: a failed publish is marked failed, and a
//! publish followed by a failed status write is still a success carrying the
//! inferred status.

use std::sync::Arc;

use gesturehub_domain::active_mode::ModeChange;
use gesturehub_domain::error::{HubError, ValidationError};
use gesturehub_domain::event::{ActuationPayload, EventRecord};
use gesturehub_domain::id::Gesture;
use gesturehub_domain::status::{DeviceStatus, next_status};

use crate::ports::{ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository};
use crate::services::actuation::ActuationDispatcher;
use crate::services::control_resolver::ControlResolver;
use crate::services::mode_service::ModeService;
use crate::services::status_service::StatusService;

/// What handling a gesture did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The gesture was a mode trigger.
    ModeChanged(ModeChange),
    /// The gesture actuated a device.
    Actuated {
        payload: ActuationPayload,
        label: String,
        status: DeviceStatus,
    },
}

/// Entry point for recognized gestures.
pub struct GestureService<C, M, S, L, P> {
    modes: Arc<ModeService<M>>,
    resolver: ControlResolver<C, M>,
    status: Arc<StatusService<S>>,
    dispatcher: ActuationDispatcher<P>,
    events: L,
}

impl<C, M, S, L, P> GestureService<C, M, S, L, P>
where
    C: CapabilityStore,
    M: MappingRepository,
    S: StatusRepository,
    L: EventLog,
    P: ActuationPublisher,
{
    /// Create the pipeline.
    ///
    /// `modes` and `status` are shared with the rest of the application so the
    /// active mode and the per-device locks stay unique.
    pub fn new(
        modes: Arc<ModeService<M>>,
        resolver: ControlResolver<C, M>,
        status: Arc<StatusService<S>>,
        dispatcher: ActuationDispatcher<P>,
        events: L,
    ) -> Self {
        Self {
            modes,
            resolver,
            status,
            dispatcher,
            events,
        }
    }

    /// Handle one recognized gesture.
    ///
    /// # Errors
    ///
    /// - [`HubError::Validation`] when the gesture is blank or no mode is active
    /// - [`HubError::NotFound`] when the gesture is unmapped or has no IR code
    /// - [`HubError::Transport`] when publishing failed (the event is still logged)
    /// - a storage error when the status write after a successful publish
    ///   failed (the event is still logged)
    /// - a storage error from any repository
    #[tracing::instrument(skip(self))]
    pub async fn handle(&self, gesture: &Gesture) -> Result<GestureOutcome, HubError> {
        if gesture.is_blank() {
            return Err(ValidationError::MissingField("gesture").into());
        }

        if let Some(change) = self.modes.handle(gesture).await? {
            return Ok(GestureOutcome::ModeChanged(change));
        }

        let mode = self
            .modes
            .current()
            .await
            .ok_or(ValidationError::NoActiveMode)?;
        let resolved = self.resolver.resolve(&mode, gesture).await?;
        let payload = ActuationPayload {
            gesture: gesture.clone(),
            mode,
            control: resolved.control,
            code: resolved.code,
        };

        let guard = self.status.lock(&payload.mode).await;
        let current = guard.load().await?;
        let next = next_status(&payload.mode, &payload.control, &current);

        if let Err(err) = self.dispatcher.dispatch(&payload).await {
            drop(guard);
            tracing::warn!(error = %err, "actuation failed");
            self.record(EventRecord::failed(&payload, &resolved.label, err.to_string()))
                .await;
            return Err(err);
        }

        let stored = guard.store(&next).await;
        drop(guard);
        if let Err(err) = stored {
            tracing::error!(error = %err, "device actuated but its status was not stored");
            self.record(EventRecord::succeeded(&payload, &resolved.label, next))
                .await;
            return Err(err);
        }

        tracing::info!(
            mode = %payload.mode,
            control = %payload.control,
            power = %next.power,
            "gesture actuated"
        );
        self.record(EventRecord::succeeded(&payload, &resolved.label, next.clone()))
            .await;

        Ok(GestureOutcome::Actuated {
            payload,
            label: resolved.label,
            status: next,
        })
    }

    async fn record(&self, record: EventRecord) {
        if let Err(err) = self.events.append(record).await {
            tracing::error!(error = %err, "failed to append event record");
        }
    }
}
