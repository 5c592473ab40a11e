//! In-memory port implementations shared by the service tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use gesturehub_domain::error::{
    ConflictError, DataError, HubError, NotFoundError, TransportError,
};
use gesturehub_domain::event::{ActuationPayload, EventRecord};
use gesturehub_domain::id::{Control, Gesture, Mode};
use gesturehub_domain::mapping::{Capability, ControlMapping, ModeTrigger};
use gesturehub_domain::retrain::RetrainCheckpoint;
use gesturehub_domain::status::DeviceStatus;
use gesturehub_domain::time::Timestamp;
use gesturehub_domain::training::TrainingSample;

use crate::ports::{
    ActuationPublisher, CapabilityStore, CheckpointStore, EventLog, MappingRepository,
    StatusRepository, ModelTrainer,
};

fn capability(mode: &str, control: &str, code: &str) -> Capability {
    Capability {
        mode: Mode::new(mode),
        control: Control::new(control),
        code: code.to_string(),
        label: control.to_string(),
    }
}

pub struct InMemoryCapabilities {
    entries: Vec<Capability>,
}

impl Default for InMemoryCapabilities {
    fn default() -> Self {
        Self {
            entries: vec![
                capability("curtain", "close", "0xC2"),
                capability("curtain", "open", "0xC1"),
                capability("fan", "fan_mode", "0xF2"),
                capability("fan", "power", "0xF1"),
                capability("fan", "stronger", "0xF3"),
                capability("fan", "timer", "0xF5"),
                capability("fan", "weaker", "0xF4"),
                capability("light", "brighter", "0xA3"),
                capability("light", "color", "0xA2"),
                capability("light", "power", "0xA1"),
                capability("projector", "mute", "0xB2"),
                capability("projector", "power", "0xB1"),
                capability("projector", "source", ""),
            ],
        }
    }
}

impl CapabilityStore for InMemoryCapabilities {
    fn list_modes(&self) -> impl Future<Output = Result<Vec<Mode>, HubError>> + Send {
        let mut modes: Vec<Mode> = self.entries.iter().map(|c| c.mode.clone()).collect();
        modes.dedup();
        async { Ok(modes) }
    }

    fn controls(
        &self,
        mode: &Mode,
    ) -> impl Future<Output = Result<Vec<Capability>, HubError>> + Send {
        let result: Vec<Capability> = self
            .entries
            .iter()
            .filter(|c| &c.mode == mode)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn get(
        &self,
        mode: &Mode,
        control: &Control,
    ) -> impl Future<Output = Result<Option<Capability>, HubError>> + Send {
        let result = self
            .entries
            .iter()
            .find(|c| &c.mode == mode && &c.control == control)
            .cloned();
        async { Ok(result) }
    }
}

pub struct InMemoryMappings {
    triggers: Mutex<Vec<ModeTrigger>>,
    controls: Mutex<Vec<ControlMapping>>,
}

impl Default for InMemoryMappings {
    fn default() -> Self {
        let trigger = |gesture: &str, mode: &str| ModeTrigger {
            gesture: Gesture::new(gesture),
            mode: Mode::new(mode),
            label: format!("{mode} mode"),
        };
        let mapping = |mode: &str, gesture: &str, control: &str| ControlMapping {
            mode: Mode::new(mode),
            gesture: Gesture::new(gesture),
            control: Control::new(control),
            label: control.to_string(),
        };
        Self {
            triggers: Mutex::new(vec![
                trigger("one", "light"),
                trigger("two", "projector"),
                trigger("three", "curtain"),
                trigger("four", "fan"),
            ]),
            controls: Mutex::new(vec![
                mapping("light", "ok", "power"),
                mapping("light", "small_heart", "color"),
                mapping("light", "thumbs_up", "brighter"),
                mapping("light", "rock", "dance"),
                mapping("fan", "ok", "power"),
                mapping("fan", "thumbs_up", "stronger"),
                mapping("fan", "thumbs_down", "weaker"),
                mapping("fan", "small_heart", "fan_mode"),
                mapping("fan", "call", "timer"),
                mapping("projector", "ok", "power"),
                mapping("projector", "promise", "source"),
            ]),
        }
    }
}

impl MappingRepository for InMemoryMappings {
    fn find_mode_trigger(
        &self,
        gesture: &Gesture,
    ) -> impl Future<Output = Result<Option<ModeTrigger>, HubError>> + Send {
        let result = self
            .triggers
            .lock()
            .unwrap()
            .iter()
            .find(|t| &t.gesture == gesture)
            .cloned();
        async { Ok(result) }
    }

    fn list_mode_triggers(&self) -> impl Future<Output = Result<Vec<ModeTrigger>, HubError>> + Send {
        let result = self.triggers.lock().unwrap().clone();
        async { Ok(result) }
    }

    fn find_control(
        &self,
        mode: &Mode,
        gesture: &Gesture,
    ) -> impl Future<Output = Result<Option<ControlMapping>, HubError>> + Send {
        let result = self
            .controls
            .lock()
            .unwrap()
            .iter()
            .find(|m| &m.mode == mode && &m.gesture == gesture)
            .cloned();
        async { Ok(result) }
    }

    fn list_controls(
        &self,
        mode: &Mode,
    ) -> impl Future<Output = Result<Vec<ControlMapping>, HubError>> + Send {
        let result: Vec<ControlMapping> = self
            .controls
            .lock()
            .unwrap()
            .iter()
            .filter(|m| &m.mode == mode)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn create(
        &self,
        mapping: ControlMapping,
    ) -> impl Future<Output = Result<ControlMapping, HubError>> + Send {
        let mut controls = self.controls.lock().unwrap();
        let result = if let Some(existing) = controls
            .iter()
            .find(|m| m.mode == mapping.mode && m.control == mapping.control)
        {
            Err(ConflictError::ControlAlreadyBound {
                mode: mapping.mode.to_string(),
                control: mapping.control.to_string(),
                gesture: existing.gesture.to_string(),
            }
            .into())
        } else if controls
            .iter()
            .any(|m| m.mode == mapping.mode && m.gesture == mapping.gesture)
        {
            Err(ConflictError::GestureAlreadyMapped {
                mode: mapping.mode.to_string(),
                gesture: mapping.gesture.to_string(),
            }
            .into())
        } else {
            controls.push(mapping.clone());
            Ok(mapping)
        };
        async { result }
    }

    fn update_gesture(
        &self,
        mode: &Mode,
        from: &Gesture,
        to: &Gesture,
    ) -> impl Future<Output = Result<ControlMapping, HubError>> + Send {
        let mut controls = self.controls.lock().unwrap();
        let result = match controls
            .iter_mut()
            .find(|m| &m.mode == mode && &m.gesture == from)
        {
            Some(mapping) => {
                mapping.gesture = to.clone();
                Ok(mapping.clone())
            }
            None => Err(NotFoundError {
                entity: "ControlMapping",
                id: format!("{mode}/{from}"),
            }
            .into()),
        };
        async { result }
    }

    fn rename_label(
        &self,
        from: &str,
        to: &str,
    ) -> impl Future<Output = Result<u64, HubError>> + Send {
        let mut changed = 0;
        for trigger in self.triggers.lock().unwrap().iter_mut() {
            if trigger.label == from {
                trigger.label = to.to_string();
                changed += 1;
            }
        }
        for mapping in self.controls.lock().unwrap().iter_mut() {
            if mapping.label == from {
                mapping.label = to.to_string();
                changed += 1;
            }
        }
        async move { Ok(changed) }
    }
}

/// Status store that yields between read and return so unsynchronized
/// read-modify-write sequences interleave.
#[derive(Default)]
pub struct InMemoryStatus {
    store: Mutex<BTreeMap<Mode, DeviceStatus>>,
    pub fail_save: AtomicBool,
}

impl InMemoryStatus {
    pub fn with(entries: impl IntoIterator<Item = (Mode, DeviceStatus)>) -> Self {
        Self {
            store: Mutex::new(entries.into_iter().collect()),
            fail_save: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self, device: &str) -> Option<DeviceStatus> {
        self.store.lock().unwrap().get(&Mode::new(device)).cloned()
    }
}

impl StatusRepository for InMemoryStatus {
    fn get(
        &self,
        device: &Mode,
    ) -> impl Future<Output = Result<Option<DeviceStatus>, HubError>> + Send {
        let result = self.store.lock().unwrap().get(device).cloned();
        async {
            tokio::task::yield_now().await;
            Ok(result)
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<(Mode, DeviceStatus)>, HubError>> + Send {
        let result: Vec<(Mode, DeviceStatus)> = self
            .store
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        async { Ok(result) }
    }

    fn save(
        &self,
        device: &Mode,
        status: &DeviceStatus,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        let result = if self.fail_save.load(Ordering::SeqCst) {
            Err(HubError::Storage("database is locked".into()))
        } else {
            self.store
                .lock()
                .unwrap()
                .insert(device.clone(), status.clone());
            Ok(())
        };
        async { result }
    }
}

#[derive(Default)]
pub struct InMemoryEventLog {
    records: Mutex<Vec<EventRecord>>,
    pub fail_append: AtomicBool,
}

impl InMemoryEventLog {
    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn push(&self, record: EventRecord) {
        self.records.lock().unwrap().push(record);
    }
}

impl EventLog for InMemoryEventLog {
    fn append(
        &self,
        record: EventRecord,
    ) -> impl Future<Output = Result<EventRecord, HubError>> + Send {
        let result = if self.fail_append.load(Ordering::SeqCst) {
            Err(HubError::Storage("disk full".into()))
        } else {
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        };
        async { result }
    }

    fn count(&self) -> impl Future<Output = Result<u64, HubError>> + Send {
        let count = self.records.lock().unwrap().len() as u64;
        async move { Ok(count) }
    }

    fn all(&self) -> impl Future<Output = Result<Vec<EventRecord>, HubError>> + Send {
        let result = self.records();
        async { Ok(result) }
    }

    fn between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<EventRecord>, HubError>> + Send {
        let result: Vec<EventRecord> = self
            .records()
            .into_iter()
            .filter(|r| r.timestamp >= from && r.timestamp <= to)
            .collect();
        async { Ok(result) }
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<EventRecord>, HubError>> + Send {
        let result: Vec<EventRecord> = self.records().into_iter().rev().take(limit).collect();
        async { Ok(result) }
    }
}

#[derive(Default)]
pub struct InMemoryCheckpoint {
    stored: Mutex<Option<RetrainCheckpoint>>,
    pub corrupt: AtomicBool,
}

impl InMemoryCheckpoint {
    pub fn with(checkpoint: RetrainCheckpoint) -> Self {
        Self {
            stored: Mutex::new(Some(checkpoint)),
            corrupt: AtomicBool::new(false),
        }
    }

    pub fn stored(&self) -> Option<RetrainCheckpoint> {
        *self.stored.lock().unwrap()
    }
}

impl CheckpointStore for InMemoryCheckpoint {
    fn load(&self) -> impl Future<Output = Result<RetrainCheckpoint, HubError>> + Send {
        let result = if self.corrupt.load(Ordering::SeqCst) {
            Err(DataError::InvalidValue {
                field: "last_trained_at",
                value: "yesterday".to_string(),
            }
            .into())
        } else {
            Ok(self.stored().unwrap_or_default())
        };
        async { result }
    }

    fn save(
        &self,
        checkpoint: RetrainCheckpoint,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        *self.stored.lock().unwrap() = Some(checkpoint);
        async { Ok(()) }
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<ActuationPayload>>,
    pub reject: AtomicBool,
    pub delay: Option<Duration>,
}

impl RecordingPublisher {
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<ActuationPayload> {
        self.published.lock().unwrap().clone()
    }
}

impl ActuationPublisher for RecordingPublisher {
    fn publish(
        &self,
        payload: &ActuationPayload,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        let reject = self.reject.load(Ordering::SeqCst);
        if !reject {
            self.published.lock().unwrap().push(payload.clone());
        }
        let delay = self.delay;
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if reject {
                Err(TransportError::Rejected("rc=4".to_string()).into())
            } else {
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct RecordingTrainer {
    batches: Mutex<Vec<Vec<TrainingSample>>>,
    pub fail: AtomicBool,
    pub delay: Option<Duration>,
}

impl RecordingTrainer {
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn batches(&self) -> Vec<Vec<TrainingSample>> {
        self.batches.lock().unwrap().clone()
    }
}

impl ModelTrainer for RecordingTrainer {
    fn train(
        &self,
        samples: Vec<TrainingSample>,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        let fail = self.fail.load(Ordering::SeqCst);
        let delay = self.delay;
        self.batches.lock().unwrap().push(samples);
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if fail {
                Err(HubError::Storage("trainer crashed".into()))
            } else {
                Ok(())
            }
        }
    }
}
