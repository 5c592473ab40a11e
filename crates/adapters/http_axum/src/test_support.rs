//! In-memory port implementations used by the router tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use gesturehub_app::ports::{
    ActuationPublisher, CapabilityStore, EventLog, MappingRepository, StatusRepository,
};
use gesturehub_domain::error::{ConflictError, HubError, NotFoundError, TransportError};
use gesturehub_domain::event::{ActuationPayload, EventRecord};
use gesturehub_domain::id::{Control, Gesture, Mode};
use gesturehub_domain::mapping::{Capability, ControlMapping, ModeTrigger};
use gesturehub_domain::status::{DeviceStatus, PowerState, StatusLog};
use gesturehub_domain::time::Timestamp;

const CAPABILITIES: &[(&str, &str, &str)] = &[
    ("fan", "power", "0xF1"),
    ("fan", "stronger", "0xF3"),
    ("light", "brighter", "0xA3"),
    ("light", "color", "0xA2"),
    ("light", "power", "0xA1"),
];

pub struct StubCapabilities;

impl StubCapabilities {
    fn all() -> impl Iterator<Item = Capability> {
        CAPABILITIES.iter().map(|(mode, control, code)| Capability {
            mode: Mode::new(*mode),
            control: Control::new(*control),
            code: (*code).to_string(),
            label: (*control).to_string(),
        })
    }
}

impl CapabilityStore for StubCapabilities {
    async fn list_modes(&self) -> Result<Vec<Mode>, HubError> {
        let mut modes: Vec<Mode> = Self::all().map(|c| c.mode).collect();
        modes.dedup();
        Ok(modes)
    }

    async fn controls(&self, mode: &Mode) -> Result<Vec<Capability>, HubError> {
        Ok(Self::all().filter(|c| &c.mode == mode).collect())
    }

    async fn get(&self, mode: &Mode, control: &Control) -> Result<Option<Capability>, HubError> {
        Ok(Self::all().find(|c| &c.mode == mode && &c.control == control))
    }
}

pub struct StubMappings {
    triggers: Mutex<Vec<ModeTrigger>>,
    controls: Mutex<Vec<ControlMapping>>,
}

impl Default for StubMappings {
    fn default() -> Self {
        let trigger = |gesture: &str, mode: &str| ModeTrigger {
            gesture: Gesture::new(gesture),
            mode: Mode::new(mode),
            label: format!("{mode} mode"),
        };
        Self {
            triggers: Mutex::new(vec![trigger("one", "light"), trigger("four", "fan")]),
            controls: Mutex::new(vec![ControlMapping {
                mode: Mode::new("light"),
                gesture: Gesture::new("ok"),
                control: Control::new("power"),
                label: "power".to_string(),
            }]),
        }
    }
}

impl MappingRepository for StubMappings {
    async fn find_mode_trigger(&self, gesture: &Gesture) -> Result<Option<ModeTrigger>, HubError> {
        let triggers = self.triggers.lock().unwrap();
        Ok(triggers.iter().find(|t| &t.gesture == gesture).cloned())
    }

    async fn list_mode_triggers(&self) -> Result<Vec<ModeTrigger>, HubError> {
        Ok(self.triggers.lock().unwrap().clone())
    }

    async fn find_control(
        &self,
        mode: &Mode,
        gesture: &Gesture,
    ) -> Result<Option<ControlMapping>, HubError> {
        let controls = self.controls.lock().unwrap();
        Ok(controls
            .iter()
            .find(|m| &m.mode == mode && &m.gesture == gesture)
            .cloned())
    }

    async fn list_controls(&self, mode: &Mode) -> Result<Vec<ControlMapping>, HubError> {
        let controls = self.controls.lock().unwrap();
        Ok(controls.iter().filter(|m| &m.mode == mode).cloned().collect())
    }

    async fn create(&self, mapping: ControlMapping) -> Result<ControlMapping, HubError> {
        let mut controls = self.controls.lock().unwrap();
        if controls
            .iter()
            .any(|m| m.mode == mapping.mode && m.gesture == mapping.gesture)
        {
            return Err(ConflictError::GestureAlreadyMapped {
                mode: mapping.mode.to_string(),
                gesture: mapping.gesture.to_string(),
            }
            .into());
        }
        controls.push(mapping.clone());
        Ok(mapping)
    }

    async fn update_gesture(
        &self,
        mode: &Mode,
        from: &Gesture,
        to: &Gesture,
    ) -> Result<ControlMapping, HubError> {
        let mut controls = self.controls.lock().unwrap();
        let mapping = controls
            .iter_mut()
            .find(|m| &m.mode == mode && &m.gesture == from)
            .ok_or_else(|| NotFoundError {
                entity: "ControlMapping",
                id: format!("{mode}/{from}"),
            })?;
        mapping.gesture = to.clone();
        Ok(mapping.clone())
    }

    async fn rename_label(&self, from: &str, to: &str) -> Result<u64, HubError> {
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
        Ok(changed)
    }
}

pub struct StubStatus(Mutex<BTreeMap<Mode, DeviceStatus>>);

impl Default for StubStatus {
    fn default() -> Self {
        let light = DeviceStatus::new(
            PowerState::Off,
            StatusLog::from([("color".to_string(), "Warm".to_string())]),
        );
        Self(Mutex::new(BTreeMap::from([(Mode::new("light"), light)])))
    }
}

impl StatusRepository for StubStatus {
    async fn get(&self, device: &Mode) -> Result<Option<DeviceStatus>, HubError> {
        Ok(self.0.lock().unwrap().get(device).cloned())
    }

    async fn get_all(&self) -> Result<Vec<(Mode, DeviceStatus)>, HubError> {
        let all = self.0.lock().unwrap();
        Ok(all.iter().map(|(m, s)| (m.clone(), s.clone())).collect())
    }

    async fn save(&self, device: &Mode, status: &DeviceStatus) -> Result<(), HubError> {
        self.0
            .lock()
            .unwrap()
            .insert(device.clone(), status.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct StubEvents(Mutex<Vec<EventRecord>>);

impl EventLog for StubEvents {
    async fn append(&self, record: EventRecord) -> Result<EventRecord, HubError> {
        self.0.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn count(&self) -> Result<u64, HubError> {
        Ok(u64::try_from(self.0.lock().unwrap().len()).unwrap())
    }

    async fn all(&self) -> Result<Vec<EventRecord>, HubError> {
        Ok(self.0.lock().unwrap().clone())
    }

    async fn between(&self, from: Timestamp, to: Timestamp) -> Result<Vec<EventRecord>, HubError> {
        let events = self.0.lock().unwrap();
        Ok(events
            .iter()
            .filter(|e| e.timestamp >= from && e.timestamp <= to)
            .cloned()
            .collect())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<EventRecord>, HubError> {
        let events = self.0.lock().unwrap();
        Ok(events.iter().rev().take(limit).cloned().collect())
    }
}

#[derive(Default)]
pub struct StubPublisher {
    pub reject: AtomicBool,
}

impl ActuationPublisher for StubPublisher {
    async fn publish(&self, _payload: &ActuationPayload) -> Result<(), HubError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(TransportError::Rejected("rc=4".to_string()).into());
        }
        Ok(())
    }
}
