//! Statistics service — read-side queries over the event history.

use gesturehub_domain::error::{HubError, ValidationError};
use gesturehub_domain::event::EventRecord;
use gesturehub_domain::statistics::GestureStatistics;
use gesturehub_domain::time::Timestamp;

use crate::ports::EventLog;

/// Upper bound on the number of events returned by [`StatisticsService::recent`].
pub const MAX_RECENT: usize = 500;

pub struct StatisticsService<L> {
    events: L,
}

impl<L: EventLog> StatisticsService<L> {
    pub fn new(events: L) -> Self {
        Self { events }
    }

    /// Per-device gesture counts and ratios for `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when `from` is after `to`, or a
    /// storage error from the event log.
    pub async fn statistics(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<GestureStatistics, HubError> {
        if from > to {
            return Err(ValidationError::InvalidRange.into());
        }
        let events = self.events.between(from, to).await?;
        GestureStatistics::from_events(&events, from, to)
    }

    /// The most recent events, newest first, at most [`MAX_RECENT`].
    ///
    /// # Errors
    ///
    /// Returns a storage error from the event log.
    pub async fn recent(&self, limit: usize) -> Result<Vec<EventRecord>, HubError> {
        self.events.recent(limit.min(MAX_RECENT)).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use gesturehub_domain::event::ActuationPayload;
    use gesturehub_domain::id::{Control, Gesture, Mode};
    use gesturehub_domain::status::DeviceStatus;
    use gesturehub_domain::time::now;

    use super::*;
    use crate::fakes::InMemoryEventLog;

    fn record(device: &str, at: Timestamp) -> EventRecord {
        let payload = ActuationPayload {
            gesture: Gesture::new("ok"),
            mode: Mode::new(device),
            control: Control::new("power"),
            code: "0x01".to_string(),
        };
        let mut record = EventRecord::succeeded(&payload, "power", DeviceStatus::default());
        record.timestamp = at;
        record
    }

    #[tokio::test]
    async fn should_aggregate_events_in_range() {
        let log = InMemoryEventLog::default();
        let t = now();
        log.push(record("light", t - TimeDelta::days(10)));
        log.push(record("light", t));
        log.push(record("fan", t));
        let svc = StatisticsService::new(log);

        let stats = svc
            .statistics(t - TimeDelta::days(1), t + TimeDelta::days(1))
            .await
            .unwrap();

        assert_eq!(stats.total, 2);
        assert_eq!(stats.devices["light"].count, 1);
        assert_eq!(stats.devices["fan"].count, 1);
    }

    #[tokio::test]
    async fn should_reject_inverted_range() {
        let svc = StatisticsService::new(InMemoryEventLog::default());
        let t = now();
        let result = svc.statistics(t, t - TimeDelta::hours(1)).await;
        assert!(matches!(
            result,
            Err(HubError::Validation(ValidationError::InvalidRange))
        ));
    }

    #[tokio::test]
    async fn should_return_recent_events_newest_first() {
        let log = InMemoryEventLog::default();
        let t = now();
        log.push(record("light", t - TimeDelta::minutes(2)));
        log.push(record("fan", t - TimeDelta::minutes(1)));
        log.push(record("curtain", t));
        let svc = StatisticsService::new(log);

        let recent = svc.recent(2).await.unwrap();

        let devices: Vec<&str> = recent.iter().map(|r| r.device.as_str()).collect();
        assert_eq!(devices, ["curtain", "fan"]);
    }
}
