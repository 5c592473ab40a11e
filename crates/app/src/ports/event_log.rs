//! Event log port — append-only history of handled gestures.

use std::future::Future;

use gesturehub_domain::error::HubError;
use gesturehub_domain::event::EventRecord;
use gesturehub_domain::time::Timestamp;

/// Append-only store of [`EventRecord`]s.
pub trait EventLog {
    /// Persist a new record.
    fn append(
        &self,
        record: EventRecord,
    ) -> impl Future<Output = Result<EventRecord, HubError>> + Send;

    /// Total number of records.
    fn count(&self) -> impl Future<Output = Result<u64, HubError>> + Send;

    /// Every record, oldest first.
    fn all(&self) -> impl Future<Output = Result<Vec<EventRecord>, HubError>> + Send;

    /// Records with `from <= timestamp <= to`, oldest first.
    fn between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<EventRecord>, HubError>> + Send;

    /// The most recent records, newest first.
    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<EventRecord>, HubError>> + Send;
}

impl<T: EventLog + Send + Sync> EventLog for std::sync::Arc<T> {
    fn append(
        &self,
        record: EventRecord,
    ) -> impl Future<Output = Result<EventRecord, HubError>> + Send {
        (**self).append(record)
    }

    fn count(&self) -> impl Future<Output = Result<u64, HubError>> + Send {
        (**self).count()
    }

    fn all(&self) -> impl Future<Output = Result<Vec<EventRecord>, HubError>> + Send {
        (**self).all()
    }

    fn between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<EventRecord>, HubError>> + Send {
        (**self).between(from, to)
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<EventRecord>, HubError>> + Send {
        (**self).recent(limit)
    }
}
