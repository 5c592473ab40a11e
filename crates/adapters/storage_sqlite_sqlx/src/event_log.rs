//! `SQLite` implementation of [`EventLog`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use gesturehub_app::ports::EventLog;
use gesturehub_domain::error::HubError;
use gesturehub_domain::event::{DispatchResult, EventRecord};
use gesturehub_domain::id::{Control, EventId, Gesture, Mode};
use gesturehub_domain::status::DeviceStatus;
use gesturehub_domain::time::{Timestamp, parse_stored, to_storage_string};

use crate::error::StorageError;

const RESULT_SUCCESS: &str = "success";
const RESULT_FAILED: &str = "failed";

struct Wrapper(EventRecord);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let timestamp: String = row.try_get("timestamp")?;
        let device: String = row.try_get("device")?;
        let gesture: String = row.try_get("gesture")?;
        let control: String = row.try_get("control")?;
        let label: String = row.try_get("label")?;
        let result: String = row.try_get("result")?;
        let failure: Option<String> = row.try_get("failure")?;
        let status_json: Option<String> = row.try_get("status")?;

        let timestamp = parse_stored("timestamp", &timestamp)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let result = match result.as_str() {
            RESULT_SUCCESS => DispatchResult::Success,
            _ => DispatchResult::Failed {
                reason: failure.unwrap_or_default(),
            },
        };
        let status: Option<DeviceStatus> = status_json
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(EventRecord {
            id: EventId::from_uuid(id),
            timestamp,
            device: Mode::new(device),
            gesture: Gesture::new(gesture),
            control: Control::new(control),
            label,
            result,
            status,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO gesture_events (id, timestamp, device, gesture, control, label, result, failure, status)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const COUNT: &str = "SELECT COUNT(*) FROM gesture_events";
const SELECT_ALL: &str = "SELECT * FROM gesture_events ORDER BY timestamp ASC, rowid ASC";
const SELECT_BETWEEN: &str = r"
    SELECT * FROM gesture_events
    WHERE timestamp >= ? AND timestamp <= ?
    ORDER BY timestamp ASC, rowid ASC
";
const SELECT_RECENT: &str =
    "SELECT * FROM gesture_events ORDER BY timestamp DESC, rowid DESC LIMIT ?";

/// `SQLite`-backed append-only gesture history.
pub struct SqliteEventLog {
    pool: SqlitePool,
}

impl SqliteEventLog {
    /// Create a new event log using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EventLog for SqliteEventLog {
    async fn append(&self, record: EventRecord) -> Result<EventRecord, HubError> {
        let status_json = record
            .status
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(StorageError::from)?;
        let (result, failure) = match &record.result {
            DispatchResult::Success => (RESULT_SUCCESS, None),
            DispatchResult::Failed { reason } => (RESULT_FAILED, Some(reason.as_str())),
        };

        sqlx::query(INSERT)
            .bind(record.id.as_uuid())
            .bind(to_storage_string(record.timestamp))
            .bind(record.device.as_str())
            .bind(record.gesture.as_str())
            .bind(record.control.as_str())
            .bind(&record.label)
            .bind(result)
            .bind(failure)
            .bind(status_json)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(record)
    }

    async fn count(&self) -> Result<u64, HubError> {
        let (count,): (i64,) = sqlx::query_as(COUNT)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn all(&self) -> Result<Vec<EventRecord>, HubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn between(&self, from: Timestamp, to: Timestamp) -> Result<Vec<EventRecord>, HubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BETWEEN)
            .bind(to_storage_string(from))
            .bind(to_storage_string(to))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<EventRecord>, HubError> {
        let limit = i32::try_from(limit).unwrap_or(i32::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
