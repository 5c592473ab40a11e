//! `SQLite` implementation of [`StatusRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use gesturehub_app::ports::StatusRepository;
use gesturehub_domain::error::HubError;
use gesturehub_domain::id::Mode;
use gesturehub_domain::status::{DeviceStatus, PowerState, StatusLog};
use gesturehub_domain::time::{now, to_storage_string};

use crate::error::StorageError;

struct Wrapper(Mode, DeviceStatus);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let mode: String = row.try_get("mode")?;
        let power: String = row.try_get("power")?;
        let log_json: String = row.try_get("log")?;

        let power =
            PowerState::from_str(&power).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let log: StatusLog =
            serde_json::from_str(&log_json).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Mode::new(mode), DeviceStatus::new(power, log)))
    }
}

const SELECT_BY_MODE: &str = "SELECT * FROM device_status WHERE mode = ?";
const SELECT_ALL: &str = "SELECT * FROM device_status ORDER BY mode";

const UPSERT: &str = r"
    INSERT INTO device_status (mode, power, log, updated_at)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (mode) DO UPDATE
    SET power = excluded.power, log = excluded.log, updated_at = excluded.updated_at
";

/// `SQLite`-backed device status store.
pub struct SqliteStatusRepository {
    pool: SqlitePool,
}

impl SqliteStatusRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl StatusRepository for SqliteStatusRepository {
    async fn get(&self, device: &Mode) -> Result<Option<DeviceStatus>, HubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_MODE)
            .bind(device.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.1))
    }

    async fn get_all(&self) -> Result<Vec<(Mode, DeviceStatus)>, HubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| (w.0, w.1)).collect())
    }

    async fn save(&self, device: &Mode, status: &DeviceStatus) -> Result<(), HubError> {
        let log_json = serde_json::to_string(&status.log).map_err(StorageError::from)?;

        sqlx::query(UPSERT)
            .bind(device.as_str())
            .bind(status.power.as_str())
            .bind(&log_json)
            .bind(to_storage_string(now()))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
