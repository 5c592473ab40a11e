//! `SQLite` implementation of [`CheckpointStore`].
//!
//! The checkpoint is a single row with `id = 1`.

use gesturehub_app::ports::CheckpointStore;
use gesturehub_domain::error::{DataError, HubError};
use gesturehub_domain::retrain::RetrainCheckpoint;
use gesturehub_domain::time::{parse_stored, to_storage_string};
use sqlx::SqlitePool;

use crate::error::StorageError;

const SELECT: &str = "SELECT last_count, last_trained_at FROM retrain_checkpoint WHERE id = 1";

const UPSERT: &str = r"
    INSERT INTO retrain_checkpoint (id, last_count, last_trained_at)
    VALUES (1, ?, ?)
    ON CONFLICT (id) DO UPDATE
    SET last_count = excluded.last_count, last_trained_at = excluded.last_trained_at
";

/// `SQLite`-backed retrain checkpoint.
pub struct SqliteCheckpointStore {
    pool: SqlitePool,
}

impl SqliteCheckpointStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CheckpointStore for SqliteCheckpointStore {
    async fn load(&self) -> Result<RetrainCheckpoint, HubError> {
        let row: Option<(i64, Option<String>)> = sqlx::query_as(SELECT)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let Some((last_count, last_trained_at)) = row else {
            return Ok(RetrainCheckpoint::default());
        };

        let last_count = u64::try_from(last_count).map_err(|_| DataError::InvalidValue {
            field: "last_count",
            value: last_count.to_string(),
        })?;
        let last_trained_at = last_trained_at
            .map(|value| parse_stored("last_trained_at", &value))
            .transpose()?;

        Ok(RetrainCheckpoint {
            last_count,
            last_trained_at,
        })
    }

    async fn save(&self, checkpoint: RetrainCheckpoint) -> Result<(), HubError> {
        sqlx::query(UPSERT)
            .bind(i64::try_from(checkpoint.last_count).unwrap_or(i64::MAX))
            .bind(checkpoint.last_trained_at.map(to_storage_string))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
