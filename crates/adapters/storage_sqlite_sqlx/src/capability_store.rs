//! `SQLite` implementation of [`CapabilityStore`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use gesturehub_app::ports::CapabilityStore;
use gesturehub_domain::error::HubError;
use gesturehub_domain::id::{Control, Mode};
use gesturehub_domain::mapping::Capability;

use crate::error::StorageError;

struct Wrapper(Capability);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let mode: String = row.try_get("mode")?;
        let control: String = row.try_get("control")?;
        let code: String = row.try_get("code")?;
        let label: String = row.try_get("label")?;

        Ok(Self(Capability {
            mode: Mode::new(mode),
            control: Control::new(control),
            code,
            label,
        }))
    }
}

const SELECT_MODES: &str = "SELECT DISTINCT mode FROM capabilities ORDER BY mode";
const SELECT_BY_MODE: &str = "SELECT * FROM capabilities WHERE mode = ? ORDER BY control";
const SELECT_ONE: &str = "SELECT * FROM capabilities WHERE mode = ? AND control = ?";

/// `SQLite`-backed device capability table.
pub struct SqliteCapabilityStore {
    pool: SqlitePool,
}

impl SqliteCapabilityStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl CapabilityStore for SqliteCapabilityStore {
    async fn list_modes(&self) -> Result<Vec<Mode>, HubError> {
        let rows: Vec<(String,)> = sqlx::query_as(SELECT_MODES)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|(mode,)| Mode::new(mode)).collect())
    }

    async fn controls(&self, mode: &Mode) -> Result<Vec<Capability>, HubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_MODE)
            .bind(mode.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get(&self, mode: &Mode, control: &Control) -> Result<Option<Capability>, HubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_ONE)
            .bind(mode.as_str())
            .bind(control.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|w| w.0))
    }
}
