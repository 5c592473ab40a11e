//! `SQLite` implementation of [`MappingRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use gesturehub_app::ports::MappingRepository;
use gesturehub_domain::error::{ConflictError, HubError, NotFoundError};
use gesturehub_domain::id::{Control, Gesture, Mode};
use gesturehub_domain::mapping::{ControlMapping, ModeTrigger};

use crate::error::{StorageError, is_unique_violation};

struct TriggerRow(ModeTrigger);

impl<'r> FromRow<'r, SqliteRow> for TriggerRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let gesture: String = row.try_get("gesture")?;
        let mode: String = row.try_get("mode")?;
        let label: String = row.try_get("label")?;

        Ok(Self(ModeTrigger {
            gesture: Gesture::new(gesture),
            mode: Mode::new(mode),
            label,
        }))
    }
}

struct MappingRow(ControlMapping);

impl<'r> FromRow<'r, SqliteRow> for MappingRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let mode: String = row.try_get("mode")?;
        let gesture: String = row.try_get("gesture")?;
        let control: String = row.try_get("control")?;
        let label: String = row.try_get("label")?;

        Ok(Self(ControlMapping {
            mode: Mode::new(mode),
            gesture: Gesture::new(gesture),
            control: Control::new(control),
            label,
        }))
    }
}

const SELECT_TRIGGER: &str = "SELECT * FROM mode_triggers WHERE gesture = ?";
const SELECT_TRIGGERS: &str = "SELECT * FROM mode_triggers ORDER BY gesture";

const SELECT_MAPPING: &str = "SELECT * FROM control_mappings WHERE mode = ? AND gesture = ?";
const SELECT_MAPPING_BY_CONTROL: &str =
    "SELECT * FROM control_mappings WHERE mode = ? AND control = ?";
const SELECT_MAPPINGS: &str = "SELECT * FROM control_mappings WHERE mode = ? ORDER BY gesture";

const INSERT_MAPPING: &str = r"
    INSERT INTO control_mappings (mode, gesture, control, label)
    VALUES (?, ?, ?, ?)
";

const UPDATE_GESTURE: &str = r"
    UPDATE control_mappings
    SET gesture = ?
    WHERE mode = ? AND gesture = ?
";

const RENAME_TRIGGER_LABEL: &str = "UPDATE mode_triggers SET label = ? WHERE label = ?";
const RENAME_MAPPING_LABEL: &str = "UPDATE control_mappings SET label = ? WHERE label = ?";

/// `SQLite`-backed store for mode triggers and control mappings.
pub struct SqliteMappingRepository {
    pool: SqlitePool,
}

impl SqliteMappingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_mapping(
        &self,
        mode: &Mode,
        gesture: &Gesture,
    ) -> Result<Option<ControlMapping>, StorageError> {
        let row: Option<MappingRow> = sqlx::query_as(SELECT_MAPPING)
            .bind(mode.as_str())
            .bind(gesture.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.0))
    }

    /// Turn a unique violation on insert into the matching conflict.
    async fn conflict_for(&self, mapping: &ControlMapping) -> Result<ConflictError, StorageError> {
        if self
            .fetch_mapping(&mapping.mode, &mapping.gesture)
            .await?
            .is_some()
        {
            return Ok(ConflictError::GestureAlreadyMapped {
                mode: mapping.mode.to_string(),
                gesture: mapping.gesture.to_string(),
            });
        }

        let bound: Option<MappingRow> = sqlx::query_as(SELECT_MAPPING_BY_CONTROL)
            .bind(mapping.mode.as_str())
            .bind(mapping.control.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(ConflictError::ControlAlreadyBound {
            mode: mapping.mode.to_string(),
            control: mapping.control.to_string(),
            gesture: bound.map(|r| r.0.gesture.to_string()).unwrap_or_default(),
        })
    }
}

impl MappingRepository for SqliteMappingRepository {
    async fn find_mode_trigger(&self, gesture: &Gesture) -> Result<Option<ModeTrigger>, HubError> {
        let row: Option<TriggerRow> = sqlx::query_as(SELECT_TRIGGER)
            .bind(gesture.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|r| r.0))
    }

    async fn list_mode_triggers(&self) -> Result<Vec<ModeTrigger>, HubError> {
        let rows: Vec<TriggerRow> = sqlx::query_as(SELECT_TRIGGERS)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn find_control(
        &self,
        mode: &Mode,
        gesture: &Gesture,
    ) -> Result<Option<ControlMapping>, HubError> {
        Ok(self.fetch_mapping(mode, gesture).await?)
    }

    async fn list_controls(&self, mode: &Mode) -> Result<Vec<ControlMapping>, HubError> {
        let rows: Vec<MappingRow> = sqlx::query_as(SELECT_MAPPINGS)
            .bind(mode.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    async fn create(&self, mapping: ControlMapping) -> Result<ControlMapping, HubError> {
        let result = sqlx::query(INSERT_MAPPING)
            .bind(mapping.mode.as_str())
            .bind(mapping.gesture.as_str())
            .bind(mapping.control.as_str())
            .bind(&mapping.label)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(mapping),
            Err(err) if is_unique_violation(&err) => {
                Err(self.conflict_for(&mapping).await?.into())
            }
            Err(err) => Err(StorageError::from(err).into()),
        }
    }

    async fn update_gesture(
        &self,
        mode: &Mode,
        from: &Gesture,
        to: &Gesture,
    ) -> Result<ControlMapping, HubError> {
        let result = sqlx::query(UPDATE_GESTURE)
            .bind(to.as_str())
            .bind(mode.as_str())
            .bind(from.as_str())
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Err(NotFoundError {
                entity: "ControlMapping",
                id: format!("{mode}/{from}"),
            }
            .into()),
            Ok(_) => self
                .fetch_mapping(mode, to)
                .await?
                .ok_or_else(|| {
                    NotFoundError {
                        entity: "ControlMapping",
                        id: format!("{mode}/{to}"),
                    }
                    .into()
                }),
            Err(err) if is_unique_violation(&err) => Err(ConflictError::GestureAlreadyMapped {
                mode: mode.to_string(),
                gesture: to.to_string(),
            }
            .into()),
            Err(err) => Err(StorageError::from(err).into()),
        }
    }

    async fn rename_label(&self, from: &str, to: &str) -> Result<u64, HubError> {
        let mut tx = self.pool.begin().await.map_err(StorageError::from)?;

        let triggers = sqlx::query(RENAME_TRIGGER_LABEL)
            .bind(to)
            .bind(from)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?
            .rows_affected();
        let mappings = sqlx::query(RENAME_MAPPING_LABEL)
            .bind(to)
            .bind(from)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)?
            .rows_affected();

        tx.commit().await.map_err(StorageError::from)?;
        Ok(triggers + mappings)
    }
}
