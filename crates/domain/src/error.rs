//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HubError`]
//! via `#[from]` (domain errors) or [`HubError::Storage`] (adapter errors).

use std::time::Duration;

/// Top-level error shared by every crate of the workspace.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// Missing or malformed input. Request-local, nothing was mutated.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Something the request refers to does not exist.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// The request collides with existing state.
    #[error("{0}")]
    Conflict(#[from] ConflictError),

    /// Publishing to the message bus failed or timed out.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// Persisted state could not be interpreted.
    #[error("{0}")]
    Data(#[from] DataError),

    /// An adapter failed (database, filesystem, process, …).
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A control gesture was received while no mode is selected.
    #[error("no mode is currently selected")]
    NoActiveMode,

    /// A time range whose start is after its end.
    #[error("invalid time range: `from` must not be after `to`")]
    InvalidRange,
}

/// A referenced item does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Kind of the missing item (e.g. `"ControlMapping"`).
    pub entity: &'static str,
    /// Key that was looked up.
    pub id: String,
}

/// Registration collisions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    /// The gesture is already mapped in this mode.
    #[error("gesture `{gesture}` is already mapped in mode `{mode}`")]
    GestureAlreadyMapped { mode: String, gesture: String },

    /// The control is already bound to another gesture in this mode.
    #[error("control `{control}` in mode `{mode}` is already bound to gesture `{gesture}`")]
    ControlAlreadyBound {
        mode: String,
        control: String,
        gesture: String,
    },
}

/// Message-bus failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The bus refused the publish.
    #[error("message bus rejected the publish: {0}")]
    Rejected(String),

    /// The publish did not complete in time.
    #[error("message bus publish timed out after {0:?}")]
    Timeout(Duration),
}

/// Corrupt or unparseable persisted state.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A stored timestamp is not valid RFC 3339.
    #[error("invalid timestamp `{value}` in {field}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A stored value is out of its allowed domain.
    #[error("invalid value `{value}` in {field}")]
    InvalidValue { field: &'static str, value: String },
}

impl HubError {
    /// Whether this error is request-local (reported to the caller, nothing mutated).
    #[must_use]
    pub fn is_request_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::Conflict(_)
        )
    }
}
