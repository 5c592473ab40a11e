//! # gesturehub-domain
//!
//! Pure domain model for the gesturehub gesture-to-device control system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Modes**, **Gestures** and **Controls** and how they map onto each other
//! - Define **Device status** (`power` + a field log) and how a control changes it:
//!   control categories, inference, and per-device-type merge policies
//! - Define the **active mode** register transitions
//! - Define **Event records**, usage **statistics** and **training samples**
//! - Define the **retrain policy** (thresholds and checkpoint evaluation)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod active_mode;
pub mod control;
pub mod device;
pub mod event;
pub mod mapping;
pub mod retrain;
pub mod statistics;
pub mod status;
pub mod training;
