//! Domain models - core snapshot and alert types
//!
//! This module contains the canonical data types used throughout the system:
//! - `RecordClass` - the tagged classification of one raw snapshot entry
//! - `SensorReading` - typed view of a sensor record
//! - `Resident` - typed view of an occupant record
//! - `Alert` / `AlertKind` - actionable alerts derived from sensor readings
//! - `UnitId` - building unit reference with an unknown-unit sentinel
//! - `EmergencyContact` - static contact list entries

pub mod contacts;
pub mod types;

// Re-export commonly used types at module level
pub use contacts::{emergency_contacts, EmergencyContact};
pub use types::{condition_icon, Alert, AlertKind, RecordClass, Resident, SensorReading, UnitId};
