//! Shared types for the building monitor
//!
//! The snapshot feed delivers an untyped JSON mapping keyed by device or
//! occupant id. Everything here is about turning one entry of that mapping
//! into a tagged variant exactly once, up front, so the rest of the pipeline
//! works with typed data.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Building unit referenced by a record
///
/// The feed does not guarantee a numeric `Unit` field. A missing or
/// non-integer value degrades to `Unknown` rather than dropping the record;
/// the alert or directory entry is still emitted with reduced precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitId {
    Known(i64),
    Unknown,
}

impl UnitId {
    /// Read a `Unit` field value, degrading non-integers to `Unknown`.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_i64) {
            Some(n) => UnitId::Known(n),
            None => UnitId::Unknown,
        }
    }

    /// The unit number, if known.
    pub fn number(&self) -> Option<i64> {
        match self {
            UnitId::Known(n) => Some(*n),
            UnitId::Unknown => None,
        }
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitId::Known(n) => write!(f, "{}", n),
            UnitId::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for UnitId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UnitId::Known(n) => serializer.serialize_i64(*n),
            UnitId::Unknown => serializer.serialize_none(),
        }
    }
}

/// Alert categories derived from sensor readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    Fire,
    NoSignal,
    ExitBlocked,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Fire => "fire",
            AlertKind::NoSignal => "no-signal",
            AlertKind::ExitBlocked => "exit-blocked",
        }
    }
}

/// One actionable alert, at most one per sensor record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub device_id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub unit: UnitId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_notification: Option<String>,
}

/// Typed view of a sensor record
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub unit: UnitId,
    pub is_on: bool,
    pub fire_detected: bool,
    pub is_exit: bool,
    pub last_notification: Option<String>,
}

impl SensorReading {
    /// Extract a sensor reading from a raw record.
    ///
    /// Missing or non-boolean flags read as `false`; a missing or
    /// non-integer `Unit` reads as the unknown sentinel. Extraction never
    /// fails.
    fn from_record(record: &Map<String, Value>) -> Self {
        Self {
            unit: UnitId::from_value(field(record, &["Unit"])),
            is_on: bool_field(record, &["Is On", "IsOn"]),
            fire_detected: bool_field(record, &["Fire Detected", "FireDetected"]),
            is_exit: bool_field(record, &["Is Exit", "IsExit"]),
            last_notification: opt_string_field(record, &["Last Notification", "LastNotification"]),
        }
    }
}

/// Typed view of an occupant record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resident {
    pub name: String,
    pub dob: String,
    pub unit: UnitId,
    pub medical_conditions: String,
}

impl Resident {
    fn from_record(record: &Map<String, Value>) -> Self {
        Self {
            name: string_field(record, &["Name"]),
            dob: string_field(record, &["DOB"]),
            unit: UnitId::from_value(field(record, &["Unit"])),
            medical_conditions: string_field(record, &["Medical Conditions", "MedicalConditions"]),
        }
    }

    /// Display icon for this resident's medical condition.
    pub fn icon(&self) -> &'static str {
        condition_icon(&self.medical_conditions)
    }
}

/// Map a medical-condition label to its display icon.
///
/// Case-insensitive over the fixed vocabulary; anything else, including the
/// empty string, falls back to the generic icon. Total, never fails.
pub fn condition_icon(condition: &str) -> &'static str {
    match condition.to_ascii_lowercase().as_str() {
        "mobility" => "personmobility.png",
        "vision" => "personvision.png",
        "hearing" => "personhearing.png",
        _ => "person.png",
    }
}

/// Tagged classification of one raw snapshot entry
#[derive(Debug, Clone, PartialEq)]
pub enum RecordClass {
    Sensor(SensorReading),
    Person(Resident),
    Unclassified,
}

impl RecordClass {
    /// Classify one raw snapshot entry into its typed variant.
    ///
    /// A record carrying `Is On` is a sensor; a record carrying all of
    /// `Name`, `DOB` and `Medical Conditions` is an occupant. A malformed
    /// record satisfying both tests is classified as a sensor so alert
    /// detection stays sound. Anything else is unclassified and dropped by
    /// callers without error.
    pub fn classify(record: &Value) -> RecordClass {
        let Some(map) = record.as_object() else {
            return RecordClass::Unclassified;
        };

        if field(map, &["Is On", "IsOn"]).is_some() {
            return RecordClass::Sensor(SensorReading::from_record(map));
        }

        let is_person = field(map, &["Name"]).is_some()
            && field(map, &["DOB"]).is_some()
            && field(map, &["Medical Conditions", "MedicalConditions"]).is_some();
        if is_person {
            return RecordClass::Person(Resident::from_record(map));
        }

        RecordClass::Unclassified
    }
}

/// Look up a field by its wire name. The production feed spells names with
/// spaces (`"Is On"`); some payloads use the compact form (`"IsOn"`), so
/// each logical field probes its spellings in order.
fn field<'a>(record: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| record.get(*name))
}

fn bool_field(record: &Map<String, Value>, names: &[&str]) -> bool {
    field(record, names).and_then(Value::as_bool).unwrap_or(false)
}

fn string_field(record: &Map<String, Value>, names: &[&str]) -> String {
    match field(record, names) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        // Unexpected types render via their JSON form; the record survives
        Some(other) => other.to_string(),
    }
}

fn opt_string_field(record: &Map<String, Value>, names: &[&str]) -> Option<String> {
    match field(record, names) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    }
}
