//! Snapshot aggregation
//!
//! Single pass over the raw snapshot: classify each entry, run sensor
//! entries through the alert rule, collect occupant entries into the
//! directory. Output order is the snapshot's own iteration order restricted
//! to matching entries; nothing is re-sorted, so results are stable across
//! runs of the same snapshot.

use crate::domain::{Alert, RecordClass, Resident};
use crate::services::alert_rule;
use serde_json::{Map, Value};

/// Classified output of one snapshot
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classified {
    pub alerts: Vec<Alert>,
    pub directory: Vec<Resident>,
}

/// Classify a full snapshot into alerts and the occupant directory.
///
/// Pure function of its input; allocates fresh collections on every call.
/// Entries that match neither discriminant contribute nothing, and a
/// malformed entry never fails the pass.
pub fn aggregate(snapshot: &Map<String, Value>) -> Classified {
    let mut out = Classified::default();

    for (id, record) in snapshot {
        match RecordClass::classify(record) {
            RecordClass::Sensor(reading) => {
                if let Some(alert) = alert_rule::evaluate(id, &reading) {
                    out.alerts.push(alert);
                }
            }
            RecordClass::Person(resident) => out.directory.push(resident),
            RecordClass::Unclassified => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AlertKind, UnitId};
    use serde_json::json;

    fn snapshot(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("test snapshot must be an object")
    }

    #[test]
    fn test_fire_and_person_snapshot() {
        let snap = snapshot(json!({
            "d1": {"Unit": 5, "Is On": true, "Fire Detected": true, "Is Exit": false},
            "p1": {"Name": "Jane", "DOB": "1990-01-01", "Unit": 5, "Medical Conditions": "Mobility"}
        }));

        let out = aggregate(&snap);

        assert_eq!(out.alerts.len(), 1);
        assert_eq!(out.alerts[0].device_id, "d1");
        assert_eq!(out.alerts[0].kind, AlertKind::Fire);
        assert_eq!(out.alerts[0].message, "Unit 5, d1: Fire Detected");

        assert_eq!(out.directory.len(), 1);
        assert_eq!(out.directory[0].name, "Jane");
        assert_eq!(out.directory[0].unit, UnitId::Known(5));
    }

    #[test]
    fn test_single_no_signal_sensor() {
        let snap = snapshot(json!({
            "d1": {"Unit": 2, "Is On": false, "Fire Detected": false, "Is Exit": false}
        }));

        let out = aggregate(&snap);

        assert_eq!(out.alerts.len(), 1);
        assert_eq!(out.alerts[0].kind, AlertKind::NoSignal);
        assert!(out.directory.is_empty());
    }

    #[test]
    fn test_healthy_sensor_contributes_nothing() {
        let snap = snapshot(json!({
            "d1": {"Unit": 3, "Is On": true, "Fire Detected": false, "Is Exit": false}
        }));

        let out = aggregate(&snap);
        assert!(out.alerts.is_empty());
        assert!(out.directory.is_empty());
    }

    #[test]
    fn test_unclassified_records_are_dropped() {
        let snap = snapshot(json!({
            "x1": {"Power": 42},
            "x2": "not even an object",
            "x3": null,
            "d1": {"Unit": 1, "Is On": false}
        }));

        let out = aggregate(&snap);
        assert_eq!(out.alerts.len(), 1);
        assert_eq!(out.alerts[0].device_id, "d1");
        assert!(out.directory.is_empty());
    }

    #[test]
    fn test_output_preserves_snapshot_order() {
        let snap = snapshot(json!({
            "d9": {"Unit": 9, "Is On": false},
            "p2": {"Name": "Ann", "DOB": "1950-02-02", "Unit": 2, "Medical Conditions": "Vision"},
            "d1": {"Unit": 1, "Is On": true, "Fire Detected": true, "Is Exit": false},
            "p1": {"Name": "Bob", "DOB": "1960-03-03", "Unit": 3, "Medical Conditions": ""}
        }));

        let out = aggregate(&snap);

        let alert_ids: Vec<&str> = out.alerts.iter().map(|a| a.device_id.as_str()).collect();
        assert_eq!(alert_ids, vec!["d9", "d1"]);

        let names: Vec<&str> = out.directory.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob"]);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let snap = snapshot(json!({
            "d1": {"Unit": 5, "Is On": true, "Fire Detected": true, "Is Exit": true},
            "d2": {"Unit": 6, "Is On": false},
            "p1": {"Name": "Jane", "DOB": "1990-01-01", "Unit": 5, "Medical Conditions": "Hearing"}
        }));

        assert_eq!(aggregate(&snap), aggregate(&snap));
    }

    #[test]
    fn test_at_most_one_alert_per_sensor() {
        // Satisfies both the fire and no-signal conditions; only rule 1 fires
        let snap = snapshot(json!({
            "d1": {"Unit": 4, "Is On": false, "Fire Detected": true, "Is Exit": false}
        }));

        let out = aggregate(&snap);
        assert_eq!(out.alerts.len(), 1);
        assert_eq!(out.alerts[0].kind, AlertKind::Fire);
    }

    #[test]
    fn test_empty_snapshot() {
        let out = aggregate(&Map::new());
        assert!(out.alerts.is_empty());
        assert!(out.directory.is_empty());
    }
}
