//! Sensor alert rule
//!
//! Pure decision function from a sensor reading to at most one alert. The
//! clauses form a strict priority chain; the first satisfied clause wins, so
//! a reading can never produce two alerts.

use crate::domain::{Alert, AlertKind, SensorReading};

/// Evaluate the alert rule chain for one sensor reading.
///
/// 1. Fire detected away from an exit -> `Fire`
/// 2. Device not reporting -> `NoSignal`
/// 3. Fire detected at an exit -> `ExitBlocked`
/// 4. Otherwise no alert.
pub fn evaluate(device_id: &str, reading: &SensorReading) -> Option<Alert> {
    let (kind, label) = if reading.fire_detected && !reading.is_exit {
        (AlertKind::Fire, "Fire Detected")
    } else if !reading.is_on {
        (AlertKind::NoSignal, "No Signal")
    } else if reading.fire_detected && reading.is_exit {
        (AlertKind::ExitBlocked, "Exit Blocked")
    } else {
        return None;
    };

    Some(Alert {
        device_id: device_id.to_string(),
        message: format!("Unit {}, {}: {}", reading.unit, device_id, label),
        kind,
        unit: reading.unit,
        last_notification: reading.last_notification.clone(),
    })
}
