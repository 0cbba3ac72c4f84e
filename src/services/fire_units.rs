//! Unit-level fire tracking
//!
//! Pure post-pass over an already-produced alert list; no accumulator is
//! shared with the aggregation pass, so the tracker is testable on its own.
//! A unit is burning iff at least one `Fire` alert references it. Alerts
//! with an unknown unit cannot name a unit and contribute nothing.

use crate::domain::{Alert, AlertKind};
use std::collections::HashSet;

/// Distinct units referenced by `Fire` alerts.
///
/// Order-independent set semantics; derived fresh per alert list, never
/// merged across snapshots.
pub fn fire_units(alerts: &[Alert]) -> HashSet<i64> {
    alerts
        .iter()
        .filter(|alert| alert.kind == AlertKind::Fire)
        .filter_map(|alert| alert.unit.number())
        .collect()
}
