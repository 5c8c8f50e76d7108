//! Scheduling conflict detection for proposed events.
//!
//! [`check_conflicts`] compares a candidate against a snapshot of every stored
//! event and lists the rules it breaks. An empty list means the candidate may
//! be stored. The function is pure and deterministic.

use strum::{Display, IntoStaticStr};

use crate::geo::haversine_km;
use crate::models::Event;

/// Two events closer than this (inclusive) may not share a time slot.
pub const CONFLICT_RADIUS_KM: f64 = 1.0;

/// One reason a candidate event was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum Violation {
    #[strum(serialize = "duplicate event name")]
    DuplicateName,
    #[strum(serialize = "location and time-slot conflict with another event")]
    LocationTimeConflict,
    #[strum(serialize = "host already has another event in this time slot")]
    HostTimeConflict,
}

impl Violation {
    pub fn reason(&self) -> &'static str {
        (*self).into()
    }
}

/// Check `candidate` against `existing`.
///
/// The name check runs first. Then, per existing event in snapshot order, a
/// location clash is reported when the events are within
/// [`CONFLICT_RADIUS_KM`] and their windows overlap; only when that did not
/// fire is a host clash reported for the same event. Every violation found is
/// returned, in discovery order.
pub fn check_conflicts(candidate: &Event, existing: &[Event]) -> Vec<Violation> {
    let mut violations = Vec::new();

    if existing.iter().any(|e| e.name == candidate.name) {
        violations.push(Violation::DuplicateName);
    }

    for event in existing {
        let distance_km = haversine_km(candidate.location(), event.location());
        let overlap = windows_overlap(candidate, event);

        if within_radius(distance_km) && overlap {
            violations.push(Violation::LocationTimeConflict);
        } else if overlap && event.host_id == candidate.host_id {
            violations.push(Violation::HostTimeConflict);
        }
    }

    violations
}

/// Half-open overlap: windows that only touch at an endpoint do not overlap.
fn windows_overlap(a: &Event, b: &Event) -> bool {
    a.start_time < b.end_time && a.end_time > b.start_time
}

/// NaN distances compare false and never count as nearby.
fn within_radius(distance_km: f64) -> bool {
    distance_km <= CONFLICT_RADIUS_KM
}
