//! Overlap detection between an in-progress ride and a new candidate.
//!
//! The drop-off estimate is `started_at + ride_distance / 25 mph`. The
//! fixed 25 mph figure is a deliberate heuristic, not a routing prediction:
//! it exists so the client can warn "you'll still be driving" before a
//! driver accepts a second ride, and it errs conservative for city speeds.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geo::{distance_miles, Location};
use crate::ride::RideRequest;

/// Assumed average travel speed for drop-off estimation.
pub const ASSUMED_SPEED_MPH: f64 = 25.0;

/// The ride a driver is currently on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRide {
    pub pickup: Location,
    pub destination: Location,
    pub started_at: NaiveDateTime,
}

/// Result of a conflict check. Timing fields are only present when both
/// rides carried enough data to estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictCheck {
    pub has_conflict: bool,
    pub current_ride_dropoff_time: Option<NaiveDateTime>,
    pub new_ride_pickup_time: Option<NaiveDateTime>,
    /// Whole minutes of overlap, rounded up; positive when conflicting.
    pub conflict_minutes: Option<i64>,
}

impl ConflictCheck {
    fn clear() -> Self {
        Self {
            has_conflict: false,
            current_ride_dropoff_time: None,
            new_ride_pickup_time: None,
            conflict_minutes: None,
        }
    }
}

/// Flag a new ride whose scheduled pickup lands before the estimated
/// drop-off of the ride in progress.
///
/// Absent rides, missing geocodes, or an unschedulable estimate all report
/// "no conflict" rather than failing; blocking an accept needs positive
/// evidence of overlap. `now` stands in for an unscheduled new ride.
pub fn check_in_ride_conflict(
    current: Option<&ActiveRide>,
    new_ride: Option<&RideRequest>,
    now: NaiveDateTime,
) -> ConflictCheck {
    let (Some(current), Some(new_ride)) = (current, new_ride) else {
        return ConflictCheck::clear();
    };

    let distance = current
        .pickup
        .coordinates_or("current ride pickup")
        .and_then(|pickup| {
            let destination = current.destination.coordinates_or("current ride destination")?;
            distance_miles(pickup, destination)
        });
    let ride_distance = match distance {
        Ok(d) => d,
        Err(err) => {
            debug!(error = %err, "conflict check skipped, cannot estimate drop-off");
            return ConflictCheck::clear();
        }
    };

    let travel_secs = (ride_distance / ASSUMED_SPEED_MPH * 3_600.0).round() as i64;
    let dropoff = current.started_at + Duration::seconds(travel_secs);
    let pickup_time = new_ride.scheduled_time.unwrap_or(now);

    if pickup_time >= dropoff {
        return ConflictCheck {
            has_conflict: false,
            current_ride_dropoff_time: Some(dropoff),
            new_ride_pickup_time: Some(pickup_time),
            conflict_minutes: None,
        };
    }

    let overlap_secs = (dropoff - pickup_time).num_seconds();
    // Round up so a 30-second overlap still reads as one minute.
    let conflict_minutes = (overlap_secs + 59) / 60;

    ConflictCheck {
        has_conflict: true,
        current_ride_dropoff_time: Some(dropoff),
        new_ride_pickup_time: Some(pickup_time),
        conflict_minutes: Some(conflict_minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{at, downtown, miles_north, ride};

    fn active_ride_of_miles(miles: f64, started_at: NaiveDateTime) -> ActiveRide {
        let pickup = downtown();
        let destination = miles_north(pickup, miles);
        ActiveRide {
            pickup: Location::new("pickup", pickup),
            destination: Location::new("destination", destination),
            started_at,
        }
    }

    #[test]
    fn no_conflict_when_either_ride_is_absent() {
        let current = active_ride_of_miles(5.0, at(10, 0));
        let new_ride = ride(downtown(), miles_north(downtown(), 2.0));
        assert!(!check_in_ride_conflict(None, Some(&new_ride), at(10, 0)).has_conflict);
        assert!(!check_in_ride_conflict(Some(&current), None, at(10, 0)).has_conflict);
        assert!(!check_in_ride_conflict(None, None, at(10, 0)).has_conflict);
    }

    #[test]
    fn overlapping_pickup_is_flagged_with_positive_minutes() {
        // 5 mi at 25 mph = 12 minutes; drop-off 10:12.
        let current = active_ride_of_miles(5.0, at(10, 0));
        let mut new_ride = ride(downtown(), miles_north(downtown(), 2.0));
        new_ride.scheduled_time = Some(at(10, 5));

        let check = check_in_ride_conflict(Some(&current), Some(&new_ride), at(10, 0));

        assert!(check.has_conflict);
        assert_eq!(check.current_ride_dropoff_time, Some(at(10, 12)));
        assert_eq!(check.new_ride_pickup_time, Some(at(10, 5)));
        assert_eq!(check.conflict_minutes, Some(7));
    }

    #[test]
    fn pickup_at_or_after_dropoff_is_clear() {
        let current = active_ride_of_miles(5.0, at(10, 0));
        let mut new_ride = ride(downtown(), miles_north(downtown(), 2.0));

        new_ride.scheduled_time = Some(at(10, 12));
        let check = check_in_ride_conflict(Some(&current), Some(&new_ride), at(10, 0));
        assert!(!check.has_conflict);
        assert_eq!(check.conflict_minutes, None);

        new_ride.scheduled_time = Some(at(10, 30));
        assert!(!check_in_ride_conflict(Some(&current), Some(&new_ride), at(10, 0)).has_conflict);
    }

    #[test]
    fn unscheduled_new_ride_uses_now() {
        let current = active_ride_of_miles(5.0, at(10, 0));
        let new_ride = ride(downtown(), miles_north(downtown(), 2.0));

        let check = check_in_ride_conflict(Some(&current), Some(&new_ride), at(10, 0));

        assert!(check.has_conflict);
        assert_eq!(check.conflict_minutes, Some(12));
    }

    #[test]
    fn partial_minute_overlap_rounds_up() {
        // 0.5 mi at 25 mph = 72 seconds of driving.
        let current = active_ride_of_miles(0.5, at(10, 0));
        let new_ride = ride(downtown(), miles_north(downtown(), 2.0));

        let check = check_in_ride_conflict(Some(&current), Some(&new_ride), at(10, 0));

        assert!(check.has_conflict);
        assert_eq!(check.conflict_minutes, Some(2));
    }

    #[test]
    fn missing_geocode_on_current_ride_reports_clear() {
        let mut current = active_ride_of_miles(5.0, at(10, 0));
        current.destination.coordinates = None;
        let new_ride = ride(downtown(), miles_north(downtown(), 2.0));

        let check = check_in_ride_conflict(Some(&current), Some(&new_ride), at(10, 0));

        assert!(!check.has_conflict);
        assert_eq!(check.current_ride_dropoff_time, None);
    }
}
