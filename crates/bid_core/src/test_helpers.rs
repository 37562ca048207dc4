//! Shared fixtures for tests: a small city geometry, a rate schedule, and
//! canned preference/market snapshots. Kept behind the `test-helpers`
//! feature so downstream crates can reuse them in their own tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::driver::{BehaviorPatterns, DriverPreferences, MarketData};
use crate::geo::{Coordinates, Location};
use crate::rates::{PerMileRate, RateSettings, TimeBlock};
use crate::ride::RideRequest;

/// A fixed local date so scheduled times are reproducible across tests.
pub const TEST_DATE: (i32, u32, u32) = (2024, 3, 14);

/// Local datetime on the test date.
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    let (y, m, d) = TEST_DATE;
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("test date is valid")
        .and_hms_opt(hour, minute, 0)
        .expect("test time is valid")
}

/// Enabled time block with the given window and rates.
pub fn block(id: &str, start: &str, end: &str, pickup: f64, destination: f64) -> TimeBlock {
    TimeBlock {
        id: id.to_string(),
        name: id.to_string(),
        start: start.to_string(),
        end: end.to_string(),
        pickup_rate: pickup,
        destination_rate: destination,
        enabled: true,
    }
}

/// Rate settings with default {pickup: 1.00, destination: 2.00} and the
/// given blocks.
pub fn settings_with_blocks(time_blocks: Vec<TimeBlock>) -> RateSettings {
    RateSettings {
        default_rate: PerMileRate {
            pickup: 1.00,
            destination: 2.00,
        },
        time_blocks,
        auto_bid_enabled: false,
    }
}

/// A point exactly `miles` due north of `origin` along the meridian. On a
/// sphere the haversine distance between the two points equals `miles`, so
/// fixtures can hit distance-dependent expectations precisely.
pub fn miles_north(origin: Coordinates, miles: f64) -> Coordinates {
    let dlat = (miles / crate::geo::EARTH_RADIUS_MILES).to_degrees();
    Coordinates::new(origin.lat + dlat, origin.lng)
}

/// Downtown reference point used across tests.
pub fn downtown() -> Coordinates {
    Coordinates::new(40.7128, -74.0060)
}

/// Ride request between two geocoded addresses.
pub fn ride(pickup: Coordinates, destination: Coordinates) -> RideRequest {
    RideRequest {
        pickup: Location::new("pickup", pickup),
        destination: Location::new("destination", destination),
        scheduled_time: None,
        ride_type: None,
    }
}

/// Preferences with the documented default weights, a $15 per-ride target,
/// and the "rush" block preferred.
pub fn preferences() -> DriverPreferences {
    DriverPreferences {
        preferred_time_blocks: vec!["rush".to_string()],
        acceptable_time_blocks: vec!["night".to_string()],
        preferred_ride_types: vec!["standard".to_string()],
        target_earnings_per_ride: 15.0,
        max_pickup_distance: 10.0,
        score_weights: Default::default(),
    }
}

/// A healthy behavior snapshot (acceptance well above the low-rate flag).
pub fn behavior() -> BehaviorPatterns {
    BehaviorPatterns {
        total_rides: 120,
        total_bids: 160,
        acceptance_rate: 75.0,
        average_earnings: 18.50,
        preferred_time_blocks: vec!["rush".to_string()],
        low_acceptance_rate: false,
    }
}

/// Medium-demand market snapshot.
pub fn market() -> MarketData {
    MarketData {
        total_rides: 30,
        average_earnings: 16.0,
        demand_high: false,
        demand_medium: true,
        demand_low: false,
    }
}
