//! Suggested-bid calculation for a single ride request.
//!
//! `bid = pickup_distance * pickup_rate + ride_distance * destination_rate`,
//! with the rates resolved from the driver's schedule at the scheduled
//! pickup time. The engine never panics on bad input: any missing or
//! malformed coordinate degrades into an `is_valid: false` result so the
//! bidding UI can render "no estimate available" without error handling.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ValidationError;
use crate::geo::{distance_miles, Coordinates};
use crate::rates::{resolve_rate, RateSettings, TimeBlock};
use crate::ride::RideRequest;

/// Round to cents, half away from zero.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to a tenth of a mile.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// The cost breakdown behind a suggested bid. Distances are rounded to one
/// decimal for display; costs and the bid itself to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationDetails {
    pub pickup_distance: f64,
    pub ride_distance: f64,
    pub pickup_rate: f64,
    pub destination_rate: f64,
    pub pickup_cost: f64,
    pub destination_cost: f64,
}

/// Outcome of a bid calculation. `is_valid: false` carries an error message
/// instead of numbers; callers check the flag, never catch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidCalculationResult {
    pub suggested_bid: f64,
    pub calculation_details: Option<CalculationDetails>,
    pub applied_time_block: Option<TimeBlock>,
    pub scheduled_time: Option<NaiveDateTime>,
    pub is_valid: bool,
    pub error: Option<String>,
}

impl BidCalculationResult {
    fn invalid(err: &ValidationError) -> Self {
        warn!(error = %err, "bid calculation degraded to no-estimate");
        Self {
            suggested_bid: 0.0,
            calculation_details: None,
            applied_time_block: None,
            scheduled_time: None,
            is_valid: false,
            error: Some(err.to_string()),
        }
    }
}

/// Compute a suggested bid for one ride.
///
/// `now` stands in for the scheduled time when the request has none; the
/// caller supplies it so the calculation stays deterministic under test.
pub fn calculate_suggested_bid(
    ride: &RideRequest,
    settings: &RateSettings,
    driver_location: Option<Coordinates>,
    now: NaiveDateTime,
) -> BidCalculationResult {
    let inputs = (|| -> Result<(f64, f64), ValidationError> {
        let driver =
            driver_location.ok_or(ValidationError::MissingCoordinates("driver location"))?;
        let pickup = ride.pickup.coordinates_or("pickup")?;
        let destination = ride.destination.coordinates_or("destination")?;
        let pickup_distance = distance_miles(driver, pickup)?;
        let ride_distance = distance_miles(pickup, destination)?;
        Ok((pickup_distance, ride_distance))
    })();

    let (pickup_distance, ride_distance) = match inputs {
        Ok(distances) => distances,
        Err(err) => return BidCalculationResult::invalid(&err),
    };

    let scheduled = ride.scheduled_time.unwrap_or(now);
    let resolved = resolve_rate(scheduled, settings);

    // Costs come from the unrounded distances; only the displayed fields
    // are rounded.
    let pickup_cost = pickup_distance * resolved.pickup;
    let destination_cost = ride_distance * resolved.destination;

    BidCalculationResult {
        suggested_bid: round2(pickup_cost + destination_cost),
        calculation_details: Some(CalculationDetails {
            pickup_distance: round1(pickup_distance),
            ride_distance: round1(ride_distance),
            pickup_rate: resolved.pickup,
            destination_rate: resolved.destination,
            pickup_cost: round2(pickup_cost),
            destination_cost: round2(destination_cost),
        }),
        applied_time_block: resolved.time_block.cloned(),
        scheduled_time: Some(scheduled),
        is_valid: true,
        error: None,
    }
}
