//! The ride scoring engine: six 0–100 sub-scores combined by weight.
//!
//! Degraded inputs never fail a ranking. A missing driver location, an
//! ungeocoded leg, or a non-positive earnings target each pull their
//! sub-score to a conservative baseline of 0 and the rest of the breakdown
//! stands, so a partial data outage lowers score quality instead of
//! crashing the list.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::driver::{BehaviorPatterns, DriverPreferences, MarketData};
use crate::geo::{distance_miles, Coordinates};
use crate::rates::{resolve_rate, RateSettings};
use crate::ride::{Recommendation, RideRequest, ScoredRide};

use super::behavior::{BehaviorScorer, FixedBehaviorScorer};

/// Flat component of the simplified earnings estimator.
pub const ESTIMATE_BASE: f64 = 2.00;
/// Per-mile component of the simplified earnings estimator.
pub const ESTIMATE_PER_MILE: f64 = 1.50;

/// Estimated earnings must exceed this multiple of the driver's target to
/// trigger the "high earnings" note. Applied to the raw estimate, before
/// the 0–100 clamp, since the clamped score can never exceed 100.
pub const HIGH_EARNINGS_FACTOR: f64 = 1.2;

const LONG_PICKUP_THRESHOLD: f64 = 30.0;
const OFF_HOURS_THRESHOLD: f64 = 40.0;

/// Per-factor sub-scores, each 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub distance: f64,
    pub time_of_day: f64,
    pub ride_type: f64,
    pub earnings: f64,
    pub market: f64,
    pub behavior: f64,
}

/// Everything the engine needs besides the ride itself: already-resolved
/// snapshots from the host app's stores, never live dependencies.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    pub preferences: &'a DriverPreferences,
    pub behavior: &'a BehaviorPatterns,
    pub market: &'a MarketData,
    /// The driver's rate schedule, used to resolve which time block a ride
    /// falls in.
    pub rate_settings: &'a RateSettings,
    pub driver_location: Option<Coordinates>,
    /// Stand-in for unscheduled rides, injected for determinism.
    pub now: NaiveDateTime,
}

/// Scores candidate rides. Stateless apart from the behavior strategy.
pub struct RideScoringEngine {
    behavior_scorer: Box<dyn BehaviorScorer>,
}

impl Default for RideScoringEngine {
    fn default() -> Self {
        Self::new(Box::new(FixedBehaviorScorer::default()))
    }
}

impl RideScoringEngine {
    pub fn new(behavior_scorer: Box<dyn BehaviorScorer>) -> Self {
        Self { behavior_scorer }
    }

    /// Score a single ride: breakdown, weighted total, and
    /// threshold-triggered notes.
    ///
    /// The weighted total assumes the caller supplies sane weights (see
    /// [`super::ScoreWeights`]); it is clamped to 0–100 rather than
    /// re-normalized.
    pub fn score_ride(&self, ride: &RideRequest, ctx: &ScoringContext<'_>) -> ScoredRide {
        let pickup_distance = self.pickup_distance(ride, ctx);
        let ride_distance = self.ride_distance(ride);
        let estimated_earnings = ride_distance
            .map(|miles| ESTIMATE_BASE + ESTIMATE_PER_MILE * miles);

        let breakdown = ScoreBreakdown {
            distance: distance_score(pickup_distance),
            time_of_day: time_of_day_score(ride, ctx),
            ride_type: ride_type_score(ride, ctx.preferences),
            earnings: earnings_score(
                estimated_earnings,
                ctx.preferences.target_earnings_per_ride,
            ),
            market: market_score(ctx.market),
            behavior: self.behavior_scorer.score(ctx.behavior).clamp(0.0, 100.0),
        };

        let weights = &ctx.preferences.score_weights;
        let total = breakdown.distance * weights.distance
            + breakdown.time_of_day * weights.time_of_day
            + breakdown.ride_type * weights.ride_type
            + breakdown.earnings * weights.earnings
            + breakdown.market * weights.market
            + breakdown.behavior * weights.behavior;
        let smart_score = total.clamp(0.0, 100.0).round() as u8;

        let mut recommendations = Vec::new();
        if breakdown.distance < LONG_PICKUP_THRESHOLD {
            recommendations.push(Recommendation::warning("Long pickup distance for this ride"));
        }
        if breakdown.time_of_day < OFF_HOURS_THRESHOLD {
            recommendations.push(Recommendation::info("Outside your preferred time blocks"));
        }
        if let Some(estimate) = estimated_earnings {
            let target = ctx.preferences.target_earnings_per_ride;
            if target > 0.0 && estimate > HIGH_EARNINGS_FACTOR * target {
                recommendations.push(Recommendation::success(
                    "High earnings potential for this ride",
                ));
            }
        }

        ScoredRide {
            request: ride.clone(),
            smart_score,
            score_breakdown: breakdown,
            recommendations,
        }
    }

    /// Score every candidate and sort best-first. The sort is stable, so
    /// equal totals keep their input order.
    pub fn score_and_rank(
        &self,
        rides: &[RideRequest],
        ctx: &ScoringContext<'_>,
    ) -> Vec<ScoredRide> {
        let scored = rides.iter().map(|ride| self.score_ride(ride, ctx)).collect();
        rank_rides(scored)
    }

    fn pickup_distance(&self, ride: &RideRequest, ctx: &ScoringContext<'_>) -> Option<f64> {
        let driver = ctx.driver_location?;
        let pickup = ride.pickup.coordinates?;
        match distance_miles(driver, pickup) {
            Ok(miles) => Some(miles),
            Err(err) => {
                debug!(error = %err, "distance sub-score degraded to baseline");
                None
            }
        }
    }

    fn ride_distance(&self, ride: &RideRequest) -> Option<f64> {
        let pickup = ride.pickup.coordinates?;
        let destination = ride.destination.coordinates?;
        match distance_miles(pickup, destination) {
            Ok(miles) => Some(miles),
            Err(err) => {
                debug!(error = %err, "earnings sub-score degraded to baseline");
                None
            }
        }
    }
}

/// Stable descending sort by composite score.
pub fn rank_rides(mut rides: Vec<ScoredRide>) -> Vec<ScoredRide> {
    rides.sort_by(|a, b| b.smart_score.cmp(&a.smart_score));
    rides
}

/// Linear pickup penalty: 100 at the driver's door, 0 from 10 miles out.
fn distance_score(pickup_distance: Option<f64>) -> f64 {
    match pickup_distance {
        Some(miles) => (100.0 - 10.0 * miles).max(0.0),
        None => 0.0,
    }
}

fn time_of_day_score(ride: &RideRequest, ctx: &ScoringContext<'_>) -> f64 {
    let scheduled = ride.scheduled_time.unwrap_or(ctx.now);
    let resolved = resolve_rate(scheduled, ctx.rate_settings);
    let Some(block) = resolved.time_block else {
        return 20.0;
    };
    if ctx
        .preferences
        .preferred_time_blocks
        .iter()
        .any(|id| *id == block.id)
    {
        100.0
    } else if ctx
        .preferences
        .acceptable_time_blocks
        .iter()
        .any(|id| *id == block.id)
    {
        60.0
    } else {
        20.0
    }
}

fn ride_type_score(ride: &RideRequest, preferences: &DriverPreferences) -> f64 {
    if preferences
        .preferred_ride_types
        .iter()
        .any(|t| t == ride.ride_type())
    {
        100.0
    } else {
        50.0
    }
}

fn earnings_score(estimated_earnings: Option<f64>, target: f64) -> f64 {
    let Some(estimate) = estimated_earnings else {
        return 0.0;
    };
    if target <= 0.0 {
        debug!(earnings_target = target, "non-positive earnings target, sub-score baselined");
        return 0.0;
    }
    (100.0 * estimate / target).min(100.0)
}

fn market_score(market: &MarketData) -> f64 {
    if market.demand_high {
        80.0
    } else if market.demand_medium {
        60.0
    } else {
        40.0
    }
}
