//! Driver preferences and the derived behavior/market snapshots.
//!
//! Preferences are persisted per driver by the host app; everything here is
//! the pure half of that lifecycle: seeding defaults from an earnings
//! summary, nudging them after each completed ride, and recomputing the
//! read-only behavior/market snapshots from rolling history windows.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::scoring::ScoreWeights;

/// Acceptance rate (percent) below which a driver is flagged as bidding
/// too high or too selectively.
pub const LOW_ACCEPTANCE_THRESHOLD: f64 = 40.0;

/// Floor for the seeded per-ride earnings target, so a sparse history
/// cannot seed a near-zero target that marks every ride a jackpot.
pub const MIN_TARGET_EARNINGS: f64 = 10.0;

/// Smoothing factor for the post-ride earnings-target update.
pub const TARGET_EMA_ALPHA: f64 = 0.1;

/// Ride volume thresholds for demand tiers in a regional sample window.
pub const DEMAND_HIGH_RIDES: u32 = 50;
pub const DEMAND_MEDIUM_RIDES: u32 = 20;

/// What the driver wants out of a shift. Weighting is hand-tuned, not
/// learned; see [`ScoreWeights`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverPreferences {
    pub preferred_time_blocks: Vec<String>,
    pub acceptable_time_blocks: Vec<String>,
    pub preferred_ride_types: Vec<String>,
    pub target_earnings_per_ride: f64,
    pub max_pickup_distance: f64,
    pub score_weights: ScoreWeights,
}

/// Average earnings for one time block over the trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockEarnings {
    pub time_block_id: String,
    pub average_earnings: f64,
}

/// Trailing-30-day earnings summary, grouped by time block, as produced by
/// the host app's analytics query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsSummary {
    pub overall_average: f64,
    pub by_block: Vec<BlockEarnings>,
}

/// One completed ride from the driver's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedRide {
    /// Id of the time block the ride fell in, when one matched.
    pub time_block_id: Option<String>,
    pub earnings: f64,
}

/// One submitted bid and whether the rider accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BidRecord {
    pub accepted: bool,
}

impl DriverPreferences {
    /// Seed default preferences for a driver with no stored record.
    ///
    /// Blocks that out-earned the driver's overall average become
    /// preferred, the rest acceptable; the per-ride target starts at the
    /// observed average, floored at [`MIN_TARGET_EARNINGS`].
    pub fn seeded_from_history(summary: &EarningsSummary) -> Self {
        let mut preferred = Vec::new();
        let mut acceptable = Vec::new();
        for block in &summary.by_block {
            if block.average_earnings > summary.overall_average {
                preferred.push(block.time_block_id.clone());
            } else {
                acceptable.push(block.time_block_id.clone());
            }
        }
        Self {
            preferred_time_blocks: preferred,
            acceptable_time_blocks: acceptable,
            preferred_ride_types: vec![crate::ride::DEFAULT_RIDE_TYPE.to_string()],
            target_earnings_per_ride: summary.overall_average.max(MIN_TARGET_EARNINGS),
            max_pickup_distance: 10.0,
            score_weights: ScoreWeights::default(),
        }
    }

    /// Incremental reinforcement step after a completed ride.
    ///
    /// The earnings target follows an EMA of realized earnings. A ride's
    /// time block climbs one rung (acceptable, then preferred) when it beat
    /// the pre-update target, and drops from preferred to acceptable when
    /// it earned less than half of it.
    pub fn apply_ride_feedback(&mut self, completed: &CompletedRide) {
        let target_before = self.target_earnings_per_ride;
        self.target_earnings_per_ride = (1.0 - TARGET_EMA_ALPHA) * target_before
            + TARGET_EMA_ALPHA * completed.earnings;

        let Some(block) = &completed.time_block_id else {
            return;
        };

        if completed.earnings >= target_before {
            if self.preferred_time_blocks.iter().any(|b| b == block) {
                return;
            }
            if let Some(pos) = self.acceptable_time_blocks.iter().position(|b| b == block) {
                self.acceptable_time_blocks.remove(pos);
                self.preferred_time_blocks.push(block.clone());
                debug!(block = %block, "time block promoted to preferred");
            } else {
                self.acceptable_time_blocks.push(block.clone());
            }
        } else if completed.earnings < 0.5 * target_before {
            if let Some(pos) = self.preferred_time_blocks.iter().position(|b| b == block) {
                self.preferred_time_blocks.remove(pos);
                self.acceptable_time_blocks.push(block.clone());
                debug!(block = %block, "time block demoted to acceptable");
            }
        }
    }
}

/// Read-only summary of historical bidding and acceptance behavior.
/// Recomputed from history on each request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorPatterns {
    pub total_rides: u32,
    pub total_bids: u32,
    /// Percent of bids that were accepted, 0–100.
    pub acceptance_rate: f64,
    pub average_earnings: f64,
    /// Blocks the driver actually works most, by ride count.
    pub preferred_time_blocks: Vec<String>,
    pub low_acceptance_rate: bool,
}

impl BehaviorPatterns {
    /// Derive a snapshot from a rolling window of rides and bid outcomes.
    ///
    /// A block counts as "preferred" when it holds at least a quarter of
    /// the window's rides; ties order by block id for determinism.
    pub fn from_history(rides: &[CompletedRide], bids: &[BidRecord]) -> Self {
        let total_rides = rides.len() as u32;
        let total_bids = bids.len() as u32;
        let accepted = bids.iter().filter(|b| b.accepted).count() as f64;
        let acceptance_rate = if total_bids == 0 {
            0.0
        } else {
            accepted / total_bids as f64 * 100.0
        };
        let average_earnings = if rides.is_empty() {
            0.0
        } else {
            rides.iter().map(|r| r.earnings).sum::<f64>() / rides.len() as f64
        };

        let mut counts: HashMap<&str, u32> = HashMap::new();
        for ride in rides {
            if let Some(block) = &ride.time_block_id {
                *counts.entry(block.as_str()).or_insert(0) += 1;
            }
        }
        let cutoff = (total_rides / 4).max(1);
        let mut frequent: Vec<(&str, u32)> = counts
            .into_iter()
            .filter(|(_, count)| *count >= cutoff)
            .collect();
        frequent.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        Self {
            total_rides,
            total_bids,
            acceptance_rate,
            average_earnings,
            preferred_time_blocks: frequent.into_iter().map(|(id, _)| id.to_string()).collect(),
            low_acceptance_rate: total_bids > 0 && acceptance_rate < LOW_ACCEPTANCE_THRESHOLD,
        }
    }
}

/// Snapshot of recent regional ride volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub total_rides: u32,
    pub average_earnings: f64,
    pub demand_high: bool,
    pub demand_medium: bool,
    pub demand_low: bool,
}

impl MarketData {
    /// Derive demand tiers from a rolling sample of regional completed
    /// rides. Exactly one tier flag is set.
    pub fn from_regional_sample(rides: &[CompletedRide]) -> Self {
        let total_rides = rides.len() as u32;
        let average_earnings = if rides.is_empty() {
            0.0
        } else {
            rides.iter().map(|r| r.earnings).sum::<f64>() / rides.len() as f64
        };
        Self {
            total_rides,
            average_earnings,
            demand_high: total_rides >= DEMAND_HIGH_RIDES,
            demand_medium: total_rides >= DEMAND_MEDIUM_RIDES && total_rides < DEMAND_HIGH_RIDES,
            demand_low: total_rides < DEMAND_MEDIUM_RIDES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ride_in(block: &str, earnings: f64) -> CompletedRide {
        CompletedRide {
            time_block_id: Some(block.to_string()),
            earnings,
        }
    }

    #[test]
    fn seeding_prefers_above_average_blocks() {
        let summary = EarningsSummary {
            overall_average: 15.0,
            by_block: vec![
                BlockEarnings {
                    time_block_id: "rush".to_string(),
                    average_earnings: 22.0,
                },
                BlockEarnings {
                    time_block_id: "midday".to_string(),
                    average_earnings: 11.0,
                },
            ],
        };

        let prefs = DriverPreferences::seeded_from_history(&summary);

        assert_eq!(prefs.preferred_time_blocks, vec!["rush"]);
        assert_eq!(prefs.acceptable_time_blocks, vec!["midday"]);
        assert_eq!(prefs.target_earnings_per_ride, 15.0);
    }

    #[test]
    fn seeding_floors_the_target() {
        let summary = EarningsSummary {
            overall_average: 3.0,
            by_block: vec![],
        };
        let prefs = DriverPreferences::seeded_from_history(&summary);
        assert_eq!(prefs.target_earnings_per_ride, MIN_TARGET_EARNINGS);
    }

    #[test]
    fn good_ride_promotes_block_one_rung() {
        let mut prefs = crate::test_helpers::preferences();
        // "night" sits in acceptable; a target-beating ride promotes it.
        prefs.apply_ride_feedback(&ride_in("night", 20.0));
        assert!(prefs.preferred_time_blocks.iter().any(|b| b == "night"));
        assert!(prefs.acceptable_time_blocks.iter().all(|b| b != "night"));

        // An unknown block first becomes acceptable.
        prefs.apply_ride_feedback(&ride_in("dawn", 25.0));
        assert!(prefs.acceptable_time_blocks.iter().any(|b| b == "dawn"));
    }

    #[test]
    fn poor_ride_demotes_preferred_block() {
        let mut prefs = crate::test_helpers::preferences();
        prefs.apply_ride_feedback(&ride_in("rush", 2.0));
        assert!(prefs.preferred_time_blocks.iter().all(|b| b != "rush"));
        assert!(prefs.acceptable_time_blocks.iter().any(|b| b == "rush"));
    }

    #[test]
    fn target_follows_ema() {
        let mut prefs = crate::test_helpers::preferences();
        let before = prefs.target_earnings_per_ride;
        prefs.apply_ride_feedback(&CompletedRide {
            time_block_id: None,
            earnings: before + 10.0,
        });
        let expected = (1.0 - TARGET_EMA_ALPHA) * before + TARGET_EMA_ALPHA * (before + 10.0);
        assert!((prefs.target_earnings_per_ride - expected).abs() < 1e-9);
    }

    #[test]
    fn behavior_snapshot_from_history() {
        let rides = vec![
            ride_in("rush", 20.0),
            ride_in("rush", 18.0),
            ride_in("rush", 22.0),
            ride_in("midday", 9.0),
        ];
        let bids = vec![
            BidRecord { accepted: true },
            BidRecord { accepted: true },
            BidRecord { accepted: false },
            BidRecord { accepted: false },
            BidRecord { accepted: false },
            BidRecord { accepted: false },
            BidRecord { accepted: false },
            BidRecord { accepted: false },
        ];

        let patterns = BehaviorPatterns::from_history(&rides, &bids);

        assert_eq!(patterns.total_rides, 4);
        assert_eq!(patterns.total_bids, 8);
        assert_eq!(patterns.acceptance_rate, 25.0);
        assert!(patterns.low_acceptance_rate);
        assert_eq!(patterns.average_earnings, 17.25);
        // "midday" holds exactly a quarter of rides, so both blocks appear,
        // busiest first.
        assert_eq!(patterns.preferred_time_blocks, vec!["rush", "midday"]);
    }

    #[test]
    fn behavior_snapshot_tolerates_empty_history() {
        let patterns = BehaviorPatterns::from_history(&[], &[]);
        assert_eq!(patterns.acceptance_rate, 0.0);
        assert!(!patterns.low_acceptance_rate);
        assert!(patterns.preferred_time_blocks.is_empty());
    }

    #[test]
    fn market_demand_tiers_are_exclusive() {
        let sample = |n: usize| vec![ride_in("rush", 15.0); n];
        let high = MarketData::from_regional_sample(&sample(60));
        assert!(high.demand_high && !high.demand_medium && !high.demand_low);
        let medium = MarketData::from_regional_sample(&sample(30));
        assert!(!medium.demand_high && medium.demand_medium && !medium.demand_low);
        let low = MarketData::from_regional_sample(&sample(5));
        assert!(!low.demand_high && !low.demand_medium && low.demand_low);
    }
}
