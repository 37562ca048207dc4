//! Turns a ranked ride list into presentation-ready guidance: top picks,
//! rides to avoid, and narrative insight/suggestion text. Pure and
//! stateless given its inputs.

use serde::{Deserialize, Serialize};

use crate::driver::{BehaviorPatterns, MarketData};
use crate::ride::{Recommendation, ScoredRide};

/// How many rides from the top of the ranking become "top picks".
pub const TOP_PICK_COUNT: usize = 3;
/// Composite score below which a ride lands in the avoid list.
pub const AVOID_THRESHOLD: u8 = 30;

const STRONG_LIST_MEAN: f64 = 80.0;
const WEAK_LIST_MEAN: f64 = 50.0;

/// The full guidance bundle rendered around the ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideGuidance {
    pub top_picks: Vec<ScoredRide>,
    pub avoid: Vec<ScoredRide>,
    pub insights: Vec<Recommendation>,
    pub suggestions: Vec<Recommendation>,
}

/// Partition and annotate an already-ranked ride list.
///
/// Expects `scored_rides` sorted best-first (see
/// [`crate::scoring::rank_rides`]); the first [`TOP_PICK_COUNT`] entries
/// become top picks regardless of their absolute score.
pub fn generate_guidance(
    scored_rides: &[ScoredRide],
    behavior: &BehaviorPatterns,
    market: &MarketData,
) -> RideGuidance {
    let top_picks = scored_rides.iter().take(TOP_PICK_COUNT).cloned().collect();
    let avoid = scored_rides
        .iter()
        .filter(|r| r.smart_score < AVOID_THRESHOLD)
        .cloned()
        .collect();

    let mut insights = Vec::new();
    if !scored_rides.is_empty() {
        let mean = scored_rides
            .iter()
            .map(|r| f64::from(r.smart_score))
            .sum::<f64>()
            / scored_rides.len() as f64;
        if mean > STRONG_LIST_MEAN {
            insights.push(Recommendation::success(
                "Strong batch of requests right now; most of these rides fit you well",
            ));
        } else if mean < WEAK_LIST_MEAN {
            insights.push(Recommendation::warning(
                "Weak batch of requests; consider waiting for better rides",
            ));
        }
    }

    let mut suggestions = Vec::new();
    if behavior.low_acceptance_rate {
        suggestions.push(Recommendation::info(
            "Your bid acceptance rate is low; consider reviewing your bidding strategy",
        ));
    }
    if market.demand_high {
        suggestions.push(Recommendation::info(
            "Demand is high in your area; consider raising your rates",
        ));
    }

    RideGuidance {
        top_picks,
        avoid,
        insights,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ride::RecommendationKind;
    use crate::scoring::ScoreBreakdown;
    use crate::test_helpers::{behavior, downtown, market, miles_north, ride};

    fn scored(address: &str, smart_score: u8) -> ScoredRide {
        let mut request = ride(downtown(), miles_north(downtown(), 2.0));
        request.pickup.address = address.to_string();
        ScoredRide {
            request,
            smart_score,
            score_breakdown: ScoreBreakdown {
                distance: 50.0,
                time_of_day: 50.0,
                ride_type: 50.0,
                earnings: 50.0,
                market: 50.0,
                behavior: 50.0,
            },
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn takes_first_three_as_top_picks_and_flags_weak_rides() {
        let rides = vec![
            scored("a", 92),
            scored("b", 85),
            scored("c", 70),
            scored("d", 40),
            scored("e", 25),
        ];

        let guidance = generate_guidance(&rides, &behavior(), &market());

        assert_eq!(guidance.top_picks.len(), 3);
        assert_eq!(guidance.top_picks[0].request.pickup.address, "a");
        assert_eq!(guidance.avoid.len(), 1);
        assert_eq!(guidance.avoid[0].request.pickup.address, "e");
    }

    #[test]
    fn strong_mean_emits_success_insight() {
        let rides = vec![scored("a", 90), scored("b", 88), scored("c", 85)];
        let guidance = generate_guidance(&rides, &behavior(), &market());
        assert_eq!(guidance.insights.len(), 1);
        assert_eq!(guidance.insights[0].kind, RecommendationKind::Success);
    }

    #[test]
    fn weak_mean_emits_warning_insight() {
        let rides = vec![scored("a", 45), scored("b", 30)];
        let guidance = generate_guidance(&rides, &behavior(), &market());
        assert_eq!(guidance.insights.len(), 1);
        assert_eq!(guidance.insights[0].kind, RecommendationKind::Warning);
    }

    #[test]
    fn middling_mean_emits_no_insight() {
        let rides = vec![scored("a", 65), scored("b", 60)];
        let guidance = generate_guidance(&rides, &behavior(), &market());
        assert!(guidance.insights.is_empty());
    }

    #[test]
    fn empty_list_produces_empty_guidance_without_insights() {
        let guidance = generate_guidance(&[], &behavior(), &market());
        assert!(guidance.top_picks.is_empty());
        assert!(guidance.avoid.is_empty());
        assert!(guidance.insights.is_empty());
    }

    #[test]
    fn behavior_and_market_drive_suggestions() {
        let mut patterns = behavior();
        patterns.low_acceptance_rate = true;
        let mut market = market();
        market.demand_high = true;
        market.demand_medium = false;

        let guidance = generate_guidance(&[scored("a", 70)], &patterns, &market);

        assert_eq!(guidance.suggestions.len(), 2);
        assert!(guidance.suggestions[0].message.contains("bidding strategy"));
        assert!(guidance.suggestions[1].message.contains("raising your rates"));
    }
}
