//! Multi-factor ride desirability scoring.

mod behavior;
mod engine;
mod weights;

pub use behavior::{AcceptanceRateScorer, BehaviorScorer, FixedBehaviorScorer};
pub use engine::{rank_rides, RideScoringEngine, ScoreBreakdown, ScoringContext};
pub use weights::ScoreWeights;
