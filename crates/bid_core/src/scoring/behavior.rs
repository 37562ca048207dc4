use crate::driver::BehaviorPatterns;

/// Strategy for the behavior sub-score.
///
/// The original client hard-coded this factor to a constant; keeping it
/// behind a trait lets the algorithm be swapped or tested independently.
/// Implementations return a value in 0–100; the engine clamps regardless.
pub trait BehaviorScorer: Send + Sync {
    fn score(&self, patterns: &BehaviorPatterns) -> f64;
}

/// Constant behavior score. `FixedBehaviorScorer::default()` yields the
/// neutral 50.0 the engine ships with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedBehaviorScorer(pub f64);

impl Default for FixedBehaviorScorer {
    fn default() -> Self {
        Self(50.0)
    }
}

impl BehaviorScorer for FixedBehaviorScorer {
    fn score(&self, _patterns: &BehaviorPatterns) -> f64 {
        self.0
    }
}

/// Maps the driver's bid acceptance rate straight onto the 0–100 scale:
/// drivers whose bids land get a nudge toward rides like the ones they win.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptanceRateScorer;

impl BehaviorScorer for AcceptanceRateScorer {
    fn score(&self, patterns: &BehaviorPatterns) -> f64 {
        patterns.acceptance_rate.clamp(0.0, 100.0)
    }
}
