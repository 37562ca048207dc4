use serde::{Deserialize, Serialize};

/// Weights for the six scoring factors.
///
/// Hand-tuned, nominally summing to 1.0. The engine deliberately does not
/// enforce normalization (matching the behavior callers already rely on);
/// a caller that edits weights can check [`ScoreWeights::is_normalized`]
/// before saving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub distance: f64,
    pub time_of_day: f64,
    pub ride_type: f64,
    pub earnings: f64,
    pub market: f64,
    pub behavior: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            distance: 0.25,
            time_of_day: 0.20,
            ride_type: 0.15,
            earnings: 0.25,
            market: 0.10,
            behavior: 0.05,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.distance + self.time_of_day + self.ride_type + self.earnings + self.market
            + self.behavior
    }

    /// Whether the weights sum to 1.0 within floating tolerance.
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_are_normalized() {
        let weights = ScoreWeights::default();
        assert!(weights.is_normalized());
        assert_eq!(weights.distance, 0.25);
        assert_eq!(weights.behavior, 0.05);
    }

    #[test]
    fn skewed_weights_are_flagged_not_rejected() {
        let weights = ScoreWeights {
            earnings: 0.9,
            ..Default::default()
        };
        assert!(!weights.is_normalized());
        assert!(weights.sum() > 1.0);
    }
}
