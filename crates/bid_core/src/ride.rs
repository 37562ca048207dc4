//! Ride request and scored-ride value objects.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::geo::Location;
use crate::scoring::ScoreBreakdown;

/// Ride type assumed when the request feed omits one.
pub const DEFAULT_RIDE_TYPE: &str = "standard";

/// A candidate ride from the request feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    pub pickup: Location,
    pub destination: Location,
    /// Local wall-clock pickup time; `None` means "as soon as possible".
    pub scheduled_time: Option<NaiveDateTime>,
    pub ride_type: Option<String>,
}

impl RideRequest {
    pub fn ride_type(&self) -> &str {
        self.ride_type.as_deref().unwrap_or(DEFAULT_RIDE_TYPE)
    }
}

/// Severity of a per-ride annotation or a list-level insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Warning,
    Info,
    Success,
}

/// A short, human-readable note attached to a ride or a ranked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: String,
}

impl Recommendation {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: RecommendationKind::Warning,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: RecommendationKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: RecommendationKind::Success,
            message: message.into(),
        }
    }
}

/// A ride request annotated with its composite score, the per-factor
/// breakdown, and threshold-triggered notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRide {
    pub request: RideRequest,
    /// Weighted composite, 0–100.
    pub smart_score: u8,
    pub score_breakdown: ScoreBreakdown,
    pub recommendations: Vec<Recommendation>,
}
