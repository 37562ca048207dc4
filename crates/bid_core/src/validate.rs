//! Structural validation of a rate schedule before it is persisted.
//!
//! Violations accumulate instead of short-circuiting so the settings form
//! can surface every problem at once. Disabled blocks are skipped: a
//! half-edited draft block should not hold the save hostage.

use serde::{Deserialize, Serialize};

use crate::rates::{minutes_of_day, RateSettings};

/// Validation outcome; `errors` is empty exactly when `is_valid` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSettingsReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Check a full rate schedule.
///
/// Rules: both default rates positive; for every enabled block, both rates
/// positive, both times strict `HH:MM`, and start differing from end.
pub fn validate_rate_settings(settings: &RateSettings) -> RateSettingsReport {
    let mut errors = Vec::new();

    if settings.default_rate.pickup <= 0.0 {
        errors.push("default pickup rate must be greater than 0".to_string());
    }
    if settings.default_rate.destination <= 0.0 {
        errors.push("default destination rate must be greater than 0".to_string());
    }

    for block in settings.time_blocks.iter().filter(|b| b.enabled) {
        if block.pickup_rate <= 0.0 {
            errors.push(format!(
                "time block '{}': pickup rate must be greater than 0",
                block.name
            ));
        }
        if block.destination_rate <= 0.0 {
            errors.push(format!(
                "time block '{}': destination rate must be greater than 0",
                block.name
            ));
        }
        let start = minutes_of_day(&block.start);
        let end = minutes_of_day(&block.end);
        if start.is_none() {
            errors.push(format!(
                "time block '{}': start time '{}' is not HH:MM",
                block.name, block.start
            ));
        }
        if end.is_none() {
            errors.push(format!(
                "time block '{}': end time '{}' is not HH:MM",
                block.name, block.end
            ));
        }
        if let (Some(start), Some(end)) = (start, end) {
            if start == end {
                errors.push(format!(
                    "time block '{}': start and end times must differ",
                    block.name
                ));
            }
        }
    }

    RateSettingsReport {
        is_valid: errors.is_empty(),
        errors,
    }
}
