//! Driver rate schedules and time-of-day rate resolution.
//!
//! A driver configures named time blocks ("Morning rush", "Late night"),
//! each carrying its own per-mile pickup and destination rates. Resolution
//! scans blocks in insertion order and the first **enabled** block whose
//! window contains the scheduled time wins; overlapping blocks are allowed
//! and resolved purely by order. When nothing matches, the default rate
//! applies.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Per-mile rates for the two legs of a ride: driver to pickup, pickup to
/// destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerMileRate {
    pub pickup: f64,
    pub destination: f64,
}

/// A named time-of-day window with its own rates.
///
/// `start`/`end` are local wall-clock `"HH:MM"` strings as entered in the
/// settings UI. A window with `start > end` spans midnight ("23:00" to
/// "03:00" covers late evening and early morning).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: String,
    pub name: String,
    pub start: String,
    pub end: String,
    pub pickup_rate: f64,
    pub destination_rate: f64,
    pub enabled: bool,
}

/// A driver's full rate schedule. Read-only to this crate; the settings UI
/// owns its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSettings {
    pub default_rate: PerMileRate,
    pub time_blocks: Vec<TimeBlock>,
    pub auto_bid_enabled: bool,
}

/// Rates chosen for a scheduled time, plus the block that supplied them
/// (`None` when the default rate applied).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRate<'a> {
    pub pickup: f64,
    pub destination: f64,
    pub time_block: Option<&'a TimeBlock>,
}

/// Parse `"HH:MM"` into minutes since midnight. Strict two-field form with
/// hours 00–23 and minutes 00–59; anything else is `None`.
pub fn minutes_of_day(s: &str) -> Option<u32> {
    let (h, m) = s.split_once(':')?;
    if h.len() != 2 || m.len() != 2 {
        return None;
    }
    let hours: u32 = h.parse().ok()?;
    let minutes: u32 = m.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Whether `current` lies inside the window `[start, end]`, all `"HH:MM"`.
///
/// A window with `start > end` wraps midnight, so membership becomes
/// `current >= start || current <= end`. Malformed inputs never match.
pub fn is_time_in_range(current: &str, start: &str, end: &str) -> bool {
    let (Some(cur), Some(start), Some(end)) = (
        minutes_of_day(current),
        minutes_of_day(start),
        minutes_of_day(end),
    ) else {
        return false;
    };
    if start > end {
        cur >= start || cur <= end
    } else {
        (start..=end).contains(&cur)
    }
}

fn block_contains(block: &TimeBlock, minutes: u32) -> bool {
    let (Some(start), Some(end)) = (minutes_of_day(&block.start), minutes_of_day(&block.end))
    else {
        // Malformed window; the validator reports it, resolution skips it.
        return false;
    };
    if start > end {
        minutes >= start || minutes <= end
    } else {
        (start..=end).contains(&minutes)
    }
}

/// Resolve the applicable rates for a scheduled local time.
///
/// First enabled block containing the time wins; otherwise the default
/// rate with `time_block: None`.
pub fn resolve_rate(scheduled: NaiveDateTime, settings: &RateSettings) -> ResolvedRate<'_> {
    let minutes = scheduled.hour() * 60 + scheduled.minute();
    for block in &settings.time_blocks {
        if block.enabled && block_contains(block, minutes) {
            return ResolvedRate {
                pickup: block.pickup_rate,
                destination: block.destination_rate,
                time_block: Some(block),
            };
        }
    }
    ResolvedRate {
        pickup: settings.default_rate.pickup,
        destination: settings.default_rate.destination,
        time_block: None,
    }
}
