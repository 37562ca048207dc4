//! Dynamic pricing and ride-scoring core for a driver client.
//!
//! Two entry points:
//!
//! - **Bid calculation**: [`bid::calculate_suggested_bid`] turns a single
//!   ride request into a suggested monetary bid from great-circle distances
//!   and the driver's time-of-day rate schedule.
//! - **Ride scoring**: [`scoring::RideScoringEngine`] ranks competing ride
//!   requests by a weighted multi-factor score, and
//!   [`recommend::generate_guidance`] partitions the ranked list into top
//!   picks, rides to avoid, and narrative guidance.
//!
//! Every function here is a pure, synchronous transform over its arguments:
//! no I/O, no hidden state, deterministic for identical inputs. Fetching
//! `RateSettings`, preferences, and market snapshots from the document store
//! belongs to the host app; [`cache::TtlCache`] supports that layer's
//! read-through caching without owning the fetch itself.

pub mod bid;
pub mod cache;
pub mod conflict;
pub mod driver;
pub mod error;
pub mod geo;
pub mod rates;
pub mod recommend;
pub mod ride;
pub mod scoring;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod validate;
