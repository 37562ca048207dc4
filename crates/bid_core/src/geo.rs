//! Geographic value objects and great-circle distance.
//!
//! Distances are haversine miles (Earth radius 3,959 mi). This is
//! deliberately routing-free: the engine prices and scores on straight-line
//! distance, never on road network or traffic estimates.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Earth radius in miles for the haversine formula.
pub const EARTH_RADIUS_MILES: f64 = 3_959.0;

/// A WGS-84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check range and finiteness. Records deserialized from the document
    /// store can carry anything, so this is re-checked at the distance
    /// boundary rather than trusted from construction.
    pub fn validate(&self, label: &'static str) -> Result<(), ValidationError> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate(label));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ValidationError::LatitudeOutOfRange(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(ValidationError::LongitudeOutOfRange(self.lng));
        }
        Ok(())
    }
}

/// A human-readable address plus (optionally geocoded) coordinates.
///
/// Ride feeds occasionally deliver an address without a geocode; bid
/// calculation treats that as a recoverable "no estimate" case rather than
/// a panic, so absence stays representable here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub coordinates: Option<Coordinates>,
}

impl Location {
    pub fn new(address: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            address: address.into(),
            coordinates: Some(coordinates),
        }
    }

    pub fn coordinates_or(&self, label: &'static str) -> Result<Coordinates, ValidationError> {
        self.coordinates
            .ok_or(ValidationError::MissingCoordinates(label))
    }
}

/// Haversine great-circle distance in miles.
///
/// Symmetric, zero for identical points, never negative. Fails only on
/// non-finite or out-of-range inputs.
pub fn distance_miles(a: Coordinates, b: Coordinates) -> Result<f64, ValidationError> {
    a.validate("first point")?;
    b.validate("second point")?;

    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    Ok(EARTH_RADIUS_MILES * c)
}
