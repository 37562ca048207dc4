use thiserror::Error;

/// Errors raised while validating coordinates or ride legs.
///
/// Only the geo layer surfaces these directly; the bid engine catches them
/// and degrades into an `is_valid: false` result so UI callers never need
/// exception handling around an estimate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("coordinate for {0} is not a finite number")]
    NonFiniteCoordinate(&'static str),
    #[error("missing coordinates for {0}")]
    MissingCoordinates(&'static str),
}
