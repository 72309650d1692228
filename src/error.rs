use thiserror::Error;

/// Errors raised while validating inputs to the ranking pipeline.
///
/// Every variant is fatal to the query it occurs in. The computation is pure,
/// so retrying with the same input yields the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    /// Latitude or longitude is non-finite or outside the valid range.
    #[error("invalid coordinate ({latitude}, {longitude}): latitude must be in [-90, 90] and longitude in [-180, 180]")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Search criteria are missing or inconsistent.
    #[error("invalid search criteria: {0}")]
    InvalidCriteria(String),

    /// A candidate site violates the catalog invariants.
    #[error("invalid site {id}: {reason}")]
    InvalidSite { id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, RankingError>;
