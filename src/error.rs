//! Error types for diagram construction

use std::fmt;

/// Errors that can occur while building a diagram
///
/// Queries on a built diagram never fail; they return empty results instead.
#[derive(Debug, Clone, PartialEq)]
pub enum VoronoiError {
    /// Configuration validation failed (bad bounds, out-of-range options,
    /// sites outside the bounding rectangle)
    InvalidConfig(String),
    /// Input point at this index has a NaN or infinite coordinate
    NonFiniteSite(usize),
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoronoiError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            VoronoiError::NonFiniteSite(index) => {
                write!(f, "site {} has a non-finite coordinate", index)
            }
        }
    }
}

impl std::error::Error for VoronoiError {}

/// Result type alias for voronoi operations
pub type Result<T> = std::result::Result<T, VoronoiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = VoronoiError::InvalidConfig("bounds must have positive area".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: bounds must have positive area"
        );
        assert_eq!(
            VoronoiError::NonFiniteSite(3).to_string(),
            "site 3 has a non-finite coordinate"
        );
    }
}
