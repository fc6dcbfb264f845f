//! Error types for relief assembly.

use thiserror::Error;

/// Result type for relief operations.
pub type ReliefResult<T> = Result<T, ReliefError>;

/// Errors that can occur while assembling a relief mesh.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReliefError {
    /// Height scale is not a positive finite number.
    #[error("invalid height scale {0}: must be positive and finite")]
    InvalidHeightScale(f64),

    /// Displacement intensity is not a positive finite number.
    #[error("invalid displacement intensity {0}: must be positive and finite")]
    InvalidIntensity(f64),

    /// Footprint size is not a positive finite number.
    #[error("invalid footprint size {0}: must be positive and finite")]
    InvalidSize(f64),

    /// The grid has more vertices than a 32-bit index buffer can address.
    #[error("grid of resolution {resolution} exceeds the 32-bit index range")]
    GridTooLarge {
        /// Heightfield resolution.
        resolution: usize,
    },
}
