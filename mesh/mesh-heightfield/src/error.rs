//! Error types for heightfield construction.

use thiserror::Error;

/// Result type for heightfield operations.
pub type HeightfieldResult<T> = Result<T, HeightfieldError>;

/// Errors that can occur while building a heightfield.
#[derive(Debug, Error)]
pub enum HeightfieldError {
    /// Grid resolution outside the supported range.
    #[error("invalid resolution {resolution}: must be between 2 and {max}")]
    InvalidResolution {
        /// Requested resolution.
        resolution: usize,
        /// Largest supported resolution.
        max: usize,
    },

    /// Blur radius above the supported maximum.
    #[error("invalid blur radius {radius}: must be at most {max}")]
    InvalidBlurRadius {
        /// Requested radius.
        radius: usize,
        /// Largest supported radius.
        max: usize,
    },

    /// Fewer than two quantization levels.
    #[error("invalid quantization level count {0}: need at least 2")]
    InvalidLevels(usize),

    /// Depth bounds are not finite, or `min > max`.
    #[error("invalid depth range [{min}, {max}]")]
    InvalidDepthRange {
        /// Requested minimum depth.
        min: f64,
        /// Requested maximum depth.
        max: f64,
    },

    /// Gamma is not a positive finite number.
    #[error("invalid gamma {0}: must be positive and finite")]
    InvalidGamma(f64),

    /// Image has a zero dimension.
    #[error("image has zero dimensions ({width}x{height})")]
    EmptyImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// RGBA buffer length does not match `width * height * 4`.
    #[error("pixel buffer has {got} bytes, expected {expected}")]
    PixelBufferMismatch {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count.
        got: usize,
    },

    /// A supplied depth value is non-finite or outside the declared bounds.
    #[error("depth {value} at cell {index} is outside [{min}, {max}]")]
    DepthOutOfRange {
        /// Row-major cell index.
        index: usize,
        /// Offending value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// The image decoder rejected the input bytes.
    #[cfg(feature = "image")]
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

impl HeightfieldError {
    /// Check whether this error rejects caller-supplied parameters (as
    /// opposed to the image data itself).
    #[must_use]
    pub const fn is_invalid_parameters(&self) -> bool {
        matches!(
            self,
            Self::InvalidResolution { .. }
                | Self::InvalidBlurRadius { .. }
                | Self::InvalidLevels(_)
                | Self::InvalidDepthRange { .. }
                | Self::InvalidGamma(_)
        )
    }
}
