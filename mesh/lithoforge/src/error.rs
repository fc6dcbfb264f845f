//! Top-level error type.

use mesh_heightfield::HeightfieldError;
use mesh_io::IoError;
use mesh_relief::ReliefError;
use mesh_scene::SceneError;
use thiserror::Error;

/// Result type for end-to-end lithophane operations.
pub type LithoResult<T> = Result<T, LithoError>;

/// Any failure along the image to STL pipeline.
#[derive(Debug, Error)]
pub enum LithoError {
    /// Invalid heightfield parameters or an unusable image.
    #[error("heightfield: {0}")]
    Heightfield(#[from] HeightfieldError),

    /// Invalid relief parameters.
    #[error("relief: {0}")]
    Relief(#[from] ReliefError),

    /// Scene lookup failure or nothing to export.
    #[error("scene: {0}")]
    Scene(#[from] SceneError),

    /// Malformed soup or file system failure.
    #[error("export: {0}")]
    Io(#[from] IoError),
}

impl LithoError {
    /// Check whether parameters were rejected before any work started.
    #[must_use]
    pub const fn is_invalid_parameters(&self) -> bool {
        match self {
            Self::Heightfield(e) => e.is_invalid_parameters(),
            Self::Relief(e) => !matches!(e, ReliefError::GridTooLarge { .. }),
            Self::Scene(_) | Self::Io(_) => false,
        }
    }

    /// Check whether an export found no geometry.
    #[must_use]
    pub const fn is_empty_scene(&self) -> bool {
        matches!(self, Self::Scene(SceneError::EmptyScene))
    }
}
