//! Combined pipeline configuration.

use mesh_heightfield::HeightfieldParams;
use mesh_io::DEFAULT_STL_HEADER;
use mesh_relief::ReliefParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::LithoResult;

/// Everything needed to turn an image into an exported relief.
///
/// With the `serde` feature, missing fields fall back to their defaults, so
/// a host config file only needs the values it changes.
///
/// # Example
///
/// ```
/// use lithoforge::LithophaneConfig;
/// use lithoforge::heightfield::HeightfieldParams;
///
/// let config = LithophaneConfig::default()
///     .with_heightfield(HeightfieldParams::default().with_resolution(128))
///     .with_stl_header("kitchen window");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LithophaneConfig {
    /// Image to heightfield settings.
    pub heightfield: HeightfieldParams,

    /// Heightfield to mesh settings.
    pub relief: ReliefParams,

    /// Text stored in the 80-byte STL header.
    pub stl_header: String,
}

impl Default for LithophaneConfig {
    fn default() -> Self {
        Self {
            heightfield: HeightfieldParams::default(),
            relief: ReliefParams::default(),
            stl_header: DEFAULT_STL_HEADER.to_string(),
        }
    }
}

impl LithophaneConfig {
    /// Replace the heightfield settings.
    #[must_use]
    pub fn with_heightfield(mut self, params: HeightfieldParams) -> Self {
        self.heightfield = params;
        self
    }

    /// Replace the relief settings.
    #[must_use]
    pub fn with_relief(mut self, params: ReliefParams) -> Self {
        self.relief = params;
        self
    }

    /// Set the STL header text.
    #[must_use]
    pub fn with_stl_header(mut self, header: impl Into<String>) -> Self {
        self.stl_header = header.into();
        self
    }

    /// Validate both parameter sets.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> LithoResult<()> {
        self.heightfield.validate()?;
        self.relief.validate()?;
        Ok(())
    }
}
