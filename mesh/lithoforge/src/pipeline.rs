//! End-to-end entry points: image to relief, and relief or scene to STL.

use std::path::Path;

use mesh_heightfield::{RasterImage, build_heightfield};
use mesh_io::{encode_stl_binary, save_stl};
use mesh_relief::{ReliefMesh, assemble_relief};
use mesh_scene::{SceneGraph, flatten_scene};
use mesh_types::TriangleSoup;
use tracing::info;

use crate::config::LithophaneConfig;
use crate::error::LithoResult;

/// The mesh currently on display, handed over for export.
///
/// Either the assembled relief or an externally loaded scene asset. Both
/// go through the same flattening step.
#[derive(Debug, Clone)]
pub enum ExportSource {
    /// A relief built from an image.
    Relief(ReliefMesh),
    /// A scene produced by an asset loader.
    Scene(SceneGraph),
}

impl From<ReliefMesh> for ExportSource {
    fn from(relief: ReliefMesh) -> Self {
        Self::Relief(relief)
    }
}

impl From<SceneGraph> for ExportSource {
    fn from(scene: SceneGraph) -> Self {
        Self::Scene(scene)
    }
}

impl ExportSource {
    /// Flatten the source into one world-space soup.
    ///
    /// # Errors
    ///
    /// Returns a scene error if the source contains no triangles.
    pub fn into_soup(self) -> LithoResult<TriangleSoup> {
        let scene = match self {
            Self::Relief(relief) => relief.into_scene(),
            Self::Scene(scene) => scene,
        };
        Ok(flatten_scene(&scene)?)
    }
}

/// Build the relief mesh for an image.
///
/// # Errors
///
/// Returns a parameter error before any computation if `config` is invalid.
///
/// # Example
///
/// ```
/// use lithoforge::{image_to_relief, LithophaneConfig};
/// use lithoforge::heightfield::{HeightfieldParams, RasterImage};
///
/// let img = RasterImage::from_fn(32, 32, |x, _| {
///     let v = (x * 8) as u8;
///     [v, v, v, 255]
/// })?;
/// let config = LithophaneConfig::default()
///     .with_heightfield(HeightfieldParams::default().with_resolution(32));
///
/// let relief = image_to_relief(&img, &config)?;
/// assert_eq!(relief.surface.vertices.len(), 32 * 32);
/// # Ok::<(), lithoforge::LithoError>(())
/// ```
pub fn image_to_relief(image: &RasterImage, config: &LithophaneConfig) -> LithoResult<ReliefMesh> {
    config.validate()?;
    let field = build_heightfield(image, &config.heightfield)?;
    Ok(assemble_relief(&field, &config.relief)?)
}

/// Flatten an export source and encode it as binary STL bytes.
///
/// # Errors
///
/// Returns [`LithoError::Scene`](crate::LithoError::Scene) with
/// `EmptyScene` if there is nothing to export.
///
/// # Example
///
/// ```
/// use lithoforge::export_stl;
/// use lithoforge::scene::SceneGraph;
///
/// let err = export_stl(SceneGraph::new("empty"), "").unwrap_err();
/// assert!(err.is_empty_scene());
/// ```
pub fn export_stl(source: impl Into<ExportSource>, header: &str) -> LithoResult<Vec<u8>> {
    let soup = source.into().into_soup()?;
    let bytes = encode_stl_binary(&soup, header)?;
    info!(
        triangles = soup.triangle_count(),
        bytes = bytes.len(),
        "Exported STL"
    );
    Ok(bytes)
}

/// Flatten an export source and save it atomically as a binary STL file.
///
/// # Errors
///
/// Returns a scene error if there is nothing to export, or an I/O error if
/// the file cannot be written.
pub fn save_export<P: AsRef<Path>>(
    source: impl Into<ExportSource>,
    path: P,
    header: &str,
) -> LithoResult<()> {
    let soup = source.into().into_soup()?;
    save_stl(&soup, path, header)?;
    Ok(())
}

/// Run the whole relief path: image to binary STL bytes.
///
/// # Errors
///
/// Returns any error from [`image_to_relief`] or [`export_stl`].
pub fn image_to_stl(image: &RasterImage, config: &LithophaneConfig) -> LithoResult<Vec<u8>> {
    let relief = image_to_relief(image, config)?;
    export_stl(relief, &config.stl_header)
}
