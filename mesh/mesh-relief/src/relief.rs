//! Grid relief assembly.

// Grid indices are bounded by the u32 check in `assemble_relief`.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use mesh_heightfield::Heightfield;
use mesh_scene::SceneGraph;
use mesh_transform::Transform3D;
use mesh_types::{IndexedMesh, MeshTopology, Point3, TriangleSoup, Vertex, cuboid};
use tracing::{debug, info};

use crate::error::{ReliefError, ReliefResult};
use crate::params::{BASE_OVERHANG, BASE_THICKNESS, ReliefParams};

/// Name of the scene root produced by [`ReliefMesh::into_scene`].
pub const RELIEF_ROOT_NAME: &str = "relief";

/// The assembled relief: a displaced surface and a flat backing slab.
///
/// The two meshes are siblings. The surface's lowest possible point (the
/// heightfield's minimum depth) sits at `z = 0`, which is also the top of
/// the slab.
#[derive(Debug, Clone, PartialEq)]
pub struct ReliefMesh {
    /// Displaced grid, one vertex per heightfield cell, with UVs and smooth
    /// vertex normals.
    pub surface: IndexedMesh,

    /// Backing slab under the surface.
    pub base: IndexedMesh,
}

impl ReliefMesh {
    /// Total triangles across surface and base.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.surface.face_count() + self.base.face_count()
    }

    /// Expand both meshes into one soup, surface first.
    #[must_use]
    pub fn to_soup(&self) -> TriangleSoup {
        let mut soup = TriangleSoup::from_indexed(&self.surface);
        soup.append(TriangleSoup::from_indexed(&self.base));
        soup
    }

    /// Place surface and base as sibling nodes under a single root, so the
    /// relief takes the same export path as a loaded scene asset.
    #[must_use]
    pub fn into_scene(self) -> SceneGraph {
        let mut scene = SceneGraph::new(RELIEF_ROOT_NAME);
        scene.add_root_mesh("surface", Transform3D::identity(), self.surface);
        scene.add_root_mesh("base", Transform3D::identity(), self.base);
        scene
    }
}

/// Build the relief surface and backing slab for a heightfield.
///
/// The surface is a `resolution x resolution` vertex grid spanning
/// `params.size` in X and Y, centered on the origin, with row 0 (the image
/// top) at `+y`. Each vertex is lifted along +Z by
/// `depth * scale - min_depth * scale`, where `scale` is
/// [`ReliefParams::scale`]. Every quad becomes two counter-clockwise
/// triangles as seen from +Z. UVs map the grid onto the source image.
///
/// The slab is a box `BASE_THICKNESS` thick whose top face is `z = 0` and
/// whose footprint is `BASE_OVERHANG` times the surface footprint.
///
/// Output is deterministic for identical inputs.
///
/// # Errors
///
/// Returns a [`ReliefError`] if the parameters are invalid or the grid has
/// more vertices than fit in a `u32` index.
///
/// # Example
///
/// ```
/// use mesh_heightfield::Heightfield;
/// use mesh_relief::{assemble_relief, ReliefParams};
///
/// let field = Heightfield::from_depths(3, vec![1.0; 9], 1.0, 2.0).unwrap();
/// let relief = assemble_relief(&field, &ReliefParams::default())?;
///
/// assert_eq!(relief.surface.vertices.len(), 9);
/// assert_eq!(relief.surface.faces.len(), 8);
/// assert_eq!(relief.base.faces.len(), 12);
/// # Ok::<(), mesh_relief::ReliefError>(())
/// ```
pub fn assemble_relief(field: &Heightfield, params: &ReliefParams) -> ReliefResult<ReliefMesh> {
    params.validate()?;

    let res = field.resolution();
    let vertex_count = res
        .checked_mul(res)
        .filter(|&n| u32::try_from(n).is_ok())
        .ok_or(ReliefError::GridTooLarge { resolution: res })?;

    let surface = build_surface(field, params, vertex_count);
    let base = build_base(params.size);

    info!(
        resolution = res,
        surface_triangles = surface.face_count(),
        base_triangles = base.face_count(),
        "Assembled relief"
    );

    Ok(ReliefMesh { surface, base })
}

fn build_surface(field: &Heightfield, params: &ReliefParams, vertex_count: usize) -> IndexedMesh {
    let res = field.resolution();
    let last = (res - 1) as f64;
    let half = params.size / 2.0;
    let spacing = params.size / last;
    let scale = params.scale();
    let bias = -field.min_depth() * scale;

    debug!(spacing, scale, bias, "Displacing grid");

    let quads = (res - 1) * (res - 1);
    let mut mesh = IndexedMesh::with_capacity(vertex_count, quads * 2);

    for (j, row) in field.depths().chunks_exact(res).enumerate() {
        let y = half - j as f64 * spacing;
        let v = 1.0 - j as f64 / last;
        for (i, &depth) in row.iter().enumerate() {
            let x = (i as f64).mul_add(spacing, -half);
            let z = depth.mul_add(scale, bias);
            let u = i as f64 / last;
            mesh.vertices
                .push(Vertex::new(Point3::new(x, y, z)).with_uv(u as f32, v as f32));
        }
    }

    let stride = res as u32;
    for j in 0..stride - 1 {
        for i in 0..stride - 1 {
            let a = j * stride + i;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            mesh.faces.push([a, c, b]);
            mesh.faces.push([b, c, d]);
        }
    }

    mesh.compute_vertex_normals();
    mesh
}

fn build_base(size: f64) -> IndexedMesh {
    let half = size * BASE_OVERHANG / 2.0;
    cuboid(
        Point3::new(-half, -half, -BASE_THICKNESS),
        Point3::new(half, half, 0.0),
    )
}
