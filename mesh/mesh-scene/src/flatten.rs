//! World-space flattening of a scene graph into one triangle soup.

use mesh_transform::Transform3D;
use mesh_types::{MeshTopology, TriangleSoup};
use tracing::{debug, info, warn};

use crate::error::{SceneError, SceneResult};
use crate::graph::{NodeId, SceneGraph};

/// Flatten the whole scene, starting at the root.
///
/// See [`flatten_subtree`].
///
/// # Errors
///
/// Returns [`SceneError::EmptyScene`] if no reachable mesh has a triangle.
///
/// # Example
///
/// ```
/// use mesh_scene::{flatten_scene, SceneGraph};
/// use mesh_transform::Transform3D;
/// use mesh_types::{IndexedMesh, Vertex};
///
/// let tri = IndexedMesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// let mut scene = SceneGraph::new("root");
/// let moved = scene.add_child(scene.root(), "moved", Transform3D::translation(0.0, 0.0, 2.0))?;
/// scene.attach_mesh(moved, tri)?;
///
/// let soup = flatten_scene(&scene)?;
/// assert_eq!(soup.triangle_count(), 1);
/// assert_eq!(soup.positions[0].z, 2.0);
/// # Ok::<(), mesh_scene::SceneError>(())
/// ```
pub fn flatten_scene(scene: &SceneGraph) -> SceneResult<TriangleSoup> {
    flatten_subtree(scene, scene.root())
}

/// Flatten every mesh reachable from `start` into a single world-space soup.
///
/// The walk is depth-first and visits children in insertion order, so the
/// output triangle order is deterministic. Each node's world transform is
/// `parent_world * local`; `start` itself is placed with its own local
/// transform. Positions and normals are carried into world space, and
/// winding is reversed under mirroring transforms so faces stay outward.
///
/// Vertex normals survive as [`SoupNormals::PerVertex`](mesh_types::SoupNormals)
/// only when every contributing mesh has a normal on every vertex.
///
/// A node reached a second time (a shared instance or a cycle) is skipped
/// with a warning, as are faces that reference missing vertices. A mesh
/// counts toward the result only if at least one of its faces survives.
///
/// # Errors
///
/// Returns [`SceneError::UnknownNode`] if `start` is not in `scene`, and
/// [`SceneError::EmptyScene`] if no reachable mesh has a triangle.
pub fn flatten_subtree(scene: &SceneGraph, start: NodeId) -> SceneResult<TriangleSoup> {
    let node_count = scene.node_count();
    if scene.node(start).is_none() {
        return Err(SceneError::UnknownNode {
            index: start.index(),
            node_count,
        });
    }

    let mut visited = vec![false; node_count];
    let mut stack = vec![(start, Transform3D::identity())];
    let mut soup = TriangleSoup::new();
    let mut mesh_count = 0usize;
    let mut nodes_visited = 0usize;

    while let Some((id, parent_world)) = stack.pop() {
        let Some(node) = scene.node(id) else {
            continue;
        };
        if std::mem::replace(&mut visited[id.index()], true) {
            warn!(node = node.name(), index = id.index(), "Node already visited, skipping");
            continue;
        }
        nodes_visited += 1;

        let world = parent_world.compose(node.local());

        for mesh in node.meshes() {
            if mesh.face_count() == 0 {
                continue;
            }
            let placed = TriangleSoup::from_indexed(&world.apply_to_mesh(mesh));
            let kept = placed.triangle_count();
            if kept < mesh.face_count() {
                warn!(
                    node = node.name(),
                    dropped = mesh.face_count() - kept,
                    faces = mesh.face_count(),
                    "Skipping faces that reference missing vertices"
                );
            }
            if kept == 0 {
                continue;
            }
            soup.append(placed);
            mesh_count += 1;
        }

        // Reversed so the first child is popped first.
        for &child in node.children().iter().rev() {
            stack.push((child, world));
        }
    }

    if mesh_count == 0 {
        debug!(nodes = nodes_visited, "No meshes found during flattening");
        return Err(SceneError::EmptyScene);
    }

    info!(
        nodes = nodes_visited,
        meshes = mesh_count,
        triangles = soup.triangle_count(),
        "Flattened scene"
    );

    Ok(soup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{IndexedMesh, Point3, SoupNormals, Vector3, Vertex};

    fn triangle_at(x: f64) -> IndexedMesh {
        IndexedMesh::from_parts(
            vec![
                Vertex::from_coords(x, 0.0, 0.0),
                Vertex::from_coords(x + 1.0, 0.0, 0.0),
                Vertex::from_coords(x, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    fn with_normals(mut mesh: IndexedMesh) -> IndexedMesh {
        mesh.compute_vertex_normals();
        mesh
    }

    #[test]
    fn two_triangles_under_identity_root() {
        let mut scene = SceneGraph::new("root");
        scene.attach_mesh(scene.root(), triangle_at(0.0)).unwrap();
        scene.attach_mesh(scene.root(), triangle_at(5.0)).unwrap();

        let soup = flatten_scene(&scene).unwrap();
        assert_eq!(soup.triangle_count(), 2);
        assert_eq!(soup.positions.len(), 6);
        assert!(soup.is_well_formed());
    }

    #[test]
    fn scene_without_meshes_fails() {
        let mut scene = SceneGraph::new("root");
        let a = scene.add_child(scene.root(), "a", Transform3D::identity()).unwrap();
        scene.add_child(a, "b", Transform3D::translation(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(flatten_scene(&scene), Err(SceneError::EmptyScene));
    }

    #[test]
    fn faceless_meshes_do_not_count() {
        let mut scene = SceneGraph::new("root");
        let mut points_only = triangle_at(0.0);
        points_only.faces.clear();
        scene.attach_mesh(scene.root(), points_only).unwrap();
        assert_eq!(flatten_scene(&scene), Err(SceneError::EmptyScene));
    }

    #[test]
    fn meshes_with_only_dangling_faces_do_not_count() {
        let mut scene = SceneGraph::new("root");
        let dangling = IndexedMesh::from_parts(vec![Vertex::from_coords(0.0, 0.0, 0.0)], vec![[0, 1, 2]]);
        scene.attach_mesh(scene.root(), dangling).unwrap();
        assert_eq!(flatten_scene(&scene), Err(SceneError::EmptyScene));
    }

    #[test]
    fn dangling_faces_are_dropped_from_valid_meshes() {
        let mut mesh = triangle_at(0.0);
        mesh.faces.push([0, 1, 7]);
        let mut scene = SceneGraph::new("root");
        scene.attach_mesh(scene.root(), mesh).unwrap();

        let soup = flatten_scene(&scene).unwrap();
        assert_eq!(soup.triangle_count(), 1);
        assert!(soup.is_well_formed());
    }

    #[test]
    fn translation_moves_every_vertex() {
        let (tx, ty, tz) = (3.0, -2.0, 7.5);
        let mut scene = SceneGraph::new("root");
        let node = scene
            .add_child(scene.root(), "moved", Transform3D::translation(tx, ty, tz))
            .unwrap();
        scene.attach_mesh(node, triangle_at(0.0)).unwrap();

        let soup = flatten_scene(&scene).unwrap();
        let source = triangle_at(0.0);
        for (got, v) in soup.positions.iter().zip(&source.vertices) {
            assert_relative_eq!(*got, v.position + Vector3::new(tx, ty, tz), epsilon = 1e-12);
        }
    }

    #[test]
    fn transforms_accumulate_down_the_tree() {
        let mut scene = SceneGraph::new("root");
        let outer = scene
            .add_child(scene.root(), "outer", Transform3D::uniform_scale(2.0))
            .unwrap();
        let inner = scene
            .add_child(outer, "inner", Transform3D::translation(1.0, 0.0, 0.0))
            .unwrap();
        scene.attach_mesh(inner, triangle_at(0.0)).unwrap();

        let soup = flatten_scene(&scene).unwrap();
        // Child translation applies first, then the parent scale.
        assert_relative_eq!(soup.positions[0], Point3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(soup.positions[1], Point3::new(4.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn depth_first_order_follows_children() {
        let mut scene = SceneGraph::new("root");
        let a = scene.add_child(scene.root(), "a", Transform3D::identity()).unwrap();
        let b = scene.add_child(scene.root(), "b", Transform3D::identity()).unwrap();
        let a1 = scene.add_child(a, "a1", Transform3D::identity()).unwrap();
        scene.attach_mesh(b, triangle_at(20.0)).unwrap();
        scene.attach_mesh(a1, triangle_at(10.0)).unwrap();
        scene.attach_mesh(a, triangle_at(0.0)).unwrap();

        let soup = flatten_scene(&scene).unwrap();
        let xs: Vec<f64> = soup.positions.chunks(3).map(|t| t[0].x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn cycles_are_visited_once() {
        let mut scene = SceneGraph::new("root");
        let a = scene.add_child(scene.root(), "a", Transform3D::identity()).unwrap();
        let b = scene.add_child(a, "b", Transform3D::identity()).unwrap();
        scene.link(b, a).unwrap();
        scene.link(b, scene.root()).unwrap();
        scene.attach_mesh(b, triangle_at(0.0)).unwrap();

        let soup = flatten_scene(&scene).unwrap();
        assert_eq!(soup.triangle_count(), 1);
    }

    #[test]
    fn shared_instance_is_exported_once() {
        let mut scene = SceneGraph::new("root");
        let a = scene.add_child(scene.root(), "a", Transform3D::identity()).unwrap();
        let b = scene
            .add_child(scene.root(), "b", Transform3D::translation(5.0, 0.0, 0.0))
            .unwrap();
        let part = scene.add_child(a, "part", Transform3D::identity()).unwrap();
        scene.link(b, part).unwrap();
        scene.attach_mesh(part, triangle_at(0.0)).unwrap();

        let soup = flatten_scene(&scene).unwrap();
        assert_eq!(soup.triangle_count(), 1);
        // First reached through `a`, so it keeps `a`'s placement.
        assert_relative_eq!(soup.positions[0].x, 0.0);
    }

    #[test]
    fn mirroring_reverses_winding() {
        let mut scene = SceneGraph::new("root");
        let node = scene
            .add_child(scene.root(), "mirror", Transform3D::scale(-1.0, 1.0, 1.0))
            .unwrap();
        scene.attach_mesh(node, triangle_at(0.0)).unwrap();

        let soup = flatten_scene(&scene).unwrap();
        let tri = soup.triangle(0).unwrap();
        // The source faces +Z; the mirrored copy must still face +Z.
        assert!(tri.facet_normal().z > 0.0);
    }

    #[test]
    fn normals_kept_only_when_every_mesh_has_them() {
        let mut scene = SceneGraph::new("root");
        scene
            .attach_mesh(scene.root(), with_normals(triangle_at(0.0)))
            .unwrap();
        scene
            .attach_mesh(scene.root(), with_normals(triangle_at(2.0)))
            .unwrap();
        let soup = flatten_scene(&scene).unwrap();
        assert!(matches!(&soup.normals, SoupNormals::PerVertex(n) if n.len() == 6));

        scene.attach_mesh(scene.root(), triangle_at(4.0)).unwrap();
        let soup = flatten_scene(&scene).unwrap();
        assert_eq!(soup.normals, SoupNormals::None);
    }

    #[test]
    fn normals_rotate_into_world_space() {
        let mut scene = SceneGraph::new("root");
        let node = scene
            .add_child(
                scene.root(),
                "tilted",
                Transform3D::rotation_axis(Vector3::x(), std::f64::consts::FRAC_PI_2),
            )
            .unwrap();
        scene.attach_mesh(node, with_normals(triangle_at(0.0))).unwrap();

        let soup = flatten_scene(&scene).unwrap();
        let SoupNormals::PerVertex(normals) = &soup.normals else {
            panic!("expected vertex normals");
        };
        assert_relative_eq!(normals[0], -Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn subtree_skips_the_rest() {
        let mut scene = SceneGraph::new("root");
        let a = scene.add_child(scene.root(), "a", Transform3D::identity()).unwrap();
        scene.attach_mesh(scene.root(), triangle_at(0.0)).unwrap();
        scene.attach_mesh(a, triangle_at(1.0)).unwrap();

        let soup = flatten_subtree(&scene, a).unwrap();
        assert_eq!(soup.triangle_count(), 1);
        assert_relative_eq!(soup.positions[0].x, 1.0);
    }
}
