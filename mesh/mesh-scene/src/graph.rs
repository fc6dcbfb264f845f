//! Arena-backed scene graph.

use mesh_transform::Transform3D;
use mesh_types::{IndexedMesh, MeshTopology};

use crate::error::{SceneError, SceneResult};

/// Handle to a node inside a [`SceneGraph`].
///
/// Ids are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A labeled node: a local transform, zero or more meshes, and ordered
/// children.
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    local: Transform3D,
    meshes: Vec<IndexedMesh>,
    children: Vec<NodeId>,
}

impl SceneNode {
    fn new(name: String, local: Transform3D) -> Self {
        Self {
            name,
            local,
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Node label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transform relative to the parent node.
    #[must_use]
    pub const fn local(&self) -> &Transform3D {
        &self.local
    }

    /// Meshes attached to this node, in attachment order.
    #[must_use]
    pub fn meshes(&self) -> &[IndexedMesh] {
        &self.meshes
    }

    /// Child nodes, in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A hierarchy of transformed meshes, as produced by a scene-asset loader.
///
/// Nodes live in an arena and refer to each other by [`NodeId`], so parent
/// and child links never form ownership cycles. Node 0 is the root.
///
/// # Example
///
/// ```
/// use mesh_scene::SceneGraph;
/// use mesh_transform::Transform3D;
/// use mesh_types::{IndexedMesh, Vertex};
///
/// let mut scene = SceneGraph::new("asset");
/// let body = scene.add_child(scene.root(), "body", Transform3D::translation(0.0, 0.0, 5.0))?;
///
/// let tri = IndexedMesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
/// scene.attach_mesh(body, tri)?;
///
/// assert_eq!(scene.node_count(), 2);
/// assert_eq!(scene.mesh_count(), 1);
/// # Ok::<(), mesh_scene::SceneError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// Create a scene containing only a root node with an identity transform.
    #[must_use]
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![SceneNode::new(root_name.into(), Transform3D::identity())],
        }
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total meshes attached anywhere in the arena.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().map(|n| n.meshes.len()).sum()
    }

    /// Total triangles across every attached mesh.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.nodes
            .iter()
            .flat_map(|n| &n.meshes)
            .map(MeshTopology::face_count)
            .sum()
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    /// Find the first node with the given name, in arena order.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    /// Create a new node under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownNode`] if `parent` is not in this graph.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        local: Transform3D,
    ) -> SceneResult<NodeId> {
        self.check(parent)?;
        Ok(self.push_child(parent, name.into(), local))
    }

    /// Create a node directly under the root carrying `mesh`.
    ///
    /// The root always exists, so unlike [`add_child`](Self::add_child)
    /// this cannot fail.
    pub fn add_root_mesh(
        &mut self,
        name: impl Into<String>,
        local: Transform3D,
        mesh: IndexedMesh,
    ) -> NodeId {
        let id = self.push_child(self.root(), name.into(), local);
        self.nodes[id.0].meshes.push(mesh);
        id
    }

    /// Attach a mesh to `node`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownNode`] if `node` is not in this graph.
    pub fn attach_mesh(&mut self, node: NodeId, mesh: IndexedMesh) -> SceneResult<()> {
        self.check(node)?;
        self.nodes[node.0].meshes.push(mesh);
        Ok(())
    }

    /// Replace the local transform of `node`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownNode`] if `node` is not in this graph.
    pub fn set_local(&mut self, node: NodeId, local: Transform3D) -> SceneResult<()> {
        self.check(node)?;
        self.nodes[node.0].local = local;
        Ok(())
    }

    /// Add an existing node as a further child of `parent`.
    ///
    /// Loaders use this for instanced nodes. Nothing stops the link from
    /// sharing a subtree or closing a cycle; [`flatten_scene`](crate::flatten_scene)
    /// visits each node at most once.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownNode`] if either id is not in this graph.
    pub fn link(&mut self, parent: NodeId, child: NodeId) -> SceneResult<()> {
        self.check(parent)?;
        self.check(child)?;
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    // `parent` must already be checked.
    fn push_child(&mut self, parent: NodeId, name: String, local: Transform3D) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode::new(name, local));
        self.nodes[parent.0].children.push(id);
        id
    }

    fn check(&self, id: NodeId) -> SceneResult<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(SceneError::UnknownNode {
                index: id.0,
                node_count: self.nodes.len(),
            })
        }
    }
}
