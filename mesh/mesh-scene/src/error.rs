//! Error types for scene operations.

use thiserror::Error;

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while building or flattening a scene.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A node id does not belong to this scene.
    #[error("node {index} not found in scene ({node_count} nodes)")]
    UnknownNode {
        /// The offending node index.
        index: usize,
        /// Number of nodes in the scene.
        node_count: usize,
    },

    /// The traversal found no mesh with any triangles.
    #[error("scene contains no meshes to export")]
    EmptyScene,
}
