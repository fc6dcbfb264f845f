//! Scene graphs of transformed meshes, flattened for export.
//!
//! An external asset loader builds a [`SceneGraph`]: labeled nodes with a
//! local [`Transform3D`](mesh_transform::Transform3D), attached meshes, and
//! ordered children. [`flatten_scene`] walks it depth-first and merges every
//! mesh into one world-space [`TriangleSoup`](mesh_types::TriangleSoup), so a
//! multi-part asset exports as a single printable solid.
//!
//! # Example
//!
//! ```
//! use mesh_scene::{flatten_scene, SceneError, SceneGraph};
//!
//! // A scene with no geometry is an error, not an empty export.
//! let scene = SceneGraph::new("empty");
//! assert_eq!(flatten_scene(&scene), Err(SceneError::EmptyScene));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod flatten;
mod graph;

pub use error::{SceneError, SceneResult};
pub use flatten::{flatten_scene, flatten_subtree};
pub use graph::{NodeId, SceneGraph, SceneNode};
