//! Core mesh topology structures.
//!
//! This module builds half-edge connectivity directly on top of a flat,
//! face-terminated corner array and classifies the resulting mesh.
//!
//! # Overview
//!
//! Data flows one way:
//!
//! - [`FaceTable`] finds the face boundaries of the corner array.
//! - [`EdgeIndex`] numbers the unordered vertex pairs.
//! - [`HalfEdgeMesh`] treats every corner as a half-edge and records faces,
//!   twins, and the half-edges incident to every edge.
//! - [`PolygonMesh`] classifies edges and vertices, using a [`Partition`]
//!   of the corners to find disconnected fans.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`CornerId`] - Identifies a corner (and the half-edge starting there)
//! - [`FaceId`] - Identifies a face
//! - [`EdgeId`] - Identifies an edge
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! ```
//! use meshtopo::mesh::{EdgeId, PolygonMesh};
//!
//! let corners = [0, 1, 2, -1, 1, 3, 2, -1];
//! let mesh: PolygonMesh = PolygonMesh::new(4, &corners).unwrap();
//!
//! assert_eq!(mesh.num_faces(), 2);
//! assert!(mesh.is_regular_edge(EdgeId::new(1)));
//! ```

mod builder;
mod edge_index;
mod faces;
mod halfedge;
mod index;
mod partition;
mod polygon;

pub use builder::build_halfedges;
pub use edge_index::EdgeIndex;
pub use faces::{FaceTable, FACE_SEPARATOR};
pub use halfedge::{FaceLoopIter, HalfEdgeMesh};
pub use index::{CornerId, EdgeId, FaceId, MeshIndex, VertexId};
pub use partition::Partition;
pub use polygon::{Classification, ClassifierOptions, PolygonMesh, SingularEdgeHandling};
