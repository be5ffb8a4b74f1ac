//! # Meshtopo
//!
//! Half-edge topology and manifold classification for polygon meshes stored
//! as a flat, face-terminated index array.
//!
//! A mesh is described by its vertex count and one array of vertex indices in
//! which every face loop is followed by `-1`. Meshtopo builds half-edge
//! connectivity directly on that array, without copying it, and classifies
//! edges and vertices.
//!
//! ## Features
//!
//! - **Corner-based half-edges**: every array slot is a corner; `next` and
//!   `twin` are O(1) lookups, `prev` is bounded by the face size
//! - **Arbitrary polygons**: faces of any size, mixed in one mesh
//! - **Non-manifold input**: complete per-edge incidence lists, singular edge
//!   and singular vertex detection
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit indices
//!
//! ## Quick Start
//!
//! ```
//! use meshtopo::prelude::*;
//!
//! // Two triangles sharing the edge (1, 2)
//! let corners = [0, 1, 2, -1, 1, 3, 2, -1];
//! let mesh: PolygonMesh = PolygonMesh::new(4, &corners).unwrap();
//!
//! assert_eq!(mesh.num_faces(), 2);
//! assert_eq!(mesh.num_edges(), 5);
//! assert!(mesh.is_regular());
//! assert!(mesh.has_boundary());
//!
//! // Classify edges
//! for e in mesh.edge_ids() {
//!     let (v0, v1) = mesh.edge_vertices(e);
//!     println!("{:?}-{:?}: {} faces", v0, v1, mesh.edge_face_count(e));
//! }
//! ```
//!
//! ## Mesh Traversal
//!
//! ```
//! use meshtopo::prelude::*;
//!
//! # let corners = [0, 1, 2, -1, 1, 3, 2, -1];
//! # let mesh: PolygonMesh = PolygonMesh::new(4, &corners).unwrap();
//! // Walk around the first face
//! let first = mesh.face_first_corner(FaceId::new(0));
//! let mut c = first;
//! loop {
//!     println!("{:?} -> {:?}", mesh.source(c), mesh.destination(c));
//!     c = mesh.next(c);
//!     if c == first {
//!         break;
//!     }
//! }
//!
//! // Cross the shared edge
//! let twin = mesh.twin(CornerId::new(1));
//! assert_eq!(mesh.corner_face(twin), FaceId::new(1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use meshtopo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Result, TopologyError};
    pub use crate::mesh::{
        build_halfedges, ClassifierOptions, CornerId, EdgeId, FaceId, FaceTable, HalfEdgeMesh,
        MeshIndex, PolygonMesh, SingularEdgeHandling, VertexId, FACE_SEPARATOR,
    };
}
