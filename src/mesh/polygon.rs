//! Manifold classification of polygon meshes.
//!
//! [`PolygonMesh`] combines a [`HalfEdgeMesh`] and a [`FaceTable`] over the
//! same corner array and classifies its elements:
//!
//! - An edge with one incident half-edge is a **boundary** edge, with two a
//!   **regular** edge, and with more than two a **singular** edge.
//! - A vertex is a **boundary** vertex if it ends a boundary edge.
//! - A vertex is **singular** if its corners split into more than one fan.
//!
//! # Fans
//!
//! Corners are grouped with a [`Partition`]. Across every regular edge the
//! two corners that visit the same endpoint from the two adjacent faces are
//! joined. Once all regular edges are processed, the number of distinct sets
//! among the corners of a vertex is its fan count. Two triangles sharing only
//! a vertex leave that vertex with two fans.
//!
//! Singular edges contribute no joins by default; see
//! [`SingularEdgeHandling`].
//!
//! # Example
//!
//! ```
//! use meshtopo::mesh::{PolygonMesh, VertexId};
//!
//! // Two triangles touching at vertex 2 only
//! let corners = [0, 1, 2, -1, 2, 3, 4, -1];
//! let mesh: PolygonMesh = PolygonMesh::new(5, &corners).unwrap();
//!
//! assert!(mesh.is_singular_vertex(VertexId::new(2)));
//! assert_eq!(mesh.vertex_fan_count(VertexId::new(2)), 2);
//! assert!(!mesh.is_regular());
//! ```

use log::debug;

use super::faces::FaceTable;
use super::halfedge::HalfEdgeMesh;
use super::index::{CornerId, EdgeId, FaceId, MeshIndex, VertexId};
use super::partition::Partition;
use crate::error::Result;

/// How singular edges take part in fan detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingularEdgeHandling {
    /// Singular edges join nothing. Faces meeting only along a singular edge
    /// stay in separate fans, so its endpoints are reported singular.
    #[default]
    Split,

    /// Every half-edge of a singular edge is joined to the first one at both
    /// endpoints, so a singular edge alone does not make its endpoints
    /// singular.
    Merge,
}

/// Options for mesh classification.
#[derive(Debug, Clone, Default)]
pub struct ClassifierOptions {
    /// Treatment of edges with more than two incident half-edges.
    pub singular_edges: SingularEdgeHandling,
}

impl ClassifierOptions {
    /// Set the treatment of singular edges.
    pub fn with_singular_edges(mut self, handling: SingularEdgeHandling) -> Self {
        self.singular_edges = handling;
        self
    }

    /// Merge fans across singular edges.
    pub fn merge_singular_edges(self) -> Self {
        self.with_singular_edges(SingularEdgeHandling::Merge)
    }
}

/// Per-vertex classification of a half-edge mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    boundary_vertex: Vec<bool>,
    fan_count: Vec<usize>,
}

impl Classification {
    /// Classify the vertices of a half-edge mesh.
    pub fn compute<I: MeshIndex>(mesh: &HalfEdgeMesh<'_, I>, options: &ClassifierOptions) -> Self {
        let mut boundary_vertex = vec![false; mesh.num_vertices()];
        let mut partition = Partition::new(mesh.num_corners());

        for e in mesh.edge_ids() {
            match *mesh.edge_halfedges(e) {
                [] => {}
                [_] => {
                    let (v0, v1) = mesh.edge_vertices(e);
                    boundary_vertex[v0.index()] = true;
                    boundary_vertex[v1.index()] = true;
                }
                [a, b] => join_across(mesh, &mut partition, a, b),
                [first, ref rest @ ..] => {
                    if options.singular_edges == SingularEdgeHandling::Merge {
                        for &other in rest {
                            join_across(mesh, &mut partition, first, other);
                        }
                    }
                }
            }
        }

        // Every fan holds corners of a single vertex; count it at its root
        let mut fan_count = vec![0; mesh.num_vertices()];
        for c in mesh.halfedge_ids() {
            if partition.find(c.index()) == Some(c.index()) {
                fan_count[mesh.source(c).index()] += 1;
            }
        }
        // Separators stay singletons
        let num_fans = partition.num_sets() - (mesh.num_corners() - mesh.num_halfedges());
        debug!("{} corner fans over {} vertices", num_fans, mesh.num_vertices());

        Self {
            boundary_vertex,
            fan_count,
        }
    }

    /// Whether a vertex ends a boundary edge.
    pub fn is_boundary_vertex<I: MeshIndex>(&self, v: VertexId<I>) -> bool {
        v.get()
            .and_then(|i| self.boundary_vertex.get(i))
            .copied()
            .unwrap_or(false)
    }

    /// Number of disconnected corner fans around a vertex.
    pub fn fan_count<I: MeshIndex>(&self, v: VertexId<I>) -> usize {
        v.get()
            .and_then(|i| self.fan_count.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Number of boundary vertices.
    pub fn num_boundary_vertices(&self) -> usize {
        self.boundary_vertex.iter().filter(|&&b| b).count()
    }

    /// Number of vertices with more than one fan.
    pub fn num_singular_vertices(&self) -> usize {
        self.fan_count.iter().filter(|&&n| n > 1).count()
    }
}

/// Join the corners that visit the same vertex across the edge of `a` and `b`.
fn join_across<I: MeshIndex>(
    mesh: &HalfEdgeMesh<'_, I>,
    partition: &mut Partition,
    a: CornerId<I>,
    b: CornerId<I>,
) {
    let (next_a, next_b) = (mesh.next(a), mesh.next(b));
    if mesh.source(a) == mesh.source(b) {
        // Same direction: corners pair up position by position
        partition.join(a.index(), b.index());
        partition.join(next_a.index(), next_b.index());
    } else {
        partition.join(a.index(), next_b.index());
        partition.join(b.index(), next_a.index());
    }
}

/// A polygon mesh with classified edges and vertices.
///
/// Borrows the corner array; the mesh cannot outlive it.
#[derive(Debug, Clone)]
pub struct PolygonMesh<'a, I: MeshIndex = u32> {
    halfedges: HalfEdgeMesh<'a, I>,
    faces: FaceTable<'a, I>,
    options: ClassifierOptions,
    classification: Classification,
}

impl<'a, I: MeshIndex> PolygonMesh<'a, I> {
    /// Build and classify a mesh with default options.
    pub fn new(num_vertices: usize, corners: &'a [i32]) -> Result<Self> {
        Self::with_options(num_vertices, corners, ClassifierOptions::default())
    }

    /// Build and classify a mesh.
    ///
    /// Fails if a corner references a vertex outside `[-1, num_vertices)`.
    pub fn with_options(
        num_vertices: usize,
        corners: &'a [i32],
        options: ClassifierOptions,
    ) -> Result<Self> {
        let halfedges = HalfEdgeMesh::new(num_vertices, corners)?;
        let faces = FaceTable::new(num_vertices, corners);
        let classification = Classification::compute(&halfedges, &options);

        let mesh = Self {
            halfedges,
            faces,
            options,
            classification,
        };
        debug!(
            "classified mesh: {} boundary edges, {} singular edges, {} boundary vertices, {} singular vertices",
            mesh.edge_ids().filter(|&e| mesh.is_boundary_edge(e)).count(),
            mesh.edge_ids().filter(|&e| mesh.is_singular_edge(e)).count(),
            mesh.classification.num_boundary_vertices(),
            mesh.classification.num_singular_vertices(),
        );
        Ok(mesh)
    }

    /// Recompute the classification, optionally with new options.
    pub fn reclassify(&mut self, options: ClassifierOptions) {
        self.classification = Classification::compute(&self.halfedges, &options);
        self.options = options;
    }

    /// The underlying half-edge topology.
    #[inline]
    pub fn halfedges(&self) -> &HalfEdgeMesh<'a, I> {
        &self.halfedges
    }

    /// The face table over the same corner array.
    #[inline]
    pub fn faces(&self) -> &FaceTable<'a, I> {
        &self.faces
    }

    /// The options used for the current classification.
    #[inline]
    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// The current vertex classification.
    #[inline]
    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    // ==================== Counts ====================

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.halfedges.num_vertices()
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.num_faces()
    }

    /// Number of corners, separators included.
    #[inline]
    pub fn num_corners(&self) -> usize {
        self.faces.num_corners()
    }

    /// Number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.halfedges.num_edges()
    }

    // ==================== Faces ====================

    /// Number of corners of a face; `0` past the last face.
    #[inline]
    pub fn face_size(&self, f: FaceId<I>) -> usize {
        self.faces.face_size(f)
    }

    /// First corner of a face.
    #[inline]
    pub fn face_first_corner(&self, f: FaceId<I>) -> CornerId<I> {
        self.faces.face_first_corner(f)
    }

    /// The `j`-th vertex of a face.
    #[inline]
    pub fn face_vertex(&self, f: FaceId<I>, j: usize) -> VertexId<I> {
        self.faces.face_vertex(f, j)
    }

    // ==================== Corners ====================

    /// Face containing a corner.
    #[inline]
    pub fn corner_face(&self, c: CornerId<I>) -> FaceId<I> {
        self.halfedges.face(c)
    }

    /// Next corner in the face.
    #[inline]
    pub fn next(&self, c: CornerId<I>) -> CornerId<I> {
        self.halfedges.next(c)
    }

    /// Previous corner in the face.
    #[inline]
    pub fn prev(&self, c: CornerId<I>) -> CornerId<I> {
        self.halfedges.prev(c)
    }

    /// Source vertex of a half-edge.
    #[inline]
    pub fn source(&self, c: CornerId<I>) -> VertexId<I> {
        self.halfedges.source(c)
    }

    /// Destination vertex of a half-edge.
    #[inline]
    pub fn destination(&self, c: CornerId<I>) -> VertexId<I> {
        self.halfedges.destination(c)
    }

    /// Twin half-edge, invalid if there is none.
    #[inline]
    pub fn twin(&self, c: CornerId<I>) -> CornerId<I> {
        self.halfedges.twin(c)
    }

    // ==================== Edges ====================

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.halfedges.edge_ids()
    }

    /// Endpoints of an edge, smaller vertex first.
    #[inline]
    pub fn edge_vertices(&self, e: EdgeId<I>) -> (VertexId<I>, VertexId<I>) {
        self.halfedges.edge_vertices(e)
    }

    /// Number of faces (half-edges) incident to an edge.
    #[inline]
    pub fn edge_face_count(&self, e: EdgeId<I>) -> usize {
        self.halfedges.edge_halfedge_count(e)
    }

    /// The `j`-th half-edge incident to an edge.
    #[inline]
    pub fn edge_halfedge(&self, e: EdgeId<I>, j: usize) -> CornerId<I> {
        self.halfedges.edge_halfedge(e, j)
    }

    /// The face of the `j`-th half-edge incident to an edge.
    #[inline]
    pub fn edge_face(&self, e: EdgeId<I>, j: usize) -> FaceId<I> {
        self.faces.corner_face(self.edge_halfedge(e, j))
    }

    /// Whether face `f` is incident to edge `e`.
    pub fn is_edge_face(&self, e: EdgeId<I>, f: FaceId<I>) -> bool {
        f.is_valid()
            && self
                .halfedges
                .edge_halfedges(e)
                .iter()
                .any(|&c| self.halfedges.face(c) == f)
    }

    // ==================== Classification ====================

    /// Whether an edge has exactly one incident half-edge.
    #[inline]
    pub fn is_boundary_edge(&self, e: EdgeId<I>) -> bool {
        self.edge_face_count(e) == 1
    }

    /// Whether an edge has exactly two incident half-edges.
    #[inline]
    pub fn is_regular_edge(&self, e: EdgeId<I>) -> bool {
        self.edge_face_count(e) == 2
    }

    /// Whether an edge has more than two incident half-edges.
    #[inline]
    pub fn is_singular_edge(&self, e: EdgeId<I>) -> bool {
        self.edge_face_count(e) > 2
    }

    /// Whether a vertex ends a boundary edge.
    #[inline]
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        self.classification.is_boundary_vertex(v)
    }

    /// Whether a vertex has more than one corner fan.
    #[inline]
    pub fn is_singular_vertex(&self, v: VertexId<I>) -> bool {
        self.vertex_fan_count(v) > 1
    }

    /// Number of corner fans around a vertex; `0` for unused vertices.
    #[inline]
    pub fn vertex_fan_count(&self, v: VertexId<I>) -> usize {
        self.classification.fan_count(v)
    }

    /// Whether the mesh has no singular edges and no singular vertices.
    pub fn is_regular(&self) -> bool {
        !self.edge_ids().any(|e| self.is_singular_edge(e))
            && self.classification.num_singular_vertices() == 0
    }

    /// Whether the mesh has at least one boundary edge.
    pub fn has_boundary(&self) -> bool {
        self.edge_ids().any(|e| self.is_boundary_edge(e))
    }

    /// Whether every regular edge joins two consistently oriented faces.
    pub fn is_oriented(&self) -> bool {
        self.edge_ids()
            .filter(|&e| self.is_regular_edge(e))
            .all(|e| self.halfedges.is_consistently_oriented(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn c(i: usize) -> CornerId {
        CornerId::new(i)
    }

    fn f(i: usize) -> FaceId {
        FaceId::new(i)
    }

    fn build(nv: usize, corners: &[i32]) -> PolygonMesh<'_> {
        PolygonMesh::new(nv, corners).unwrap()
    }

    /// Checks that hold for any built mesh.
    fn assert_invariants(mesh: &PolygonMesh<'_>) {
        let he = mesh.halfedges();
        for c in he.halfedge_ids() {
            let t = mesh.twin(c);
            if t.is_valid() {
                assert_eq!(mesh.twin(t), c);
                assert_eq!(he.edge_of(t), he.edge_of(c));
            }
            assert_eq!(mesh.destination(c), mesh.source(mesh.next(c)));
        }

        for fi in 0..mesh.num_faces() {
            let first = mesh.face_first_corner(f(fi));
            let mut cur = first;
            for _ in 0..mesh.face_size(f(fi)) {
                cur = mesh.next(cur);
            }
            assert_eq!(cur, first, "face {} does not close", fi);
        }

        let total: usize = mesh.edge_ids().map(|e| mesh.edge_face_count(e)).sum();
        assert_eq!(total, he.num_halfedges());

        for e in mesh.edge_ids() {
            let kinds = [
                mesh.is_boundary_edge(e),
                mesh.is_regular_edge(e),
                mesh.is_singular_edge(e),
            ];
            assert_eq!(kinds.iter().filter(|&&k| k).count(), 1);
        }

        for vi in 0..mesh.num_vertices() {
            let on_boundary_edge = mesh.edge_ids().any(|e| {
                let (a, b) = mesh.edge_vertices(e);
                mesh.is_boundary_edge(e) && (a == v(vi) || b == v(vi))
            });
            assert_eq!(mesh.is_boundary_vertex(v(vi)), on_boundary_edge);
        }
    }

    #[test]
    fn test_single_triangle() {
        let corners = [0, 1, 2, -1];
        let mesh = build(3, &corners);
        assert_invariants(&mesh);

        assert_eq!(mesh.num_corners(), 4);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_edges(), 3);
        for e in mesh.edge_ids() {
            assert!(mesh.is_boundary_edge(e));
        }
        for i in 0..3 {
            assert!(mesh.is_boundary_vertex(v(i)));
            assert!(!mesh.is_singular_vertex(v(i)));
            assert_eq!(mesh.vertex_fan_count(v(i)), 1);
        }
        assert!(mesh.is_regular());
        assert!(mesh.has_boundary());
    }

    #[test]
    fn test_two_triangles_sharing_edge() {
        let corners = [0, 1, 2, -1, 1, 3, 2, -1];
        let mesh = build(4, &corners);
        assert_invariants(&mesh);

        let shared = mesh.halfedges().find_edge(v(1), v(2));
        assert!(mesh.is_regular_edge(shared));
        assert_eq!(mesh.edge_face_count(shared), 2);
        let (a, b) = (mesh.edge_halfedge(shared, 0), mesh.edge_halfedge(shared, 1));
        assert_eq!(mesh.twin(a), b);
        assert_eq!(mesh.twin(b), a);

        let boundary = mesh.edge_ids().filter(|&e| mesh.is_boundary_edge(e)).count();
        assert_eq!(boundary, 4);

        for i in 0..4 {
            assert!(mesh.is_boundary_vertex(v(i)));
            assert_eq!(mesh.vertex_fan_count(v(i)), 1);
        }
        assert!(mesh.is_regular());
        assert!(mesh.is_oriented());
        assert_eq!(mesh.edge_face(shared, 1), f(1));
        assert!(mesh.is_edge_face(shared, f(0)));
        assert!(!mesh.is_edge_face(mesh.halfedges().find_edge(v(0), v(1)), f(1)));
    }

    #[test]
    fn test_hourglass_vertex_is_singular() {
        let corners = [0, 1, 2, -1, 2, 3, 4, -1];
        let mesh = build(5, &corners);
        assert_invariants(&mesh);

        for e in mesh.edge_ids() {
            assert!(mesh.is_boundary_edge(e));
        }
        assert!(mesh.is_singular_vertex(v(2)));
        assert!(mesh.vertex_fan_count(v(2)) >= 2);
        assert!(mesh.is_boundary_vertex(v(2)));
        assert!(!mesh.is_singular_vertex(v(0)));
        assert!(!mesh.is_regular());
        assert!(mesh.has_boundary());
    }

    #[test]
    fn test_closed_tetrahedron() {
        let corners = [0, 2, 1, -1, 0, 1, 3, -1, 1, 2, 3, -1, 2, 0, 3, -1];
        let mesh = build(4, &corners);
        assert_invariants(&mesh);

        assert_eq!(mesh.num_edges(), 6);
        assert!(mesh.edge_ids().all(|e| mesh.is_regular_edge(e)));
        assert!(!mesh.has_boundary());
        assert!(mesh.is_regular());
        assert!(mesh.is_oriented());
        for i in 0..4 {
            assert!(!mesh.is_boundary_vertex(v(i)));
            assert_eq!(mesh.vertex_fan_count(v(i)), 1);
        }
    }

    #[test]
    fn test_double_cone_pinch() {
        // Two closed tetrahedra sharing only vertex 0
        let corners = [
            0, 1, 2, -1, 0, 2, 3, -1, 0, 3, 1, -1, 1, 3, 2, -1, //
            0, 4, 5, -1, 0, 5, 6, -1, 0, 6, 4, -1, 4, 6, 5, -1,
        ];
        let mesh = build(7, &corners);
        assert_invariants(&mesh);

        assert!(!mesh.has_boundary());
        assert_eq!(mesh.vertex_fan_count(v(0)), 2);
        assert!(mesh.is_singular_vertex(v(0)));
        assert!(!mesh.is_boundary_vertex(v(0)));
        assert!(!mesh.is_regular());
    }

    #[test]
    fn test_singular_edge() {
        // Three triangles hinged on edge (0, 1)
        let corners = [0, 1, 2, -1, 1, 0, 3, -1, 0, 1, 4, -1];
        let mesh = build(5, &corners);
        assert_invariants(&mesh);

        let hinge = mesh.halfedges().find_edge(v(0), v(1));
        assert!(mesh.is_singular_edge(hinge));
        assert_eq!(mesh.edge_face_count(hinge), 3);
        assert!(!mesh.twin(mesh.edge_halfedge(hinge, 2)).is_valid());
        assert!(!mesh.is_regular());

        // Hinge endpoints touch only the singular edge and boundary edges
        assert_eq!(mesh.vertex_fan_count(v(0)), 3);
        assert!(mesh.is_singular_vertex(v(1)));
        assert!(mesh.is_boundary_vertex(v(0)));
    }

    #[test]
    fn test_merge_singular_edges() {
        let corners = [0, 1, 2, -1, 1, 0, 3, -1, 0, 1, 4, -1];
        let options = ClassifierOptions::default().merge_singular_edges();
        let mesh: PolygonMesh = PolygonMesh::with_options(5, &corners, options).unwrap();

        assert_eq!(mesh.vertex_fan_count(v(0)), 1);
        assert_eq!(mesh.vertex_fan_count(v(1)), 1);
        assert!(!mesh.is_singular_vertex(v(0)));
        // The edge itself is still singular
        assert!(!mesh.is_regular());
    }

    #[test]
    fn test_inconsistent_orientation_joins_same_vertex() {
        // Shared edge (1, 2) traversed 1 -> 2 by both faces
        let corners = [0, 1, 2, -1, 1, 2, 3, -1];
        let mesh = build(4, &corners);
        assert_invariants(&mesh);

        let shared = mesh.halfedges().find_edge(v(1), v(2));
        assert!(mesh.is_regular_edge(shared));
        assert!(!mesh.is_oriented());
        for i in 0..4 {
            assert_eq!(mesh.vertex_fan_count(v(i)), 1, "vertex {}", i);
        }
        assert!(mesh.is_regular());
    }

    #[test]
    fn test_quad_strip() {
        // 0 - 1 - 2
        // |   |   |
        // 3 - 4 - 5
        let corners = [0, 3, 4, 1, -1, 1, 4, 5, 2, -1];
        let mesh = build(6, &corners);
        assert_invariants(&mesh);

        assert_eq!(mesh.face_size(f(0)), 4);
        assert_eq!(mesh.face_vertex(f(1), 2), v(5));
        assert_eq!(mesh.num_edges(), 7);
        assert!(mesh.is_regular_edge(mesh.halfedges().find_edge(v(1), v(4))));
        assert!(mesh.is_regular());
        assert_eq!(mesh.prev(c(5)), c(8));
        assert_eq!(mesh.corner_face(c(7)), f(1));
    }

    #[test]
    fn test_unused_vertex() {
        let corners = [0, 1, 2, -1];
        let mesh = build(4, &corners);
        assert_eq!(mesh.vertex_fan_count(v(3)), 0);
        assert!(!mesh.is_boundary_vertex(v(3)));
        assert!(!mesh.is_singular_vertex(v(3)));
    }

    #[test]
    fn test_out_of_range_queries() {
        let corners = [0, 1, 2, -1];
        let mesh = build(3, &corners);

        assert!(!mesh.is_boundary_edge(EdgeId::new(10)));
        assert!(!mesh.is_regular_edge(EdgeId::invalid()));
        assert!(!mesh.is_singular_edge(EdgeId::new(10)));
        assert!(!mesh.is_boundary_vertex(v(10)));
        assert!(!mesh.is_singular_vertex(VertexId::invalid()));
        assert_eq!(mesh.face_size(f(1)), 0);
        assert!(!mesh.edge_face(EdgeId::new(0), 1).is_valid());
        assert!(!mesh.is_edge_face(EdgeId::new(0), FaceId::invalid()));
        assert!(!mesh.twin(c(42)).is_valid());
    }

    #[test]
    fn test_construction_fails_out_of_bounds() {
        let corners = [0, 1, 3, -1];
        let result: Result<PolygonMesh> = PolygonMesh::new(3, &corners);
        assert!(result.is_err());
    }

    #[test]
    fn test_reclassify_is_idempotent() {
        let corners = [0, 1, 2, -1, 2, 3, 4, -1, 1, 0, 5, -1];
        let mut mesh = build(6, &corners);
        let before = mesh.classification().clone();

        let again = Classification::compute(mesh.halfedges(), mesh.options());
        assert_eq!(before, again);

        mesh.reclassify(ClassifierOptions::default());
        assert_eq!(&before, mesh.classification());
    }
}
