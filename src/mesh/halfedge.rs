//! Corner-based half-edge topology.
//!
//! Every non-separator corner of the flat array is a half-edge: it starts at
//! the corner's vertex and ends at the vertex of the next corner of the same
//! face. [`HalfEdgeMesh`] stores, per corner, the owning face, the underlying
//! edge, and the twin half-edge, plus the full list of half-edges incident to
//! every edge.
//!
//! # Structure
//!
//! - `next`/`prev` are derived from the corner array itself: the corner after
//!   `c` is `c + 1` unless `c + 1` is a separator, in which case the face
//!   wraps around to its first corner.
//! - The link slot of every separator stores the size of the face it closes,
//!   so the wrap needs no per-corner "first corner" pointer.
//! - Twins are assigned without looking at orientation. On a singular edge
//!   only the first two registered half-edges become twins; the remaining
//!   ones keep an invalid twin. Use [`HalfEdgeMesh::edge_halfedges`] to see
//!   every half-edge of such an edge.

use super::edge_index::EdgeIndex;
use super::faces::FACE_SEPARATOR;
use super::index::{CornerId, EdgeId, FaceId, MeshIndex, VertexId};

/// Half-edge connectivity over a borrowed face-terminated corner array.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<'a, I: MeshIndex = u32> {
    /// The caller's corner array.
    pub(crate) corners: &'a [i32],

    /// Edge numbering for unordered vertex pairs.
    pub(crate) edges: EdgeIndex<I>,

    /// Number of non-empty faces.
    pub(crate) num_faces: usize,

    /// Face of each corner; invalid for separators.
    pub(crate) face: Vec<FaceId<I>>,

    /// Edge of each half-edge; invalid for separators.
    pub(crate) edge: Vec<EdgeId<I>>,

    /// Twin corner for half-edges, face size for separators.
    /// One slot longer than the corner array to cover a missing final separator.
    pub(crate) links: Vec<I>,

    /// Offsets into `edge_corners`, one per edge plus a final end offset.
    pub(crate) first_corner_of_edge: Vec<usize>,

    /// Half-edges grouped by edge, in corner order within each group.
    pub(crate) edge_corners: Vec<CornerId<I>>,
}

impl<'a, I: MeshIndex> HalfEdgeMesh<'a, I> {
    // ==================== Counts ====================

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.edges.num_vertices()
    }

    /// Number of corners, separators included.
    #[inline]
    pub fn num_corners(&self) -> usize {
        self.corners.len()
    }

    /// Number of half-edges (non-separator corners).
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.edge_corners.len()
    }

    /// Number of non-empty faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.num_faces
    }

    /// Number of distinct edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.num_edges()
    }

    /// The borrowed corner array.
    #[inline]
    pub fn corners(&self) -> &'a [i32] {
        self.corners
    }

    /// The edge numbering used by this mesh.
    #[inline]
    pub fn edge_index(&self) -> &EdgeIndex<I> {
        &self.edges
    }

    // ==================== Corner Queries ====================

    /// Whether `c` is a half-edge (a corner holding a vertex).
    #[inline]
    pub fn is_halfedge(&self, c: CornerId<I>) -> bool {
        c.get().map_or(false, |i| !self.is_separator(i))
    }

    /// Face containing a half-edge.
    #[inline]
    pub fn face(&self, c: CornerId<I>) -> FaceId<I> {
        c.get()
            .and_then(|i| self.face.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Source vertex of a half-edge (the corner's own vertex).
    #[inline]
    pub fn source(&self, c: CornerId<I>) -> VertexId<I> {
        match c.get().and_then(|i| self.corners.get(i)) {
            Some(&v) if v >= 0 => VertexId::new(v as usize),
            _ => VertexId::invalid(),
        }
    }

    /// Destination vertex of a half-edge: `source(next(c))`.
    #[inline]
    pub fn destination(&self, c: CornerId<I>) -> VertexId<I> {
        self.source(self.next(c))
    }

    /// Twin half-edge, or an invalid id on boundary edges and for
    /// half-edges past the first two of a singular edge.
    #[inline]
    pub fn twin(&self, c: CornerId<I>) -> CornerId<I> {
        if !self.is_halfedge(c) {
            return CornerId::invalid();
        }
        let t = self.links[c.index()];
        if t.is_valid() {
            CornerId::new(t.to_usize())
        } else {
            CornerId::invalid()
        }
    }

    /// Next half-edge around the face.
    pub fn next(&self, c: CornerId<I>) -> CornerId<I> {
        if !self.is_halfedge(c) {
            return CornerId::invalid();
        }
        let i = c.index();
        if !self.is_separator(i + 1) {
            return CornerId::new(i + 1);
        }
        // Wrap: the separator slot holds the face size
        let size = self.links[i + 1].to_usize();
        CornerId::new(i + 1 - size)
    }

    /// Previous half-edge around the face.
    ///
    /// At the first corner of a face this scans forward to the face's last
    /// corner, so the cost is bounded by the face size.
    pub fn prev(&self, c: CornerId<I>) -> CornerId<I> {
        if !self.is_halfedge(c) {
            return CornerId::invalid();
        }
        let i = c.index();
        if i > 0 && !self.is_separator(i - 1) {
            return CornerId::new(i - 1);
        }
        let mut last = i;
        while !self.is_separator(last + 1) {
            last += 1;
        }
        CornerId::new(last)
    }

    /// Edge underlying a half-edge.
    #[inline]
    pub fn edge_of(&self, c: CornerId<I>) -> EdgeId<I> {
        c.get()
            .and_then(|i| self.edge.get(i))
            .copied()
            .unwrap_or_default()
    }

    // ==================== Edge Queries ====================

    /// Endpoints of an edge, smaller vertex first.
    #[inline]
    pub fn edge_vertices(&self, e: EdgeId<I>) -> (VertexId<I>, VertexId<I>) {
        (self.edges.vertex0(e), self.edges.vertex1(e))
    }

    /// Edge joining two vertices, or an invalid id if there is none.
    #[inline]
    pub fn find_edge(&self, v0: VertexId<I>, v1: VertexId<I>) -> EdgeId<I> {
        self.edges.find(v0, v1)
    }

    /// Number of half-edges incident to an edge; `0` for an invalid edge.
    #[inline]
    pub fn edge_halfedge_count(&self, e: EdgeId<I>) -> usize {
        self.edge_halfedges(e).len()
    }

    /// The `j`-th half-edge incident to an edge.
    #[inline]
    pub fn edge_halfedge(&self, e: EdgeId<I>, j: usize) -> CornerId<I> {
        self.edge_halfedges(e).get(j).copied().unwrap_or_default()
    }

    /// All half-edges incident to an edge, in corner order.
    pub fn edge_halfedges(&self, e: EdgeId<I>) -> &[CornerId<I>] {
        match e.get() {
            Some(i) if i < self.num_edges() => {
                &self.edge_corners[self.first_corner_of_edge[i]..self.first_corner_of_edge[i + 1]]
            }
            _ => &[],
        }
    }

    /// Whether the two half-edges of a regular edge run in opposite
    /// directions. Always false for boundary and singular edges.
    pub fn is_consistently_oriented(&self, e: EdgeId<I>) -> bool {
        match *self.edge_halfedges(e) {
            [a, b] => self.source(a) == self.destination(b) && self.destination(a) == self.source(b),
            _ => false,
        }
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.num_vertices()).map(VertexId::new)
    }

    /// Iterate over all half-edges (separators are skipped).
    pub fn halfedge_ids(&self) -> impl Iterator<Item = CornerId<I>> + '_ {
        self.corners
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != FACE_SEPARATOR)
            .map(|(i, _)| CornerId::new(i))
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.num_faces).map(FaceId::new)
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.num_edges()).map(EdgeId::new)
    }

    /// Iterate over the half-edges of the face containing `c`, starting at `c`.
    pub fn face_loop(&self, c: CornerId<I>) -> FaceLoopIter<'_, 'a, I> {
        FaceLoopIter::new(self, c)
    }

    // ==================== Validation ====================

    /// Check that the connectivity is consistent.
    ///
    /// Verifies twin symmetry, that twins share an edge, that `next` and
    /// `prev` are inverse and stay inside the face, that every face loop
    /// closes, and that the edge incidence lists cover each half-edge once.
    pub fn is_valid(&self) -> bool {
        for c in self.halfedge_ids() {
            let t = self.twin(c);
            if t.is_valid() && (self.twin(t) != c || self.edge_of(t) != self.edge_of(c)) {
                return false;
            }

            let n = self.next(c);
            if self.prev(n) != c || self.face(n) != self.face(c) {
                return false;
            }

            let mut cur = n;
            let mut steps = 1;
            while cur != c && steps <= self.num_corners() {
                cur = self.next(cur);
                steps += 1;
            }
            if cur != c {
                return false;
            }

            let e = self.edge_of(c);
            if !self.edge_halfedges(e).contains(&c) {
                return false;
            }
        }

        self.edge_ids()
            .map(|e| self.edge_halfedge_count(e))
            .sum::<usize>()
            == self.num_halfedges()
    }

    /// Whether position `i` terminates a face.
    #[inline]
    pub(crate) fn is_separator(&self, i: usize) -> bool {
        self.corners.get(i).map_or(true, |&v| v == FACE_SEPARATOR)
    }
}

/// Iterator over the half-edges of one face.
pub struct FaceLoopIter<'m, 'a, I: MeshIndex = u32> {
    mesh: &'m HalfEdgeMesh<'a, I>,
    start: CornerId<I>,
    current: CornerId<I>,
    remaining: usize,
}

impl<'m, 'a, I: MeshIndex> FaceLoopIter<'m, 'a, I> {
    fn new(mesh: &'m HalfEdgeMesh<'a, I>, start: CornerId<I>) -> Self {
        let remaining = if mesh.is_halfedge(start) {
            mesh.num_corners()
        } else {
            0
        };
        Self {
            mesh,
            start,
            current: start,
            remaining,
        }
    }
}

impl<'m, 'a, I: MeshIndex> Iterator for FaceLoopIter<'m, 'a, I> {
    type Item = CornerId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let result = self.current;
        self.current = self.mesh.next(self.current);
        if self.current == self.start {
            self.remaining = 0;
        }

        Some(result)
    }
}
