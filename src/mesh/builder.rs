//! Half-edge construction from a flat face-terminated corner array.
//!
//! Construction runs three passes over the face loops, each in array order:
//!
//! 1. **Registration**: record the face of every corner, register the edge
//!    of every half-edge and count the half-edges per edge.
//! 2. **Twins**: the first half-edge seen on an edge waits; the second one
//!    becomes its twin. Orientation is not checked.
//! 3. **Incidence lists**: lay out the half-edges of all edges in one flat
//!    array indexed by a prefix-sum offset table.

use log::{debug, warn};

use super::edge_index::EdgeIndex;
use super::faces::{face_loops, FACE_SEPARATOR};
use super::halfedge::HalfEdgeMesh;
use super::index::{CornerId, EdgeId, FaceId, MeshIndex, VertexId};
use crate::error::{Result, TopologyError};

/// Build the half-edge topology of a face-terminated corner array.
///
/// # Arguments
/// * `num_vertices` - Number of vertices referenced by the corners
/// * `corners` - Concatenated face loops, each followed by `-1`
///
/// # Returns
/// The half-edge mesh, or an error if a corner references a vertex outside
/// `[-1, num_vertices)` or the mesh is too large for the index type.
///
/// # Example
/// ```
/// use meshtopo::mesh::{build_halfedges, CornerId, HalfEdgeMesh};
///
/// let corners = [0, 1, 2, -1, 1, 3, 2, -1];
/// let mesh: HalfEdgeMesh = build_halfedges(4, &corners).unwrap();
///
/// assert_eq!(mesh.num_faces(), 2);
/// assert_eq!(mesh.num_edges(), 5);
/// assert_eq!(mesh.twin(CornerId::new(1)), CornerId::new(6));
/// ```
pub fn build_halfedges<I: MeshIndex>(
    num_vertices: usize,
    corners: &[i32],
) -> Result<HalfEdgeMesh<'_, I>> {
    validate::<I>(num_vertices, corners)?;

    let nc = corners.len();
    let vertex = |c: usize| VertexId::<I>::new(corners[c] as usize);

    // First pass: faces, edges and per-edge half-edge counts
    let mut edges = EdgeIndex::<I>::new(num_vertices);
    let mut face = vec![FaceId::<I>::invalid(); nc];
    let mut edge = vec![EdgeId::<I>::invalid(); nc];
    let mut links = vec![I::INVALID; nc + 1];
    let mut edge_counts: Vec<usize> = Vec::new();
    let mut num_faces = 0;

    for range in face_loops(corners) {
        let face_id = FaceId::new(num_faces);
        for c in range.clone() {
            let next = if c + 1 < range.end { c + 1 } else { range.start };
            let e = edges.insert(vertex(c), vertex(next));
            face[c] = face_id;
            edge[c] = e;
            if e.index() >= edge_counts.len() {
                edge_counts.resize(e.index() + 1, 0);
            }
            edge_counts[e.index()] += 1;
        }
        links[range.end] = I::from_usize(range.len());
        num_faces += 1;
    }

    let num_edges = edges.num_edges();
    if !I::can_address(num_edges) {
        return Err(TopologyError::too_many("edges", num_edges));
    }

    // Second pass: pair the first two half-edges of every edge
    let mut pending = vec![CornerId::<I>::invalid(); num_edges];
    for c in (0..nc).filter(|&c| corners[c] != FACE_SEPARATOR) {
        let e = edge[c].index();
        let first = pending[e];
        if !first.is_valid() {
            pending[e] = CornerId::new(c);
        } else if !links[first.index()].is_valid() {
            links[c] = first.raw();
            links[first.index()] = I::from_usize(c);
        }
    }

    // Third pass: incidence lists laid out by a prefix-sum offset table
    let mut first_corner_of_edge = Vec::with_capacity(num_edges + 1);
    first_corner_of_edge.push(0);
    for &count in &edge_counts {
        let last = first_corner_of_edge[first_corner_of_edge.len() - 1];
        first_corner_of_edge.push(last + count);
    }

    let num_halfedges = first_corner_of_edge[num_edges];
    let mut edge_corners = vec![CornerId::<I>::invalid(); num_halfedges];
    let mut slot = first_corner_of_edge[..num_edges].to_vec();
    for c in (0..nc).filter(|&c| corners[c] != FACE_SEPARATOR) {
        let e = edge[c].index();
        edge_corners[slot[e]] = CornerId::new(c);
        slot[e] += 1;
    }

    let num_singular = edge_counts.iter().filter(|&&n| n > 2).count();
    if num_singular > 0 {
        warn!(
            "{} singular edges; only the first two half-edges of each are paired as twins",
            num_singular
        );
    }
    debug!(
        "built half-edges: {} corners, {} half-edges, {} faces, {} edges",
        nc, num_halfedges, num_faces, num_edges
    );

    Ok(HalfEdgeMesh {
        corners,
        edges,
        num_faces,
        face,
        edge,
        links,
        first_corner_of_edge,
        edge_corners,
    })
}

/// Check index capacity and that every corner lies in `[-1, num_vertices)`.
fn validate<I: MeshIndex>(num_vertices: usize, corners: &[i32]) -> Result<()> {
    if !I::can_address(corners.len() + 1) {
        return Err(TopologyError::too_many("corners", corners.len()));
    }
    if !I::can_address(num_vertices) {
        return Err(TopologyError::too_many("vertices", num_vertices));
    }

    for (corner, &value) in corners.iter().enumerate() {
        if value < FACE_SEPARATOR || (value >= 0 && value as usize >= num_vertices) {
            return Err(TopologyError::VertexOutOfBounds {
                corner,
                vertex: i64::from(value),
                num_vertices,
            });
        }
    }
    Ok(())
}

impl<'a, I: MeshIndex> HalfEdgeMesh<'a, I> {
    /// Build the half-edge topology of a corner array.
    ///
    /// See [`build_halfedges`].
    pub fn new(num_vertices: usize, corners: &'a [i32]) -> Result<Self> {
        build_halfedges(num_vertices, corners)
    }
}
