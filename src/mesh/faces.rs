//! Face boundaries of a flat face-terminated corner array.
//!
//! The corner array concatenates the vertex loops of all faces, each loop
//! followed by [`FACE_SEPARATOR`]:
//!
//! ```text
//! corner:  0  1  2  3  4  5  6  7
//! value:   0  1  2 -1  1  3  2 -1
//! face:    0  0  0  -  1  1  1  -
//! ```
//!
//! A trailing separator is optional; the last run of corners is closed
//! implicitly. Two consecutive separators delimit an empty run, which is not
//! counted as a face.

use std::ops::Range;

use super::index::{CornerId, FaceId, MeshIndex, VertexId};

/// The value that terminates a face in the flat corner array.
pub const FACE_SEPARATOR: i32 = -1;

/// Iterate over the corner ranges of the non-empty faces, in array order.
///
/// Each range excludes its separator. A final run without a separator is
/// yielded as if one followed it.
pub(crate) fn face_loops(corners: &[i32]) -> FaceLoops<'_> {
    FaceLoops { corners, pos: 0 }
}

/// Iterator returned by [`face_loops`].
pub(crate) struct FaceLoops<'a> {
    corners: &'a [i32],
    pos: usize,
}

impl Iterator for FaceLoops<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.corners.len() {
            let start = self.pos;
            let end = self.corners[start..]
                .iter()
                .position(|&v| v == FACE_SEPARATOR)
                .map_or(self.corners.len(), |k| start + k);
            self.pos = end + 1;
            if end > start {
                return Some(start..end);
            }
        }
        None
    }
}

/// Face boundaries and corner/face lookups over a borrowed corner array.
#[derive(Debug, Clone)]
pub struct FaceTable<'a, I: MeshIndex = u32> {
    num_vertices: usize,
    corners: &'a [i32],
    /// First corner of each face.
    first: Vec<usize>,
    /// Position of the separator closing each face (may equal `corners.len()`).
    end: Vec<usize>,
    _index: std::marker::PhantomData<I>,
}

impl<'a, I: MeshIndex> FaceTable<'a, I> {
    /// Scan the corner array once and record the face boundaries.
    pub fn new(num_vertices: usize, corners: &'a [i32]) -> Self {
        let (first, end) = face_loops(corners).map(|r| (r.start, r.end)).unzip();
        Self {
            num_vertices,
            corners,
            first,
            end,
            _index: std::marker::PhantomData,
        }
    }

    /// Number of vertices the corner array refers to.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of (non-empty) faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.first.len()
    }

    /// Number of corners, separators included.
    #[inline]
    pub fn num_corners(&self) -> usize {
        self.corners.len()
    }

    /// The borrowed corner array.
    #[inline]
    pub fn corners(&self) -> &'a [i32] {
        self.corners
    }

    /// Whether corner position `c` terminates a face.
    ///
    /// Positions at or past the end of the array count as separators.
    #[inline]
    pub fn is_separator(&self, c: usize) -> bool {
        self.corners.get(c).map_or(true, |&v| v == FACE_SEPARATOR)
    }

    /// Number of corners of a face; `0` past the last face.
    pub fn face_size(&self, f: FaceId<I>) -> usize {
        match f.get() {
            Some(i) if i < self.num_faces() => self.end[i] - self.first[i],
            _ => 0,
        }
    }

    /// First corner of a face.
    pub fn face_first_corner(&self, f: FaceId<I>) -> CornerId<I> {
        match f.get() {
            Some(i) if i < self.num_faces() => CornerId::new(self.first[i]),
            _ => CornerId::invalid(),
        }
    }

    /// The `j`-th vertex of a face.
    pub fn face_vertex(&self, f: FaceId<I>, j: usize) -> VertexId<I> {
        if j >= self.face_size(f) {
            return VertexId::invalid();
        }
        self.vertex_at(self.face_first_corner(f).index() + j)
    }

    /// Iterate over the corners of a face in boundary order.
    pub fn face_corners(&self, f: FaceId<I>) -> impl Iterator<Item = CornerId<I>> + '_ {
        let first = self.face_first_corner(f).get().unwrap_or(0);
        (first..first + self.face_size(f)).map(CornerId::new)
    }

    /// The face a corner belongs to, found by binary search.
    ///
    /// Separators and out-of-range corners yield an invalid face.
    pub fn corner_face(&self, c: CornerId<I>) -> FaceId<I> {
        let Some(c) = c.get() else {
            return FaceId::invalid();
        };
        if self.is_separator(c) {
            return FaceId::invalid();
        }
        // Number of faces starting at or before `c`
        let n = self.first.partition_point(|&start| start <= c);
        if n == 0 || c >= self.end[n - 1] {
            return FaceId::invalid();
        }
        FaceId::new(n - 1)
    }

    /// The corner following `c` in its face, wrapping to the first corner.
    pub fn next_corner(&self, c: CornerId<I>) -> CornerId<I> {
        let Some(i) = c.get() else {
            return CornerId::invalid();
        };
        if self.is_separator(i) {
            return CornerId::invalid();
        }
        if !self.is_separator(i + 1) {
            return CornerId::new(i + 1);
        }
        self.face_first_corner(self.corner_face(c))
    }

    /// The vertex stored at a corner position, invalid for separators.
    pub(crate) fn vertex_at(&self, c: usize) -> VertexId<I> {
        match self.corners.get(c) {
            Some(&v) if v >= 0 && (v as usize) < self.num_vertices => VertexId::new(v as usize),
            _ => VertexId::invalid(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TRIANGLES: [i32; 8] = [0, 1, 2, -1, 1, 3, 2, -1];

    fn c(i: usize) -> CornerId {
        CornerId::new(i)
    }

    fn f(i: usize) -> FaceId {
        FaceId::new(i)
    }

    #[test]
    fn test_face_boundaries() {
        let faces = FaceTable::<u32>::new(4, &TWO_TRIANGLES);
        assert_eq!(faces.num_faces(), 2);
        assert_eq!(faces.num_corners(), 8);
        assert_eq!(faces.face_size(f(0)), 3);
        assert_eq!(faces.face_size(f(1)), 3);
        assert_eq!(faces.face_first_corner(f(1)), c(4));
        assert_eq!(faces.face_vertex(f(1), 1), VertexId::new(3));
    }

    #[test]
    fn test_face_size_past_end_is_zero() {
        let faces = FaceTable::<u32>::new(4, &TWO_TRIANGLES);
        let mut n = 0;
        while faces.face_size(f(n)) > 0 {
            n += 1;
        }
        assert_eq!(n, 2);
        assert_eq!(faces.face_size(FaceId::invalid()), 0);
        assert!(!faces.face_first_corner(f(2)).is_valid());
        assert!(!faces.face_vertex(f(0), 3).is_valid());
    }

    #[test]
    fn test_corner_face() {
        let faces = FaceTable::<u32>::new(4, &TWO_TRIANGLES);
        let expected = [Some(0), Some(0), Some(0), None, Some(1), Some(1), Some(1), None];
        for (i, &e) in expected.iter().enumerate() {
            assert_eq!(faces.corner_face(c(i)).get(), e, "corner {}", i);
        }
        assert!(!faces.corner_face(c(100)).is_valid());
    }

    #[test]
    fn test_next_corner_wraps() {
        let faces = FaceTable::<u32>::new(4, &TWO_TRIANGLES);
        assert_eq!(faces.next_corner(c(0)), c(1));
        assert_eq!(faces.next_corner(c(2)), c(0));
        assert_eq!(faces.next_corner(c(6)), c(4));
        assert!(!faces.next_corner(c(3)).is_valid());
    }

    #[test]
    fn test_missing_trailing_separator() {
        let corners = [0, 1, 2, -1, 2, 1, 3];
        let faces = FaceTable::<u32>::new(4, &corners);
        assert_eq!(faces.num_faces(), 2);
        assert_eq!(faces.face_size(f(1)), 3);
        assert_eq!(faces.next_corner(c(6)), c(4));
        assert_eq!(faces.corner_face(c(6)), f(1));
    }

    #[test]
    fn test_empty_runs_are_skipped() {
        let corners = [-1, 0, 1, 2, -1, -1, 0, 2, 3, -1];
        let faces = FaceTable::<u32>::new(4, &corners);
        assert_eq!(faces.num_faces(), 2);
        assert_eq!(faces.face_first_corner(f(0)), c(1));
        assert_eq!(faces.face_first_corner(f(1)), c(6));
        assert!(!faces.corner_face(c(5)).is_valid());
        assert_eq!(faces.corner_face(c(8)), f(1));

        let corners: Vec<CornerId> = faces.face_corners(f(1)).collect();
        assert_eq!(corners, vec![c(6), c(7), c(8)]);
    }

    #[test]
    fn test_empty_array() {
        let faces = FaceTable::<u32>::new(0, &[]);
        assert_eq!(faces.num_faces(), 0);
        assert_eq!(faces.face_corners(f(0)).count(), 0);
    }
}
