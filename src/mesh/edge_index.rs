//! Dense numbering of undirected edges.
//!
//! [`EdgeIndex`] assigns each unordered vertex pair a stable [`EdgeId`] the
//! first time the pair is inserted. Ids are dense: the `n`-th distinct pair
//! inserted receives id `n - 1`, regardless of the order of its endpoints.

use std::collections::HashMap;

use super::index::{EdgeId, MeshIndex, VertexId};

/// Map from unordered vertex pairs to dense edge ids.
#[derive(Debug, Clone)]
pub struct EdgeIndex<I: MeshIndex = u32> {
    num_vertices: usize,
    lookup: HashMap<(usize, usize), EdgeId<I>>,
    /// Endpoints of each edge, smaller vertex first.
    endpoints: Vec<(VertexId<I>, VertexId<I>)>,
}

#[inline]
fn key(v0: usize, v1: usize) -> (usize, usize) {
    if v0 <= v1 {
        (v0, v1)
    } else {
        (v1, v0)
    }
}

impl<I: MeshIndex> EdgeIndex<I> {
    /// Create an edge index with no edges over `num_vertices` vertices.
    pub fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            lookup: HashMap::new(),
            endpoints: Vec::new(),
        }
    }

    /// Number of vertices the index was created for.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of distinct edges inserted so far.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.endpoints.len()
    }

    /// Insert the edge `{v0, v1}` and return its id.
    ///
    /// If the edge already exists, its existing id is returned. Returns an
    /// invalid id if either vertex is out of range.
    pub fn insert(&mut self, v0: VertexId<I>, v1: VertexId<I>) -> EdgeId<I> {
        if !self.contains_vertex(v0) || !self.contains_vertex(v1) {
            return EdgeId::invalid();
        }
        let k = key(v0.index(), v1.index());
        let next = self.endpoints.len();
        let endpoints = &mut self.endpoints;
        *self.lookup.entry(k).or_insert_with(|| {
            endpoints.push((VertexId::new(k.0), VertexId::new(k.1)));
            EdgeId::new(next)
        })
    }

    /// Look up the edge `{v0, v1}` without inserting it.
    pub fn find(&self, v0: VertexId<I>, v1: VertexId<I>) -> EdgeId<I> {
        if !v0.is_valid() || !v1.is_valid() {
            return EdgeId::invalid();
        }
        self.lookup
            .get(&key(v0.index(), v1.index()))
            .copied()
            .unwrap_or_default()
    }

    /// The smaller endpoint of an edge.
    pub fn vertex0(&self, e: EdgeId<I>) -> VertexId<I> {
        self.endpoints(e).0
    }

    /// The larger endpoint of an edge.
    pub fn vertex1(&self, e: EdgeId<I>) -> VertexId<I> {
        self.endpoints(e).1
    }

    /// Both endpoints of an edge, smaller vertex first.
    ///
    /// Returns a pair of invalid ids for an out-of-range edge.
    fn endpoints(&self, e: EdgeId<I>) -> (VertexId<I>, VertexId<I>) {
        e.get()
            .and_then(|i| self.endpoints.get(i))
            .copied()
            .unwrap_or((VertexId::invalid(), VertexId::invalid()))
    }

    #[inline]
    fn contains_vertex(&self, v: VertexId<I>) -> bool {
        v.is_valid() && v.index() < self.num_vertices
    }
}
