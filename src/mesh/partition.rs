//! Union-find over a fixed universe of elements.
//!
//! [`Partition`] starts with every element in its own singleton set. Sets are
//! merged with [`Partition::join`] and identified by the representative that
//! [`Partition::find`] returns. Storage is a flat parent/rank arena; there are
//! no pointers between elements.

/// A disjoint-set forest over the elements `0..len`.
#[derive(Debug, Clone)]
pub struct Partition {
    parent: Vec<usize>,
    rank: Vec<u8>,
    num_sets: usize,
}

impl Partition {
    /// Create `n` singleton sets.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            num_sets: n,
        }
    }

    /// Number of disjoint sets.
    #[inline]
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Find the representative of the set containing `i`.
    ///
    /// Returns `None` if `i` is outside the universe.
    pub fn find(&mut self, mut i: usize) -> Option<usize> {
        if i >= self.parent.len() {
            return None;
        }
        // Path halving
        while self.parent[i] != i {
            let grandparent = self.parent[self.parent[i]];
            self.parent[i] = grandparent;
            i = grandparent;
        }
        Some(i)
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// Returns the representative of the merged set, or `None` if either
    /// element is outside the universe.
    pub fn join(&mut self, a: usize, b: usize) -> Option<usize> {
        let ra = self.find(a)?;
        let rb = self.find(b)?;
        if ra == rb {
            return Some(ra);
        }

        self.num_sets -= 1;
        let (root, child) = match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => (rb, ra),
            std::cmp::Ordering::Greater => (ra, rb),
            std::cmp::Ordering::Equal => {
                self.rank[ra] = self.rank[ra].saturating_add(1);
                (ra, rb)
            }
        };
        self.parent[child] = root;
        Some(root)
    }
}
