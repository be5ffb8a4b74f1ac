//! Error types for meshtopo.
//!
//! Construction is the only fallible step of the library; every query on a
//! built mesh is total and reports invalid input through sentinel values.

use thiserror::Error;

/// Result type alias using [`TopologyError`].
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors that can occur while building mesh topology.
#[derive(Error, Debug)]
pub enum TopologyError {
    /// A corner references a vertex outside `[-1, num_vertices)`.
    #[error("corner {corner} references vertex {vertex} outside [-1, {num_vertices})")]
    VertexOutOfBounds {
        /// Position of the offending corner in the flat array.
        corner: usize,
        /// The out-of-range value found at that corner.
        vertex: i64,
        /// The declared number of vertices.
        num_vertices: usize,
    },

    /// The mesh has more elements than the chosen index type can address.
    #[error("{count} {kind} do not fit in the mesh index type")]
    TooManyElements {
        /// Which kind of element overflowed ("corners", "vertices", ...).
        kind: &'static str,
        /// The number of elements requested.
        count: usize,
    },

    /// A token of a textual corner list could not be parsed.
    #[error("cannot parse token {token:?} at position {position}")]
    Parse {
        /// Zero-based position of the token in the input.
        position: usize,
        /// The offending token.
        token: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TopologyError {
    /// Create a too-many-elements error.
    pub fn too_many(kind: &'static str, count: usize) -> Self {
        TopologyError::TooManyElements { kind, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = TopologyError::VertexOutOfBounds {
            corner: 2,
            vertex: 3,
            num_vertices: 3,
        };
        assert_eq!(
            e.to_string(),
            "corner 2 references vertex 3 outside [-1, 3)"
        );

        let e = TopologyError::too_many("corners", 70_000);
        assert_eq!(e.to_string(), "70000 corners do not fit in the mesh index type");
    }
}
