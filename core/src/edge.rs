use std::fmt;

use serde::Serialize;

use crate::vertex::VertexId;

/// Normalized identity of an undirected edge: the endpoint pair sorted so
/// that `(a, b)` and `(b, a)` produce the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeKey(VertexId, VertexId);

impl EdgeKey {
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn low(&self) -> VertexId {
        self.0
    }

    pub fn high(&self) -> VertexId {
        self.1
    }

    /// Whether `id` is one of the two endpoints.
    pub fn involves(&self, id: VertexId) -> bool {
        self.0 == id || self.1 == id
    }

    /// The endpoint opposite `id`, or None if `id` is not an endpoint.
    pub fn other(&self, id: VertexId) -> Option<VertexId> {
        if self.0 == id {
            Some(self.1)
        } else if self.1 == id {
            Some(self.0)
        } else {
            None
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{#{}, #{}}}", self.0, self.1)
    }
}

/// An undirected edge between two distinct vertices.
///
/// `end1`/`end2` keep the order the caller used when adding the edge, which
/// only matters for display. Equality goes through the normalized key.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Edge {
    end1: VertexId,
    end2: VertexId,
}

impl Edge {
    /// Build an edge. Returns None for a self-loop.
    pub(crate) fn new(end1: VertexId, end2: VertexId) -> Option<Self> {
        if end1 == end2 {
            return None;
        }
        Some(Self { end1, end2 })
    }

    pub fn end1(&self) -> VertexId {
        self.end1
    }

    pub fn end2(&self) -> VertexId {
        self.end2
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.end1, self.end2)
    }

    pub fn involves(&self, id: VertexId) -> bool {
        self.end1 == id || self.end2 == id
    }

    /// The endpoint opposite `id`, or None if this edge does not touch `id`.
    pub fn neighbor_of(&self, id: VertexId) -> Option<VertexId> {
        self.key().other(id)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Edge between Vertex #{} and Vertex #{}",
            self.end1, self.end2
        )
    }
}
