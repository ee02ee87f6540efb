use std::collections::HashSet;
use std::fmt;

use crate::edge::{Edge, EdgeKey};
use crate::error::{Result, Violation};

/// Caller-facing vertex identifier.
pub type VertexId = i64;

/// A vertex and its adjacency record.
///
/// `edges` keeps incident edges in the order they were added. `neighbors`
/// mirrors it as a set for O(1) parallel-edge checks. The two are updated
/// together and never disagree.
#[derive(Debug, Clone)]
pub struct Vertex {
    id: VertexId,
    edges: Vec<EdgeKey>,
    neighbors: HashSet<VertexId>,
}

impl Vertex {
    pub(crate) fn new(id: VertexId) -> Self {
        Self {
            id,
            edges: Vec::new(),
            neighbors: HashSet::new(),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Incident edges in insertion order.
    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub fn has_neighbor(&self, id: VertexId) -> bool {
        self.neighbors.contains(&id)
    }

    /// Neighbor ids in adjacency order.
    pub fn neighbors(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.edges.iter().filter_map(move |key| key.other(self.id))
    }

    /// Attach `edge` to this vertex.
    ///
    /// Rejects edges that don't touch this vertex and edges to a neighbor
    /// this vertex is already connected to.
    pub(crate) fn add_edge(&mut self, edge: &Edge) -> Result<()> {
        let neighbor = self.neighbor_across(edge)?;
        if self.neighbors.contains(&neighbor) {
            return Err(Violation::ParallelEdge(edge.key()).into());
        }

        self.edges.push(edge.key());
        self.neighbors.insert(neighbor);
        Ok(())
    }

    /// Detach `edge` from this vertex.
    pub(crate) fn remove_edge(&mut self, edge: &Edge) -> Result<()> {
        let neighbor = self.neighbor_across(edge)?;
        if !self.neighbors.contains(&neighbor) {
            return Err(Violation::EdgeNotFound(edge.key()).into());
        }

        let key = edge.key();
        self.edges.retain(|k| *k != key);
        self.neighbors.remove(&neighbor);
        Ok(())
    }

    /// The edge connecting this vertex and `neighbor`, by linear scan of the
    /// adjacency sequence.
    pub fn edge_to_neighbor(&self, neighbor: VertexId) -> Option<EdgeKey> {
        self.edges
            .iter()
            .find(|key| key.other(self.id) == Some(neighbor))
            .copied()
    }

    fn neighbor_across(&self, edge: &Edge) -> Result<VertexId> {
        edge.neighbor_of(self.id).ok_or_else(|| {
            Violation::EdgeNotIncident {
                vertex: self.id,
                edge: edge.key(),
            }
            .into()
        })
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex #{}, neighbors: [", self.id)?;
        for (i, n) in self.neighbors().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "#{}", n)?;
        }
        f.write_str("]")
    }
}
