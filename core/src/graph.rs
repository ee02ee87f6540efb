use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::config::GraphConfig;
use crate::edge::{Edge, EdgeKey};
use crate::error::{Result, Violation};
use crate::traversal::{self, Traversable};
use crate::vertex::{Vertex, VertexId};

/// In-memory simple undirected graph: vertex adjacency records plus the
/// edge list.
///
/// Both collections keep insertion order and are keyed for O(1) lookup.
/// Every edge is registered with exactly its two endpoints. Every mutating
/// call either succeeds with all invariants intact or fails without changing
/// anything.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: IndexMap<VertexId, Vertex>,
    edges: IndexMap<EdgeKey, Edge>,
    config: GraphConfig,
}

/// Plain-data dump of a graph: vertex ids and edge endpoints in collection
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSnapshot {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<(VertexId, VertexId)>,
}

impl Graph {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Build an empty graph, pre-allocating from the config's capacity hints.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            vertices: IndexMap::with_capacity(config.vertex_capacity),
            edges: IndexMap::with_capacity(config.edge_capacity),
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // --- Mutation ---

    pub fn add_vertex(&mut self, id: VertexId) -> Result<()> {
        if self.vertices.contains_key(&id) {
            debug!(id, "rejected duplicate vertex");
            return Err(Violation::DuplicateVertex(id).into());
        }
        self.vertices.insert(id, Vertex::new(id));
        Ok(())
    }

    /// Remove a vertex together with every edge incident to it.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<()> {
        let incident = self.vertex_or_err(id)?.edges().to_vec();
        for key in &incident {
            self.detach_edge(*key)?;
        }
        self.vertices.shift_remove(&id);
        debug!(id, edges_removed = incident.len(), "removed vertex");
        Ok(())
    }

    /// Connect two existing, distinct vertices.
    pub fn add_edge(&mut self, id1: VertexId, id2: VertexId) -> Result<()> {
        self.vertex_or_err(id1)?;
        self.vertex_or_err(id2)?;
        let edge = Edge::new(id1, id2).ok_or(Violation::SelfLoop(id1))?;

        if let Err(err) = self.attach(&edge) {
            debug!(id1, id2, %err, "rejected edge");
            return Err(err);
        }

        self.edges.insert(edge.key(), edge);
        Ok(())
    }

    /// Disconnect two vertices. Endpoint order does not matter.
    pub fn remove_edge(&mut self, id1: VertexId, id2: VertexId) -> Result<()> {
        self.vertex_or_err(id2)?;
        let key = self
            .vertex_or_err(id1)?
            .edge_to_neighbor(id2)
            .ok_or(Violation::EdgeNotFound(EdgeKey::new(id1, id2)))?;
        self.detach_edge(key)
    }

    /// Register `edge` with both endpoints, or with neither.
    fn attach(&mut self, edge: &Edge) -> Result<()> {
        self.vertex_mut(edge.end1())?.add_edge(edge)?;
        let attached = self.vertex_mut(edge.end2()).and_then(|v| v.add_edge(edge));
        if attached.is_err() {
            self.vertex_mut(edge.end1())?.remove_edge(edge)?;
        }
        attached
    }

    /// Unregister an existing edge from both endpoints and the edge list.
    fn detach_edge(&mut self, key: EdgeKey) -> Result<()> {
        let edge = *self
            .edges
            .get(&key)
            .ok_or(Violation::EdgeNotFound(key))?;
        self.vertex_mut(edge.end1())?.remove_edge(&edge)?;
        self.vertex_mut(edge.end2())?.remove_edge(&edge)?;
        self.edges.shift_remove(&key);
        Ok(())
    }

    fn vertex_or_err(&self, id: VertexId) -> Result<&Vertex> {
        self.vertices
            .get(&id)
            .ok_or_else(|| Violation::VertexNotFound(id).into())
    }

    fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex> {
        self.vertices
            .get_mut(&id)
            .ok_or_else(|| Violation::VertexNotFound(id).into())
    }

    // --- Inspection ---

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// The edge between two vertices, in either endpoint order.
    pub fn edge(&self, id1: VertexId, id2: VertexId) -> Option<&Edge> {
        self.edges.get(&EdgeKey::new(id1, id2))
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    pub fn contains_edge(&self, id1: VertexId, id2: VertexId) -> bool {
        self.edges.contains_key(&EdgeKey::new(id1, id2))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn degree(&self, id: VertexId) -> Result<usize> {
        Ok(self.vertex_or_err(id)?.degree())
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            vertices: self.vertices.keys().copied().collect(),
            edges: self.edges.values().map(|e| (e.end1(), e.end2())).collect(),
        }
    }

    /// Human-readable listing of all vertices and edges.
    pub fn show(&self) -> String {
        self.to_string()
    }

    // --- Exploration ---

    /// Vertices reachable from `source`, in BFS discovery order.
    pub fn bfs(&self, source: VertexId) -> Result<Vec<VertexId>> {
        traversal::bfs(self, source)
    }

    /// Vertices reachable from `source`, in DFS discovery order, using the
    /// configured strategy.
    pub fn dfs(&self, source: VertexId) -> Result<Vec<VertexId>> {
        traversal::dfs(self, source, self.config.dfs_strategy)
    }

    /// Hop count of a shortest path, or None if `dest` is unreachable.
    pub fn shortest_path_hops(&self, source: VertexId, dest: VertexId) -> Result<Option<usize>> {
        traversal::shortest_path_hops(self, source, dest)
    }

    /// Same as [`shortest_path_hops`](Self::shortest_path_hops) with `-1`
    /// standing in for "unreachable".
    pub fn shortest_path_hops_or_sentinel(&self, source: VertexId, dest: VertexId) -> Result<i64> {
        Ok(self
            .shortest_path_hops(source, dest)?
            .map_or(-1, |hops| hops as i64))
    }

    pub fn shortest_path(
        &self,
        source: VertexId,
        dest: VertexId,
    ) -> Result<Option<Vec<VertexId>>> {
        traversal::shortest_path(self, source, dest)
    }

    pub fn count_connected_components_bfs(&self) -> usize {
        traversal::count_connected_components_bfs(self)
    }

    pub fn count_connected_components_dfs(&self) -> usize {
        traversal::count_connected_components_dfs(self, self.config.dfs_strategy)
    }

    pub fn connected_components(&self) -> Vec<Vec<VertexId>> {
        traversal::connected_components(self)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Traversable for Graph {
    fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .get(&id)
            .into_iter()
            .flat_map(|v| v.neighbors())
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The vertices are:")?;
        for vertex in self.vertices.values() {
            writeln!(f, "{}", vertex)?;
        }
        writeln!(f, "The edges are:")?;
        for edge in self.edges.values() {
            writeln!(f, "{}", edge)?;
        }
        Ok(())
    }
}
