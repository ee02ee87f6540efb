//! Construction-time settings for [`Graph`](crate::Graph).

use serde::{Deserialize, Serialize};

/// How depth-first traversal walks the graph.
///
/// Both strategies discover vertices in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DfsStrategy {
    /// Explicit stack. Depth limited only by memory.
    #[default]
    Iterative,
    /// Native recursion. Call-stack depth grows with the longest simple
    /// path explored, so keep this to small or shallow graphs.
    Recursive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Expected number of vertices (preallocation hint).
    pub vertex_capacity: usize,
    /// Expected number of edges (preallocation hint).
    pub edge_capacity: usize,
    pub dfs_strategy: DfsStrategy,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            vertex_capacity: 0,
            edge_capacity: 0,
            dfs_strategy: DfsStrategy::Iterative,
        }
    }
}

impl GraphConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn vertex_capacity(mut self, capacity: usize) -> Self {
        self.vertex_capacity = capacity;
        self
    }

    #[must_use]
    pub const fn edge_capacity(mut self, capacity: usize) -> Self {
        self.edge_capacity = capacity;
        self
    }

    #[must_use]
    pub const fn dfs_strategy(mut self, strategy: DfsStrategy) -> Self {
        self.dfs_strategy = strategy;
        self
    }
}
