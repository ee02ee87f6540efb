//! ugraph-core: In-memory simple undirected graph.
//!
//! Maintains an adjacency list under vertex/edge insertion and removal and
//! provides breadth-first and depth-first exploration, shortest path by hop
//! count, and connected-component counting. No I/O, no threads.
//!
//! Self-loops and parallel edges are rejected at the mutation layer, so
//! every graph this crate builds is simple.

mod config;
mod edge;
mod error;
mod exploration;
mod graph;
mod traversal;
mod vertex;

pub use config::{DfsStrategy, GraphConfig};
pub use edge::{Edge, EdgeKey};
pub use error::{GraphError, Result, Violation};
pub use exploration::{ExplorationState, Mark};
pub use graph::{Graph, GraphSnapshot};
pub use traversal::{
    bfs, connected_components, count_connected_components_bfs, count_connected_components_dfs,
    dfs, shortest_path, shortest_path_hops, Traversable,
};
pub use vertex::{Vertex, VertexId};
