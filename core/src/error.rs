use thiserror::Error;

use crate::edge::EdgeKey;
use crate::vertex::VertexId;

/// The contract a rejected call broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("vertex #{0} already exists")]
    DuplicateVertex(VertexId),
    #[error("vertex #{0} does not exist")]
    VertexNotFound(VertexId),
    #[error("edge endpoints are the same vertex #{0} (self-loop)")]
    SelfLoop(VertexId),
    #[error("an edge between vertex #{} and vertex #{} already exists", .0.low(), .0.high())]
    ParallelEdge(EdgeKey),
    #[error("no edge between vertex #{} and vertex #{}", .0.low(), .0.high())]
    EdgeNotFound(EdgeKey),
    #[error("edge {edge} does not involve vertex #{vertex}")]
    EdgeNotIncident { vertex: VertexId, edge: EdgeKey },
}

/// Errors returned by graph operations.
///
/// Every rejection is an invalid argument; an operation that returns an
/// error has made no change to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] Violation),
}

impl GraphError {
    /// The specific contract that was violated.
    pub fn violation(&self) -> Violation {
        match self {
            Self::InvalidArgument(v) => *v,
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
