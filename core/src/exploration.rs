use std::collections::HashMap;

use crate::vertex::VertexId;

/// Per-vertex marks for a single traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mark {
    pub explored: bool,
    /// Hop distance from the traversal source. Only meaningful for
    /// vertices reached by a layered BFS.
    pub layer: usize,
}

/// Traversal-local exploration marks.
///
/// Every top-level traversal builds a fresh state, so marks from one call
/// can never leak into the next. Vertices absent from the map are
/// unexplored.
#[derive(Debug, Default)]
pub struct ExplorationState {
    marks: HashMap<VertexId, Mark>,
}

impl ExplorationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            marks: HashMap::with_capacity(capacity),
        }
    }

    pub fn is_explored(&self, id: VertexId) -> bool {
        self.marks.get(&id).is_some_and(|m| m.explored)
    }

    /// Mark `id` explored at `layer`. Returns false if it was already
    /// explored, leaving the existing mark untouched.
    pub fn explore(&mut self, id: VertexId, layer: usize) -> bool {
        let mark = self.marks.entry(id).or_default();
        if mark.explored {
            return false;
        }
        *mark = Mark {
            explored: true,
            layer,
        };
        true
    }

    pub fn layer(&self, id: VertexId) -> Option<usize> {
        self.marks
            .get(&id)
            .filter(|m| m.explored)
            .map(|m| m.layer)
    }

    pub fn explored_count(&self) -> usize {
        self.marks.values().filter(|m| m.explored).count()
    }
}
