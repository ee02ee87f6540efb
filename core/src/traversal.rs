use std::collections::{HashMap, VecDeque};

use tracing::trace;

use crate::config::DfsStrategy;
use crate::error::{Result, Violation};
use crate::exploration::ExplorationState;
use crate::vertex::VertexId;

/// Read-only view the exploration algorithms need: which vertices exist,
/// in what order, and who their neighbors are.
pub trait Traversable {
    fn contains_vertex(&self, id: VertexId) -> bool;

    fn vertex_count(&self) -> usize;

    /// All vertex ids in collection order.
    fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_;

    /// Neighbor ids of `id` in adjacency order. Empty for unknown ids.
    fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_;
}

fn require<G: Traversable>(graph: &G, id: VertexId) -> Result<()> {
    if graph.contains_vertex(id) {
        Ok(())
    } else {
        Err(Violation::VertexNotFound(id).into())
    }
}

/// Breadth-first traversal from `source`.
///
/// Returns every vertex reachable from `source` in discovery order, source
/// first. The result is exactly the source's connected component.
pub fn bfs<G: Traversable>(graph: &G, source: VertexId) -> Result<Vec<VertexId>> {
    require(graph, source)?;

    let mut state = ExplorationState::new();
    let order = bfs_from(graph, source, &mut state);
    trace!(source, discovered = order.len(), "bfs complete");
    Ok(order)
}

/// BFS against a caller-owned state. Vertices are marked when enqueued so
/// none is queued twice; already-explored vertices are never revisited.
fn bfs_from<G: Traversable>(
    graph: &G,
    source: VertexId,
    state: &mut ExplorationState,
) -> Vec<VertexId> {
    let mut order = vec![source];
    let mut queue: VecDeque<VertexId> = VecDeque::new();

    state.explore(source, 0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        for neighbor in graph.neighbors(current) {
            if state.explore(neighbor, 0) {
                order.push(neighbor);
                queue.push_back(neighbor);
            }
        }
    }

    order
}

/// Depth-first traversal from `source`.
///
/// Returns the reachable vertices in discovery order: a vertex is recorded
/// when first reached, then its unexplored neighbors are descended into in
/// adjacency order. Both strategies yield the same order.
pub fn dfs<G: Traversable>(
    graph: &G,
    source: VertexId,
    strategy: DfsStrategy,
) -> Result<Vec<VertexId>> {
    require(graph, source)?;

    let mut state = ExplorationState::new();
    let order = dfs_from(graph, source, strategy, &mut state);
    trace!(source, ?strategy, discovered = order.len(), "dfs complete");
    Ok(order)
}

fn dfs_from<G: Traversable>(
    graph: &G,
    source: VertexId,
    strategy: DfsStrategy,
    state: &mut ExplorationState,
) -> Vec<VertexId> {
    let mut order = vec![source];
    state.explore(source, 0);

    match strategy {
        DfsStrategy::Recursive => dfs_recursive(graph, source, state, &mut order),
        DfsStrategy::Iterative => dfs_iterative(graph, source, state, &mut order),
    }

    order
}

fn dfs_recursive<G: Traversable>(
    graph: &G,
    vertex: VertexId,
    state: &mut ExplorationState,
    order: &mut Vec<VertexId>,
) {
    for neighbor in graph.neighbors(vertex) {
        if state.explore(neighbor, 0) {
            order.push(neighbor);
            dfs_recursive(graph, neighbor, state, order);
        }
    }
}

/// Stack of partially consumed neighbor iterators, one per vertex on the
/// current DFS path. Resuming the top iterator reproduces the recursive
/// visiting order exactly.
fn dfs_iterative<G: Traversable>(
    graph: &G,
    source: VertexId,
    state: &mut ExplorationState,
    order: &mut Vec<VertexId>,
) {
    let mut stack = vec![graph.neighbors(source)];

    loop {
        let next = match stack.last_mut() {
            Some(pending) => pending.next(),
            None => break,
        };

        match next {
            Some(neighbor) => {
                if state.explore(neighbor, 0) {
                    order.push(neighbor);
                    stack.push(graph.neighbors(neighbor));
                }
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// Fewest hops from `source` to `dest`.
///
/// Layered BFS with early exit: each newly discovered vertex gets
/// `layer = current.layer + 1`, and the search stops as soon as `dest` is
/// discovered. Returns `Some(0)` when `source == dest` and `None` when `dest`
/// is unreachable.
pub fn shortest_path_hops<G: Traversable>(
    graph: &G,
    source: VertexId,
    dest: VertexId,
) -> Result<Option<usize>> {
    require(graph, source)?;
    require(graph, dest)?;

    if source == dest {
        return Ok(Some(0));
    }

    let mut state = ExplorationState::new();
    let mut queue: VecDeque<VertexId> = VecDeque::new();

    state.explore(source, 0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let layer = state.layer(current).unwrap_or_default();
        for neighbor in graph.neighbors(current) {
            if state.explore(neighbor, layer + 1) {
                if neighbor == dest {
                    trace!(source, dest, hops = layer + 1, "shortest path found");
                    return Ok(Some(layer + 1));
                }
                queue.push_back(neighbor);
            }
        }
    }

    trace!(source, dest, visited = state.explored_count(), "no path");
    Ok(None)
}

/// One shortest path from `source` to `dest`, both endpoints included.
///
/// BFS storing a parent pointer per discovered vertex; the path is rebuilt
/// by walking parents back from `dest` once it is discovered.
pub fn shortest_path<G: Traversable>(
    graph: &G,
    source: VertexId,
    dest: VertexId,
) -> Result<Option<Vec<VertexId>>> {
    require(graph, source)?;
    require(graph, dest)?;

    if source == dest {
        return Ok(Some(vec![source]));
    }

    // Sentinel: the source is its own parent.
    let mut parents: HashMap<VertexId, VertexId> = HashMap::new();
    let mut queue: VecDeque<VertexId> = VecDeque::new();

    parents.insert(source, source);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        for neighbor in graph.neighbors(current) {
            if parents.contains_key(&neighbor) {
                continue;
            }
            parents.insert(neighbor, current);

            if neighbor == dest {
                return Ok(Some(reconstruct_path(&parents, source, dest)));
            }
            queue.push_back(neighbor);
        }
    }

    Ok(None)
}

fn reconstruct_path(
    parents: &HashMap<VertexId, VertexId>,
    source: VertexId,
    dest: VertexId,
) -> Vec<VertexId> {
    let mut path = vec![dest];
    let mut current = dest;

    while current != source {
        current = parents[&current];
        path.push(current);
    }

    path.reverse();
    path
}

/// Number of connected components, discovering each with BFS.
///
/// Vertices are scanned in collection order; each one not yet explored by an
/// earlier run starts a new component.
pub fn count_connected_components_bfs<G: Traversable>(graph: &G) -> usize {
    let mut state = ExplorationState::with_capacity(graph.vertex_count());
    let mut count = 0;

    for id in graph.vertex_ids() {
        if !state.is_explored(id) {
            bfs_from(graph, id, &mut state);
            count += 1;
        }
    }

    trace!(components = count, "bfs component count");
    count
}

/// Number of connected components, discovering each with DFS. Always equal
/// to [`count_connected_components_bfs`].
pub fn count_connected_components_dfs<G: Traversable>(
    graph: &G,
    strategy: DfsStrategy,
) -> usize {
    let mut state = ExplorationState::with_capacity(graph.vertex_count());
    let mut count = 0;

    for id in graph.vertex_ids() {
        if !state.is_explored(id) {
            dfs_from(graph, id, strategy, &mut state);
            count += 1;
        }
    }

    trace!(components = count, ?strategy, "dfs component count");
    count
}

/// All connected components. Each is listed in BFS discovery order from its
/// first vertex in collection order; components appear in that same order.
pub fn connected_components<G: Traversable>(graph: &G) -> Vec<Vec<VertexId>> {
    let mut state = ExplorationState::with_capacity(graph.vertex_count());
    let mut components = Vec::new();

    for id in graph.vertex_ids() {
        if !state.is_explored(id) {
            components.push(bfs_from(graph, id, &mut state));
        }
    }

    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::Graph;

    fn make_graph(vertices: impl IntoIterator<Item = VertexId>, edges: &[(VertexId, VertexId)]) -> Graph {
        let mut g = Graph::new();
        for v in vertices {
            g.add_vertex(v).unwrap();
        }
        for &(a, b) in edges {
            g.add_edge(a, b).unwrap();
        }
        g
    }

    fn make_chain(n: VertexId) -> Graph {
        let edges: Vec<_> = (0..n - 1).map(|i| (i, i + 1)).collect();
        make_graph(0..n, &edges)
    }

    fn make_star(leaves: VertexId) -> Graph {
        let edges: Vec<_> = (1..=leaves).map(|i| (0, i)).collect();
        make_graph(0..=leaves, &edges)
    }

    fn make_cycle(n: VertexId) -> Graph {
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        make_graph(0..n, &edges)
    }

    /// {1,2,3,4} with edges (1,2), (2,3); vertex 4 isolated.
    fn make_path_and_island() -> Graph {
        make_graph(1..=4, &[(1, 2), (2, 3)])
    }

    // --- BFS tests ---

    #[test]
    fn test_bfs_scenario() {
        let g = make_path_and_island();
        assert_eq!(bfs(&g, 1).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_bfs_chain() {
        let g = make_chain(6);
        assert_eq!(bfs(&g, 0).unwrap(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(bfs(&g, 3).unwrap(), vec![3, 2, 4, 1, 5, 0]);
    }

    #[test]
    fn test_bfs_star() {
        let g = make_star(100);
        let order = bfs(&g, 0).unwrap();
        assert_eq!(order.len(), 101);
        assert_eq!(order[0], 0);
        assert_eq!(order[1..], (1..=100i64).collect::<Vec<_>>()[..]);
    }

    #[test]
    fn test_bfs_cycle_no_infinite_loop() {
        let g = make_cycle(5);
        assert_eq!(bfs(&g, 0).unwrap(), vec![0, 1, 4, 2, 3]);
    }

    #[test]
    fn test_bfs_isolated_source() {
        let g = make_path_and_island();
        assert_eq!(bfs(&g, 4).unwrap(), vec![4]);
    }

    #[test]
    fn test_bfs_source_not_in_graph() {
        let g = make_chain(3);
        assert_eq!(
            bfs(&g, 999),
            Err(GraphError::InvalidArgument(Violation::VertexNotFound(999)))
        );
    }

    #[test]
    fn test_bfs_repeated_calls_do_not_leak_state() {
        let g = make_chain(4);
        let first = bfs(&g, 0).unwrap();
        let second = bfs(&g, 0).unwrap();
        assert_eq!(first, second);
        assert_eq!(count_connected_components_bfs(&g), 1);
        assert_eq!(bfs(&g, 2).unwrap().len(), 4);
    }

    // --- DFS tests ---

    #[test]
    fn test_dfs_order() {
        // 0 - 1 - 3
        // |
        // 2
        let g = make_graph(0..4, &[(0, 1), (0, 2), (1, 3)]);
        assert_eq!(dfs(&g, 0, DfsStrategy::Recursive).unwrap(), vec![0, 1, 3, 2]);
        assert_eq!(dfs(&g, 0, DfsStrategy::Iterative).unwrap(), vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_dfs_strategies_agree_on_cycle() {
        let g = make_graph(0..6, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)]);
        for source in 0..6 {
            assert_eq!(
                dfs(&g, source, DfsStrategy::Recursive).unwrap(),
                dfs(&g, source, DfsStrategy::Iterative).unwrap()
            );
        }
    }

    #[test]
    fn test_dfs_long_chain_iterative() {
        let g = make_chain(200_000);
        let order = dfs(&g, 0, DfsStrategy::Iterative).unwrap();
        assert_eq!(order.len(), 200_000);
        assert_eq!(order.last(), Some(&199_999));
    }

    #[test]
    fn test_dfs_source_not_in_graph() {
        let g = Graph::new();
        assert!(dfs(&g, 1, DfsStrategy::Iterative).is_err());
    }

    // --- Shortest path tests ---

    #[test]
    fn test_hops_scenario() {
        let g = make_path_and_island();
        assert_eq!(shortest_path_hops(&g, 1, 3).unwrap(), Some(2));
        assert_eq!(shortest_path_hops(&g, 3, 1).unwrap(), Some(2));
    }

    #[test]
    fn test_hops_self() {
        let g = make_path_and_island();
        assert_eq!(shortest_path_hops(&g, 2, 2).unwrap(), Some(0));
        assert_eq!(shortest_path_hops(&g, 4, 4).unwrap(), Some(0));
    }

    #[test]
    fn test_hops_unreachable() {
        let g = make_path_and_island();
        assert_eq!(shortest_path_hops(&g, 1, 4).unwrap(), None);
        assert_eq!(shortest_path_hops(&g, 4, 1).unwrap(), None);
    }

    #[test]
    fn test_hops_takes_shortcut() {
        // chain 0..5 plus a shortcut 0-4
        let mut g = make_chain(6);
        g.add_edge(0, 4).unwrap();
        assert_eq!(shortest_path_hops(&g, 0, 5).unwrap(), Some(2));
        assert_eq!(shortest_path_hops(&g, 1, 4).unwrap(), Some(2));
    }

    #[test]
    fn test_hops_cycle() {
        let g = make_cycle(10);
        assert_eq!(shortest_path_hops(&g, 0, 5).unwrap(), Some(5));
        assert_eq!(shortest_path_hops(&g, 0, 7).unwrap(), Some(3));
    }

    #[test]
    fn test_hops_missing_vertex() {
        let g = make_chain(3);
        assert_eq!(
            shortest_path_hops(&g, 0, 42).unwrap_err().violation(),
            Violation::VertexNotFound(42)
        );
        assert_eq!(
            shortest_path_hops(&g, 42, 0).unwrap_err().violation(),
            Violation::VertexNotFound(42)
        );
    }

    #[test]
    fn test_shortest_path_chain() {
        let g = make_chain(6);
        assert_eq!(
            shortest_path(&g, 0, 5).unwrap(),
            Some(vec![0, 1, 2, 3, 4, 5])
        );
    }

    #[test]
    fn test_shortest_path_self_and_unreachable() {
        let g = make_path_and_island();
        assert_eq!(shortest_path(&g, 2, 2).unwrap(), Some(vec![2]));
        assert_eq!(shortest_path(&g, 1, 4).unwrap(), None);
    }

    #[test]
    fn test_shortest_path_length_matches_hops() {
        let mut g = make_cycle(9);
        g.add_vertex(100).unwrap();
        g.add_edge(100, 3).unwrap();
        g.add_edge(100, 7).unwrap();
        for dest in 0..9 {
            let path = shortest_path(&g, 0, dest).unwrap().unwrap();
            let hops = shortest_path_hops(&g, 0, dest).unwrap().unwrap();
            assert_eq!(path.len() - 1, hops);
            assert_eq!(path[0], 0);
            assert_eq!(*path.last().unwrap(), dest);
        }
    }

    // --- Component tests ---

    #[test]
    fn test_components_scenario() {
        let g = make_path_and_island();
        assert_eq!(count_connected_components_bfs(&g), 2);
        assert_eq!(count_connected_components_dfs(&g, DfsStrategy::Iterative), 2);
        assert_eq!(count_connected_components_dfs(&g, DfsStrategy::Recursive), 2);
        assert_eq!(connected_components(&g), vec![vec![1, 2, 3], vec![4]]);
    }

    #[test]
    fn test_components_empty_graph() {
        let g = Graph::new();
        assert_eq!(count_connected_components_bfs(&g), 0);
        assert_eq!(count_connected_components_dfs(&g, DfsStrategy::Iterative), 0);
        assert!(connected_components(&g).is_empty());
    }

    #[test]
    fn test_components_all_isolated() {
        let g = make_graph(0..7, &[]);
        assert_eq!(count_connected_components_bfs(&g), 7);
        assert_eq!(count_connected_components_dfs(&g, DfsStrategy::Recursive), 7);
    }

    #[test]
    fn test_components_order_independent() {
        // Same connectivity, vertices inserted in a different order.
        let a = make_graph([1, 2, 3, 4, 5, 6], &[(1, 2), (3, 4), (4, 5)]);
        let b = make_graph([6, 5, 4, 3, 2, 1], &[(5, 4), (2, 1), (3, 4)]);
        assert_eq!(count_connected_components_bfs(&a), 3);
        assert_eq!(count_connected_components_bfs(&b), 3);
        assert_eq!(count_connected_components_dfs(&b, DfsStrategy::Iterative), 3);
    }

    #[test]
    fn test_components_after_bridge_removed() {
        let mut g = make_chain(6);
        assert_eq!(count_connected_components_bfs(&g), 1);
        g.remove_edge(2, 3).unwrap();
        assert_eq!(count_connected_components_bfs(&g), 2);
        assert_eq!(
            connected_components(&g),
            vec![vec![0, 1, 2], vec![3, 4, 5]]
        );
        assert_eq!(shortest_path_hops(&g, 0, 5).unwrap(), None);
    }
}
