use std::time::Instant;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use ugraph_core::{DfsStrategy, Graph, GraphConfig, VertexId};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let json = match args.iter().position(|a| a == "--json") {
        Some(idx) => {
            args.remove(idx);
            true
        }
        None => false,
    };

    let mode = args.first().map(|s| s.as_str()).unwrap_or("all");
    let vertex_count: i64 = match args.get(1) {
        Some(s) => s
            .parse()
            .with_context(|| format!("invalid vertex_count '{}'", s))?,
        None => 200_000,
    };

    if mode == "help" || mode == "--help" {
        println!("Usage: ugraph-bench [mode] [vertex_count] [--json]");
        println!();
        println!("Modes:");
        println!("  all       Run all generators and benchmark each (default)");
        println!("  chain     Single long path (deepest DFS)");
        println!("  tree      Ternary tree (shallow, wide)");
        println!("  random    Erdos-Renyi uniform random edges");
        println!("  barbell   Two dense clusters connected by a thin bridge");
        println!("  islands   Many small disconnected components");
        println!();
        println!("Default vertex_count: 200000");
        return Ok(());
    }

    if vertex_count < 2 {
        bail!("vertex_count must be at least 2, got {}", vertex_count);
    }

    let generators: Vec<(&str, fn(i64) -> Result<Generated>)> = match mode {
        "chain" => vec![("Chain", gen_chain)],
        "tree" => vec![("Ternary tree", gen_tree)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "islands" => vec![("Islands", gen_islands)],
        "all" => vec![
            ("Chain", gen_chain as fn(i64) -> Result<Generated>),
            ("Ternary tree", gen_tree),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
            ("Islands", gen_islands),
        ],
        _ => bail!("unknown mode: {}. Use --help for options.", mode),
    };

    let mut reports = Vec::with_capacity(generators.len());
    for (name, generator) in generators {
        let report = run_benchmark(name, generator, vertex_count)?;
        if !json {
            print_report(&report);
        }
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

/// A generated graph plus how many random edges the graph refused
/// (duplicates of an existing pair).
struct Generated {
    graph: Graph,
    rejected_edges: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    name: String,
    vertices: usize,
    edges: usize,
    rejected_edges: usize,
    generate_ms: f64,
    bfs_ms: f64,
    bfs_reached: usize,
    dfs_ms: f64,
    dfs_reached: usize,
    hops_ms: f64,
    hops_to_last: Option<usize>,
    components_bfs_ms: f64,
    components_dfs_ms: f64,
    components: usize,
}

fn millis(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(
    name: &str,
    generator: fn(i64) -> Result<Generated>,
    vertex_count: i64,
) -> Result<Report> {
    info!(name, vertex_count, "generating");

    let t = Instant::now();
    let Generated {
        graph,
        rejected_edges,
    } = generator(vertex_count)?;
    let generate_ms = millis(t);

    let first = graph.vertices().next().map(|v| v.id()).context("empty graph")?;
    let last = graph.vertices().last().map(|v| v.id()).context("empty graph")?;

    let t = Instant::now();
    let bfs_reached = graph.bfs(first)?.len();
    let bfs_ms = millis(t);

    let t = Instant::now();
    let dfs_reached = graph.dfs(first)?.len();
    let dfs_ms = millis(t);

    let t = Instant::now();
    let hops_to_last = graph.shortest_path_hops(first, last)?;
    let hops_ms = millis(t);

    let t = Instant::now();
    let components = graph.count_connected_components_bfs();
    let components_bfs_ms = millis(t);

    let t = Instant::now();
    let by_dfs = graph.count_connected_components_dfs();
    let components_dfs_ms = millis(t);

    if components != by_dfs {
        bail!(
            "{}: component counts disagree (bfs {}, dfs {})",
            name,
            components,
            by_dfs
        );
    }
    debug!(name, components, "component counts agree");

    Ok(Report {
        name: name.to_string(),
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        rejected_edges,
        generate_ms,
        bfs_ms,
        bfs_reached,
        dfs_ms,
        dfs_reached,
        hops_ms,
        hops_to_last,
        components_bfs_ms,
        components_dfs_ms,
        components,
    })
}

fn print_report(r: &Report) {
    println!("--- {} ---", r.name);
    println!(
        "Generated in {:.1}ms: {} vertices, {} edges ({} duplicate edges rejected)",
        r.generate_ms, r.vertices, r.edges, r.rejected_edges
    );
    println!();
    println!("{:<22} {:>12} {:>10}", "operation", "result", "time");
    println!("{:-<22} {:->12} {:->10}", "", "", "");
    println!("{:<22} {:>12} {:>8.1}ms", "bfs", r.bfs_reached, r.bfs_ms);
    println!("{:<22} {:>12} {:>8.1}ms", "dfs", r.dfs_reached, r.dfs_ms);
    let hops = r
        .hops_to_last
        .map_or_else(|| "unreachable".to_string(), |h| h.to_string());
    println!("{:<22} {:>12} {:>8.1}ms", "hops first -> last", hops, r.hops_ms);
    println!(
        "{:<22} {:>12} {:>8.1}ms",
        "components (bfs)", r.components, r.components_bfs_ms
    );
    println!(
        "{:<22} {:>12} {:>8.1}ms",
        "components (dfs)", r.components, r.components_dfs_ms
    );
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: i64) -> i64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as i64
    }
}

fn with_vertices(vertex_count: i64, edge_capacity: usize) -> Result<Graph> {
    let config = GraphConfig::new()
        .vertex_capacity(vertex_count as usize)
        .edge_capacity(edge_capacity)
        .dfs_strategy(DfsStrategy::Iterative);
    let mut graph = Graph::with_config(config);
    for id in 0..vertex_count {
        graph.add_vertex(id)?;
    }
    Ok(graph)
}

/// Add an edge that may duplicate an existing one. Returns whether the graph
/// refused it.
fn try_edge(graph: &mut Graph, a: VertexId, b: VertexId) -> bool {
    if a == b {
        return true;
    }
    graph.add_edge(a, b).is_err()
}

/// 0 - 1 - 2 - ... - n-1. Worst case for recursive DFS depth.
fn gen_chain(vertex_count: i64) -> Result<Generated> {
    let mut graph = with_vertices(vertex_count, vertex_count as usize)?;
    for id in 1..vertex_count {
        graph.add_edge(id - 1, id)?;
    }
    Ok(Generated {
        graph,
        rejected_edges: 0,
    })
}

/// Each vertex `i > 0` hangs off parent `(i - 1) / 3`.
fn gen_tree(vertex_count: i64) -> Result<Generated> {
    let mut graph = with_vertices(vertex_count, vertex_count as usize)?;
    for id in 1..vertex_count {
        graph.add_edge((id - 1) / 3, id)?;
    }
    Ok(Generated {
        graph,
        rejected_edges: 0,
    })
}

/// Erdos-Renyi: ~5 uniform random edges per vertex. Baseline topology with
/// no structure; repeated pairs are rejected by the graph.
fn gen_random(vertex_count: i64) -> Result<Generated> {
    let target_edges = vertex_count * 5;
    let mut graph = with_vertices(vertex_count, target_edges as usize)?;
    let mut rng = FastRng::new(54321);
    let mut rejected_edges = 0;

    for _ in 0..target_edges {
        let a = rng.next(vertex_count);
        let b = rng.next(vertex_count);
        if try_edge(&mut graph, a, b) {
            rejected_edges += 1;
        }
    }

    Ok(Generated {
        graph,
        rejected_edges,
    })
}

/// Barbell: two dense clusters joined by a chain of ~10 bridge vertices.
///
/// Worst case for "find path through bottleneck".
fn gen_barbell(vertex_count: i64) -> Result<Generated> {
    let bridge_len = 10i64.min(vertex_count - 2);
    let cluster = ((vertex_count - bridge_len) / 2).max(1);
    let mut graph = with_vertices(vertex_count, (cluster * 20 + bridge_len) as usize)?;
    let mut rng = FastRng::new(99999);
    let mut rejected_edges = 0;

    let b_start = cluster + bridge_len;
    for (start, len) in [(0, cluster), (b_start, vertex_count - b_start)] {
        // Spine first so each cluster is connected regardless of the draws.
        for i in 1..len {
            graph.add_edge(start + i - 1, start + i)?;
        }
        for i in 0..len {
            for _ in 0..10 {
                if try_edge(&mut graph, start + i, start + rng.next(len)) {
                    rejected_edges += 1;
                }
            }
        }
    }

    // Chain from the last vertex of A through the bridge to the first of B.
    for id in cluster..=b_start {
        if id < vertex_count && try_edge(&mut graph, id - 1, id) {
            rejected_edges += 1;
        }
    }

    Ok(Generated {
        graph,
        rejected_edges,
    })
}

/// Disjoint triangles plus leftover isolated vertices: many small
/// components.
fn gen_islands(vertex_count: i64) -> Result<Generated> {
    let mut graph = with_vertices(vertex_count, vertex_count as usize)?;
    let mut id = 0;
    while id + 2 < vertex_count {
        graph.add_edge(id, id + 1)?;
        graph.add_edge(id + 1, id + 2)?;
        graph.add_edge(id + 2, id)?;
        id += 3;
    }
    Ok(Generated {
        graph,
        rejected_edges: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_report() {
        let report = run_benchmark("chain", gen_chain, 50).unwrap();
        assert_eq!(report.vertices, 50);
        assert_eq!(report.edges, 49);
        assert_eq!(report.bfs_reached, 50);
        assert_eq!(report.dfs_reached, 50);
        assert_eq!(report.hops_to_last, Some(49));
        assert_eq!(report.components, 1);
    }

    #[test]
    fn test_islands_components() {
        let report = run_benchmark("islands", gen_islands, 10).unwrap();
        // three triangles plus vertex 9 on its own
        assert_eq!(report.components, 4);
        assert_eq!(report.hops_to_last, None);
    }

    #[test]
    fn test_barbell_connected() {
        let report = run_benchmark("barbell", gen_barbell, 200).unwrap();
        assert_eq!(report.components, 1);
        assert!(report.hops_to_last.is_some());
    }

    #[test]
    fn test_generators_deterministic() {
        let a = gen_random(500).unwrap();
        let b = gen_random(500).unwrap();
        assert_eq!(a.graph.snapshot(), b.graph.snapshot());
        assert_eq!(a.rejected_edges, b.rejected_edges);
    }
}
