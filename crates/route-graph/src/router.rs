//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The service calls routing via the [`Router`] trait, so applications can
//! swap in custom implementations (contraction hierarchies, A*) without
//! touching the rest of the engine.  The default [`DijkstraRouter`] is
//! sufficient for graphs that fit comfortably in memory.
//!
//! # Costs
//!
//! Edge weights are the `length` column of the edge table — non-negative by
//! construction (Euclidean segment lengths), which is what makes plain
//! label-setting Dijkstra with early exit correct.  [`Route::total_weight`]
//! is the sum of the weights actually relaxed during the search, so it
//! always matches the quantity the search minimized, even across parallel
//! edges whose weights disagree with their geometric length.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use route_core::{EdgeId, NodeId};

use crate::graph::RoadGraph;
use crate::{GraphError, GraphResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the node sequence from source to target
/// and the total weight minimized by the search.
#[derive(Debug, Clone)]
pub struct Route {
    /// Nodes visited in order, source first, target last.  A query with
    /// source == target yields the single-node sequence `[source]`.
    pub nodes: Vec<NodeId>,
    /// Sum of the relaxed edge weights along `nodes`.
    pub total_weight: f64,
}

impl Route {
    /// `true` if the source and target snapped to the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; concurrent queries share one
/// router instance against the immutable graph.
pub trait Router: Send + Sync {
    /// Compute the least-weight route from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NoRoute`] if the target is unreachable (an expected
    ///   outcome for disconnected components, not a defect).
    /// - [`GraphError::Timeout`] if a configured deadline expires first.
    fn route(&self, graph: &RoadGraph, from: NodeId, to: NodeId) -> GraphResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Classic label-setting Dijkstra over the CSR adjacency.
///
/// - Early exit when the target node is popped from the frontier (correct
///   for non-negative weights).
/// - Duplicate frontier entries are allowed; stale ones are skipped at pop
///   time via the recorded-distance check.
/// - Parallel edges need no special handling: both halves are relaxed when
///   their source is settled, and the cheaper one wins the distance check.
///
/// An optional deadline bounds worst-case work on pathological queries
/// (every edge reachable before the target).  When it expires the search
/// aborts with [`GraphError::Timeout`] rather than returning a partial path.
pub struct DijkstraRouter {
    deadline: Option<Duration>,
}

impl DijkstraRouter {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Abort any single search that runs longer than `deadline`.
    pub fn with_deadline(deadline: Duration) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }
}

impl Default for DijkstraRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Router for DijkstraRouter {
    fn route(&self, graph: &RoadGraph, from: NodeId, to: NodeId) -> GraphResult<Route> {
        dijkstra(graph, from, to, self.deadline)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// The deadline clock is only consulted once per this many settled nodes, so
/// the common fast path never touches `Instant::now`.
const DEADLINE_CHECK_INTERVAL: u32 = 1024;

/// Frontier entry ordered as a min-heap on cost (`BinaryHeap` is a max-heap,
/// so comparisons are reversed).  `NodeId` is the secondary key for
/// deterministic tie-breaking.
struct FrontierEntry {
    cost: f64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

fn dijkstra(
    graph: &RoadGraph,
    from: NodeId,
    to: NodeId,
    deadline: Option<Duration>,
) -> GraphResult<Route> {
    if from == to {
        return Ok(Route {
            nodes: vec![from],
            total_weight: 0.0,
        });
    }

    let n = graph.node_count();
    // dist[v] = best known cost to reach v.
    let mut dist = vec![f64::INFINITY; n];
    // prev_edge[v] = half-edge that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(FrontierEntry {
        cost: 0.0,
        node: from,
    });

    let started = Instant::now();
    let mut settled: u32 = 0;

    while let Some(FrontierEntry { cost, node }) = heap.pop() {
        if node == to {
            return Ok(reconstruct(graph, &prev_edge, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        settled += 1;
        if let Some(limit) = deadline {
            if settled % DEADLINE_CHECK_INTERVAL == 0 {
                let elapsed = started.elapsed();
                if elapsed > limit {
                    return Err(GraphError::Timeout { elapsed });
                }
            }
        }

        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge.index()];
            let new_cost = cost + graph.edge_weight[edge.index()];

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(FrontierEntry {
                    cost: new_cost,
                    node: neighbor,
                });
            }
        }
    }

    Err(GraphError::NoRoute { from, to })
}

fn reconstruct(graph: &RoadGraph, prev_edge: &[EdgeId], to: NodeId, total: f64) -> Route {
    let mut nodes = Vec::new();
    let mut cur = to;
    loop {
        nodes.push(cur);
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        cur = graph.edge_from[e.index()];
    }
    nodes.reverse();
    Route {
        nodes,
        total_weight: total,
    }
}
