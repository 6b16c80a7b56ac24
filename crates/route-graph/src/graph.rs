//! Road graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing
//! half-edges.  Given a `NodeId n`, its outgoing half-edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_weight`) are sorted by
//! source node and indexed by `EdgeId`.  Iteration over a node's neighbors is
//! therefore a contiguous memory scan — ideal for Dijkstra's inner loop.
//!
//! # External ids
//!
//! The node table keys nodes by string id.  The builder interns those to
//! dense `NodeId`s; `RoadGraph` keeps the mapping in both directions so
//! routing works on integers while results can still name the original ids.
//!
//! # Undirected edges
//!
//! Every edge in the source table is traversable in both directions with the
//! same weight, so the builder stores two directed halves per table row.
//! Parallel edges between the same pair are kept as distinct entries.

use rustc_hash::FxHashMap;

use route_core::{EdgeId, NodeId, Point};

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Immutable road graph: interned node ids, node positions, and a CSR
/// adjacency over undirected (stored as paired directed) edges.
///
/// Adjacency fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadGraphBuilder`].
#[derive(Debug)]
pub struct RoadGraph {
    /// External (table) id of each node.  Indexed by `NodeId`.
    pub node_ids: Vec<String>,

    /// Position of each node.  [`Point::UNPLACED`] for nodes that only ever
    /// appeared as an edge endpoint (no row in the node table).
    pub node_pos: Vec<Point>,

    /// CSR row pointer.  Outgoing half-edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each half-edge.  Redundant with CSR but required for
    /// efficient route reconstruction (trace `prev_edge` back to source).
    pub edge_from: Vec<NodeId>,

    /// Destination node of each half-edge.
    pub edge_to: Vec<NodeId>,

    /// Weight of each half-edge (Euclidean length of the source segment).
    pub edge_weight: Vec<f64>,

    /// External id → NodeId lookup.
    id_lookup: FxHashMap<String, NodeId>,
}

impl RoadGraph {
    /// Construct an empty graph with no nodes or edges.
    ///
    /// Any routing or nearest-node request against an empty graph reports
    /// the graph as unavailable rather than panicking.
    pub fn empty() -> Self {
        RoadGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of directed half-edges (two per undirected table row).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing half-edges from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing half-edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    // ── Node lookups ──────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self, node: NodeId) -> Point {
        self.node_pos[node.index()]
    }

    /// External (table) id of `node`.
    #[inline]
    pub fn external_id(&self, node: NodeId) -> &str {
        &self.node_ids[node.index()]
    }

    /// Resolve an external id back to its `NodeId`.
    pub fn node_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_lookup.get(id).copied()
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts node rows and undirected edge rows in any order.
/// `build()` sorts half-edges by source node and constructs the CSR arrays.
/// Routing results are a pure function of the node/edge multiset: insertion
/// order never changes them.
///
/// # Row semantics
///
/// - A repeated node id overwrites the earlier position (last row wins).
/// - An edge endpoint with no node row is interned as an *unplaced* node:
///   it participates in pathfinding but is never matched by nearest-node
///   search.
///
/// # Example
///
/// ```
/// use route_core::Point;
/// use route_graph::RoadGraphBuilder;
///
/// let mut b = RoadGraphBuilder::new();
/// b.add_node("a", Point::new(0.0, 0.0));
/// b.add_node("b", Point::new(1.0, 0.0));
/// b.add_edge("a", "b", 1.0);
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // two directed halves
/// ```
pub struct RoadGraphBuilder {
    ids: Vec<String>,
    pos: Vec<Point>,
    lookup: FxHashMap<String, NodeId>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from: NodeId,
    to: NodeId,
    weight: f64,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            pos: Vec::new(),
            lookup: FxHashMap::default(),
            raw_edges: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes and undirected edges to
    /// reduce reallocations when bulk-loading from tables.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            ids: Vec::with_capacity(nodes),
            pos: Vec::with_capacity(nodes),
            lookup: FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            raw_edges: Vec::with_capacity(edges * 2),
        }
    }

    /// Add (or re-position) a node and return its `NodeId`.
    ///
    /// A later row for an already-seen id overwrites the stored position.
    pub fn add_node(&mut self, id: &str, pos: Point) -> NodeId {
        let node = self.intern(id);
        self.pos[node.index()] = pos;
        node
    }

    /// Add an **undirected** edge between the nodes with external ids `u`
    /// and `v`, storing both directed halves with the same weight.
    ///
    /// Endpoints that have no node row yet are interned as unplaced nodes;
    /// node existence is only enforced later, at nearest-node resolution.
    pub fn add_edge(&mut self, u: &str, v: &str, weight: f64) {
        let from = self.intern(u);
        let to = self.intern(v);
        self.raw_edges.push(RawEdge { from, to, weight });
        self.raw_edges.push(RawEdge { from: to, to: from, weight });
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.raw_edges.len()
    }

    fn intern(&mut self, id: &str) -> NodeId {
        if let Some(&node) = self.lookup.get(id) {
            return node;
        }
        let node = NodeId(self.ids.len() as u32);
        self.ids.push(id.to_owned());
        self.pos.push(Point::UNPLACED);
        self.lookup.insert(id.to_owned(), node);
        node
    }

    /// Consume the builder and produce a [`RoadGraph`].
    ///
    /// Time complexity: O(E log E) for the half-edge sort, where E = edges.
    pub fn build(self) -> RoadGraph {
        let node_count = self.ids.len();
        let edge_count = self.raw_edges.len();

        // Sort half-edges by source node for CSR construction.
        let mut raw = self.raw_edges;
        raw.sort_unstable_by_key(|e| e.from.0);

        let edge_from: Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to: Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_weight: Vec<f64> = raw.iter().map(|e| e.weight).collect();

        // Build CSR row pointer (node_out_start).
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        RoadGraph {
            node_ids: self.ids,
            node_pos: self.pos,
            node_out_start,
            edge_from,
            edge_to,
            edge_weight,
            id_lookup: self.lookup,
        }
    }
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
