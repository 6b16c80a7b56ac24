//! Nearest-node search.
//!
//! Query coordinates rarely land exactly on a graph node, so every route
//! query starts by *snapping* each endpoint to its nearest node.  The
//! [`NearestNode`] trait is the stable contract; two implementations exist:
//!
//! - [`LinearScan`] — exhaustive scan, O(n) per query.  Matches the source
//!   tables' iteration order on ties, needs no preprocessing.
//! - [`RTreeLocator`] — rstar R-tree built once per graph, O(log n) per
//!   query.  The service default for anything beyond toy graphs.
//!
//! Both return the snap distance alongside the matched node so callers can
//! flag low-confidence matches; neither applies a distance threshold — that
//! policy belongs to the caller.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use route_core::{NodeId, Point};

use crate::graph::RoadGraph;

// ── Snap ──────────────────────────────────────────────────────────────────────

/// A nearest-node match: the node and its Euclidean distance from the query
/// coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Snap {
    pub node: NodeId,
    pub distance: f64,
}

// ── NearestNode trait ─────────────────────────────────────────────────────────

/// Pluggable nearest-node search.
///
/// Returns `None` only when the graph has no placed nodes — the service
/// boundary folds that into its "graph unavailable" condition.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one locator can serve unlimited
/// concurrent queries against the immutable graph snapshot.
pub trait NearestNode: Send + Sync {
    fn nearest(&self, graph: &RoadGraph, point: Point) -> Option<Snap>;
}

// ── LinearScan ────────────────────────────────────────────────────────────────

/// Exhaustive nearest-node scan over `node_pos`.
///
/// Ties break to the first node in storage order (the strict `<` comparison
/// never replaces an equal-distance match).  Callers should not rely on tie
/// outcomes.  Unplaced nodes have NaN positions, which lose every comparison
/// and are therefore never matched.
pub struct LinearScan;

impl NearestNode for LinearScan {
    fn nearest(&self, graph: &RoadGraph, point: Point) -> Option<Snap> {
        let mut best: Option<Snap> = None;
        for (i, &pos) in graph.node_pos.iter().enumerate() {
            let distance = point.distance(pos);
            if distance.is_nan() {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(Snap {
                    node: NodeId(i as u32),
                    distance,
                });
            }
        }
        best
    }
}

// ── RTreeLocator ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[x, y]` point with the
/// associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// R-tree nearest-node index over a graph's placed nodes.
///
/// Built once per graph snapshot (O(n log n) bulk load); queries are
/// O(log n).  Same contract as [`LinearScan`] except that equidistant ties
/// are broken arbitrarily — callers should not rely on tie outcomes with
/// either implementation.
pub struct RTreeLocator {
    tree: RTree<NodeEntry>,
}

impl RTreeLocator {
    /// Bulk-load the index from all placed nodes of `graph`.
    pub fn build(graph: &RoadGraph) -> Self {
        let entries: Vec<NodeEntry> = graph
            .node_pos
            .iter()
            .enumerate()
            .filter(|(_, pos)| pos.is_placed())
            .map(|(i, pos)| NodeEntry {
                point: [pos.x, pos.y],
                id: NodeId(i as u32),
            })
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }
}

impl NearestNode for RTreeLocator {
    fn nearest(&self, _graph: &RoadGraph, point: Point) -> Option<Snap> {
        self.tree
            .nearest_neighbor(&[point.x, point.y])
            .map(|entry| Snap {
                node: entry.id,
                distance: point.distance(Point::new(entry.point[0], entry.point[1])),
            })
    }
}
