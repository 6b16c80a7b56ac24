//! The route service: snap, search, assemble.

use std::sync::Arc;

use serde::Serialize;

use route_core::Point;
use route_graph::{DijkstraRouter, GraphError, NearestNode, Router, Snap};

use crate::snapshot::{GraphSnapshot, SourceSelection};
use crate::{ServiceError, ServiceResult};

// ── Query & result ────────────────────────────────────────────────────────────

/// One route request: two raw coordinates in the graph's CRS.  Created per
/// request, discarded after the result is produced.
#[derive(Debug, Clone, Copy)]
pub struct RouteQuery {
    pub origin: Point,
    pub destination: Point,
}

/// A computed route.
///
/// `length` is the total weight the search minimized (sum of relaxed edge
/// weights), not a re-derivation from coordinates, so it stays truthful when
/// parallel edges carry weights that differ from their geometric length.
#[derive(Debug, Clone)]
pub struct RouteResult {
    /// Node positions along the path, origin side first.
    pub path: Vec<Point>,
    /// Total weight of the path.
    pub length: f64,
    /// How the origin coordinate snapped onto the graph.  Large snap
    /// distances flag low-confidence matches; thresholding is caller policy.
    pub origin_snap: Snap,
    /// How the destination coordinate snapped onto the graph.
    pub destination_snap: Snap,
}

// ── Health ────────────────────────────────────────────────────────────────────

/// Readiness summary for the health surface: queries are meaningless until
/// `graph_loaded` is true.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub graph_loaded: bool,
    pub node_count: usize,
    /// Directed half-edge entries (two per undirected edge).
    pub edge_count: usize,
    /// `true` if the graph came from a fallback source.
    pub fallback_engaged: bool,
    /// Why the graph is unavailable, when it is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ── RouteService ──────────────────────────────────────────────────────────────

/// Orchestrates route queries against an immutable [`GraphSnapshot`].
///
/// The service is read-only after construction: queries take `&self` and
/// may run on any number of threads concurrently.
pub struct RouteService<R: Router = DijkstraRouter> {
    snapshot: Arc<GraphSnapshot>,
    router: R,
}

impl RouteService<DijkstraRouter> {
    pub fn new(snapshot: Arc<GraphSnapshot>) -> Self {
        Self::with_router(snapshot, DijkstraRouter::new())
    }
}

impl<R: Router> RouteService<R> {
    /// Inject a custom shortest-path engine (e.g. a deadline-bounded
    /// [`DijkstraRouter`], or something stronger for large graphs).
    pub fn with_router(snapshot: Arc<GraphSnapshot>, router: R) -> Self {
        Self { snapshot, router }
    }

    /// Answer one route query.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::GraphUnavailable`] — no graph loaded (or nothing to
    ///   snap to); retry after deployment is fixed.
    /// - [`ServiceError::NoRoute`] — endpoints are in disconnected
    ///   components; an expected "not found" outcome.
    /// - [`ServiceError::Timeout`] — the router's deadline expired.
    pub fn route(&self, query: &RouteQuery) -> ServiceResult<RouteResult> {
        let (graph, locator) = match self.snapshot.as_ref() {
            GraphSnapshot::Ready { graph, locator, .. } => (graph, locator),
            GraphSnapshot::Unavailable { .. } => return Err(ServiceError::GraphUnavailable),
        };

        let origin_snap = locator
            .nearest(graph, query.origin)
            .ok_or(ServiceError::GraphUnavailable)?;
        let destination_snap = locator
            .nearest(graph, query.destination)
            .ok_or(ServiceError::GraphUnavailable)?;

        log::debug!(
            "query {} -> {} snapped to {} / {} (snap distances {:.3} / {:.3})",
            query.origin,
            query.destination,
            graph.external_id(origin_snap.node),
            graph.external_id(destination_snap.node),
            origin_snap.distance,
            destination_snap.distance,
        );

        let route = self
            .router
            .route(graph, origin_snap.node, destination_snap.node)
            .map_err(|e| match e {
                GraphError::NoRoute { from, to } => ServiceError::NoRoute { from, to },
                GraphError::Timeout { elapsed } => ServiceError::Timeout { elapsed },
                other => ServiceError::Internal(other),
            })?;

        let path = route.nodes.iter().map(|&n| graph.position(n)).collect();

        Ok(RouteResult {
            path,
            length: route.total_weight,
            origin_snap,
            destination_snap,
        })
    }

    /// Current readiness of the service.
    pub fn health(&self) -> Health {
        match self.snapshot.as_ref() {
            GraphSnapshot::Ready {
                graph, selection, ..
            } => Health {
                graph_loaded: true,
                node_count: graph.node_count(),
                edge_count: graph.edge_count(),
                fallback_engaged: matches!(selection, SourceSelection::Fallback { .. }),
                reason: None,
            },
            GraphSnapshot::Unavailable { reason } => Health {
                graph_loaded: false,
                node_count: 0,
                edge_count: 0,
                fallback_engaged: false,
                reason: Some(reason.clone()),
            },
        }
    }
}
