//! Service-boundary error type.
//!
//! Three caller-visible conditions are never conflated: "graph unavailable"
//! (check the deployment), "no route" (an expected query outcome), and
//! everything else (a defect).

use std::time::Duration;

use thiserror::Error;

use route_core::NodeId;
use route_graph::GraphError;

/// Errors surfaced to route-query callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The graph never loaded, or loaded empty.  Callers should retry after
    /// the deployment is fixed; no query can succeed in this state.
    #[error("graph not loaded")]
    GraphUnavailable,

    /// No edge sequence connects the snapped endpoints.  An expected
    /// outcome for queries spanning disconnected components ("not found"),
    /// not a server fault.
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    /// The search exceeded its configured deadline.
    #[error("route search timed out after {elapsed:?}")]
    Timeout { elapsed: Duration },

    /// Unexpected failure in the graph layer.
    #[error("graph error: {0}")]
    Internal(GraphError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
