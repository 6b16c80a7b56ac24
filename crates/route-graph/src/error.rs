//! Graph-subsystem error type.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use route_core::NodeId;

/// Errors produced by `route-graph`.
///
/// `NoRoute` is an expected query outcome (disconnected endpoints), not a
/// defect; callers surface it as "not found" rather than a server error.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph table unavailable: {path}: {source}")]
    DataUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed row in {table} (line {line}): {reason}")]
    MalformedRow {
        table: &'static str,
        line: u64,
        reason: String,
    },

    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("route search exceeded its deadline after {elapsed:?}")]
    Timeout { elapsed: Duration },

    #[cfg(feature = "geojson")]
    #[error("GeoJSON extract error: {0}")]
    Extract(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
