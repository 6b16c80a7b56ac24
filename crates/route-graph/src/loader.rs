//! CSV graph-table loader.
//!
//! # Table formats
//!
//! The extraction pipeline emits two tables into one directory:
//!
//! ```csv
//! # nodes.csv
//! id,x,y
//! n1,0.0,0.0
//! n2,1.0,0.0
//! ```
//!
//! ```csv
//! # edges.csv
//! u,v,geom_wkt,length
//! "n1","n2","LINESTRING (0 0, 1 0)",1.0
//! ```
//!
//! Columns not named here (such as `geom_wkt`) are ignored; a missing
//! `length` column defaults every edge weight to 0.
//!
//! # Failure policy
//!
//! Loading fails on the *first* unparsable row rather than skipping it: a
//! partially loaded graph would silently return wrong routes, which is worse
//! than a service that refuses to start routing at all.  The caller (the
//! snapshot layer) converts load failure into an explicit "graph
//! unavailable" state instead of crashing the process.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use route_core::Point;

use crate::graph::{RoadGraph, RoadGraphBuilder};
use crate::{GraphError, GraphResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id: String,
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    u: String,
    v: String,
    #[serde(default)]
    length: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`RoadGraph`] from `nodes.csv` and `edges.csv` in `dir`.
///
/// # Errors
///
/// - [`GraphError::DataUnavailable`] if either table cannot be opened.
/// - [`GraphError::MalformedRow`] on the first row that fails to parse.
pub fn load_graph(dir: &Path) -> GraphResult<RoadGraph> {
    let nodes = open_table(&dir.join("nodes.csv"))?;
    let edges = open_table(&dir.join("edges.csv"))?;
    load_graph_readers(nodes, edges)
}

/// Like [`load_graph`] but accepts any pair of `Read` sources.
///
/// Useful for testing (pass `std::io::Cursor`s) or loading from streams.
pub fn load_graph_readers<N: Read, E: Read>(nodes: N, edges: E) -> GraphResult<RoadGraph> {
    let mut builder = RoadGraphBuilder::new();

    let mut node_reader = csv::Reader::from_reader(nodes);
    for result in node_reader.deserialize::<NodeRecord>() {
        let row = result.map_err(|e| row_error("nodes.csv", &e))?;
        builder.add_node(&row.id, Point::new(row.x, row.y));
    }

    let mut edge_reader = csv::Reader::from_reader(edges);
    for result in edge_reader.deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| row_error("edges.csv", &e))?;
        builder.add_edge(&row.u, &row.v, row.length);
    }

    log::debug!(
        "parsed graph tables: {} nodes, {} half-edges",
        builder.node_count(),
        builder.edge_count()
    );

    Ok(builder.build())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open_table(path: &Path) -> GraphResult<File> {
    File::open(path).map_err(|source| GraphError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

fn row_error(table: &'static str, e: &csv::Error) -> GraphError {
    GraphError::MalformedRow {
        table,
        line: e.position().map_or(0, |p| p.line()),
        reason: e.to_string(),
    }
}
