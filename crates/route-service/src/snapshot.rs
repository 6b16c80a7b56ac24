//! Graph snapshot loading and typed source selection.
//!
//! The extraction pipeline normally ships pre-built CSV tables, but a
//! deployment may fall back to extracting straight from a roads GeoJSON
//! (feature `geojson`).  Rather than inferring the fallback from caught
//! failures, the selection is an explicit, observable value:
//! [`GraphSnapshot::load`] tries each configured [`GraphSource`] in order
//! and records which one engaged as a [`SourceSelection`].
//!
//! Whatever happens, `load` returns a value — a failed load becomes
//! [`GraphSnapshot::Unavailable`] so the process can still report health
//! and reject queries cleanly instead of crashing at startup.

use std::fmt;
use std::path::PathBuf;

use route_graph::{load_graph, GraphResult, RTreeLocator, RoadGraph};

// ── GraphSource ───────────────────────────────────────────────────────────────

/// One place a graph can be loaded from.
#[derive(Debug, Clone)]
pub enum GraphSource {
    /// A directory holding pre-extracted `nodes.csv` and `edges.csv` tables
    /// (the primary deployment artifact).
    CsvTables(PathBuf),

    /// A roads GeoJSON file, endpoint-split into a graph on the fly.
    #[cfg(feature = "geojson")]
    GeoJson(PathBuf),
}

impl GraphSource {
    /// Load a graph from this source.
    pub fn load(&self) -> GraphResult<RoadGraph> {
        match self {
            GraphSource::CsvTables(dir) => load_graph(dir),
            #[cfg(feature = "geojson")]
            GraphSource::GeoJson(path) => route_graph::extract::extract_from_geojson(path),
        }
    }
}

impl fmt::Display for GraphSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphSource::CsvTables(dir) => write!(f, "csv tables in {}", dir.display()),
            #[cfg(feature = "geojson")]
            GraphSource::GeoJson(path) => write!(f, "geojson at {}", path.display()),
        }
    }
}

// ── SourceSelection ───────────────────────────────────────────────────────────

/// Which configured source actually produced the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSelection {
    /// The first configured source loaded.
    Primary,
    /// A later source loaded after the primary failed; the primary's error
    /// is kept so operators can see *why* the fallback engaged.
    Fallback { primary_error: String },
}

// ── GraphSnapshot ─────────────────────────────────────────────────────────────

/// The process-wide graph state, built once before any query and immutable
/// afterwards.  Share it behind an `Arc`; concurrent readers need no locks.
pub enum GraphSnapshot {
    /// A non-empty graph plus its spatial index, ready to answer queries.
    Ready {
        graph: RoadGraph,
        locator: RTreeLocator,
        selection: SourceSelection,
    },

    /// No source yielded a usable graph.  Queries are rejected with a
    /// "graph unavailable" condition; `reason` feeds the health surface.
    Unavailable { reason: String },
}

impl GraphSnapshot {
    /// Try each source in order and publish the first usable graph.
    ///
    /// A source that loads an *empty* graph counts as failed: an empty
    /// graph can answer no query, and surfacing that at load time beats
    /// failing every request later.  Never panics and never errors — the
    /// failure mode is the `Unavailable` variant.
    pub fn load(sources: &[GraphSource]) -> GraphSnapshot {
        let mut first_error: Option<String> = None;

        for (i, source) in sources.iter().enumerate() {
            let failure = match source.load() {
                Ok(graph) if graph.is_empty() => format!("{source}: produced an empty graph"),
                Ok(graph) => {
                    log::info!(
                        "loaded graph from {source}: {} nodes, {} half-edges{}",
                        graph.node_count(),
                        graph.edge_count(),
                        if i > 0 { " (fallback)" } else { "" }
                    );
                    let locator = RTreeLocator::build(&graph);
                    let selection = match first_error.take() {
                        None => SourceSelection::Primary,
                        Some(primary_error) => SourceSelection::Fallback { primary_error },
                    };
                    return GraphSnapshot::Ready {
                        graph,
                        locator,
                        selection,
                    };
                }
                Err(e) => format!("{source}: {e}"),
            };
            log::warn!("graph source failed: {failure}");
            first_error.get_or_insert(failure);
        }

        let reason = first_error.unwrap_or_else(|| "no graph sources configured".to_owned());
        GraphSnapshot::Unavailable { reason }
    }

    /// Publish an already-built graph (in-memory construction, tests).
    ///
    /// Applies the same empty-graph rule as [`load`](Self::load).
    pub fn ready(graph: RoadGraph) -> GraphSnapshot {
        if graph.is_empty() {
            return GraphSnapshot::Unavailable {
                reason: "empty graph".to_owned(),
            };
        }
        let locator = RTreeLocator::build(&graph);
        GraphSnapshot::Ready {
            graph,
            locator,
            selection: SourceSelection::Primary,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, GraphSnapshot::Ready { .. })
    }

    /// The source selection, when a graph is loaded.
    pub fn selection(&self) -> Option<&SourceSelection> {
        match self {
            GraphSnapshot::Ready { selection, .. } => Some(selection),
            GraphSnapshot::Unavailable { .. } => None,
        }
    }
}
