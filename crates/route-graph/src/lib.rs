//! `route-graph` — road graph storage, nearest-node search, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`graph`]   | `RoadGraph` (interned ids + CSR), `RoadGraphBuilder`      |
//! | [`loader`]  | `load_graph` — nodes.csv / edges.csv tables               |
//! | [`locate`]  | `NearestNode` trait, `LinearScan`, `RTreeLocator`         |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`                 |
//! | [`extract`] | `extract_from_geojson` (feature = `"geojson"` only)       |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `geojson` | Enables graph extraction from a roads GeoJSON file.       |
//! | `serde`   | Propagates serde derives to the `route-core` types.       |

pub mod error;
pub mod graph;
pub mod loader;
pub mod locate;
pub mod router;

#[cfg(feature = "geojson")]
pub mod extract;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use graph::{RoadGraph, RoadGraphBuilder};
pub use loader::{load_graph, load_graph_readers};
pub use locate::{LinearScan, NearestNode, RTreeLocator, Snap};
pub use router::{DijkstraRouter, Route, Router};
