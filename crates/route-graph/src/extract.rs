//! GeoJSON road extraction — enabled with the `geojson` Cargo feature.
//!
//! Builds a routable graph straight from a roads GeoJSON when no
//! pre-extracted CSV tables exist.  The extraction is deliberately naive:
//! every consecutive coordinate pair of every line geometry becomes one
//! undirected edge weighted by its Euclidean length, and nodes are created
//! at segment endpoints.  Endpoint ids are derived from the coordinate
//! rounded to six decimals, so segments that share an endpoint share a node.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use route_graph::extract::extract_from_geojson;
//!
//! let graph = extract_from_geojson(Path::new("roads.geojson"))?;
//! ```
//!
//! # What is extracted
//!
//! Only `LineString` and `MultiLineString` geometries contribute edges.
//! Point/polygon features and features with null geometry are skipped.
//! Coordinates must be in the same projected CRS the route queries will use;
//! reprojection is an upstream concern.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use route_core::Point;

use crate::graph::{RoadGraph, RoadGraphBuilder};
use crate::{GraphError, GraphResult};

// ── GeoJSON records ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

/// Positions are parsed as `Vec<f64>` rather than fixed pairs because
/// GeoJSON allows a third (elevation) ordinate, which is ignored here.
#[derive(Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
    #[serde(other)]
    Other,
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Extract a road graph from a GeoJSON file.
///
/// # Errors
///
/// Returns [`GraphError::DataUnavailable`] if the file cannot be opened and
/// [`GraphError::Extract`] on malformed GeoJSON.
pub fn extract_from_geojson(path: &Path) -> GraphResult<RoadGraph> {
    let file = File::open(path).map_err(|source| GraphError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    extract_from_reader(BufReader::new(file))
}

/// Like [`extract_from_geojson`] but accepts any `Read` source.
pub fn extract_from_reader<R: Read>(reader: R) -> GraphResult<RoadGraph> {
    let collection: FeatureCollection =
        serde_json::from_reader(reader).map_err(|e| GraphError::Extract(e.to_string()))?;

    let mut builder = RoadGraphBuilder::new();
    for feature in &collection.features {
        match &feature.geometry {
            Some(Geometry::LineString { coordinates }) => {
                add_line(&mut builder, coordinates)?;
            }
            Some(Geometry::MultiLineString { coordinates }) => {
                for line in coordinates {
                    add_line(&mut builder, line)?;
                }
            }
            _ => {}
        }
    }

    log::debug!(
        "extracted {} nodes and {} half-edges from {} features",
        builder.node_count(),
        builder.edge_count(),
        collection.features.len()
    );

    Ok(builder.build())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn add_line(builder: &mut RoadGraphBuilder, coords: &[Vec<f64>]) -> GraphResult<()> {
    for pair in coords.windows(2) {
        let a = position(&pair[0])?;
        let b = position(&pair[1])?;
        let ida = endpoint_id(a);
        let idb = endpoint_id(b);
        builder.add_node(&ida, a);
        builder.add_node(&idb, b);
        builder.add_edge(&ida, &idb, a.distance(b));
    }
    Ok(())
}

/// Node id for a segment endpoint: the coordinate rounded to six decimals,
/// so coincident endpoints of different segments merge into one node.
fn endpoint_id(p: Point) -> String {
    format!("n{:.6}_{:.6}", p.x, p.y)
}

fn position(raw: &[f64]) -> GraphResult<Point> {
    if raw.len() < 2 {
        return Err(GraphError::Extract(format!(
            "position has {} ordinates, expected at least 2",
            raw.len()
        )));
    }
    Ok(Point::new(raw[0], raw[1]))
}
