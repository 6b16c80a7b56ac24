//! GeoJSON response shaping.
//!
//! Clients consume routes as a GeoJSON `Feature` carrying a `LineString`
//! geometry and a `length` property:
//!
//! ```json
//! {
//!   "type": "Feature",
//!   "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 0.0]] },
//!   "properties": { "length": 1.0 }
//! }
//! ```

use serde::Serialize;

use crate::service::RouteResult;

/// A route rendered as a GeoJSON `Feature`.  Serialize with `serde_json`
/// to produce the wire payload.
#[derive(Debug, Serialize)]
pub struct RouteFeature {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: LineString,
    properties: RouteProperties,
}

#[derive(Debug, Serialize)]
struct LineString {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Serialize)]
struct RouteProperties {
    length: f64,
}

impl RouteResult {
    /// Render this route as a GeoJSON `Feature`.
    pub fn to_feature(&self) -> RouteFeature {
        RouteFeature {
            kind: "Feature",
            geometry: LineString {
                kind: "LineString",
                coordinates: self.path.iter().map(|p| [p.x, p.y]).collect(),
            },
            properties: RouteProperties {
                length: self.length,
            },
        }
    }
}
