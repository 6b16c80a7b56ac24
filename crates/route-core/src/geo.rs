//! Planar coordinate type.
//!
//! Graph tables arrive already projected, so coordinates are plain `(x, y)`
//! pairs in whatever CRS the extraction pipeline produced — no geodesy here.
//! `f64` matches the double-precision floats of the source tables.

/// A 2-D planar coordinate in the graph's coordinate reference system.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Sentinel position for nodes that were referenced by an edge but never
    /// appeared in the node table.  NaN coordinates lose every distance
    /// comparison, so unplaced nodes are invisible to nearest-node search.
    pub const UNPLACED: Point = Point {
        x: f64::NAN,
        y: f64::NAN,
    };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.  NaN if either point is unplaced.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// `true` if this point has real coordinates (not the `UNPLACED` sentinel).
    #[inline]
    pub fn is_placed(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}
