//! `route-core` — foundational types for the route-query engine.
//!
//! This crate is a dependency of every other `route-*` crate.  It
//! intentionally has no `route-*` dependencies and no required external ones
//! (only optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                |
//! |----------|-----------------------------------------|
//! | [`ids`]  | `NodeId`, `EdgeId`                      |
//! | [`geo`]  | `Point`, Euclidean distance             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::Point;
pub use ids::{EdgeId, NodeId};
