//! `route-service` — query orchestration over an immutable graph snapshot.
//!
//! # Query flow
//!
//! ```text
//! RouteQuery { origin, destination }
//!   ① snap     — resolve each coordinate to its nearest graph node
//!   ② search   — Dijkstra between the snapped nodes
//!   ③ assemble — node positions along the path + total weight
//! ```
//!
//! The graph is loaded **once**, before any query, into a [`GraphSnapshot`]
//! published behind an `Arc`.  Load failure is a representable value
//! (`GraphSnapshot::Unavailable`), never a crash: the process stays up to
//! answer health checks and rejects queries with a distinguishable
//! condition.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`snapshot`] | `GraphSource`, `SourceSelection`, `GraphSnapshot`       |
//! | [`service`]  | `RouteService`, `RouteQuery`, `RouteResult`, `Health`   |
//! | [`response`] | GeoJSON `Feature` rendering of a route                  |
//! | [`error`]    | `ServiceError`, `ServiceResult<T>`                      |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `geojson` | Adds `GraphSource::GeoJson` (on-the-fly extraction).    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use route_core::Point;
//! use route_service::{GraphSnapshot, GraphSource, RouteQuery, RouteService};
//!
//! let snapshot = Arc::new(GraphSnapshot::load(&[
//!     GraphSource::CsvTables("/data/graph".into()),
//! ]));
//! let service = RouteService::new(snapshot);
//! let result = service.route(&RouteQuery {
//!     origin: Point::new(352_917.0, 4_509_332.0),
//!     destination: Point::new(353_240.0, 4_509_801.0),
//! })?;
//! ```

pub mod error;
pub mod response;
pub mod service;
pub mod snapshot;


pub use error::{ServiceError, ServiceResult};
pub use response::RouteFeature;
pub use service::{Health, RouteQuery, RouteResult, RouteService};
pub use snapshot::{GraphSnapshot, GraphSource, SourceSelection};
