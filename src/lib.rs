//! Last-mile tour planning core.
//!
//! Pipeline, leaves-first:
//! - [`graph`]   — C1: the road graph (intersections + one-way street segments).
//! - [`routing`] — C2: Dijkstra and A* shortest paths over C1.
//! - [`matrix`]  — C3: all-pairs leg/travel-time cache over a chosen point set.
//! - [`tsp`]     — C4: TSP-with-precedence solver (V0/V1/V2) over C3.
//! - [`fleet`]   — C5: demand clustering + per-courier tour assembly over C4.
//!
//! The crate does not parse street-plan/demand files, persist tours, render
//! anything or expose an HTTP surface — those are external collaborators.
//! Everything here is synchronous, single-threaded, and pure computation.

pub mod error;
pub mod fleet;
pub mod graph;
pub mod matrix;
pub mod model;
pub mod routing;
pub mod time;
pub mod tsp;

pub use error::{CoreError, CoreResult};
pub use fleet::FleetPlanner;
pub use graph::RoadGraph;
pub use matrix::{RouteLeg, TourPointMatrix};
pub use model::{
    Courier, CourierId, Demand, DemandId, Leg, Node, NodeId, PlanResult, PointKind, ResultCode,
    Segment, Tour, TourId, TourPoint,
};
pub use routing::{shortest_path, Algorithm, PathResult};
pub use tsp::Strategy;
