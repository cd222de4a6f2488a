//! Data model (§3): Node, Segment, Demand, TourPoint, Leg, Tour, Courier.
//!
//! [`crate::graph::RoadGraph`] owns [`Node`] and [`Segment`] storage; the
//! types below are the value types handed across the crate's public API and
//! are all `Serialize`/`Deserialize` so a caller can ship them across the
//! boundary described in §6 without this crate doing any parsing itself.

use serde::{Deserialize, Serialize};

macro_rules! newtype_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

newtype_id!(NodeId);
newtype_id!(DemandId);
newtype_id!(CourierId);
newtype_id!(TourId);

/// A map intersection (§3). Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

/// A directed street edge (§3). Bidirectional streets are two opposite
/// segments; `RoadGraph` treats every segment as traversable in both
/// directions regardless (§4.1), but the segment itself records a single
/// direction, matching how it was ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub origin: NodeId,
    pub destination: NodeId,
    pub street_name: String,
    pub length_m: f64,
}

/// A pickup-delivery transport request (§3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    pub id: DemandId,
    pub pickup_node: NodeId,
    pub delivery_node: NodeId,
    pub pickup_duration_s: u64,
    pub delivery_duration_s: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PointKind {
    Warehouse,
    Pickup,
    Delivery,
}

/// A visit instance (§3): the warehouse, a pickup, or a delivery.
///
/// `related` is an index into the same slice of `TourPoint`s this point was
/// built with (the arena-of-TourPoints design from §9's Design Notes,
/// option (a)) — `None` for the warehouse, `Some(index of the paired
/// delivery/pickup)` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TourPoint {
    pub node: NodeId,
    pub service_duration_s: u64,
    pub kind: PointKind,
    pub demand: Option<DemandId>,
    pub related: Option<usize>,
}

impl TourPoint {
    pub fn warehouse(node: NodeId) -> Self {
        TourPoint {
            node,
            service_duration_s: 0,
            kind: PointKind::Warehouse,
            demand: None,
            related: None,
        }
    }
}

/// A routed hop between two consecutive tour stops (§3).
///
/// `nodes[0] == origin.node`, `nodes[last] == destination.node`, and
/// `distance_m == segments.iter().map(|s| s.length_m).sum()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub origin: TourPoint,
    pub destination: TourPoint,
    pub nodes: Vec<NodeId>,
    pub segments: Vec<Segment>,
    pub distance_m: f64,
    pub travel_time_s: u64,
}

/// A stable courier identity; never mutated by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Courier {
    pub id: CourierId,
    pub name: String,
}

/// A completed per-courier plan (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: TourId,
    pub departure_time: String,
    pub courier: Option<Courier>,
    pub stops: Vec<TourPoint>,
    pub legs: Vec<Leg>,
    pub total_distance_m: f64,
    pub total_duration_s: u64,
}

impl Tour {
    /// Recomputes the cached totals from `legs`/`stops` (§3, §8 P12).
    pub fn recompute_totals(&mut self) {
        self.total_distance_m = self.legs.iter().map(|l| l.distance_m).sum();
        let leg_time: u64 = self.legs.iter().map(|l| l.travel_time_s).sum();
        let service_time: u64 = self.stops.iter().map(|s| s.service_duration_s).sum();
        self.total_duration_s = leg_time + service_time;
    }
}

/// Fleet planning outcome (§6). Discriminants are preserved bit-for-bit for
/// wire compatibility: `Ok = 0`, `Error = 1`, `WorkdayExceeded = 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ResultCode {
    Ok = 0,
    Error = 1,
    WorkdayExceeded = 2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub code: ResultCode,
    pub tours: Vec<Tour>,
}
