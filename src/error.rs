//! Error types for the tour planning core.
//!
//! These never cross the [`crate::fleet::FleetPlanner::plan`] boundary —
//! §7 of the spec encodes fleet-level failure in `ResultCode`, not `Result`.
//! They are used by the lower components (C1–C4), whose contracts are
//! ordinary `Result`/`Option`-returning Rust APIs.

use crate::model::{DemandId, NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("segment endpoint {0:?} does not resolve to a node in the graph")]
    DanglingSegment(NodeId),

    #[error("warehouse node {0:?} is not present in the graph")]
    UnknownWarehouse(NodeId),

    #[error("demand {demand:?} has identical pickup and delivery node {node:?}")]
    DegenerateDemand { demand: DemandId, node: NodeId },

    #[error("demand {demand:?} references node {node:?}, which is not in the graph")]
    UnknownDemandNode { demand: DemandId, node: NodeId },

    #[error("no path between {from:?} and {to:?}")]
    Unreachable { from: NodeId, to: NodeId },

    #[error("tsp instance has no precedence-feasible next point")]
    InfeasibleTsp,

    #[error("fleet planning precondition failed: {0}")]
    Precondition(&'static str),
}

pub type CoreResult<T> = Result<T, CoreError>;
