//! C4: TSP-with-precedence solver (§4.4).
//!
//! A tour's points form a permutation of pickup/delivery nodes, starting
//! from the warehouse, subject to every delivery node coming after its
//! paired pickup node (the precedence map built by C3). Three strategies
//! share that contract:
//!
//! - [`Strategy::V0`] — any precedence-feasible order, no optimization.
//! - [`Strategy::V1`] — exact DFS branch-and-bound, used when the instance
//!   is small enough to search exhaustively.
//! - [`Strategy::V2`] — greedy nearest-neighbor construction plus 2-opt
//!   local search, used otherwise.

mod v0;
mod v1;
mod v2;

use crate::error::CoreResult;
use crate::matrix::TourPointMatrix;
use crate::model::NodeId;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    V0,
    V1,
    V2,
}

/// V1 is exact but exponential; above 16 precedence pairs it's abandoned in
/// favor of V2's polynomial local search (§4.4).
pub const V1_PAIR_LIMIT: usize = 16;

pub fn choose_strategy(pair_count: usize) -> Strategy {
    if pair_count <= V1_PAIR_LIMIT {
        Strategy::V1
    } else {
        Strategy::V2
    }
}

/// A TSP-with-precedence instance: a fixed start (the warehouse) and the
/// set of pickup/delivery nodes to sequence after it, scored against a
/// pre-built [`TourPointMatrix`].
pub struct TspInstance<'m> {
    pub start: NodeId,
    pub points: Vec<NodeId>,
    pub matrix: &'m TourPointMatrix,
}

impl<'m> TspInstance<'m> {
    /// Whether `order` never visits a delivery node before its pickup.
    pub fn precedence_ok(&self, order: &[NodeId]) -> bool {
        let mut visited = FxHashSet::default();
        for &n in order {
            if let Some(pickup) = self.matrix.precedence_of(n) {
                if !visited.contains(&pickup) {
                    return false;
                }
            }
            visited.insert(n);
        }
        true
    }

    /// Total travel time in seconds of the closed tour `start -> order[0] ->
    /// .. -> order[last] -> start` — the tour always returns to the
    /// warehouse (§1, §4.4), so the closing leg is part of the objective.
    pub fn cost(&self, order: &[NodeId]) -> u64 {
        let mut total = 0u64;
        let mut prev = self.start;
        for &n in order {
            total += self.matrix.travel_time(prev, n).unwrap_or(0);
            prev = n;
        }
        total += self.matrix.travel_time(prev, self.start).unwrap_or(0);
        total
    }

    pub fn solve(&self, strategy: Strategy) -> CoreResult<Vec<NodeId>> {
        match strategy {
            Strategy::V0 => v0::solve(self),
            Strategy::V1 => v1::solve(self),
            Strategy::V2 => v2::solve(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RoadGraph;
    use crate::model::{Demand, DemandId, Node, Segment};
    use crate::routing::Algorithm;

    /// Warehouse W, two demands: pickup P1/delivery D1, pickup P2/delivery
    /// D2, laid out so the obviously cheap order is P1, D1, P2, D2.
    fn instance() -> (RoadGraph, TourPointMatrix) {
        let nodes = vec![
            Node { id: NodeId(0), lat: 0.0, lon: 0.0 },
            Node { id: NodeId(1), lat: 0.0, lon: 1.0 },
            Node { id: NodeId(2), lat: 0.0, lon: 2.0 },
            Node { id: NodeId(3), lat: 0.0, lon: 3.0 },
            Node { id: NodeId(4), lat: 0.0, lon: 4.0 },
        ];
        let mut segs = Vec::new();
        for w in nodes.windows(2) {
            segs.push(Segment {
                origin: w[0].id,
                destination: w[1].id,
                street_name: "Line".into(),
                length_m: 1000.0,
            });
        }
        let graph = RoadGraph::new(nodes, segs, NodeId(0)).unwrap();
        let demands = vec![
            Demand {
                id: DemandId(1),
                pickup_node: NodeId(1),
                delivery_node: NodeId(2),
                pickup_duration_s: 0,
                delivery_duration_s: 0,
            },
            Demand {
                id: DemandId(2),
                pickup_node: NodeId(3),
                delivery_node: NodeId(4),
                pickup_duration_s: 0,
                delivery_duration_s: 0,
            },
        ];
        let points = vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)];
        let matrix = TourPointMatrix::build(
            &graph,
            &[&[NodeId(0)][..], &points[..]].concat(),
            &demands,
            Algorithm::Dijkstra,
        )
        .unwrap();
        (graph, matrix)
    }

    #[test]
    fn v0_is_precedence_feasible() {
        let (_g, matrix) = instance();
        let inst = TspInstance {
            start: NodeId(0),
            points: vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)],
            matrix: &matrix,
        };
        let order = inst.solve(Strategy::V0).unwrap();
        assert!(inst.precedence_ok(&order));
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn v1_finds_optimal_order_s4() {
        let (_g, matrix) = instance();
        let inst = TspInstance {
            start: NodeId(0),
            points: vec![NodeId(4), NodeId(3), NodeId(2), NodeId(1)],
            matrix: &matrix,
        };
        let order = inst.solve(Strategy::V1).unwrap();
        assert!(inst.precedence_ok(&order));
        assert_eq!(order, vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)]);
    }

    #[test]
    fn v1_and_v2_agree_on_cost_s4() {
        let (_g, matrix) = instance();
        let inst = TspInstance {
            start: NodeId(0),
            points: vec![NodeId(4), NodeId(3), NodeId(2), NodeId(1)],
            matrix: &matrix,
        };
        let v1 = inst.solve(Strategy::V1).unwrap();
        let v2 = inst.solve(Strategy::V2).unwrap();
        assert!(inst.precedence_ok(&v2));
        assert_eq!(inst.cost(&v1), inst.cost(&v2));
    }

    #[test]
    fn choose_strategy_switches_at_limit() {
        assert_eq!(choose_strategy(16), Strategy::V1);
        assert_eq!(choose_strategy(17), Strategy::V2);
    }
}
