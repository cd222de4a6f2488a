//! C3: the all-pairs tour-point matrix (§4.3).
//!
//! Built once per planning run over the warehouse plus every pickup/delivery
//! node touched by a cluster, and consulted read-only by C4/C5 afterwards.
//! There is no partial matrix: construction fails outright the moment any
//! ordered pair turns out to be unreachable (§4.3, §7).

use crate::error::{CoreError, CoreResult};
use crate::graph::RoadGraph;
use crate::model::{Demand, NodeId, Segment};
use crate::routing::{self, Algorithm};
use rustc_hash::FxHashMap;

/// A cached routed hop between two node ids, keyed on the pair rather than
/// on `TourPoint`s — the node-id-keyed cache the matrix contract (§4.3)
/// calls for, distinct from the `TourPoint`-keyed [`crate::model::Leg`]
/// a [`crate::model::Tour`] records.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub nodes: Vec<NodeId>,
    pub segments: Vec<Segment>,
    pub distance_m: f64,
    pub travel_time_s: u64,
}

#[derive(Debug, Clone)]
pub struct TourPointMatrix {
    travel_time: FxHashMap<(NodeId, NodeId), u64>,
    legs: FxHashMap<(NodeId, NodeId), RouteLeg>,
    /// `delivery node -> pickup node`, one entry per demand touched.
    precedence: FxHashMap<NodeId, NodeId>,
}

impl TourPointMatrix {
    /// Computes the shortest path between every ordered pair of `points`
    /// (deduplicated) and records the precedence constraint for every
    /// `demand` whose pickup and delivery are both in `points`.
    ///
    /// Fails with [`CoreError::Unreachable`] on the first pair with no path
    /// — per §4.3 there's no such thing as a matrix with holes in it.
    pub fn build(
        graph: &RoadGraph,
        points: &[NodeId],
        demands: &[Demand],
        algorithm: Algorithm,
    ) -> CoreResult<Self> {
        let mut unique = Vec::with_capacity(points.len());
        let mut seen = FxHashMap::default();
        for &p in points {
            if seen.insert(p, ()).is_none() {
                unique.push(p);
            }
        }

        let mut travel_time = FxHashMap::default();
        let mut legs = FxHashMap::default();

        for &from in &unique {
            for &to in &unique {
                if from == to {
                    continue;
                }
                let path = routing::shortest_path(graph, from, to, algorithm)
                    .ok_or(CoreError::Unreachable { from, to })?;
                travel_time.insert((from, to), crate::time::travel_time_seconds(path.distance_m));
                legs.insert(
                    (from, to),
                    RouteLeg {
                        nodes: path.path_nodes,
                        segments: path.segments,
                        distance_m: path.distance_m,
                        travel_time_s: crate::time::travel_time_seconds(path.distance_m),
                    },
                );
            }
        }

        let mut precedence = FxHashMap::default();
        for d in demands {
            if seen.contains_key(&d.pickup_node) && seen.contains_key(&d.delivery_node) {
                precedence.insert(d.delivery_node, d.pickup_node);
            }
        }

        tracing::debug!(
            points = unique.len(),
            pairs = travel_time.len(),
            "built tour-point matrix"
        );

        Ok(TourPointMatrix {
            travel_time,
            legs,
            precedence,
        })
    }

    pub fn travel_time(&self, from: NodeId, to: NodeId) -> Option<u64> {
        if from == to {
            return Some(0);
        }
        self.travel_time.get(&(from, to)).copied()
    }

    pub fn leg(&self, from: NodeId, to: NodeId) -> Option<&RouteLeg> {
        self.legs.get(&(from, to))
    }

    /// The pickup node a delivery node is bound after, if any.
    pub fn precedence_of(&self, delivery: NodeId) -> Option<NodeId> {
        self.precedence.get(&delivery).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DemandId, Node};

    fn triangle() -> RoadGraph {
        let nodes = vec![
            Node { id: NodeId(1), lat: 45.75, lon: 4.85 },
            Node { id: NodeId(2), lat: 45.76, lon: 4.86 },
            Node { id: NodeId(3), lat: 45.77, lon: 4.87 },
        ];
        let segs = vec![
            Segment { origin: NodeId(1), destination: NodeId(2), street_name: "WA".into(), length_m: 100.0 },
            Segment { origin: NodeId(2), destination: NodeId(3), street_name: "AB".into(), length_m: 150.0 },
            Segment { origin: NodeId(1), destination: NodeId(3), street_name: "WB".into(), length_m: 400.0 },
        ];
        RoadGraph::new(nodes, segs, NodeId(1)).unwrap()
    }

    #[test]
    fn builds_all_pairs() {
        let g = triangle();
        let m = TourPointMatrix::build(&g, &[NodeId(1), NodeId(2), NodeId(3)], &[], Algorithm::Dijkstra).unwrap();
        assert_eq!(m.travel_time(NodeId(1), NodeId(1)), Some(0));
        assert_eq!(m.travel_time(NodeId(1), NodeId(2)), Some(crate::time::travel_time_seconds(100.0)));
        assert!(m.leg(NodeId(1), NodeId(3)).is_some());
    }

    #[test]
    fn records_precedence_for_touched_demands() {
        let g = triangle();
        let demands = vec![Demand {
            id: DemandId(1),
            pickup_node: NodeId(1),
            delivery_node: NodeId(3),
            pickup_duration_s: 60,
            delivery_duration_s: 60,
        }];
        let m = TourPointMatrix::build(&g, &[NodeId(1), NodeId(3)], &demands, Algorithm::Dijkstra).unwrap();
        assert_eq!(m.precedence_of(NodeId(3)), Some(NodeId(1)));
        assert_eq!(m.precedence_of(NodeId(1)), None);
    }

    #[test]
    fn fails_hard_on_unreachable_pair() {
        let nodes = vec![
            Node { id: NodeId(1), lat: 0.0, lon: 0.0 },
            Node { id: NodeId(2), lat: 0.0, lon: 0.0 },
            Node { id: NodeId(99), lat: 1.0, lon: 1.0 },
        ];
        let segs = vec![Segment { origin: NodeId(1), destination: NodeId(2), street_name: "A".into(), length_m: 10.0 }];
        let g = RoadGraph::new(nodes, segs, NodeId(1)).unwrap();
        let err = TourPointMatrix::build(&g, &[NodeId(1), NodeId(99)], &[], Algorithm::Dijkstra).unwrap_err();
        assert!(matches!(err, CoreError::Unreachable { .. }));
    }
}
