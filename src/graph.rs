//! C1: the road graph (§4.1).
//!
//! `neighbors`/`get_edges_from` deliberately treat every segment as
//! traversable in both directions, even though segments are stored
//! directionally — this is the reference behavior §4.1/§9 require, not an
//! oversight.

use crate::error::{CoreError, CoreResult};
use crate::model::{Node, NodeId, Segment};
use rustc_hash::FxHashMap;

/// Directed weighted graph of intersections and street segments, owning all
/// `Node`/`Segment` storage for its lifetime.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    nodes: Vec<Node>,
    node_index: FxHashMap<NodeId, usize>,
    segments: Vec<Segment>,
    /// Segment indices incident to each node, in insertion order.
    incident: FxHashMap<NodeId, Vec<usize>>,
    warehouse: NodeId,
}

impl RoadGraph {
    /// Builds the graph from ingested node/segment records (§6). Rejects
    /// segments whose endpoints don't resolve to a known node, and a
    /// warehouse id that isn't in the graph — the invariant in §3.
    pub fn new(nodes: Vec<Node>, segments: Vec<Segment>, warehouse: NodeId) -> CoreResult<Self> {
        let mut node_index = FxHashMap::default();
        node_index.reserve(nodes.len());
        for (i, n) in nodes.iter().enumerate() {
            node_index.insert(n.id, i);
        }

        if !node_index.contains_key(&warehouse) {
            return Err(CoreError::UnknownWarehouse(warehouse));
        }

        let mut incident: FxHashMap<NodeId, Vec<usize>> = FxHashMap::default();
        for (i, seg) in segments.iter().enumerate() {
            if !node_index.contains_key(&seg.origin) {
                return Err(CoreError::DanglingSegment(seg.origin));
            }
            if !node_index.contains_key(&seg.destination) {
                return Err(CoreError::DanglingSegment(seg.destination));
            }
            incident.entry(seg.origin).or_default().push(i);
            if seg.origin != seg.destination {
                incident.entry(seg.destination).or_default().push(i);
            }
        }

        Ok(RoadGraph {
            nodes,
            node_index,
            segments,
            incident,
            warehouse,
        })
    }

    pub fn warehouse(&self) -> NodeId {
        self.warehouse
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.node_index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Union of segments' other endpoint, deduplicated, in first-seen order.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let Some(indices) = self.incident.get(&id) else {
            return Vec::new();
        };
        let mut seen = FxHashMap::default();
        let mut out = Vec::with_capacity(indices.len());
        for &i in indices {
            let seg = &self.segments[i];
            let other = if seg.origin == id {
                seg.destination
            } else {
                seg.origin
            };
            if seen.insert(other, ()).is_none() {
                out.push(other);
            }
        }
        out
    }

    /// Any segment whose endpoints are `{a, b}` in either orientation; ties
    /// broken by first-in-insertion-order (§4.1).
    pub fn segment_between(&self, a: NodeId, b: NodeId) -> Option<&Segment> {
        let indices = self.incident.get(&a)?;
        indices.iter().find_map(|&i| {
            let seg = &self.segments[i];
            let touches_b = seg.origin == b || seg.destination == b;
            touches_b.then_some(seg)
        })
    }

    /// Any segment incident to `id`, in insertion order.
    pub fn get_edges_from(&self, id: NodeId) -> Vec<&Segment> {
        match self.incident.get(&id) {
            Some(indices) => indices.iter().map(|&i| &self.segments[i]).collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64, lat: f64, lon: f64) -> Node {
        Node {
            id: NodeId(id),
            lat,
            lon,
        }
    }

    fn seg(a: u64, b: u64, len: f64) -> Segment {
        Segment {
            origin: NodeId(a),
            destination: NodeId(b),
            street_name: "Main St".into(),
            length_m: len,
        }
    }

    #[test]
    fn rejects_dangling_segment() {
        let nodes = vec![node(1, 0.0, 0.0)];
        let segs = vec![seg(1, 2, 10.0)];
        let err = RoadGraph::new(nodes, segs, NodeId(1)).unwrap_err();
        assert!(matches!(err, CoreError::DanglingSegment(NodeId(2))));
    }

    #[test]
    fn rejects_unknown_warehouse() {
        let nodes = vec![node(1, 0.0, 0.0)];
        let err = RoadGraph::new(nodes, vec![], NodeId(99)).unwrap_err();
        assert!(matches!(err, CoreError::UnknownWarehouse(NodeId(99))));
    }

    #[test]
    fn neighbors_are_bidirectional_despite_directed_storage() {
        let nodes = vec![node(1, 0.0, 0.0), node(2, 0.0, 1.0)];
        let segs = vec![seg(1, 2, 100.0)];
        let g = RoadGraph::new(nodes, segs, NodeId(1)).unwrap();
        assert_eq!(g.neighbors(NodeId(1)), vec![NodeId(2)]);
        assert_eq!(g.neighbors(NodeId(2)), vec![NodeId(1)]);
    }

    #[test]
    fn segment_between_ties_break_on_insertion_order() {
        let nodes = vec![node(1, 0.0, 0.0), node(2, 0.0, 1.0)];
        let segs = vec![seg(1, 2, 100.0), seg(2, 1, 50.0)];
        let g = RoadGraph::new(nodes, segs, NodeId(1)).unwrap();
        let found = g.segment_between(NodeId(1), NodeId(2)).unwrap();
        assert_eq!(found.length_m, 100.0);
    }

    #[test]
    fn absent_node_is_total_not_error() {
        let g = RoadGraph::new(vec![node(1, 0.0, 0.0)], vec![], NodeId(1)).unwrap();
        assert!(g.get_node(NodeId(42)).is_none());
        assert!(g.neighbors(NodeId(42)).is_empty());
        assert!(g.get_edges_from(NodeId(42)).is_empty());
    }
}
