//! C2: shortest-path engine over C1 (§4.2).

mod astar;
mod dijkstra;

use crate::graph::RoadGraph;
use crate::model::{NodeId, Segment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    Dijkstra,
    AStar,
}

/// A routed path between two nodes: the node-by-node walk, its total
/// distance, and the segments traversed in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub path_nodes: Vec<NodeId>,
    pub distance_m: f64,
    pub segments: Vec<Segment>,
}

/// Returns `None` if either endpoint is absent from the graph, or if `start`
/// and `end` are not in the same weakly-connected component (§4.2). The
/// trivial `start == end` case always succeeds with an empty path.
pub fn shortest_path(
    graph: &RoadGraph,
    start: NodeId,
    end: NodeId,
    algorithm: Algorithm,
) -> Option<PathResult> {
    graph.get_node(start)?;
    graph.get_node(end)?;

    if start == end {
        return Some(PathResult {
            path_nodes: vec![start],
            distance_m: 0.0,
            segments: Vec::new(),
        });
    }

    tracing::debug!(?start, ?end, ?algorithm, "shortest_path");

    let (path_nodes, distance_m) = match algorithm {
        Algorithm::Dijkstra => dijkstra::run(graph, start, end)?,
        Algorithm::AStar => astar::run(graph, start, end)?,
    };

    let segments = path_nodes
        .windows(2)
        .map(|w| {
            graph
                .segment_between(w[0], w[1])
                .cloned()
                .expect("adjacent path nodes must be connected by a segment")
        })
        .collect();

    Some(PathResult {
        path_nodes,
        distance_m,
        segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Segment};

    /// S1: triangle shortest path.
    fn triangle() -> RoadGraph {
        let nodes = vec![
            Node {
                id: NodeId(1),
                lat: 45.75,
                lon: 4.85,
            },
            Node {
                id: NodeId(2),
                lat: 45.76,
                lon: 4.86,
            },
            Node {
                id: NodeId(3),
                lat: 45.77,
                lon: 4.87,
            },
        ];
        let segs = vec![
            Segment {
                origin: NodeId(1),
                destination: NodeId(2),
                street_name: "WA".into(),
                length_m: 100.0,
            },
            Segment {
                origin: NodeId(2),
                destination: NodeId(3),
                street_name: "AB".into(),
                length_m: 150.0,
            },
            Segment {
                origin: NodeId(1),
                destination: NodeId(3),
                street_name: "WB".into(),
                length_m: 400.0,
            },
        ];
        RoadGraph::new(nodes, segs, NodeId(1)).unwrap()
    }

    #[test]
    fn trivial_path_p1() {
        let g = triangle();
        let r = shortest_path(&g, NodeId(1), NodeId(1), Algorithm::Dijkstra).unwrap();
        assert_eq!(r.path_nodes, vec![NodeId(1)]);
        assert_eq!(r.distance_m, 0.0);
        assert!(r.segments.is_empty());
    }

    #[test]
    fn dijkstra_finds_optimal_s1() {
        let g = triangle();
        let r = shortest_path(&g, NodeId(1), NodeId(3), Algorithm::Dijkstra).unwrap();
        assert_eq!(r.path_nodes, vec![NodeId(1), NodeId(2), NodeId(3)]);
        assert_eq!(r.distance_m, 250.0);
    }

    #[test]
    fn astar_bounded_by_p3_s1() {
        let g = triangle();
        let r = shortest_path(&g, NodeId(1), NodeId(3), Algorithm::AStar).unwrap();
        assert!(r.distance_m == 250.0 || r.distance_m == 400.0);
        assert_eq!(r.path_nodes[0], NodeId(1));
        assert_eq!(*r.path_nodes.last().unwrap(), NodeId(3));
    }

    #[test]
    fn disconnected_is_absent_p4_s2() {
        let nodes = vec![
            Node {
                id: NodeId(1),
                lat: 45.75,
                lon: 4.85,
            },
            Node {
                id: NodeId(2),
                lat: 45.76,
                lon: 4.86,
            },
            Node {
                id: NodeId(99),
                lat: 0.0,
                lon: 0.0,
            },
        ];
        let segs = vec![Segment {
            origin: NodeId(1),
            destination: NodeId(2),
            street_name: "WA".into(),
            length_m: 100.0,
        }];
        let g = RoadGraph::new(nodes, segs, NodeId(1)).unwrap();
        assert!(shortest_path(&g, NodeId(1), NodeId(99), Algorithm::Dijkstra).is_none());
        assert!(shortest_path(&g, NodeId(1), NodeId(99), Algorithm::AStar).is_none());
    }

    #[test]
    fn absent_endpoint_is_none() {
        let g = triangle();
        assert!(shortest_path(&g, NodeId(1), NodeId(404), Algorithm::Dijkstra).is_none());
    }
}
