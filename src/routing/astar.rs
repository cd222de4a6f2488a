//! A* with a planar-Euclidean heuristic (§4.2).
//!
//! Termination is pop-then-check: the target is expanded like any other
//! node and the search stops only once it comes off the heap with a final
//! (non-stale) `g`-score, not the moment it's first discovered in the open
//! set. This is the design decision recorded for §9's open question.

use crate::graph::RoadGraph;
use crate::model::NodeId;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    f: f64,
    g: f64,
    node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.g == other.g && self.node == other.node
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.g.total_cmp(&other.g))
            .then_with(|| self.node.0.cmp(&other.node.0))
    }
}

/// `h(n) = sqrt((dlat * 111000)^2 + (dlon * 111000 * cos(lat_n * pi/180))^2)`
/// — the planar-Euclidean approximation from §4.2, evaluated against the
/// fixed goal node.
fn heuristic(graph: &RoadGraph, n: NodeId, goal_lat: f64, goal_lon: f64) -> f64 {
    let node = graph.get_node(n).expect("heuristic node must exist");
    let dlat = goal_lat - node.lat;
    let dlon = goal_lon - node.lon;
    let dx = dlat * 111_000.0;
    let dy = dlon * 111_000.0 * (node.lat * std::f64::consts::PI / 180.0).cos();
    (dx * dx + dy * dy).sqrt()
}

/// Returns the optimal node path and its distance, or `None` if `end` is
/// unreachable from `start`.
pub fn run(graph: &RoadGraph, start: NodeId, end: NodeId) -> Option<(Vec<NodeId>, f64)> {
    use std::cmp::Reverse;

    let goal = graph.get_node(end)?;
    let (goal_lat, goal_lon) = (goal.lat, goal.lon);

    let mut g_score: FxHashMap<NodeId, f64> = FxHashMap::default();
    let mut prev: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut closed: FxHashSet<NodeId> = FxHashSet::default();
    let mut heap = BinaryHeap::new();

    g_score.insert(start, 0.0);
    heap.push(Reverse(HeapEntry {
        f: heuristic(graph, start, goal_lat, goal_lon),
        g: 0.0,
        node: start,
    }));

    while let Some(Reverse(HeapEntry { g, node, .. })) = heap.pop() {
        if closed.contains(&node) {
            continue;
        }
        if g > *g_score.get(&node).unwrap_or(&f64::INFINITY) {
            continue;
        }
        closed.insert(node);

        if node == end {
            break;
        }

        for neighbor in graph.neighbors(node) {
            if closed.contains(&neighbor) {
                continue;
            }
            let weight = graph
                .segment_between(node, neighbor)
                .map(|s| s.length_m)
                .unwrap_or(f64::INFINITY);
            let tentative_g = g + weight;
            if tentative_g < *g_score.get(&neighbor).unwrap_or(&f64::INFINITY) {
                g_score.insert(neighbor, tentative_g);
                prev.insert(neighbor, node);
                let f = tentative_g + heuristic(graph, neighbor, goal_lat, goal_lon);
                heap.push(Reverse(HeapEntry {
                    f,
                    g: tentative_g,
                    node: neighbor,
                }));
            }
        }
    }

    let total = *g_score.get(&end)?;
    let mut path = vec![end];
    let mut cur = end;
    while cur != start {
        cur = *prev.get(&cur)?;
        path.push(cur);
    }
    path.reverse();
    Some((path, total))
}
