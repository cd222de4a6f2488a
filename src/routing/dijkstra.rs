//! Single-source Dijkstra, early-terminated at the target (§4.2).

use crate::graph::RoadGraph;
use crate::model::NodeId;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    cost: f64,
    node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    /// Total order on cost (ties broken by node id) so the heap is usable
    /// with f64 costs and tie-breaks deterministically (§4.2).
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.node.0.cmp(&other.node.0))
    }
}

/// Returns the optimal node path and its distance, or `None` if `end` is
/// unreachable from `start`.
pub fn run(graph: &RoadGraph, start: NodeId, end: NodeId) -> Option<(Vec<NodeId>, f64)> {
    use std::cmp::Reverse;

    let mut dist: FxHashMap<NodeId, f64> = FxHashMap::default();
    let mut prev: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut settled: FxHashSet<NodeId> = FxHashSet::default();
    let mut heap = BinaryHeap::new();

    dist.insert(start, 0.0);
    heap.push(Reverse(HeapEntry { cost: 0.0, node: start }));

    while let Some(Reverse(HeapEntry { cost, node })) = heap.pop() {
        if settled.contains(&node) {
            continue;
        }
        if cost > *dist.get(&node).unwrap_or(&f64::INFINITY) {
            continue;
        }
        settled.insert(node);

        if node == end {
            break;
        }

        for neighbor in graph.neighbors(node) {
            if settled.contains(&neighbor) {
                continue;
            }
            let weight = graph
                .segment_between(node, neighbor)
                .map(|s| s.length_m)
                .unwrap_or(f64::INFINITY);
            let candidate = cost + weight;
            if candidate < *dist.get(&neighbor).unwrap_or(&f64::INFINITY) {
                dist.insert(neighbor, candidate);
                prev.insert(neighbor, node);
                heap.push(Reverse(HeapEntry {
                    cost: candidate,
                    node: neighbor,
                }));
            }
        }
    }

    let total = *dist.get(&end)?;
    let mut path = vec![end];
    let mut cur = end;
    while cur != start {
        cur = *prev.get(&cur)?;
        path.push(cur);
    }
    path.reverse();
    Some((path, total))
}
