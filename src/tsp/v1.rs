//! V1: exact DFS branch-and-bound, for instances small enough to search
//! exhaustively (§4.4).
//!
//! The tour is closed — it returns to the warehouse at the end (§1) — so
//! the cost being minimized always includes that final leg.
//!
//! Pruning rules, applied at every node of the search:
//! - precedence: a delivery is skipped until its pickup is already placed.
//! - incumbent: a partial cost at or above the best complete tour found so
//!   far is abandoned.
//! - lower bound: the cheapest-outgoing-edge sum over unvisited points
//!   (`minOut`) plus the cheapest remaining return-to-warehouse leg
//!   (`ret(u) = travelTime[(u, W)]`, minimized over unvisited `u`) is added
//!   to the partial cost; if that alone already matches or beats the
//!   incumbent, the branch cannot improve on it.
//!
//! Candidates are tried in ascending edge cost from the current point, so
//! strong incumbents are found early and prune harder.

use super::TspInstance;
use crate::error::{CoreError, CoreResult};
use crate::model::NodeId;

pub fn solve(instance: &TspInstance) -> CoreResult<Vec<NodeId>> {
    let n = instance.points.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut best: Option<(u64, Vec<NodeId>)> = None;

    dfs(instance, &mut visited, &mut order, 0, instance.start, &mut best);

    best.map(|(_, order)| order).ok_or(CoreError::InfeasibleTsp)
}

fn dfs(
    instance: &TspInstance,
    visited: &mut [bool],
    order: &mut Vec<NodeId>,
    cost: u64,
    current: NodeId,
    best: &mut Option<(u64, Vec<NodeId>)>,
) {
    if order.len() == instance.points.len() {
        let total = cost + instance.matrix.travel_time(current, instance.start).unwrap_or(0);
        if best.as_ref().map_or(true, |(b, _)| total < *b) {
            *best = Some((total, order.clone()));
        }
        return;
    }

    if let Some((b, _)) = best {
        if cost >= *b {
            return;
        }
    }

    let lb = cost + lower_bound(instance, visited, current);
    if let Some((b, _)) = best {
        if lb >= *b {
            return;
        }
    }

    let mut candidates: Vec<(u64, usize)> = instance
        .points
        .iter()
        .enumerate()
        .filter(|(i, _)| !visited[*i])
        .map(|(i, &p)| (instance.matrix.travel_time(current, p).unwrap_or(u64::MAX), i))
        .collect();
    candidates.sort_unstable_by_key(|&(c, _)| c);

    for (edge_cost, i) in candidates {
        let p = instance.points[i];
        if let Some(pickup) = instance.matrix.precedence_of(p) {
            if !order.contains(&pickup) {
                continue;
            }
        }
        visited[i] = true;
        order.push(p);
        dfs(instance, visited, order, cost.saturating_add(edge_cost), p, best);
        order.pop();
        visited[i] = false;
    }
}

/// `minOut` + `ret`: sum of each unvisited point's cheapest outgoing edge
/// (to any other unvisited point), plus the cheapest return-to-warehouse
/// leg among the unvisited points — one of them will be the last stop
/// before the tour closes, so this is a valid lower bound on that cost
/// regardless of which one it ends up being. `current` plays no part in
/// `ret` since the warehouse leg is paid from whichever point is visited
/// last, not from the current node.
fn lower_bound(instance: &TspInstance, visited: &[bool], _current: NodeId) -> u64 {
    let unvisited: Vec<NodeId> = instance
        .points
        .iter()
        .enumerate()
        .filter(|(i, _)| !visited[*i])
        .map(|(_, &p)| p)
        .collect();

    if unvisited.is_empty() {
        return 0;
    }

    let ret = unvisited
        .iter()
        .map(|&p| instance.matrix.travel_time(p, instance.start).unwrap_or(0))
        .min()
        .unwrap_or(0);

    let min_out: u64 = unvisited
        .iter()
        .map(|&p| {
            unvisited
                .iter()
                .filter(|&&q| q != p)
                .map(|&q| instance.matrix.travel_time(p, q).unwrap_or(0))
                .min()
                .unwrap_or(0)
        })
        .sum();

    ret + min_out
}
