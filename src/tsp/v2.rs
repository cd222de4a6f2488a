//! V2: greedy nearest-neighbor construction plus 2-opt local search (§4.4),
//! used once the instance is too large for V1's exact search.

use super::TspInstance;
use crate::error::{CoreError, CoreResult};
use crate::model::NodeId;
use rustc_hash::FxHashSet;

/// Below this magnitude a 2-opt delta is floating-point noise, not a real
/// improvement (§4.4).
const EPSILON: f64 = 1e-9;

pub fn solve(instance: &TspInstance) -> CoreResult<Vec<NodeId>> {
    let mut order = construct(instance)?;
    refine(instance, &mut order);
    Ok(order)
}

fn construct(instance: &TspInstance) -> CoreResult<Vec<NodeId>> {
    let mut remaining = instance.points.clone();
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut order = Vec::with_capacity(remaining.len());
    let mut current = instance.start;

    while !remaining.is_empty() {
        let idx = remaining
            .iter()
            .enumerate()
            .filter(|(_, &p)| match instance.matrix.precedence_of(p) {
                Some(pickup) => visited.contains(&pickup),
                None => true,
            })
            .min_by_key(|(_, &p)| instance.matrix.travel_time(current, p).unwrap_or(u64::MAX))
            .map(|(i, _)| i)
            .ok_or(CoreError::InfeasibleTsp)?;

        let p = remaining.remove(idx);
        visited.insert(p);
        current = p;
        order.push(p);
    }

    Ok(order)
}

/// Repeatedly applies the most-negative-delta 2-opt move available whose
/// candidate is still precedence-feasible, until no improving move remains.
/// A precedence-blocked candidate is skipped in favor of the next-best
/// improving move rather than ending the search early — §4.4 stops only
/// when no improving move exists at all.
fn refine(instance: &TspInstance, order: &mut Vec<NodeId>) {
    loop {
        let n = order.len();
        let mut candidates: Vec<(f64, usize, usize)> = Vec::new();

        for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                let delta = two_opt_delta(instance, order, i, j);
                if delta < -EPSILON {
                    candidates.push((delta, i, j));
                }
            }
        }
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut applied = false;
        for (_, i, j) in candidates {
            let mut candidate = order.clone();
            candidate[i..=j].reverse();
            if instance.precedence_ok(&candidate) {
                *order = candidate;
                applied = true;
                break;
            }
        }

        if !applied {
            break;
        }
    }
}

/// Cost change from reversing `order[i..=j]`: the two edges entering and
/// leaving that span are replaced, everything inside is unchanged. The
/// span after the last point is always the warehouse — the tour is closed
/// (§1) — so `succ` falls back to `instance.start` rather than vanishing.
fn two_opt_delta(instance: &TspInstance, order: &[NodeId], i: usize, j: usize) -> f64 {
    let pred = if i == 0 { instance.start } else { order[i - 1] };
    let head = order[i];
    let tail = order[j];
    let succ = order.get(j + 1).copied().unwrap_or(instance.start);

    let old_cost = cost(instance, pred, head) + cost(instance, tail, succ);
    let new_cost = cost(instance, pred, tail) + cost(instance, head, succ);
    new_cost - old_cost
}

fn cost(instance: &TspInstance, from: NodeId, to: NodeId) -> f64 {
    instance.matrix.travel_time(from, to).unwrap_or(u64::MAX) as f64
}
