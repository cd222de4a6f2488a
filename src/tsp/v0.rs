//! V0: any precedence-feasible order, in input order (§4.4).

use super::TspInstance;
use crate::error::{CoreError, CoreResult};
use crate::model::NodeId;
use rustc_hash::FxHashSet;

pub fn solve(instance: &TspInstance) -> CoreResult<Vec<NodeId>> {
    let mut remaining = instance.points.clone();
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut order = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let idx = remaining
            .iter()
            .position(|&n| match instance.matrix.precedence_of(n) {
                Some(pickup) => visited.contains(&pickup),
                None => true,
            })
            .ok_or(CoreError::InfeasibleTsp)?;
        let n = remaining.remove(idx);
        visited.insert(n);
        order.push(n);
    }

    Ok(order)
}
