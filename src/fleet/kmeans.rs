//! Seeded k-means++ over demand midpoints (§4.5).
//!
//! Clustering on the pickup/delivery midpoint, rather than the pickup and
//! delivery nodes separately, is what keeps a demand's two legs in the same
//! cluster — there's no separate "atomic demand" rule to enforce.

use crate::graph::RoadGraph;
use crate::model::Demand;
use rand::Rng;

const MAX_ITERATIONS: usize = 10;
const CONVERGENCE_THRESHOLD_DEG: f64 = 0.001;

#[derive(Debug, Clone, Copy)]
struct Point {
    lat: f64,
    lon: f64,
}

fn demand_midpoint(graph: &RoadGraph, d: &Demand) -> Point {
    let pickup = graph
        .get_node(d.pickup_node)
        .expect("demand nodes are validated before clustering");
    let delivery = graph
        .get_node(d.delivery_node)
        .expect("demand nodes are validated before clustering");
    Point {
        lat: (pickup.lat + delivery.lat) / 2.0,
        lon: (pickup.lon + delivery.lon) / 2.0,
    }
}

fn sq_dist(a: &Point, b: &Point) -> f64 {
    let dlat = a.lat - b.lat;
    let dlon = a.lon - b.lon;
    dlat * dlat + dlon * dlon
}

fn nearest_centroid(centroids: &[Point], p: &Point) -> usize {
    centroids
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| sq_dist(a, p).total_cmp(&sq_dist(b, p)))
        .map(|(i, _)| i)
        .expect("centroids is never empty")
}

/// k-means++ seeding: the first centroid uniform at random, each subsequent
/// one drawn with probability proportional to its squared distance from the
/// nearest centroid chosen so far.
fn seed_plus_plus(points: &[Point], k: usize, rng: &mut impl Rng) -> Vec<Point> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.random_range(0..points.len())]);

    while centroids.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| {
                centroids
                    .iter()
                    .map(|c| sq_dist(c, p))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();

        if total <= 0.0 {
            centroids.push(points[0]);
            continue;
        }

        let mut threshold = rng.random::<f64>() * total;
        let mut chosen = points.len() - 1;
        for (i, &w) in weights.iter().enumerate() {
            if threshold < w {
                chosen = i;
                break;
            }
            threshold -= w;
        }
        centroids.push(points[chosen]);
    }

    centroids
}

/// Assigns every demand to one of `k` clusters. Never fails: an empty
/// cluster is a legal (if useless) outcome, left for the caller to skip.
pub fn cluster(graph: &RoadGraph, demands: &[Demand], k: usize, rng: &mut impl Rng) -> Vec<Vec<Demand>> {
    let points: Vec<Point> = demands.iter().map(|d| demand_midpoint(graph, d)).collect();
    let mut centroids = seed_plus_plus(&points, k, rng);

    for _ in 0..MAX_ITERATIONS {
        let mut sums = vec![(0.0f64, 0.0f64, 0usize); k];
        for p in &points {
            let nearest = nearest_centroid(&centroids, p);
            sums[nearest].0 += p.lat;
            sums[nearest].1 += p.lon;
            sums[nearest].2 += 1;
        }

        let mut max_shift: f64 = 0.0;
        let mut next = centroids.clone();
        for (i, (sum_lat, sum_lon, count)) in sums.into_iter().enumerate() {
            if count == 0 {
                continue;
            }
            let moved = Point {
                lat: sum_lat / count as f64,
                lon: sum_lon / count as f64,
            };
            max_shift = max_shift.max(sq_dist(&moved, &centroids[i]).sqrt());
            next[i] = moved;
        }
        centroids = next;

        if max_shift < CONVERGENCE_THRESHOLD_DEG {
            break;
        }
    }

    let mut clusters: Vec<Vec<Demand>> = vec![Vec::new(); k];
    for (d, p) in demands.iter().zip(points.iter()) {
        clusters[nearest_centroid(&centroids, p)].push(d.clone());
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DemandId, Node, NodeId, Segment};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn graph_with(nodes: Vec<(u64, f64, f64)>) -> RoadGraph {
        let nodes = nodes
            .into_iter()
            .map(|(id, lat, lon)| Node { id: NodeId(id), lat, lon })
            .collect();
        RoadGraph::new(nodes, vec![], NodeId(0)).unwrap()
    }

    #[test]
    fn separates_two_well_apart_groups() {
        let graph = graph_with(vec![
            (0, 0.0, 0.0),
            (1, 0.01, 0.01),
            (2, 0.02, 0.0),
            (3, 0.01, 0.02),
            (10, 10.0, 10.0),
            (11, 10.01, 10.01),
            (12, 10.02, 10.0),
            (13, 10.01, 10.02),
        ]);
        let demands = vec![
            Demand { id: DemandId(1), pickup_node: NodeId(0), delivery_node: NodeId(1), pickup_duration_s: 0, delivery_duration_s: 0 },
            Demand { id: DemandId(2), pickup_node: NodeId(2), delivery_node: NodeId(3), pickup_duration_s: 0, delivery_duration_s: 0 },
            Demand { id: DemandId(3), pickup_node: NodeId(10), delivery_node: NodeId(11), pickup_duration_s: 0, delivery_duration_s: 0 },
            Demand { id: DemandId(4), pickup_node: NodeId(12), delivery_node: NodeId(13), pickup_duration_s: 0, delivery_duration_s: 0 },
        ];
        let mut rng = StdRng::seed_from_u64(42);
        let clusters = cluster(&graph, &demands, 2, &mut rng);
        assert_eq!(clusters.iter().map(|c| c.len()).sum::<usize>(), 4);
        let sizes: Vec<usize> = clusters.iter().map(|c| c.len()).collect();
        assert!(sizes.iter().all(|&s| s == 2), "expected an even 2/2 split, got {sizes:?}");
    }
}
