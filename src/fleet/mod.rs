//! C5: fleet planning (§4.5) — distributing demands across couriers and
//! assembling a [`Tour`] per courier.

mod kmeans;

use crate::error::{CoreError, CoreResult};
use crate::graph::RoadGraph;
use crate::matrix::{RouteLeg, TourPointMatrix};
use crate::model::{
    Courier, Demand, Leg, NodeId, PlanResult, PointKind, ResultCode, Tour, TourId, TourPoint,
};
use crate::routing::Algorithm;
use crate::time::WORKDAY_SECONDS;
use crate::tsp::{self, TspInstance};
use rand::Rng;

/// Fixed departure time for every tour (§4.5, §6) — the core does not model
/// a scheduling horizon beyond a single workday.
const DEPARTURE_TIME: &str = "08:00";

pub struct FleetPlanner;

impl FleetPlanner {
    /// Plans a tour per courier for `demands`. Never returns a `Result`:
    /// any internal failure collapses to `ResultCode::Error` with no tours
    /// (§7) — callers inspect `PlanResult::code`, not a `Result` wrapper.
    pub fn plan(
        graph: &RoadGraph,
        demands: &[Demand],
        couriers: &[Courier],
        algorithm: Algorithm,
        rng: &mut impl Rng,
    ) -> PlanResult {
        match Self::try_plan(graph, demands, couriers, algorithm, rng) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, "fleet planning failed");
                PlanResult {
                    code: ResultCode::Error,
                    tours: Vec::new(),
                }
            }
        }
    }

    fn try_plan(
        graph: &RoadGraph,
        demands: &[Demand],
        couriers: &[Courier],
        algorithm: Algorithm,
        rng: &mut impl Rng,
    ) -> CoreResult<PlanResult> {
        if couriers.is_empty() {
            return Err(CoreError::Precondition("no couriers available"));
        }
        for d in demands {
            if d.pickup_node == d.delivery_node {
                return Err(CoreError::DegenerateDemand {
                    demand: d.id,
                    node: d.pickup_node,
                });
            }
            if graph.get_node(d.pickup_node).is_none() {
                return Err(CoreError::UnknownDemandNode {
                    demand: d.id,
                    node: d.pickup_node,
                });
            }
            if graph.get_node(d.delivery_node).is_none() {
                return Err(CoreError::UnknownDemandNode {
                    demand: d.id,
                    node: d.delivery_node,
                });
            }
        }

        let clusters: Vec<Vec<Demand>> = if demands.len() <= couriers.len() {
            demands.iter().map(|d| vec![*d]).collect()
        } else {
            kmeans::cluster(graph, demands, couriers.len(), rng)
        };

        let mut tours = Vec::new();
        let mut workday_exceeded = false;

        for (i, cluster) in clusters.into_iter().enumerate() {
            if cluster.is_empty() {
                continue;
            }
            let courier = couriers.get(i).cloned();
            let tour_id = TourId(i as u64 + 1);
            let tour = Self::build_tour(graph, &cluster, tour_id, courier, algorithm)?;

            if tour.total_duration_s > WORKDAY_SECONDS {
                workday_exceeded = true;
                tours.push(tour);
                break;
            }
            tours.push(tour);
        }

        let code = if workday_exceeded {
            ResultCode::WorkdayExceeded
        } else {
            ResultCode::Ok
        };

        Ok(PlanResult { code, tours })
    }

    fn build_tour(
        graph: &RoadGraph,
        cluster: &[Demand],
        tour_id: TourId,
        courier: Option<Courier>,
        algorithm: Algorithm,
    ) -> CoreResult<Tour> {
        let warehouse = graph.warehouse();

        let mut stops = Vec::with_capacity(cluster.len() * 2);
        for d in cluster {
            stops.push(TourPoint {
                node: d.pickup_node,
                service_duration_s: d.pickup_duration_s,
                kind: PointKind::Pickup,
                demand: Some(d.id),
                related: None,
            });
            stops.push(TourPoint {
                node: d.delivery_node,
                service_duration_s: d.delivery_duration_s,
                kind: PointKind::Delivery,
                demand: Some(d.id),
                related: None,
            });
        }

        let points: Vec<NodeId> = stops.iter().map(|s| s.node).collect();
        let mut matrix_points = Vec::with_capacity(points.len() + 1);
        matrix_points.push(warehouse);
        matrix_points.extend(points.iter().copied());
        let matrix = TourPointMatrix::build(graph, &matrix_points, cluster, algorithm)?;

        let strategy = tsp::choose_strategy(cluster.len());
        let instance = TspInstance {
            start: warehouse,
            points: points.clone(),
            matrix: &matrix,
        };
        let order = instance.solve(strategy)?;

        let mut pool = stops.clone();
        let mut ordered_stops = Vec::with_capacity(pool.len());
        for &n in &order {
            let idx = pool
                .iter()
                .position(|s| s.node == n)
                .expect("tsp order must cover every tour point exactly once");
            ordered_stops.push(pool.remove(idx));
        }

        // Every tour starts and ends at the warehouse (§1, §3).
        let mut full_stops = Vec::with_capacity(ordered_stops.len() + 2);
        full_stops.push(TourPoint::warehouse(warehouse));
        full_stops.extend(ordered_stops);
        full_stops.push(TourPoint::warehouse(warehouse));

        for i in 0..full_stops.len() {
            if full_stops[i].kind == PointKind::Pickup {
                let demand_id = full_stops[i].demand;
                if let Some(j) = full_stops
                    .iter()
                    .position(|s| s.kind == PointKind::Delivery && s.demand == demand_id)
                {
                    full_stops[i].related = Some(j);
                    full_stops[j].related = Some(i);
                }
            }
        }

        let mut legs = Vec::with_capacity(full_stops.len() - 1);
        for pair in full_stops.windows(2) {
            let route_leg = route_leg_between(&matrix, pair[0].node, pair[1].node);
            legs.push(Leg {
                origin: pair[0],
                destination: pair[1],
                nodes: route_leg.nodes,
                segments: route_leg.segments,
                distance_m: route_leg.distance_m,
                travel_time_s: route_leg.travel_time_s,
            });
        }

        let mut tour = Tour {
            id: tour_id,
            departure_time: DEPARTURE_TIME.to_string(),
            courier,
            stops: full_stops,
            legs,
            total_distance_m: 0.0,
            total_duration_s: 0,
        };
        tour.recompute_totals();
        Ok(tour)
    }
}

fn route_leg_between(matrix: &TourPointMatrix, from: NodeId, to: NodeId) -> RouteLeg {
    if from == to {
        return RouteLeg {
            nodes: vec![from],
            segments: vec![],
            distance_m: 0.0,
            travel_time_s: 0,
        };
    }
    matrix
        .leg(from, to)
        .cloned()
        .expect("matrix was built over every point this tour visits")
}
