//! Multi-leg voyages through required intermediate ports.
//!
//! Each consecutive segment is solved independently with the cheapest
//! search, every segment against the original query date. That date
//! pinning is a known simplification: when a later segment in fact
//! departs days after the previous one arrives, the reported duration
//! underestimates the real voyage. The total cost is the sum of the
//! segment totals; waits at the join ports are not billed.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::domain::{PortName, VoyageDate};
use crate::network::Network;

use super::cheapest::find_cheapest;
use super::result::{Layover, PathResult, PlanError};
use super::search::build_layovers;
use super::LEG_TRAVEL_HOURS;

pub(super) fn find_multi_leg(
    network: &Network,
    origin: &PortName,
    intermediates: &[PortName],
    destination: &PortName,
    date: VoyageDate,
) -> PathResult {
    if !network.has_port(origin) {
        return PathResult::rejected(PlanError::UnknownOrigin(origin.clone()));
    }
    if !network.has_port(destination) {
        return PathResult::rejected(PlanError::UnknownDestination(destination.clone()));
    }
    for port in intermediates {
        if !network.has_port(port) {
            return PathResult::rejected(PlanError::UnknownIntermediate(port.clone()));
        }
    }

    let mut waypoints: Vec<&PortName> = Vec::with_capacity(intermediates.len() + 2);
    waypoints.push(origin);
    waypoints.extend(intermediates.iter());
    waypoints.push(destination);

    let mut path: Vec<PortName> = Vec::new();
    let mut legs = Vec::new();
    let mut joins: HashSet<usize> = HashSet::new();
    let mut total_cost: u64 = 0;

    for pair in waypoints.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        debug!(%from, %to, "Solving voyage segment");

        let segment = find_cheapest(network, from, to, date, None);
        if !segment.found {
            warn!(%from, %to, "No voyage for segment, abandoning multi-leg request");
            return PathResult::no_path();
        }

        // The join port already ends the previous segment's path.
        let skip = usize::from(!path.is_empty());
        path.extend(segment.path.into_iter().skip(skip));

        if !legs.is_empty() && !segment.legs.is_empty() {
            joins.insert(legs.len() - 1);
        }
        legs.extend(segment.legs);
        total_cost += segment.total_cost;
    }

    // Layovers across the concatenated legs. Joins are unbilled, and a
    // join whose next leg predates the previous arrival (an artifact
    // of the per-segment date pinning) is recorded as a zero-hour
    // wait.
    let layovers: Vec<Layover> = legs
        .windows(2)
        .enumerate()
        .map(|(idx, pair)| {
            let (arriving, departing) = (&pair[0], &pair[1]);
            if !joins.contains(&idx) {
                return build_layovers(network, pair).remove(0);
            }

            let hours = if arriving.can_connect_to(departing) {
                arriving.layover_until(departing)
            } else {
                0
            };
            Layover {
                port: arriving.destination().clone(),
                hours,
                charge: 0,
                arrival_date: arriving.date(),
                arrival_time: arriving.arrival(),
                departure_date: departing.date(),
                departure_time: departing.departure(),
            }
        })
        .collect();

    let layover_hours: i64 = layovers.iter().map(|l| l.hours).sum();
    let total_hours = LEG_TRAVEL_HOURS * legs.len() as i64 + layover_hours;

    debug!(
        segments = waypoints.len() - 1,
        legs = legs.len(),
        total_cost,
        "Multi-leg voyage found"
    );

    PathResult {
        found: true,
        path,
        legs,
        layovers,
        total_cost,
        total_hours,
        error: None,
        warnings: Vec::new(),
    }
}
