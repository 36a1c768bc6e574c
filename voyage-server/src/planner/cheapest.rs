//! Cheapest-voyage search: time-aware Dijkstra over fares and port
//! charges.
//!
//! The search keeps a single best arrival state per port. Port charges
//! depend on the arriving leg, not just the port, so this is a
//! heuristic: the cheapest way to reach a port is assumed to also give
//! the cheapest onward extensions. A later, costlier arrival that
//! dodges a long layover downstream can in principle beat it; an exact
//! engine would label states by (port, arrival time) instead.

use tracing::{debug, trace, warn};

use crate::domain::{ClockTime, PortName, VoyageDate};
use crate::network::{Network, PortIndexMap};

use super::charges::port_charge;
use super::preferences::PreferenceFilter;
use super::result::{PathResult, PlanError, PlanWarning};
use super::search::{
    arriving_leg, build_layovers, daily_charge, finalize, materialize_legs, min_unvisited,
    parent_chain, ArrivalState,
};

pub(super) fn find_cheapest(
    network: &Network,
    origin: &PortName,
    destination: &PortName,
    date: VoyageDate,
    preferences: Option<&PreferenceFilter>,
) -> PathResult {
    if !network.has_port(origin) {
        return PathResult::rejected(PlanError::UnknownOrigin(origin.clone()));
    }
    if !network.has_port(destination) {
        return PathResult::rejected(PlanError::UnknownDestination(destination.clone()));
    }

    let mapper = PortIndexMap::from_network(network);
    let count = mapper.len();
    debug!(ports = count, "Running cheapest-voyage search");

    let (Some(origin_idx), Some(dest_idx)) =
        (mapper.index_of(origin), mapper.index_of(destination))
    else {
        return PathResult::no_path();
    };

    let mut dist = vec![u64::MAX; count];
    let mut parent: Vec<Option<usize>> = vec![None; count];
    let mut visited = vec![false; count];
    let mut arrivals: Vec<Option<ArrivalState>> = vec![None; count];

    dist[origin_idx] = 0;
    arrivals[origin_idx] = Some(ArrivalState {
        date,
        time: ClockTime::midnight(),
    });

    let mut found = false;

    for _ in 0..count {
        let Some(current) = min_unvisited(&dist, &visited) else {
            break;
        };
        visited[current] = true;

        if current == dest_idx {
            found = true;
            break;
        }

        let current_name = mapper.name(current).clone();
        let Some(current_arrival) = arrivals[current] else {
            continue;
        };

        // The leg we arrived on, needed for layover pricing. The
        // origin has none.
        let previous = parent[current].and_then(|p| {
            arrivals[p].and_then(|pa| {
                arriving_leg(network, &mapper, p, pa, &current_name, current_arrival.date)
                    .cloned()
            })
        });

        for leg in
            network.connecting_legs_from(&current_name, current_arrival.date, current_arrival.time)
        {
            if let Some(filter) = preferences {
                if !filter.matches_leg(leg) {
                    continue;
                }
                if filter.excludes_port(leg.destination()) {
                    continue;
                }
            }

            let Some(neighbor) = mapper.index_of(leg.destination()) else {
                continue;
            };
            if visited[neighbor] {
                continue;
            }

            let mut layover = 0;
            if let Some(prev) = &previous {
                if !prev.can_connect_to(leg) {
                    continue;
                }
                layover = prev.layover_until(leg);
            }

            let charge = port_charge(daily_charge(network, &current_name), layover);
            let candidate = dist[current] + u64::from(leg.fare()) + charge;

            if candidate < dist[neighbor] {
                trace!(
                    port = %leg.destination(),
                    cost = candidate,
                    layover,
                    "Relaxing"
                );
                dist[neighbor] = candidate;
                parent[neighbor] = Some(current);
                arrivals[neighbor] = Some(ArrivalState {
                    date: leg.date(),
                    time: leg.arrival(),
                });
            }
        }
    }

    if !found {
        debug!("No voyage to destination");
        return PathResult::no_path();
    }

    let chain = parent_chain(&parent, dest_idx);
    let path: Vec<PortName> = chain.iter().map(|&idx| mapper.name(idx).clone()).collect();

    let Some(legs) = materialize_legs(network, &mapper, &chain, &arrivals) else {
        return PathResult::no_path();
    };
    let layovers = build_layovers(network, &legs);
    let mut result = finalize(path, legs, layovers);

    if let Some(filter) = preferences {
        for missing in filter.missing_required_ports(&result.path) {
            warn!(port = %missing, "Voyage misses a required port");
            result.warnings.push(PlanWarning::RequiredPortMissing(missing));
        }
        if !filter.within_duration_limit(result.total_hours) {
            let limit = filter.max_voyage_hours.unwrap_or(0);
            warn!(hours = result.total_hours, limit, "Voyage exceeds the duration limit");
            result.warnings.push(PlanWarning::DurationExceeded {
                hours: result.total_hours,
                limit,
            });
        }
    }

    debug!(
        hops = result.legs.len(),
        total_cost = result.total_cost,
        total_hours = result.total_hours,
        "Cheapest voyage found"
    );

    result
}
