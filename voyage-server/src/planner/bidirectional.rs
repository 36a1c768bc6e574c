//! Bidirectional cheapest-voyage search.
//!
//! Two Dijkstras run alternately: forward from the origin with full
//! time awareness and port charges, backward from the destination over
//! reverse adjacency on fares alone, with no temporal filtering. The
//! backward half therefore under-prices and over-explores; its
//! distances are a lower bound, not a cost. The total reported to the
//! caller is recomputed from the reconstructed legs with the full cost
//! model, which reconciles the two halves.

use tracing::{debug, trace};

use crate::domain::{ClockTime, Leg, PortName, VoyageDate};
use crate::network::{Network, PortIndexMap};

use super::charges::port_charge;
use super::result::{PathResult, PlanError};
use super::search::{
    arriving_leg, build_layovers, daily_charge, finalize, min_unvisited, parent_chain,
    ArrivalState,
};

pub(super) fn find_cheapest_bidirectional(
    network: &Network,
    origin: &PortName,
    destination: &PortName,
    date: VoyageDate,
) -> PathResult {
    if !network.has_port(origin) {
        return PathResult::rejected(PlanError::UnknownOrigin(origin.clone()));
    }
    if !network.has_port(destination) {
        return PathResult::rejected(PlanError::UnknownDestination(destination.clone()));
    }

    if origin == destination {
        return finalize(vec![origin.clone()], Vec::new(), Vec::new());
    }

    let mapper = PortIndexMap::from_network(network);
    let count = mapper.len();
    debug!(ports = count, "Running bidirectional cheapest-voyage search");

    let (Some(origin_idx), Some(dest_idx)) =
        (mapper.index_of(origin), mapper.index_of(destination))
    else {
        return PathResult::no_path();
    };

    // Reverse adjacency for the backward half. Legs into ports the
    // mapper does not know (unresolved destinations) cannot be relaxed
    // backward and are left out.
    let mut incoming: Vec<Vec<&Leg>> = vec![Vec::new(); count];
    for leg in network.all_legs() {
        if let Some(dest) = mapper.index_of(leg.destination()) {
            incoming[dest].push(leg);
        }
    }

    let mut fwd_dist = vec![u64::MAX; count];
    let mut fwd_parent: Vec<Option<usize>> = vec![None; count];
    let mut fwd_visited = vec![false; count];
    let mut arrivals: Vec<Option<ArrivalState>> = vec![None; count];

    let mut bwd_dist = vec![u64::MAX; count];
    let mut bwd_parent: Vec<Option<usize>> = vec![None; count];
    let mut bwd_visited = vec![false; count];

    fwd_dist[origin_idx] = 0;
    arrivals[origin_idx] = Some(ArrivalState {
        date,
        time: ClockTime::midnight(),
    });
    bwd_dist[dest_idx] = 0;

    let mut meeting: Option<usize> = None;
    let mut best_distance = u64::MAX;

    // Alternate one forward pop and one backward pop per iteration.
    for _ in 0..count * 2 {
        let fwd_current = min_unvisited(&fwd_dist, &fwd_visited);
        if let Some(current) = fwd_current {
            fwd_visited[current] = true;

            let current_name = mapper.name(current).clone();
            if let Some(current_arrival) = arrivals[current] {
                let previous = fwd_parent[current].and_then(|p| {
                    arrivals[p].and_then(|pa| {
                        arriving_leg(network, &mapper, p, pa, &current_name, current_arrival.date)
                            .cloned()
                    })
                });

                for leg in network.connecting_legs_from(
                    &current_name,
                    current_arrival.date,
                    current_arrival.time,
                ) {
                    let Some(neighbor) = mapper.index_of(leg.destination()) else {
                        continue;
                    };
                    if fwd_visited[neighbor] {
                        continue;
                    }

                    let layover = previous
                        .as_ref()
                        .map(|prev| prev.layover_until(leg))
                        .unwrap_or(0);
                    let charge = port_charge(daily_charge(network, &current_name), layover);

                    let candidate = fwd_dist[current] + u64::from(leg.fare()) + charge;
                    if candidate < fwd_dist[neighbor] {
                        fwd_dist[neighbor] = candidate;
                        fwd_parent[neighbor] = Some(current);
                        arrivals[neighbor] = Some(ArrivalState {
                            date: leg.date(),
                            time: leg.arrival(),
                        });
                    }

                    if bwd_visited[neighbor] && fwd_dist[neighbor] != u64::MAX {
                        let total = fwd_dist[neighbor] + bwd_dist[neighbor];
                        if total < best_distance {
                            trace!(port = %mapper.name(neighbor), total, "Frontiers met");
                            best_distance = total;
                            meeting = Some(neighbor);
                        }
                    }
                }
            }
        }

        let bwd_current = min_unvisited(&bwd_dist, &bwd_visited);
        if let Some(current) = bwd_current {
            bwd_visited[current] = true;

            // Fare-only relaxation: no dates, no times, no charges.
            for leg in &incoming[current] {
                let Some(from) = mapper.index_of(leg.origin()) else {
                    continue;
                };
                if bwd_visited[from] {
                    continue;
                }

                let candidate = bwd_dist[current] + u64::from(leg.fare());
                if candidate < bwd_dist[from] {
                    bwd_dist[from] = candidate;
                    bwd_parent[from] = Some(current);
                }

                if fwd_visited[from] && bwd_dist[from] != u64::MAX {
                    let total = fwd_dist[from] + bwd_dist[from];
                    if total < best_distance {
                        trace!(port = %mapper.name(from), total, "Frontiers met");
                        best_distance = total;
                        meeting = Some(from);
                    }
                }
            }
        }

        if meeting.is_some() {
            break;
        }
        if fwd_current.is_none() && bwd_current.is_none() {
            break;
        }
    }

    let Some(meet) = meeting else {
        debug!("Frontiers never met");
        return PathResult::no_path();
    };

    // Forward half of the path, origin to meeting point, then the
    // backward parents carry on to the destination.
    let mut chain = parent_chain(&fwd_parent, meet);
    let mut current = bwd_parent[meet];
    while let Some(idx) = current {
        chain.push(idx);
        current = bwd_parent[idx];
    }

    let path: Vec<PortName> = chain.iter().map(|&idx| mapper.name(idx).clone()).collect();

    // Stitch legs sequentially: each leg must depart at or after the
    // previous leg's arrival. The backward half ignored time, so the
    // stitch can fail; that is reported as no path rather than as a
    // voyage with holes in it.
    let mut legs: Vec<Leg> = Vec::with_capacity(path.len().saturating_sub(1));
    for i in 0..path.len().saturating_sub(1) {
        let (from_date, from_time) = match legs.last() {
            Some(prev) => (prev.date(), prev.arrival()),
            None => (date, ClockTime::midnight()),
        };

        let next = network
            .connecting_legs_from(&path[i], from_date, from_time)
            .into_iter()
            .find(|leg| leg.destination() == &path[i + 1]);

        match next {
            Some(leg) => legs.push(leg.clone()),
            None => {
                debug!(
                    from = %path[i],
                    to = %path[i + 1],
                    "Could not stitch a feasible leg across the meeting point"
                );
                return PathResult::no_path();
            }
        }
    }

    let layovers = build_layovers(network, &legs);
    let result = finalize(path, legs, layovers);

    debug!(
        meeting = %mapper.name(meet),
        search_bound = best_distance,
        total_cost = result.total_cost,
        "Bidirectional voyage found"
    );

    result
}
