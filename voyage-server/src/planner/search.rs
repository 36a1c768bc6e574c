//! Shared machinery for the array-backed searches.
//!
//! The Dijkstra variants keep one arrival state per port (date and
//! time of the best-known arrival) and recover the leg that produced
//! it by re-querying the network through the parent pointer. The
//! helpers here implement that recovery, the parent-chain walk, leg
//! materialization for a reconstructed chain, and the layover/total
//! bookkeeping every finder ends with.

use crate::domain::{ClockTime, Leg, PortName, VoyageDate};
use crate::network::{Network, PortIndexMap};

use super::charges::port_charge;
use super::result::{Layover, PathResult};
use super::LEG_TRAVEL_HOURS;

/// Best-known arrival at a port during a forward search.
#[derive(Debug, Clone, Copy)]
pub(super) struct ArrivalState {
    pub date: VoyageDate,
    pub time: ClockTime,
}

/// Pick the unvisited index with the smallest finite key.
pub(super) fn min_unvisited(keys: &[u64], visited: &[bool]) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (idx, &key) in keys.iter().enumerate() {
        if visited[idx] || key == u64::MAX {
            continue;
        }
        if best.is_none_or(|b| key < keys[b]) {
            best = Some(idx);
        }
    }

    best
}

/// The daily docking charge at a port; unknown ports charge nothing.
pub(super) fn daily_charge(network: &Network, port: &PortName) -> u32 {
    network.port(port).map(|p| p.daily_charge).unwrap_or(0)
}

/// Recover the leg that the search used to reach `port`.
///
/// The search stores only (parent, arrival date, arrival time) per
/// port, so the arriving leg is found the same way the relaxation
/// found it: among the parent's connecting legs from the parent's own
/// arrival state, the one landing at `port` on the recorded date.
pub(super) fn arriving_leg<'n>(
    network: &'n Network,
    mapper: &PortIndexMap,
    parent_idx: usize,
    parent_arrival: ArrivalState,
    port: &PortName,
    arrival_date: VoyageDate,
) -> Option<&'n Leg> {
    network
        .connecting_legs_from(mapper.name(parent_idx), parent_arrival.date, parent_arrival.time)
        .into_iter()
        .find(|leg| leg.destination() == port && leg.date() == arrival_date)
}

/// Walk the parent pointers back from `dest`, returning the chain in
/// origin-to-destination order.
pub(super) fn parent_chain(parent: &[Option<usize>], dest: usize) -> Vec<usize> {
    let mut chain = Vec::new();
    let mut current = Some(dest);

    while let Some(idx) = current {
        chain.push(idx);
        current = parent[idx];
    }

    chain.reverse();
    chain
}

/// Materialize the legs along a reconstructed chain by re-querying the
/// network with each port's stored arrival state.
///
/// Returns `None` if any adjacent pair has no matching leg.
pub(super) fn materialize_legs(
    network: &Network,
    mapper: &PortIndexMap,
    chain: &[usize],
    arrivals: &[Option<ArrivalState>],
) -> Option<Vec<Leg>> {
    let mut legs = Vec::with_capacity(chain.len().saturating_sub(1));

    for pair in chain.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let from_arrival = arrivals[from]?;
        let to_arrival = arrivals[to]?;

        let leg = arriving_leg(
            network,
            mapper,
            from,
            from_arrival,
            mapper.name(to),
            to_arrival.date,
        )?;
        legs.push(leg.clone());
    }

    Some(legs)
}

/// Build the layover list for a leg sequence: one entry per
/// intermediate port, with the charge the port levies for the wait.
pub(super) fn build_layovers(network: &Network, legs: &[Leg]) -> Vec<Layover> {
    legs.windows(2)
        .map(|pair| {
            let (arriving, departing) = (&pair[0], &pair[1]);
            let port = arriving.destination().clone();
            let hours = arriving.layover_until(departing);
            let charge = port_charge(daily_charge(network, &port), hours);

            Layover {
                port,
                hours,
                charge,
                arrival_date: arriving.date(),
                arrival_time: arriving.arrival(),
                departure_date: departing.date(),
                departure_time: departing.departure(),
            }
        })
        .collect()
}

/// Assemble a found result, recomputing the totals from the legs and
/// layovers. The recomputed total is authoritative regardless of what
/// the search accumulated along the way.
pub(super) fn finalize(path: Vec<PortName>, legs: Vec<Leg>, layovers: Vec<Layover>) -> PathResult {
    let fares: u64 = legs.iter().map(|leg| u64::from(leg.fare())).sum();
    let port_charges: u64 = layovers.iter().map(|l| l.charge).sum();
    let layover_hours: i64 = layovers.iter().map(|l| l.hours).sum();

    PathResult {
        found: true,
        total_cost: fares + port_charges,
        total_hours: LEG_TRAVEL_HOURS * legs.len() as i64 + layover_hours,
        path,
        legs,
        layovers,
        error: None,
        warnings: Vec::new(),
    }
}
