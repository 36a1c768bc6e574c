//! Reachable-leg scan.
//!
//! Lists every leg that could participate in some origin-to-
//! destination voyage: a reverse breadth-first pass from the
//! destination labels the ports that can reach it, then a forward
//! pass from the origin collects every outbound leg landing on a
//! labeled port. The scan is date-blind; the query date is reported
//! for context only.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, warn};

use crate::domain::{ClockTime, Leg, PortName, VoyageDate};
use crate::network::{Network, PortIndexMap};

use super::preferences::PreferenceFilter;

pub(super) fn connecting_legs(
    network: &Network,
    origin: &PortName,
    destination: &PortName,
    date: VoyageDate,
    preferences: Option<&PreferenceFilter>,
) -> Vec<Leg> {
    if !network.has_port(origin) {
        warn!(%origin, "Unknown origin for reachable-leg scan");
        return Vec::new();
    }
    if !network.has_port(destination) {
        warn!(%destination, "Unknown destination for reachable-leg scan");
        return Vec::new();
    }

    let mapper = PortIndexMap::from_network(network);
    let count = mapper.len();
    debug!(%origin, %destination, %date, ports = count, "Scanning reachable legs");

    let (Some(origin_idx), Some(dest_idx)) =
        (mapper.index_of(origin), mapper.index_of(destination))
    else {
        return Vec::new();
    };

    let mut incoming: Vec<Vec<&Leg>> = vec![Vec::new(); count];
    for leg in network.all_legs() {
        if let Some(dest) = mapper.index_of(leg.destination()) {
            incoming[dest].push(leg);
        }
    }

    // Reverse pass: label every port with a route to the destination.
    let mut can_reach = vec![false; count];
    let mut queue = VecDeque::new();
    can_reach[dest_idx] = true;
    queue.push_back(dest_idx);

    while let Some(current) = queue.pop_front() {
        for leg in &incoming[current] {
            if let Some(filter) = preferences {
                if !filter.matches_leg(leg) {
                    continue;
                }
            }
            let Some(from) = mapper.index_of(leg.origin()) else {
                continue;
            };
            if !can_reach[from] {
                can_reach[from] = true;
                queue.push_back(from);
            }
        }
    }

    // Forward pass: collect legs from everything the origin reaches
    // that land on a labeled port.
    let mut collected = Vec::new();
    let mut seen: HashSet<(PortName, PortName, VoyageDate, ClockTime)> = HashSet::new();
    let mut visited = vec![false; count];
    let mut queue = VecDeque::new();
    visited[origin_idx] = true;
    queue.push_back(origin_idx);

    while let Some(current) = queue.pop_front() {
        for leg in network.legs_from(mapper.name(current)) {
            if let Some(filter) = preferences {
                if !filter.matches_leg(leg) {
                    continue;
                }
            }

            let Some(leg_dest) = mapper.index_of(leg.destination()) else {
                continue;
            };
            if !can_reach[leg_dest] {
                continue;
            }

            let key = (
                leg.origin().clone(),
                leg.destination().clone(),
                leg.date(),
                leg.departure(),
            );
            if seen.insert(key) {
                collected.push(leg.clone());
            }

            if !visited[leg_dest] {
                visited[leg_dest] = true;
                queue.push_back(leg_dest);
            }
        }
    }

    debug!(legs = collected.len(), "Reachable-leg scan complete");
    collected
}
