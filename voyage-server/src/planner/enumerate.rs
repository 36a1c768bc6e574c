//! Exhaustive enumeration of simple voyages.
//!
//! A depth-first walk over the legs departing on the query date,
//! yielding every cycle-free port sequence from origin to destination
//! up to a depth cap. Diagnostic display only; routing never consults
//! it.

use tracing::debug;

use crate::domain::{PortName, VoyageDate};
use crate::network::Network;

pub(super) fn enumerate_all_paths(
    network: &Network,
    origin: &PortName,
    destination: &PortName,
    date: VoyageDate,
    max_depth: usize,
) -> Vec<Vec<PortName>> {
    let mut all_paths = Vec::new();
    let mut current_path = Vec::new();

    visit(
        network,
        origin,
        destination,
        date,
        max_depth,
        &mut current_path,
        &mut all_paths,
    );

    debug!(paths = all_paths.len(), "Path enumeration complete");
    all_paths
}

fn visit(
    network: &Network,
    current: &PortName,
    destination: &PortName,
    date: VoyageDate,
    max_depth: usize,
    current_path: &mut Vec<PortName>,
    all_paths: &mut Vec<Vec<PortName>>,
) {
    current_path.push(current.clone());

    if current_path.len() > max_depth {
        current_path.pop();
        return;
    }

    if current == destination {
        all_paths.push(current_path.clone());
        current_path.pop();
        return;
    }

    for leg in network.legs_from_on(current, date) {
        // Simple paths only: never revisit a port on the current walk
        if !current_path.contains(leg.destination()) {
            visit(
                network,
                leg.destination(),
                destination,
                date,
                max_depth,
                current_path,
                all_paths,
            );
        }
    }

    current_path.pop();
}
