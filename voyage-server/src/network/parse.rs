//! Fixture file parsing.
//!
//! Two line-oriented, whitespace-separated formats populate the
//! network at startup:
//!
//! ```text
//! # legs
//! <origin> <destination> <DD/MM/YYYY> <HH:MM> <HH:MM> <fare> <carrier>
//! # port charges
//! <portName> <dailyCharge>
//! ```
//!
//! Unparsable lines are skipped. A port referenced by a leg without a
//! charge entry gets a daily charge of 0. Missing files degrade to an
//! empty network rather than an error; the engine never aborts over
//! fixture problems.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::{ClockTime, Leg, Port, PortName, VoyageDate};

use super::Network;

/// Parse the port-charge fixture: one `<portName> <dailyCharge>` pair
/// per line. Malformed lines are skipped.
pub fn parse_port_charges(input: &str) -> HashMap<PortName, u32> {
    let mut charges = HashMap::new();

    for line in input.lines() {
        let mut fields = line.split_whitespace();
        let (Some(name), Some(charge)) = (fields.next(), fields.next()) else {
            continue;
        };

        let (Ok(name), Ok(charge)) = (PortName::parse(name), charge.parse::<u32>()) else {
            debug!(line, "Skipping malformed port charge line");
            continue;
        };

        charges.insert(name, charge);
    }

    charges
}

/// Parse one leg line into its record.
fn parse_leg_line(line: &str) -> Option<Leg> {
    let mut fields = line.split_whitespace();

    let origin = PortName::parse(fields.next()?).ok()?;
    let destination = PortName::parse(fields.next()?).ok()?;
    let date = VoyageDate::parse(fields.next()?).ok()?;
    let departure = ClockTime::parse(fields.next()?).ok()?;
    let arrival = ClockTime::parse(fields.next()?).ok()?;
    let fare = fields.next()?.parse::<u32>().ok()?;
    let carrier = fields.next()?.to_string();

    Leg::new(origin, destination, date, departure, arrival, fare, carrier).ok()
}

/// Build a network from the two fixture texts.
///
/// Every port referenced by a parsed leg is registered (origin and
/// destination alike, so no leg is dropped for an unknown origin),
/// with its daily charge taken from the charge table or defaulting
/// to 0. Legs are then added in file order.
pub fn parse_network(legs_input: &str, charges_input: &str) -> Network {
    let charges = parse_port_charges(charges_input);

    let mut legs = Vec::new();
    let mut skipped = 0usize;
    for line in legs_input.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_leg_line(line) {
            Some(leg) => legs.push(leg),
            None => {
                debug!(line, "Skipping malformed leg line");
                skipped += 1;
            }
        }
    }

    let mut network = Network::new();
    for leg in &legs {
        for name in [leg.origin(), leg.destination()] {
            if !network.has_port(name) {
                let charge = charges.get(name).copied().unwrap_or(0);
                network.add_port(Port::new(name.clone(), charge));
            }
        }
    }

    for leg in legs {
        network.add_leg(leg);
    }

    debug!(
        ports = network.port_count(),
        legs = network.all_legs().count(),
        skipped,
        "Parsed network fixtures"
    );

    network
}

/// Load the network from fixture files on disk.
///
/// A file that cannot be read is treated as empty.
pub fn load_network(legs_path: &Path, charges_path: &Path) -> Network {
    let legs_input = read_or_empty(legs_path);
    let charges_input = read_or_empty(charges_path);
    parse_network(&legs_input, &charges_input)
}

fn read_or_empty(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) => {
            warn!(path = %path.display(), %error, "Could not read fixture file, treating as empty");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PortName {
        PortName::parse(s).unwrap()
    }

    #[test]
    fn parse_charges_basic() {
        let charges = parse_port_charges("Dubai 40\nKarachi 25\n");
        assert_eq!(charges.get(&name("Dubai")), Some(&40));
        assert_eq!(charges.get(&name("Karachi")), Some(&25));
    }

    #[test]
    fn parse_charges_skips_malformed_lines() {
        let charges = parse_port_charges("Dubai forty\n\nKarachi 25\nDoha\n");
        assert_eq!(charges.len(), 1);
        assert_eq!(charges.get(&name("Karachi")), Some(&25));
    }

    #[test]
    fn parse_network_registers_both_endpoints() {
        let network = parse_network(
            "Karachi Dubai 01/05/2025 08:00 16:00 100 Maersk\n",
            "Dubai 40\n",
        );

        assert_eq!(network.port_count(), 2);
        assert_eq!(network.port(&name("Dubai")).unwrap().daily_charge, 40);
        // No charge entry defaults to 0
        assert_eq!(network.port(&name("Karachi")).unwrap().daily_charge, 0);
        assert_eq!(network.legs_from(&name("Karachi")).len(), 1);
    }

    #[test]
    fn parse_network_skips_malformed_leg_lines() {
        let input = "\
Karachi Dubai 01/05/2025 08:00 16:00 100 Maersk
Karachi Dubai 2025-05-01 08:00 16:00 100 Maersk
Karachi Dubai 01/05/2025 8am 16:00 100 Maersk
Karachi Dubai 01/05/2025 08:00 16:00 cheap Maersk
Karachi
Dubai Doha 01/05/2025 18:00 23:00 150 Evergreen
";
        let network = parse_network(input, "");
        assert_eq!(network.all_legs().count(), 2);
    }

    #[test]
    fn parse_network_rejects_self_loops() {
        let network = parse_network("Dubai Dubai 01/05/2025 08:00 16:00 100 Maersk\n", "");
        assert_eq!(network.all_legs().count(), 0);
    }

    #[test]
    fn parse_network_ignores_extra_trailing_fields() {
        let network = parse_network(
            "Karachi Dubai 01/05/2025 08:00 16:00 100 Maersk extra tokens\n",
            "",
        );
        assert_eq!(network.all_legs().count(), 1);
    }

    #[test]
    fn parse_network_empty_inputs() {
        let network = parse_network("", "");
        assert_eq!(network.port_count(), 0);
        assert_eq!(network.all_legs().count(), 0);
    }

    #[test]
    fn load_network_missing_files_degrade_to_empty() {
        let network = load_network(
            Path::new("/nonexistent/Routes.txt"),
            Path::new("/nonexistent/PortCharges.txt"),
        );
        assert_eq!(network.port_count(), 0);
    }
}
