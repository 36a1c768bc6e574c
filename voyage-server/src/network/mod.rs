//! The static route network.
//!
//! The network owns the port registry, the per-port outbound leg
//! lists, and the per-port docking queues. It is immutable for the
//! duration of a routing query; docking queues are the only mutable
//! per-port state and the path search never touches them.

mod index;
mod parse;

pub use index::PortIndexMap;
pub use parse::{load_network, parse_network, parse_port_charges};

use std::collections::{HashMap, VecDeque};

use crate::domain::{ClockTime, Leg, Port, PortName, VoyageDate};

/// A port vertex: registry record, outbound legs, docking queue.
#[derive(Debug, Clone)]
struct PortNode {
    port: Port,
    legs: Vec<Leg>,
    docking_queue: VecDeque<String>,
}

/// The maritime network: ports with outbound legs and docking queues.
///
/// Ports keep their insertion order, as do each port's outbound legs;
/// neither order carries meaning for routing.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<PortNode>,
    by_name: HashMap<PortName, usize>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a port. A port with the same name already present is left
    /// untouched.
    pub fn add_port(&mut self, port: Port) {
        if self.by_name.contains_key(&port.name) {
            return;
        }

        self.by_name.insert(port.name.clone(), self.nodes.len());
        self.nodes.push(PortNode {
            port,
            legs: Vec::new(),
            docking_queue: VecDeque::new(),
        });
    }

    /// Add a leg to its origin's outbound list.
    ///
    /// Legs whose origin is unknown are dropped. Unknown destinations
    /// are accepted; they resolve (or fail to) at query time.
    pub fn add_leg(&mut self, leg: Leg) {
        match self.by_name.get(leg.origin()) {
            Some(&idx) => self.nodes[idx].legs.push(leg),
            None => {
                tracing::debug!(origin = %leg.origin(), "Dropping leg from unknown origin");
            }
        }
    }

    /// Whether a port with this name exists.
    pub fn has_port(&self, name: &PortName) -> bool {
        self.by_name.contains_key(name)
    }

    /// Look up a port by name.
    pub fn port(&self, name: &PortName) -> Option<&Port> {
        self.by_name.get(name).map(|&idx| &self.nodes[idx].port)
    }

    /// Iterate over all ports in insertion order.
    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.nodes.iter().map(|node| &node.port)
    }

    /// Number of ports.
    pub fn port_count(&self) -> usize {
        self.nodes.len()
    }

    /// Outbound legs from a port, in insertion order.
    ///
    /// Unknown ports have no legs.
    pub fn legs_from(&self, name: &PortName) -> &[Leg] {
        self.by_name
            .get(name)
            .map(|&idx| self.nodes[idx].legs.as_slice())
            .unwrap_or(&[])
    }

    /// Outbound legs departing on exactly the given date.
    pub fn legs_from_on(&self, name: &PortName, date: VoyageDate) -> Vec<&Leg> {
        self.legs_from(name)
            .iter()
            .filter(|leg| leg.date() == date)
            .collect()
    }

    /// Outbound legs a vessel arriving at `(date, time)` can still
    /// catch: any later-dated leg, or a same-dated leg departing at or
    /// after the arrival time. Past-dated legs are excluded.
    pub fn connecting_legs_from(
        &self,
        name: &PortName,
        date: VoyageDate,
        time: ClockTime,
    ) -> Vec<&Leg> {
        self.legs_from(name)
            .iter()
            .filter(|leg| {
                leg.date() > date || (leg.date() == date && leg.departure() >= time)
            })
            .collect()
    }

    /// Iterate over every leg in the network.
    pub fn all_legs(&self) -> impl Iterator<Item = &Leg> {
        self.nodes.iter().flat_map(|node| node.legs.iter())
    }

    /// Enqueue a ship at the back of a port's docking queue.
    ///
    /// Returns false if the port is unknown.
    pub fn dock_ship(&mut self, name: &PortName, ship: String) -> bool {
        match self.by_name.get(name) {
            Some(&idx) => {
                self.nodes[idx].docking_queue.push_back(ship);
                true
            }
            None => false,
        }
    }

    /// Dequeue the ship at the front of a port's docking queue.
    pub fn release_ship(&mut self, name: &PortName) -> Option<String> {
        let &idx = self.by_name.get(name)?;
        self.nodes[idx].docking_queue.pop_front()
    }

    /// The ship at the front of a port's docking queue, if any.
    pub fn front_ship(&self, name: &PortName) -> Option<&str> {
        let &idx = self.by_name.get(name)?;
        self.nodes[idx].docking_queue.front().map(String::as_str)
    }

    /// Number of ships queued at a port. Unknown ports have none.
    pub fn queue_len(&self, name: &PortName) -> usize {
        self.by_name
            .get(name)
            .map(|&idx| self.nodes[idx].docking_queue.len())
            .unwrap_or(0)
    }

    /// Non-destructive listing of a port's docking queue, front first.
    pub fn queue_snapshot(&self, name: &PortName) -> Vec<String> {
        self.by_name
            .get(name)
            .map(|&idx| self.nodes[idx].docking_queue.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PortName {
        PortName::parse(s).unwrap()
    }

    fn date(s: &str) -> VoyageDate {
        VoyageDate::parse(s).unwrap()
    }

    fn time(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    fn leg(from: &str, to: &str, d: &str, dep: &str, arr: &str, fare: u32) -> Leg {
        Leg::new(
            name(from),
            name(to),
            date(d),
            time(dep),
            time(arr),
            fare,
            "TestLine".into(),
        )
        .unwrap()
    }

    fn network_with_ports(names: &[&str]) -> Network {
        let mut network = Network::new();
        for n in names {
            network.add_port(Port::new(name(n), 0));
        }
        network
    }

    #[test]
    fn add_port_is_idempotent() {
        let mut network = Network::new();
        network.add_port(Port::new(name("Dubai"), 40));
        network.add_port(Port::new(name("Dubai"), 99));

        assert_eq!(network.port_count(), 1);
        // First registration wins
        assert_eq!(network.port(&name("Dubai")).unwrap().daily_charge, 40);
    }

    #[test]
    fn add_leg_unknown_origin_is_dropped() {
        let mut network = network_with_ports(&["Dubai"]);
        network.add_leg(leg("Atlantis", "Dubai", "01/05/2025", "08:00", "16:00", 10));

        assert!(network.all_legs().next().is_none());
    }

    #[test]
    fn add_leg_unknown_destination_is_kept() {
        let mut network = network_with_ports(&["Dubai"]);
        network.add_leg(leg("Dubai", "Atlantis", "01/05/2025", "08:00", "16:00", 10));

        assert_eq!(network.legs_from(&name("Dubai")).len(), 1);
    }

    #[test]
    fn legs_keep_insertion_order() {
        let mut network = network_with_ports(&["Dubai", "Doha", "Karachi"]);
        network.add_leg(leg("Dubai", "Doha", "01/05/2025", "08:00", "12:00", 10));
        network.add_leg(leg("Dubai", "Karachi", "01/05/2025", "09:00", "15:00", 20));

        let fares: Vec<u32> = network
            .legs_from(&name("Dubai"))
            .iter()
            .map(Leg::fare)
            .collect();
        assert_eq!(fares, vec![10, 20]);
    }

    #[test]
    fn legs_from_on_filters_exact_date() {
        let mut network = network_with_ports(&["Dubai", "Doha"]);
        network.add_leg(leg("Dubai", "Doha", "01/05/2025", "08:00", "12:00", 10));
        network.add_leg(leg("Dubai", "Doha", "02/05/2025", "08:00", "12:00", 20));

        let on_first = network.legs_from_on(&name("Dubai"), date("01/05/2025"));
        assert_eq!(on_first.len(), 1);
        assert_eq!(on_first[0].fare(), 10);
    }

    #[test]
    fn connecting_legs_respect_date_and_time() {
        let mut network = network_with_ports(&["Dubai", "Doha"]);
        network.add_leg(leg("Dubai", "Doha", "01/05/2025", "08:00", "12:00", 10));
        network.add_leg(leg("Dubai", "Doha", "01/05/2025", "18:00", "22:00", 20));
        network.add_leg(leg("Dubai", "Doha", "02/05/2025", "06:00", "10:00", 30));
        network.add_leg(leg("Dubai", "Doha", "30/04/2025", "06:00", "10:00", 40));

        // Arrive 01/05 at 10:00: the 08:00 sailing and the past-dated
        // one are gone; the 18:00 and next-day sailings remain.
        let fares: Vec<u32> = network
            .connecting_legs_from(&name("Dubai"), date("01/05/2025"), time("10:00"))
            .iter()
            .map(|l| l.fare())
            .collect();
        assert_eq!(fares, vec![20, 30]);
    }

    #[test]
    fn connecting_legs_include_equal_departure_time() {
        let mut network = network_with_ports(&["Dubai", "Doha"]);
        network.add_leg(leg("Dubai", "Doha", "01/05/2025", "10:00", "14:00", 10));

        let legs =
            network.connecting_legs_from(&name("Dubai"), date("01/05/2025"), time("10:00"));
        assert_eq!(legs.len(), 1);
    }

    #[test]
    fn docking_queue_fifo() {
        let mut network = network_with_ports(&["Dubai"]);
        let dubai = name("Dubai");

        assert!(network.dock_ship(&dubai, "Evergreen".into()));
        assert!(network.dock_ship(&dubai, "MSC-Aurora".into()));

        assert_eq!(network.queue_len(&dubai), 2);
        assert_eq!(network.front_ship(&dubai), Some("Evergreen"));

        assert_eq!(network.release_ship(&dubai), Some("Evergreen".into()));
        assert_eq!(network.release_ship(&dubai), Some("MSC-Aurora".into()));
        assert_eq!(network.release_ship(&dubai), None);
    }

    #[test]
    fn docking_queue_snapshot_is_non_destructive() {
        let mut network = network_with_ports(&["Dubai"]);
        let dubai = name("Dubai");
        network.dock_ship(&dubai, "Evergreen".into());
        network.dock_ship(&dubai, "MSC-Aurora".into());

        let snapshot = network.queue_snapshot(&dubai);
        assert_eq!(snapshot, vec!["Evergreen".to_string(), "MSC-Aurora".to_string()]);

        // Queue is untouched
        assert_eq!(network.queue_len(&dubai), 2);
        assert_eq!(network.front_ship(&dubai), Some("Evergreen"));
    }

    #[test]
    fn docking_queue_unknown_port() {
        let mut network = Network::new();
        let nowhere = name("Nowhere");

        assert!(!network.dock_ship(&nowhere, "Evergreen".into()));
        assert_eq!(network.release_ship(&nowhere), None);
        assert_eq!(network.queue_len(&nowhere), 0);
        assert!(network.queue_snapshot(&nowhere).is_empty());
    }
}
