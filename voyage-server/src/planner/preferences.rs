//! Voyage preference filtering.

use crate::domain::{Leg, PortName};

/// Optional restrictions on which legs, intermediate ports, and total
/// durations are acceptable. Any unset field is inactive.
#[derive(Debug, Clone, Default)]
pub struct PreferenceFilter {
    /// Acceptable carriers. `None` (or an empty list) accepts all.
    pub carriers: Option<Vec<String>>,

    /// Ports the voyage must call at.
    pub required_ports: Vec<PortName>,

    /// Ports the voyage must avoid entirely.
    pub excluded_ports: Vec<PortName>,

    /// Maximum total voyage duration in hours.
    pub max_voyage_hours: Option<i64>,
}

impl PreferenceFilter {
    /// An inactive filter accepting everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a single leg is acceptable: carried by a whitelisted
    /// carrier and touching no excluded port at either end.
    pub fn matches_leg(&self, leg: &Leg) -> bool {
        if let Some(carriers) = &self.carriers {
            if !carriers.is_empty() && !carriers.iter().any(|c| c == leg.carrier()) {
                return false;
            }
        }

        if self
            .excluded_ports
            .iter()
            .any(|p| p == leg.origin() || p == leg.destination())
        {
            return false;
        }

        true
    }

    /// Whether a port is on the excluded list.
    pub fn excludes_port(&self, port: &PortName) -> bool {
        self.excluded_ports.contains(port)
    }

    /// The required ports a path fails to call at.
    pub fn missing_required_ports(&self, path: &[PortName]) -> Vec<PortName> {
        self.required_ports
            .iter()
            .filter(|required| !path.contains(required))
            .cloned()
            .collect()
    }

    /// Whether a total voyage duration is within the configured limit.
    pub fn within_duration_limit(&self, total_hours: i64) -> bool {
        match self.max_voyage_hours {
            Some(limit) => total_hours <= limit,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, VoyageDate};

    fn name(s: &str) -> PortName {
        PortName::parse(s).unwrap()
    }

    fn leg(from: &str, to: &str, carrier: &str) -> Leg {
        Leg::new(
            name(from),
            name(to),
            VoyageDate::parse("01/05/2025").unwrap(),
            ClockTime::parse("08:00").unwrap(),
            ClockTime::parse("16:00").unwrap(),
            100,
            carrier.into(),
        )
        .unwrap()
    }

    #[test]
    fn inactive_filter_accepts_everything() {
        let filter = PreferenceFilter::new();
        assert!(filter.matches_leg(&leg("Karachi", "Dubai", "Maersk")));
        assert!(filter.missing_required_ports(&[name("Karachi")]).is_empty());
        assert!(filter.within_duration_limit(10_000));
    }

    #[test]
    fn carrier_whitelist() {
        let filter = PreferenceFilter {
            carriers: Some(vec!["Maersk".into(), "Evergreen".into()]),
            ..Default::default()
        };

        assert!(filter.matches_leg(&leg("Karachi", "Dubai", "Maersk")));
        assert!(filter.matches_leg(&leg("Karachi", "Dubai", "Evergreen")));
        assert!(!filter.matches_leg(&leg("Karachi", "Dubai", "CMA-CGM")));
    }

    #[test]
    fn empty_carrier_list_is_inactive() {
        let filter = PreferenceFilter {
            carriers: Some(vec![]),
            ..Default::default()
        };
        assert!(filter.matches_leg(&leg("Karachi", "Dubai", "Anyone")));
    }

    #[test]
    fn excluded_ports_reject_either_endpoint() {
        let filter = PreferenceFilter {
            excluded_ports: vec![name("Dubai")],
            ..Default::default()
        };

        assert!(!filter.matches_leg(&leg("Karachi", "Dubai", "Maersk")));
        assert!(!filter.matches_leg(&leg("Dubai", "Doha", "Maersk")));
        assert!(filter.matches_leg(&leg("Karachi", "Doha", "Maersk")));
        assert!(filter.excludes_port(&name("Dubai")));
        assert!(!filter.excludes_port(&name("Doha")));
    }

    #[test]
    fn missing_required_ports_reported() {
        let filter = PreferenceFilter {
            required_ports: vec![name("Dubai"), name("Doha")],
            ..Default::default()
        };

        let path = [name("Karachi"), name("Dubai"), name("Colombo")];
        assert_eq!(filter.missing_required_ports(&path), vec![name("Doha")]);
    }

    #[test]
    fn duration_limit() {
        let filter = PreferenceFilter {
            max_voyage_hours: Some(48),
            ..Default::default()
        };

        assert!(filter.within_duration_limit(48));
        assert!(!filter.within_duration_limit(49));
    }
}
