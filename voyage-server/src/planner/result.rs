//! Query result types.

use crate::domain::{ClockTime, Leg, PortName, VoyageDate};

/// Input errors that stop a query before any search runs.
///
/// These are returned inside [`PathResult`] rather than as `Err`: the
/// query surface never fails, it reports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The origin port is not on the network
    #[error("unknown origin port: {0}")]
    UnknownOrigin(PortName),

    /// The destination port is not on the network
    #[error("unknown destination port: {0}")]
    UnknownDestination(PortName),

    /// An intermediate port of a multi-leg request is not on the network
    #[error("unknown intermediate port: {0}")]
    UnknownIntermediate(PortName),
}

/// Soft-constraint violations.
///
/// The voyage is still returned; the caller decides how loudly to
/// complain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanWarning {
    /// The found voyage does not call at a required port
    #[error("voyage does not call at required port {0}")]
    RequiredPortMissing(PortName),

    /// The found voyage exceeds the maximum duration preference
    #[error("voyage duration of {hours}h exceeds the {limit}h limit")]
    DurationExceeded { hours: i64, limit: i64 },
}

/// A docked wait at an intermediate port between two legs.
#[derive(Debug, Clone, PartialEq)]
pub struct Layover {
    /// The port the vessel waits at.
    pub port: PortName,

    /// Hours docked, whole hours.
    pub hours: i64,

    /// Port charge levied for this wait (0 unless the wait exceeds
    /// twelve hours).
    pub charge: u64,

    /// When the vessel arrived.
    pub arrival_date: VoyageDate,
    /// Arrival clock time.
    pub arrival_time: ClockTime,

    /// When the vessel departs again.
    pub departure_date: VoyageDate,
    /// Departure clock time.
    pub departure_time: ClockTime,
}

/// The outcome of a routing query.
///
/// When `found` is true: `path` runs origin to destination,
/// `path.len() == legs.len() + 1`, there is one layover per
/// intermediate port, `total_cost` is the sum of fares and port
/// charges, and `total_hours` counts 24 hours per leg plus all
/// layover hours.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathResult {
    /// Whether a voyage was found.
    pub found: bool,

    /// Ports visited, in order.
    pub path: Vec<PortName>,

    /// Legs sailed, in order.
    pub legs: Vec<Leg>,

    /// Layovers between consecutive legs.
    pub layovers: Vec<Layover>,

    /// Total fares plus port charges, in whole dollars.
    pub total_cost: u64,

    /// Total voyage duration in hours.
    pub total_hours: i64,

    /// Why the query could not run, if it could not.
    pub error: Option<PlanError>,

    /// Soft-constraint violations on the returned voyage.
    pub warnings: Vec<PlanWarning>,
}

impl PathResult {
    /// A result for a query whose inputs were invalid.
    pub fn rejected(error: PlanError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// A result for a search that exhausted without reaching the
    /// destination.
    pub fn no_path() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> PortName {
        PortName::parse(s).unwrap()
    }

    #[test]
    fn rejected_carries_diagnostic() {
        let result = PathResult::rejected(PlanError::UnknownOrigin(name("Atlantis")));
        assert!(!result.found);
        assert!(result.path.is_empty());
        assert_eq!(
            result.error.unwrap().to_string(),
            "unknown origin port: Atlantis"
        );
    }

    #[test]
    fn no_path_is_empty() {
        let result = PathResult::no_path();
        assert!(!result.found);
        assert!(result.legs.is_empty());
        assert!(result.layovers.is_empty());
        assert!(result.error.is_none());
        assert_eq!(result.total_cost, 0);
    }

    #[test]
    fn warning_display() {
        let warning = PlanWarning::DurationExceeded {
            hours: 80,
            limit: 48,
        };
        assert_eq!(
            warning.to_string(),
            "voyage duration of 80h exceeds the 48h limit"
        );
    }
}
