//! Voyage planning over the static network.
//!
//! The planner borrows an immutable network for the duration of each
//! query and allocates its own transient state (distance, parent, and
//! arrival arrays keyed by dense port id). Queries run to completion
//! on the calling thread; there are no suspension points and no
//! cancellation.

mod bidirectional;
mod charges;
mod cheapest;
mod enumerate;
mod multi_leg;
mod preferences;
mod reachable;
mod result;
mod search;
mod shortest;


pub use charges::{port_charge, FREE_LAYOVER_HOURS};
pub use preferences::PreferenceFilter;
pub use result::{Layover, PathResult, PlanError, PlanWarning};

use tracing::instrument;

use crate::domain::{Leg, PortName, VoyageDate};
use crate::network::Network;

/// Hours of travel assumed per leg when reporting voyage duration.
///
/// A reporting convention, not derived from the schedule fields.
pub const LEG_TRAVEL_HOURS: i64 = 24;

/// Default depth cap for the all-paths enumerator.
pub const DEFAULT_ENUMERATION_DEPTH: usize = 10;

/// The query surface over a loaded network.
pub struct Planner<'a> {
    network: &'a Network,
}

impl<'a> Planner<'a> {
    /// Create a planner over a network.
    pub fn new(network: &'a Network) -> Self {
        Self { network }
    }

    /// Find the cheapest voyage by total fares plus port charges.
    ///
    /// A filter, when given, restricts legs during the search; its
    /// required-port and maximum-duration constraints are checked
    /// afterwards and surface as warnings on the result rather than
    /// suppressing it.
    #[instrument(skip(self, preferences), fields(origin = %origin, destination = %destination, date = %date))]
    pub fn find_cheapest(
        &self,
        origin: &PortName,
        destination: &PortName,
        date: VoyageDate,
        preferences: Option<&PreferenceFilter>,
    ) -> PathResult {
        cheapest::find_cheapest(self.network, origin, destination, date, preferences)
    }

    /// Find the cheapest voyage with frontiers searching from both
    /// ends.
    ///
    /// Reports the same total cost as [`Self::find_cheapest`] when
    /// both succeed, though possibly over a different equal-cost path.
    #[instrument(skip(self), fields(origin = %origin, destination = %destination, date = %date))]
    pub fn find_cheapest_bidirectional(
        &self,
        origin: &PortName,
        destination: &PortName,
        date: VoyageDate,
    ) -> PathResult {
        bidirectional::find_cheapest_bidirectional(self.network, origin, destination, date)
    }

    /// Find the voyage with the fewest legs, breaking ties by cost.
    #[instrument(skip(self, preferences), fields(origin = %origin, destination = %destination, date = %date))]
    pub fn find_shortest(
        &self,
        origin: &PortName,
        destination: &PortName,
        date: VoyageDate,
        preferences: Option<&PreferenceFilter>,
    ) -> PathResult {
        shortest::find_shortest(self.network, origin, destination, date, preferences)
    }

    /// Find a voyage calling at each intermediate port in order,
    /// concatenating per-segment cheapest voyages.
    #[instrument(skip(self, intermediates), fields(origin = %origin, destination = %destination, date = %date, intermediates = intermediates.len()))]
    pub fn find_multi_leg(
        &self,
        origin: &PortName,
        intermediates: &[PortName],
        destination: &PortName,
        date: VoyageDate,
    ) -> PathResult {
        multi_leg::find_multi_leg(self.network, origin, intermediates, destination, date)
    }

    /// Enumerate every simple path over the query date's legs, up to
    /// `max_depth` ports.
    #[instrument(skip(self), fields(origin = %origin, destination = %destination, date = %date))]
    pub fn enumerate_all_paths(
        &self,
        origin: &PortName,
        destination: &PortName,
        date: VoyageDate,
        max_depth: usize,
    ) -> Vec<Vec<PortName>> {
        enumerate::enumerate_all_paths(self.network, origin, destination, date, max_depth)
    }

    /// List every leg that could participate in some voyage from
    /// origin to destination.
    #[instrument(skip(self, preferences), fields(origin = %origin, destination = %destination, date = %date))]
    pub fn connecting_legs(
        &self,
        origin: &PortName,
        destination: &PortName,
        date: VoyageDate,
        preferences: Option<&PreferenceFilter>,
    ) -> Vec<Leg> {
        reachable::connecting_legs(self.network, origin, destination, date, preferences)
    }

    /// Whether the origin has any sailing on the given date.
    pub fn has_legs_on(&self, origin: &PortName, date: VoyageDate) -> bool {
        !self.network.legs_from_on(origin, date).is_empty()
    }
}
