//! Scheduled leg type.
//!
//! A `Leg` is a directed, dated edge of the network: one sailing from
//! an origin port to a destination port. Legs are immutable once
//! constructed.

use super::{calendar, ClockTime, PortName, VoyageDate};

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Invalid leg construction (e.g., origin equals destination)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),
}

/// A scheduled sailing between two ports.
///
/// # Invariants
///
/// - `origin != destination`
///
/// # Examples
///
/// ```
/// use voyage_server::domain::{ClockTime, Leg, PortName, VoyageDate};
///
/// let leg = Leg::new(
///     PortName::parse("Karachi").unwrap(),
///     PortName::parse("Dubai").unwrap(),
///     VoyageDate::parse("01/05/2025").unwrap(),
///     ClockTime::parse("08:00").unwrap(),
///     ClockTime::parse("16:00").unwrap(),
///     100,
///     "Maersk".into(),
/// )
/// .unwrap();
/// assert_eq!(leg.fare(), 100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    origin: PortName,
    destination: PortName,
    date: VoyageDate,
    departure: ClockTime,
    arrival: ClockTime,
    fare: u32,
    carrier: String,
}

impl Leg {
    /// Construct a leg, validating that it connects two distinct ports.
    pub fn new(
        origin: PortName,
        destination: PortName,
        date: VoyageDate,
        departure: ClockTime,
        arrival: ClockTime,
        fare: u32,
        carrier: String,
    ) -> Result<Self, DomainError> {
        if origin == destination {
            return Err(DomainError::InvalidLeg(
                "origin and destination must differ",
            ));
        }

        Ok(Leg {
            origin,
            destination,
            date,
            departure,
            arrival,
            fare,
            carrier,
        })
    }

    /// Returns the origin port.
    pub fn origin(&self) -> &PortName {
        &self.origin
    }

    /// Returns the destination port.
    pub fn destination(&self) -> &PortName {
        &self.destination
    }

    /// Returns the departure date.
    pub fn date(&self) -> VoyageDate {
        self.date
    }

    /// Returns the departure clock time.
    pub fn departure(&self) -> ClockTime {
        self.departure
    }

    /// Returns the arrival clock time.
    pub fn arrival(&self) -> ClockTime {
        self.arrival
    }

    /// Returns the fare in whole dollars.
    pub fn fare(&self) -> u32 {
        self.fare
    }

    /// Returns the carrier name.
    pub fn carrier(&self) -> &str {
        &self.carrier
    }

    /// Whether a vessel arriving on this leg can continue on `next`.
    ///
    /// A vessel may wait at the port for any number of days, so any leg
    /// departing on or after this leg's date qualifies.
    pub fn can_connect_to(&self, next: &Leg) -> bool {
        next.date >= self.date
    }

    /// Hours docked between this leg's arrival and `next`'s departure.
    pub fn layover_until(&self, next: &Leg) -> i64 {
        calendar::layover_hours(self.date, self.arrival, next.date, next.departure)
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

    #[test]
    fn construction_valid() {
        let l = leg("Karachi", "Dubai", "01/05/2025", "08:00", "16:00", 100);
        assert_eq!(l.origin(), &name("Karachi"));
        assert_eq!(l.destination(), &name("Dubai"));
        assert_eq!(l.fare(), 100);
        assert_eq!(l.carrier(), "TestLine");
    }

    #[test]
    fn reject_self_loop() {
        let result = Leg::new(
            name("Dubai"),
            name("Dubai"),
            date("01/05/2025"),
            time("08:00"),
            time("16:00"),
            50,
            "TestLine".into(),
        );
        assert!(matches!(result, Err(DomainError::InvalidLeg(_))));
    }

    #[test]
    fn can_connect_same_date() {
        let a = leg("Karachi", "Dubai", "01/05/2025", "08:00", "16:00", 100);
        let b = leg("Dubai", "Doha", "01/05/2025", "18:00", "23:00", 150);
        assert!(a.can_connect_to(&b));
    }

    #[test]
    fn can_connect_later_date() {
        let a = leg("Karachi", "Dubai", "01/05/2025", "08:00", "16:00", 100);
        let b = leg("Dubai", "Doha", "03/05/2025", "06:00", "12:00", 150);
        assert!(a.can_connect_to(&b));
    }

    #[test]
    fn cannot_connect_earlier_date() {
        let a = leg("Karachi", "Dubai", "02/05/2025", "08:00", "16:00", 100);
        let b = leg("Dubai", "Doha", "01/05/2025", "18:00", "23:00", 150);
        assert!(!a.can_connect_to(&b));
    }

    #[test]
    fn layover_until_same_day() {
        let a = leg("Karachi", "Dubai", "01/05/2025", "08:00", "16:00", 100);
        let b = leg("Dubai", "Doha", "01/05/2025", "18:00", "23:00", 150);
        assert_eq!(a.layover_until(&b), 2);
    }

    #[test]
    fn layover_until_multi_day() {
        let a = leg("Karachi", "Dubai", "01/05/2025", "08:00", "16:00", 100);
        let b = leg("Dubai", "Doha", "03/05/2025", "06:00", "12:00", 150);
        assert_eq!(a.layover_until(&b), 38);
    }
}
