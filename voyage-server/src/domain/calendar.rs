//! Voyage calendar arithmetic.
//!
//! Schedules are given as `DD/MM/YYYY` dates and `HH:MM` clock times.
//! The calendar is deliberately simplified: every month has a fixed
//! length and February is always 28 days. Leap years are not modeled,
//! and `days_between` is capped at one year. Queries spanning more
//! than a year are unsupported.

use chrono::{NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;

/// Fixed month lengths; February is always 28.
const MONTH_LENGTHS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Safety ceiling for `days_between`: spans longer than a year are
/// capped rather than iterated indefinitely.
pub const DAYS_BETWEEN_CEILING: u32 = 365;

/// Ceiling division for signed integers (stable `div_euclid`/`rem_euclid`
/// equivalent of the unstable `i64::div_ceil`).
fn div_ceil_i64(a: i64, b: i64) -> i64 {
    let d = a.div_euclid(b);
    let r = a.rem_euclid(b);
    if r > 0 { d + 1 } else { d }
}

/// Error returned when parsing an invalid date string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date: {reason}")]
pub struct DateError {
    reason: &'static str,
}

impl DateError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A calendar date on the fixed 365-day voyage calendar.
///
/// Ordering is by (year, month, day).
///
/// # Examples
///
/// ```
/// use voyage_server::domain::VoyageDate;
///
/// let date = VoyageDate::parse("01/05/2025").unwrap();
/// assert_eq!(date.to_string(), "01/05/2025");
///
/// // December 31 wraps into the next year
/// let eve = VoyageDate::parse("31/12/2024").unwrap();
/// assert_eq!(eve.next_day().to_string(), "01/01/2025");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoyageDate {
    year: u16,
    month: u8,
    day: u8,
}

impl VoyageDate {
    /// Create a date from components, validating ranges.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        if month == 0 || month > 12 {
            return Err(DateError::new("month must be 1-12"));
        }
        if day == 0 || day > MONTH_LENGTHS[month as usize - 1] {
            return Err(DateError::new("day out of range for month"));
        }
        Ok(Self { year, month, day })
    }

    /// Parse a date from strict `DD/MM/YYYY` format.
    ///
    /// # Examples
    ///
    /// ```
    /// use voyage_server::domain::VoyageDate;
    ///
    /// assert!(VoyageDate::parse("15/03/2025").is_ok());
    /// assert!(VoyageDate::parse("2025-03-15").is_err());
    /// assert!(VoyageDate::parse("5/3/2025").is_err());
    /// assert!(VoyageDate::parse("29/02/2025").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        let bytes = s.as_bytes();

        if bytes.len() != 10 {
            return Err(DateError::new("expected DD/MM/YYYY format"));
        }
        if bytes[2] != b'/' || bytes[5] != b'/' {
            return Err(DateError::new("expected slashes at positions 2 and 5"));
        }

        let day =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| DateError::new("invalid day digits"))?;
        let month =
            parse_two_digits(&bytes[3..5]).ok_or_else(|| DateError::new("invalid month digits"))?;

        let mut year: u32 = 0;
        for &b in &bytes[6..10] {
            let digit = (b as char)
                .to_digit(10)
                .ok_or_else(|| DateError::new("invalid year digits"))?;
            year = year * 10 + digit;
        }

        Self::new(year as u16, month as u8, day as u8)
    }

    /// Returns the year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of month.
    pub fn day(&self) -> u8 {
        self.day
    }

    /// The following calendar day.
    ///
    /// February 28 always rolls into March 1: leap years are not
    /// modeled on this calendar.
    pub fn next_day(&self) -> Self {
        let mut day = self.day + 1;
        let mut month = self.month;
        let mut year = self.year;

        if day > MONTH_LENGTHS[month as usize - 1] {
            day = 1;
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }

        Self { year, month, day }
    }
}

impl fmt::Debug for VoyageDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoyageDate({self})")
    }
}

impl fmt::Display for VoyageDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}

/// Count days from `from` to `to` by repeated `next_day`.
///
/// Returns 0 when the dates are equal. The count is capped at
/// [`DAYS_BETWEEN_CEILING`]; `to` dates more than a year ahead (or any
/// date behind `from`, which the walk never reaches) yield the cap.
pub fn days_between(from: VoyageDate, to: VoyageDate) -> u32 {
    let mut current = from;
    let mut days = 0;

    while current != to {
        current = current.next_day();
        days += 1;
        if days > DAYS_BETWEEN_CEILING {
            return DAYS_BETWEEN_CEILING;
        }
    }

    days
}

/// A clock time of day in `HH:MM` form.
///
/// # Examples
///
/// ```
/// use voyage_server::domain::ClockTime;
///
/// let t = ClockTime::parse("14:30").unwrap();
/// assert_eq!(t.to_string(), "14:30");
/// assert!(ClockTime::parse("24:00").is_err());
/// assert!(ClockTime::parse("1430").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parse a time from strict `HH:MM` format.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self(time))
    }

    /// Midnight, the start-of-day time a query begins from.
    pub fn midnight() -> Self {
        Self(NaiveTime::from_hms_opt(0, 0, 0).expect("midnight is valid"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight.
    pub fn minutes_from_midnight(&self) -> i64 {
        i64::from(self.hour()) * 60 + i64::from(self.minute())
    }
}

impl Ord for ClockTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for ClockTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self})")
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Hours a vessel spends docked between arriving at a port and
/// departing on the next leg.
///
/// Same-day connections truncate the minute difference to whole hours.
/// Cross-day connections count the remainder of the arrival day
/// (rounded up to a whole hour), 24 hours per full waiting day, and
/// the elapsed part of the departure day (truncated). A same-day
/// departure earlier than the arrival cannot occur through the
/// connecting-leg filter; it is reported as a full day.
pub fn layover_hours(
    arrival_date: VoyageDate,
    arrival_time: ClockTime,
    departure_date: VoyageDate,
    departure_time: ClockTime,
) -> i64 {
    let arr_minutes = arrival_time.minutes_from_midnight();
    let dep_minutes = departure_time.minutes_from_midnight();

    if arrival_date == departure_date {
        if dep_minutes >= arr_minutes {
            (dep_minutes - arr_minutes) / 60
        } else {
            24
        }
    } else {
        let waiting_days = i64::from(days_between(arrival_date, departure_date));

        let hours_to_midnight = div_ceil_i64(24 * 60 - arr_minutes, 60);
        let full_days_waiting = (waiting_days - 1) * 24;
        let hours_from_midnight = dep_minutes / 60;

        hours_to_midnight + full_days_waiting + hours_from_midnight
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> VoyageDate {
        VoyageDate::parse(s).unwrap()
    }

    fn t(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    #[test]
    fn parse_valid_dates() {
        let date = d("15/03/2025");
        assert_eq!(date.day(), 15);
        assert_eq!(date.month(), 3);
        assert_eq!(date.year(), 2025);
    }

    #[test]
    fn reject_malformed_dates() {
        assert!(VoyageDate::parse("").is_err());
        assert!(VoyageDate::parse("15/3/2025").is_err());
        assert!(VoyageDate::parse("15-03-2025").is_err());
        assert!(VoyageDate::parse("2025/03/15").is_err());
        assert!(VoyageDate::parse("32/01/2025").is_err());
        assert!(VoyageDate::parse("00/01/2025").is_err());
        assert!(VoyageDate::parse("01/13/2025").is_err());
        assert!(VoyageDate::parse("01/00/2025").is_err());
        assert!(VoyageDate::parse("ab/cd/efgh").is_err());
    }

    #[test]
    fn date_ordering() {
        assert!(d("01/05/2025") < d("02/05/2025"));
        assert!(d("31/05/2025") < d("01/06/2025"));
        assert!(d("31/12/2025") < d("01/01/2026"));
        assert_eq!(d("15/03/2025"), d("15/03/2025"));
    }

    #[test]
    fn next_day_within_month() {
        assert_eq!(d("14/03/2025").next_day(), d("15/03/2025"));
    }

    #[test]
    fn next_day_month_boundary() {
        assert_eq!(d("31/01/2025").next_day(), d("01/02/2025"));
        assert_eq!(d("30/04/2025").next_day(), d("01/05/2025"));
    }

    #[test]
    fn next_day_year_boundary() {
        assert_eq!(d("31/12/2024").next_day(), d("01/01/2025"));
    }

    #[test]
    fn february_is_never_29_days() {
        // Leap years are not modeled
        assert_eq!(d("28/02/2024").next_day(), d("01/03/2024"));
        assert!(VoyageDate::parse("29/02/2024").is_err());
    }

    #[test]
    fn days_between_same_date() {
        assert_eq!(days_between(d("01/05/2025"), d("01/05/2025")), 0);
    }

    #[test]
    fn days_between_spans() {
        assert_eq!(days_between(d("01/05/2025"), d("03/05/2025")), 2);
        assert_eq!(days_between(d("28/02/2025"), d("02/03/2025")), 2);
    }

    #[test]
    fn days_between_hits_ceiling() {
        // Backwards spans never terminate; the ceiling applies
        assert_eq!(
            days_between(d("01/05/2025"), d("30/04/2025")),
            DAYS_BETWEEN_CEILING
        );
        // More than a year ahead also caps
        assert_eq!(
            days_between(d("01/05/2025"), d("01/07/2026")),
            DAYS_BETWEEN_CEILING
        );
    }

    #[test]
    fn parse_valid_times() {
        assert_eq!(t("00:00").minutes_from_midnight(), 0);
        assert_eq!(t("23:59").minutes_from_midnight(), 23 * 60 + 59);
        assert_eq!(t("14:30").minutes_from_midnight(), 14 * 60 + 30);
    }

    #[test]
    fn reject_malformed_times() {
        assert!(ClockTime::parse("").is_err());
        assert!(ClockTime::parse("9:30").is_err());
        assert!(ClockTime::parse("09.30").is_err());
        assert!(ClockTime::parse("24:00").is_err());
        assert!(ClockTime::parse("12:60").is_err());
        assert!(ClockTime::parse("ab:cd").is_err());
    }

    #[test]
    fn time_ordering() {
        assert!(t("08:00") < t("16:00"));
        assert!(t("08:59") < t("09:00"));
        assert_eq!(t("12:00"), t("12:00"));
    }

    #[test]
    fn midnight_is_start_of_day() {
        assert_eq!(ClockTime::midnight(), t("00:00"));
    }

    #[test]
    fn layover_same_day() {
        // 16:00 arrival, 18:00 departure: 2 whole hours
        assert_eq!(layover_hours(d("01/05/2025"), t("16:00"), d("01/05/2025"), t("18:00")), 2);
        // Truncation: 90 minutes is 1 hour
        assert_eq!(layover_hours(d("01/05/2025"), t("16:00"), d("01/05/2025"), t("17:30")), 1);
        // Immediate departure
        assert_eq!(layover_hours(d("01/05/2025"), t("16:00"), d("01/05/2025"), t("16:00")), 0);
    }

    #[test]
    fn layover_same_day_inverted_times_reports_full_day() {
        assert_eq!(layover_hours(d("01/05/2025"), t("18:00"), d("01/05/2025"), t("06:00")), 24);
    }

    #[test]
    fn layover_next_day() {
        // Arrive 16:00, depart next day 06:00: 8h to midnight + 6h after
        assert_eq!(layover_hours(d("01/05/2025"), t("16:00"), d("02/05/2025"), t("06:00")), 14);
    }

    #[test]
    fn layover_two_days_out() {
        // Arrive 01/05 16:00, depart 03/05 06:00: 8 + 24 + 6 = 38
        assert_eq!(layover_hours(d("01/05/2025"), t("16:00"), d("03/05/2025"), t("06:00")), 38);
    }

    #[test]
    fn layover_partial_hour_to_midnight_rounds_up() {
        // Arrive 16:30: 7.5h to midnight rounds up to 8
        assert_eq!(layover_hours(d("01/05/2025"), t("16:30"), d("02/05/2025"), t("06:00")), 14);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating valid dates on the fixed calendar.
    fn valid_date() -> impl Strategy<Value = VoyageDate> {
        (1900u16..2100, 1u8..=12).prop_flat_map(|(year, month)| {
            let max_day = MONTH_LENGTHS[month as usize - 1];
            (1u8..=max_day).prop_map(move |day| VoyageDate::new(year, month, day).unwrap())
        })
    }

    fn valid_time() -> impl Strategy<Value = ClockTime> {
        (0u32..24, 0u32..60).prop_map(|(h, m)| ClockTime::parse(&format!("{h:02}:{m:02}")).unwrap())
    }

    proptest! {
        /// Roundtrip: format then parse returns the original date
        #[test]
        fn date_display_roundtrip(date in valid_date()) {
            prop_assert_eq!(VoyageDate::parse(&date.to_string()).unwrap(), date);
        }

        /// next_day is strictly increasing
        #[test]
        fn next_day_increases(date in valid_date()) {
            prop_assert!(date.next_day() > date);
        }

        /// The day after any date is exactly one day away
        #[test]
        fn next_day_is_one_day(date in valid_date()) {
            prop_assert_eq!(days_between(date, date.next_day()), 1);
        }

        /// Roundtrip: format then parse returns the original time
        #[test]
        fn time_display_roundtrip(time in valid_time()) {
            prop_assert_eq!(ClockTime::parse(&time.to_string()).unwrap(), time);
        }

        /// Layovers are never negative
        #[test]
        fn layover_non_negative(
            date in valid_date(),
            arr in valid_time(),
            dep in valid_time(),
            wait_days in 0u8..4,
        ) {
            let mut dep_date = date;
            for _ in 0..wait_days {
                dep_date = dep_date.next_day();
            }
            prop_assert!(layover_hours(date, arr, dep_date, dep) >= 0);
        }
    }
}
