//! Port identity and registry record.

use std::fmt;

/// Error returned when parsing an invalid port name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid port name: {reason}")]
pub struct InvalidPortName {
    reason: &'static str,
}

/// A valid port name.
///
/// Port names are case-sensitive, non-empty, and contain no whitespace
/// (the fixture format is whitespace-delimited). This type guarantees
/// that any `PortName` value is valid by construction.
///
/// # Examples
///
/// ```
/// use voyage_server::domain::PortName;
///
/// let singapore = PortName::parse("Singapore").unwrap();
/// assert_eq!(singapore.as_str(), "Singapore");
///
/// assert!(PortName::parse("").is_err());
/// assert!(PortName::parse("Port Louis").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortName(String);

impl PortName {
    /// Parse a port name from a string.
    ///
    /// The input must be non-empty and contain no whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidPortName> {
        if s.is_empty() {
            return Err(InvalidPortName {
                reason: "must not be empty",
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(InvalidPortName {
                reason: "must not contain whitespace",
            });
        }

        Ok(PortName(s.to_string()))
    }

    /// Returns the port name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PortName({})", self.0)
    }
}

impl fmt::Display for PortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A port on the network.
///
/// Ports are created at network load and never mutated. The daily
/// charge applies to layovers strictly longer than twelve hours. The
/// map position is advisory display data and plays no part in routing.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    /// Unique, case-sensitive port name.
    pub name: PortName,

    /// Daily docking charge in whole dollars.
    pub daily_charge: u32,

    /// Optional display coordinates for map rendering.
    pub position: Option<(f32, f32)>,
}

impl Port {
    /// Create a port with no display position.
    pub fn new(name: PortName, daily_charge: u32) -> Self {
        Self {
            name,
            daily_charge,
            position: None,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating valid port names.
    fn valid_name() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9-]{0,20}"
    }

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in valid_name()) {
            let name = PortName::parse(&s).unwrap();
            prop_assert_eq!(name.as_str(), s.as_str());
        }

        /// Strings containing whitespace are always rejected
        #[test]
        fn whitespace_rejected(a in valid_name(), b in valid_name()) {
            let combined = format!("{} {}", a, b);
            prop_assert!(PortName::parse(&combined).is_err());
        }
    }
}
