//! Domain types for the voyage planner.
//!
//! This module contains the core domain model types that represent
//! validated network data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod calendar;
mod leg;
mod port;

pub use calendar::{
    ClockTime, DateError, TimeError, VoyageDate, days_between, layover_hours,
    DAYS_BETWEEN_CEILING,
};
pub use leg::{DomainError, Leg};
pub use port::{InvalidPortName, Port, PortName};
