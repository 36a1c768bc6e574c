//! Freight voyage planner server.
//!
//! A routing engine over a static maritime network that answers:
//! "starting from this port on this date, how do I reach my
//! destination at minimum cost, or in the fewest legs?"

pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
