//! JSON query surface.
//!
//! A thin axum layer exposing the planner's query surface and the
//! docking-queue management endpoints. All responses are JSON; the
//! engine itself stays usable as a plain library without this module.

pub mod dto;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
