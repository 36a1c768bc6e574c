//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::network::Network;

/// Shared application state.
///
/// The network is immutable during routing queries, which take a read
/// guard; docking-queue management takes a write guard. A query
/// therefore never observes a queue mutation mid-run.
#[derive(Clone)]
pub struct AppState {
    /// The loaded maritime network
    pub network: Arc<RwLock<Network>>,
}

impl AppState {
    /// Create a new app state around a loaded network.
    pub fn new(network: Network) -> Self {
        Self {
            network: Arc::new(RwLock::new(network)),
        }
    }
}
