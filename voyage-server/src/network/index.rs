//! Dense integer ids for ports.
//!
//! The pathfinders keep their per-query state in flat arrays indexed
//! by port id. The map is rebuilt at the start of each query and
//! discarded with it; ids are disposable handles, the port name stays
//! the authoritative identity.

use std::collections::HashMap;

use crate::domain::PortName;

use super::Network;

/// Bijection between port names and `[0, N)`.
#[derive(Debug, Clone, Default)]
pub struct PortIndexMap {
    names: Vec<PortName>,
    indices: HashMap<PortName, usize>,
}

impl PortIndexMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map covering every port of the network, in the
    /// network's port order.
    pub fn from_network(network: &Network) -> Self {
        let mut map = Self::new();
        for port in network.ports() {
            map.insert(port.name.clone());
        }
        map
    }

    /// Insert a name, returning its id. Existing names keep their id.
    pub fn insert(&mut self, name: PortName) -> usize {
        if let Some(&idx) = self.indices.get(&name) {
            return idx;
        }
        let idx = self.names.len();
        self.indices.insert(name.clone(), idx);
        self.names.push(name);
        idx
    }

    /// The id of a name, if present.
    pub fn index_of(&self, name: &PortName) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// The name behind an id.
    ///
    /// # Panics
    ///
    /// Panics if `idx` was not issued by this map.
    pub fn name(&self, idx: usize) -> &PortName {
        &self.names[idx]
    }

    /// Number of mapped ports.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
