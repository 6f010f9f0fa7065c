//! Waypoints the vehicle has found blocked.

use std::collections::BTreeSet;

use crate::types::WaypointId;

/// Set of blocked waypoints, consulted by the route planner.
#[derive(Clone, Debug, Default)]
pub struct Blockages {
    blocked: BTreeSet<WaypointId>,
}

impl Blockages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a blockage. Null ids are ignored.
    pub fn add_block(&mut self, waypoint: WaypointId) {
        if waypoint.is_null() {
            return;
        }
        if self.blocked.insert(waypoint) {
            tracing::info!("Blockage recorded at {}", waypoint);
        }
    }

    pub fn is_blocked(&self, waypoint: WaypointId) -> bool {
        self.blocked.contains(&waypoint)
    }

    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }
}
