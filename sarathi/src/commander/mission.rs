//! Ordered checkpoint list for the current mission.

use std::collections::VecDeque;

use crate::types::WaypointId;

/// Mission checkpoints, visited in order.
#[derive(Clone, Debug, Default)]
pub struct Mission {
    checkpoints: VecDeque<WaypointId>,
    reached: usize,
}

impl Mission {
    pub fn new(checkpoints: impl IntoIterator<Item = WaypointId>) -> Self {
        Self {
            checkpoints: checkpoints.into_iter().filter(|w| !w.is_null()).collect(),
            reached: 0,
        }
    }

    /// Checkpoint currently being driven to, null when none remain.
    pub fn goal(&self) -> WaypointId {
        self.checkpoints.front().copied().unwrap_or(WaypointId::NULL)
    }

    /// Checkpoint after the current one, null when none.
    pub fn goal2(&self) -> WaypointId {
        self.checkpoints.get(1).copied().unwrap_or(WaypointId::NULL)
    }

    /// Check off the current goal.
    ///
    /// Returns false when there is no checkpoint left to drive to.
    pub fn next_checkpoint(&mut self) -> bool {
        if let Some(done) = self.checkpoints.pop_front() {
            self.reached += 1;
            tracing::info!(
                "Checkpoint {} reached ({} remaining)",
                done,
                self.checkpoints.len()
            );
        }
        !self.checkpoints.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn reached(&self) -> usize {
        self.reached
    }

    pub fn is_complete(&self) -> bool {
        self.checkpoints.is_empty()
    }
}
