//! Scripted collaborator for state machine unit tests.

use super::ops::CommanderOps;
use crate::network::{Route, WaypointGraph};
use crate::types::{Behavior, Order, WaypointId};

/// Collaborator with a fixed replan answer and call counters.
pub(crate) struct ScriptedOps {
    pub graph: WaypointGraph,
    pub route: Route,
    /// Remaining checkpoints, primary first
    pub goals: Vec<WaypointId>,
    pub replan_result: bool,
    pub advance_calls: usize,
    pub replan_calls: Vec<WaypointId>,
    pub blockages: Vec<WaypointId>,
}

impl ScriptedOps {
    /// Single road 1.1.1 .. 1.1.n with no route and no goals.
    pub fn straight(n: u16) -> Self {
        Self {
            graph: WaypointGraph::grid(1, n, 1.0).unwrap(),
            route: Route::new(),
            goals: Vec::new(),
            replan_result: true,
            advance_calls: 0,
            replan_calls: Vec::new(),
            blockages: Vec::new(),
        }
    }
}

impl CommanderOps for ScriptedOps {
    fn route(&mut self) -> &mut Route {
        &mut self.route
    }

    fn graph(&self) -> &WaypointGraph {
        &self.graph
    }

    fn goal_primary(&self) -> WaypointId {
        self.goals.first().copied().unwrap_or(WaypointId::NULL)
    }

    fn goal_secondary(&self) -> WaypointId {
        self.goals.get(1).copied().unwrap_or(WaypointId::NULL)
    }

    fn advance_checkpoint(&mut self) -> bool {
        self.advance_calls += 1;
        if !self.goals.is_empty() {
            self.goals.remove(0);
        }
        !self.goals.is_empty()
    }

    fn replan_route(&mut self, from: WaypointId) -> bool {
        self.replan_calls.push(from);
        self.replan_result
    }

    fn record_blockage(&mut self, waypoint: WaypointId) {
        self.blockages.push(waypoint);
    }

    fn prepare_order(&self, behavior: Behavior) -> Order {
        Order {
            goal: self.goal_primary(),
            ..Order::new(behavior)
        }
    }
}
