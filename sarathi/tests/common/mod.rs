//! Shared helpers for commander integration tests.

#![allow(dead_code)]

use sarathi::network::{Route, WaypointEdge, WaypointGraph};
use sarathi::{Behavior, CommanderOps, Order, WaypointId};

pub fn wp(pt: u16) -> WaypointId {
    WaypointId::new(1, 1, pt)
}

/// Route along the straight road from point `from` to point `to` (1-based).
pub fn straight_route(from: u16, to: u16) -> Route {
    Route::from_edges((from as usize - 1..to as usize - 1).map(|i| WaypointEdge::new(i, i + 1, 1.0)))
}

/// Collaborator with scripted planner answers.
pub struct ScriptedCommander {
    pub graph: WaypointGraph,
    pub route: Route,
    pub goals: Vec<WaypointId>,
    /// Route installed by the next successful replan
    pub next_route: Option<Route>,
    pub replan_result: bool,
    pub advance_calls: usize,
    pub replan_calls: Vec<WaypointId>,
    pub blockages: Vec<WaypointId>,
}

impl ScriptedCommander {
    /// Straight road 1.1.1 .. 1.1.n, no route yet.
    pub fn straight(n: u16, goals: &[WaypointId]) -> Self {
        Self {
            graph: WaypointGraph::grid(1, n, 1.0).expect("grid"),
            route: Route::new(),
            goals: goals.to_vec(),
            next_route: None,
            replan_result: true,
            advance_calls: 0,
            replan_calls: Vec::new(),
            blockages: Vec::new(),
        }
    }
}

impl CommanderOps for ScriptedCommander {
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
        if self.replan_result {
            if let Some(route) = self.next_route.take() {
                self.route = route;
            }
        }
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
