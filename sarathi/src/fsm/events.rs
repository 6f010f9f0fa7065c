//! Event derivation.
//!
//! Each cycle the deriver compares the navigator snapshot with its own
//! progress bookkeeping, walks the route forward past any waypoints the
//! vehicle has reached, checks off passed goals, and reports the single
//! most urgent event. Less urgent conditions stay pending and are seen
//! again next cycle.

use super::ops::CommanderOps;
use super::state::Event;
use crate::network::WaypointGraph;
use crate::types::{NavigationSnapshot, WaypointId};

/// Goals passed during one route walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct GoalsPassed {
    primary: bool,
    secondary: bool,
}

impl GoalsPassed {
    fn check(&mut self, waypoint: WaypointId, goal: WaypointId, goal2: WaypointId) {
        if waypoint == goal {
            self.primary = true;
        }
        if waypoint == goal2 {
            self.secondary = true;
        }
    }
}

/// Route progress bookkeeping carried across cycles.
#[derive(Clone, Debug, Default)]
pub struct EventDeriver {
    /// Last route waypoint matched to the navigator's position
    current_waypoint: WaypointId,
    /// Last replan request already turned into an event
    last_replan: WaypointId,
    /// Set once a cycle has seen a non-empty route
    was_in_route_network: bool,
}

impl EventDeriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_waypoint(&self) -> WaypointId {
        self.current_waypoint
    }

    pub fn last_replan(&self) -> WaypointId {
        self.last_replan
    }

    pub fn was_in_route_network(&self) -> bool {
        self.was_in_route_network
    }

    /// Most urgent event for this cycle.
    pub fn current_event<O>(&mut self, nav: &NavigationSnapshot, ops: &mut O) -> Event
    where
        O: CommanderOps + ?Sized,
    {
        // Route is only empty before the first plan.
        if ops.route().is_empty() {
            self.current_waypoint = nav.last_waypoint;

            // The starting point may already be the first goal.
            let goal = ops.goal_primary();
            if !goal.is_null() && self.current_waypoint == goal && !ops.advance_checkpoint() {
                tracing::warn!("Started on the last checkpoint {}", goal);
            }
            tracing::debug!("No route yet, entering lane at {}", self.current_waypoint);
            return Event::EnterLane;
        }
        self.was_in_route_network = true;

        let mut passed = GoalsPassed::default();
        if nav.last_waypoint != self.current_waypoint {
            match self.walk_route(nav.last_waypoint, ops) {
                Ok(p) => passed = p,
                Err(index) => {
                    tracing::error!("Node {} is not in the road network graph", index);
                    return Event::Fail;
                }
            }
        }

        // Both goals in one walk advances twice.
        let mut finished = false;
        if passed.primary {
            finished = !ops.advance_checkpoint();
        }
        if passed.primary && passed.secondary {
            finished = !ops.advance_checkpoint();
        }

        if finished {
            Event::Finished
        } else if let Some(event) = self.replan_request(nav) {
            // Blocked/Replan preempt replanning at a goal
            event
        } else if passed.primary && !ops.replan_route(nav.last_waypoint) {
            tracing::warn!("Passed goal but no route onward from {}", nav.last_waypoint);
            Event::Wait
        } else {
            Event::None
        }
    }

    /// Pop route edges until the navigator's last waypoint is reached.
    ///
    /// Returns the index of the first graph node that failed to resolve.
    fn walk_route<O>(&mut self, target: WaypointId, ops: &mut O) -> Result<GoalsPassed, usize>
    where
        O: CommanderOps + ?Sized,
    {
        let goal = ops.goal_primary();
        let goal2 = ops.goal_secondary();
        let old_waypoint = self.current_waypoint;
        let mut passed = GoalsPassed::default();

        let Some(mut edge) = ops.route().peek_first() else {
            return Ok(passed);
        };

        // A fresh plan may start exactly where the vehicle is.
        if resolve(ops.graph(), edge.start)? == target {
            self.current_waypoint = target;
            passed.check(target, goal, goal2);
        }

        while self.current_waypoint != target && ops.route().len() > 1 {
            ops.route().pop_front();
            let Some(next) = ops.route().peek_first() else {
                break;
            };
            edge = next;

            self.current_waypoint = resolve(ops.graph(), edge.start)?;
            passed.check(self.current_waypoint, goal, goal2);
        }

        // Never matched: the vehicle is at the end of the plan.
        if self.current_waypoint != target {
            self.current_waypoint = resolve(ops.graph(), edge.end)?;
            passed.check(self.current_waypoint, goal, goal2);
        }

        tracing::debug!(
            "Current waypoint changed from {} to {}",
            old_waypoint,
            self.current_waypoint
        );
        Ok(passed)
    }

    /// New, non-null replan request, recorded so it fires only once.
    fn replan_request(&mut self, nav: &NavigationSnapshot) -> Option<Event> {
        if nav.replan_waypoint == self.last_replan {
            return None;
        }
        self.last_replan = nav.replan_waypoint;

        if nav.replan_waypoint.is_null() {
            None
        } else if nav.road_blocked {
            Some(Event::Blocked)
        } else {
            Some(Event::Replan)
        }
    }
}

#[inline]
fn resolve(graph: &WaypointGraph, index: usize) -> Result<WaypointId, usize> {
    graph.node_at(index).map(|n| n.id).ok_or(index)
}
