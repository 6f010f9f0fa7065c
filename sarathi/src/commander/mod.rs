//! Mission commander.
//!
//! Owns the route, blockages and checkpoint list, borrows the road
//! network graph, and runs the commander state machine once per cycle.

mod mission;

pub use mission::Mission;

use crate::config::{MotionConfig, SarathiConfig};
use crate::fsm::{CommanderFsm, CommanderOps, State};
use crate::network::{Blockages, Route, WaypointGraph};
use crate::planning::{RoutePlanner, RoutePlannerConfig};
use crate::types::{Behavior, NavigationSnapshot, Order, WaypointId};

/// Mission-layer state the state machine operates on.
#[derive(Clone, Debug)]
pub struct MissionContext<'g> {
    graph: &'g WaypointGraph,
    route: Route,
    blockages: Blockages,
    mission: Mission,
    planner: RoutePlanner,
    motion: MotionConfig,
    order_waypoints: usize,
    /// Successful plans so far
    plans: usize,
}

impl<'g> MissionContext<'g> {
    pub fn new(graph: &'g WaypointGraph, mission: Mission, config: &SarathiConfig) -> Self {
        Self {
            graph,
            route: Route::new(),
            blockages: Blockages::new(),
            mission,
            planner: RoutePlanner::new(RoutePlannerConfig {
                max_iterations: config.commander.max_plan_iterations,
            }),
            motion: config.motion.clone(),
            order_waypoints: config.commander.order_waypoints,
            plans: 0,
        }
    }

    pub fn current_route(&self) -> &Route {
        &self.route
    }

    pub fn blockages(&self) -> &Blockages {
        &self.blockages
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn plans(&self) -> usize {
        self.plans
    }
}

impl CommanderOps for MissionContext<'_> {
    fn route(&mut self) -> &mut Route {
        &mut self.route
    }

    fn graph(&self) -> &WaypointGraph {
        self.graph
    }

    fn goal_primary(&self) -> WaypointId {
        self.mission.goal()
    }

    fn goal_secondary(&self) -> WaypointId {
        self.mission.goal2()
    }

    fn advance_checkpoint(&mut self) -> bool {
        self.mission.next_checkpoint()
    }

    fn replan_route(&mut self, from: WaypointId) -> bool {
        let goal = self.mission.goal();
        if goal.is_null() {
            tracing::warn!("No checkpoint left to plan a route to");
            return false;
        }

        let mut planned = match self.planner.plan(self.graph, &self.blockages, from, goal) {
            Ok(planned) => planned,
            Err(e) => {
                tracing::warn!("Route planning failed: {}", e);
                return false;
            }
        };

        // Continue on to the following checkpoint when it can be reached.
        let goal2 = self.mission.goal2();
        if !goal2.is_null() {
            match self.planner.plan(self.graph, &self.blockages, goal, goal2) {
                Ok(onward) => {
                    planned.edges.extend(onward.edges);
                    planned.length += onward.length;
                }
                Err(e) => tracing::debug!("No route beyond {}: {}", goal, e),
            }
        }

        // An empty route reads as "never planned"; keep the current one.
        if planned.edges.is_empty() {
            tracing::warn!("Already at {}, nothing to plan onward", goal);
            return false;
        }

        tracing::info!(
            "New route from {} to {}: {} edges, {:.1}m",
            from,
            goal,
            planned.edges.len(),
            planned.length
        );
        self.route.replace(planned.edges);
        self.plans += 1;
        true
    }

    fn record_blockage(&mut self, waypoint: WaypointId) {
        self.blockages.add_block(waypoint);
    }

    fn prepare_order(&self, behavior: Behavior) -> Order {
        if behavior != Behavior::Go {
            return Order::new(behavior);
        }
        Order {
            behavior,
            waypoints: self
                .route
                .upcoming_waypoints(self.graph, self.order_waypoints),
            goal: self.mission.goal(),
            min_speed: self.motion.min_speed,
            max_speed: self.motion.max_speed,
        }
    }
}

/// Commander: state machine plus the mission state it drives.
#[derive(Clone, Debug)]
pub struct Commander<'g> {
    fsm: CommanderFsm,
    ctx: MissionContext<'g>,
}

impl<'g> Commander<'g> {
    pub fn new(graph: &'g WaypointGraph, mission: Mission, config: &SarathiConfig) -> Self {
        Self {
            fsm: CommanderFsm::new(config.commander.verbosity),
            ctx: MissionContext::new(graph, mission, config),
        }
    }

    /// Run one control cycle.
    pub fn command(&mut self, nav: &NavigationSnapshot) -> Order {
        self.fsm.control(&mut self.ctx, nav)
    }

    pub fn state(&self) -> State {
        self.fsm.state()
    }

    pub fn fsm(&self) -> &CommanderFsm {
        &self.fsm
    }

    pub fn context(&self) -> &MissionContext<'g> {
        &self.ctx
    }
}
