//! Scripted navigator and simulation loop.
//!
//! The simulated navigator drives the latest Go order one waypoint at a
//! time on a grid road network and reports a blockage when the waypoint
//! it is heading for is in the blocked set.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::commander::{Commander, Mission};
use crate::config::SarathiConfig;
use crate::error::{Result, SarathiError};
use crate::fsm::State;
use crate::network::WaypointGraph;
use crate::types::{Behavior, NavigationSnapshot, Order, WaypointId};

/// Navigator stand-in.
#[derive(Clone, Debug)]
pub struct SimNavigator {
    position: WaypointId,
    /// Waypoints that cannot be driven through
    blocked: BTreeSet<WaypointId>,
    /// Blockages already reported
    reported: BTreeSet<WaypointId>,
    cycles_per_waypoint: u32,
    progress: u32,
    replan_waypoint: WaypointId,
    road_blocked: bool,
}

impl SimNavigator {
    pub fn new(
        start: WaypointId,
        blocked: impl IntoIterator<Item = WaypointId>,
        cycles_per_waypoint: u32,
    ) -> Self {
        Self {
            position: start,
            blocked: blocked.into_iter().collect(),
            reported: BTreeSet::new(),
            cycles_per_waypoint: cycles_per_waypoint.max(1),
            progress: 0,
            replan_waypoint: WaypointId::NULL,
            road_blocked: false,
        }
    }

    pub fn position(&self) -> WaypointId {
        self.position
    }

    /// State reported to the commander.
    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            last_waypoint: self.position,
            replan_waypoint: self.replan_waypoint,
            road_blocked: self.road_blocked,
        }
    }

    /// Carry out one cycle of `order`.
    pub fn apply(&mut self, order: &Order) {
        if order.behavior != Behavior::Go {
            self.progress = 0;
            return;
        }

        let Some(next) = Self::next_target(self.position, &order.waypoints) else {
            self.progress = 0;
            return;
        };

        if self.blocked.contains(&next) {
            if self.reported.insert(next) {
                tracing::info!("Navigator: road blocked at {}", next);
                self.replan_waypoint = next;
                self.road_blocked = true;
            }
            self.progress = 0;
            return;
        }

        self.progress += 1;
        if self.progress >= self.cycles_per_waypoint {
            tracing::debug!("Navigator: reached {}", next);
            self.position = next;
            self.progress = 0;
        }
    }

    /// Waypoint after the current position, or the first one that differs.
    fn next_target(position: WaypointId, waypoints: &[WaypointId]) -> Option<WaypointId> {
        match waypoints.iter().position(|&w| w == position) {
            Some(i) => waypoints.get(i + 1).copied(),
            None => waypoints.iter().copied().find(|&w| w != position),
        }
    }
}

/// Result of a simulated mission.
#[derive(Clone, Debug)]
pub struct SimulationOutcome {
    pub cycles: u32,
    pub behavior: Behavior,
    pub state: State,
    pub position: WaypointId,
    pub checkpoints_reached: usize,
    pub blockages: usize,
    pub plans: usize,
}

/// Run a mission on the configured grid until Quit, Abort or `max_cycles`.
///
/// With `pacing` set, each cycle is stretched to that period.
pub fn run(config: &SarathiConfig, pacing: Option<Duration>) -> Result<SimulationOutcome> {
    let sim = &config.simulation;
    let graph = WaypointGraph::grid(sim.rows, sim.cols, sim.spacing)?;

    for &w in std::iter::once(&sim.start).chain(&sim.checkpoints) {
        if graph.index_of(w).is_none() {
            return Err(SarathiError::UnknownWaypoint(w));
        }
    }

    tracing::info!(
        "Road network: {} waypoints, {} edges; {} checkpoints",
        graph.node_count(),
        graph.edge_count(),
        sim.checkpoints.len()
    );

    let mut commander = Commander::new(&graph, Mission::new(sim.checkpoints.clone()), config);
    let mut navigator = SimNavigator::new(
        sim.start,
        sim.blocked.iter().copied(),
        sim.cycles_per_waypoint,
    );

    let status_interval = 50;
    let mut cycles = 0;
    let mut behavior = Behavior::Initialize;

    while cycles < sim.max_cycles {
        let cycle_start = Instant::now();
        cycles += 1;

        let order = commander.command(&navigator.snapshot());
        behavior = order.behavior;
        navigator.apply(&order);

        if cycles % status_interval == 0 {
            tracing::info!(
                "Cycle {}: {} at {}, state {}, goal {}",
                cycles,
                behavior,
                navigator.position(),
                commander.state(),
                order.goal
            );
        }

        if matches!(behavior, Behavior::Quit | Behavior::Abort) {
            break;
        }

        if let Some(period) = pacing {
            let elapsed = cycle_start.elapsed();
            if elapsed < period {
                std::thread::sleep(period - elapsed);
            }
        }
    }

    let ctx = commander.context();
    Ok(SimulationOutcome {
        cycles,
        behavior,
        state: commander.state(),
        position: navigator.position(),
        checkpoints_reached: ctx.mission().reached(),
        blockages: ctx.blockages().len(),
        plans: ctx.plans(),
    })
}
