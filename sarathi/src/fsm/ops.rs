//! Collaborator interface the state machine drives.

use crate::network::{Route, WaypointGraph};
use crate::types::{Behavior, Order, WaypointId};

/// Mission-layer operations used by the commander state machine.
///
/// The state machine borrows an implementation for the duration of one
/// `control` call and never keeps a reference across cycles.
pub trait CommanderOps {
    /// Remaining route, mutated as waypoints are passed.
    fn route(&mut self) -> &mut Route;

    /// Road network the route indexes into.
    fn graph(&self) -> &WaypointGraph;

    /// Checkpoint currently being driven to.
    fn goal_primary(&self) -> WaypointId;

    /// Checkpoint after the primary one.
    fn goal_secondary(&self) -> WaypointId;

    /// Check off the primary goal. False when no checkpoints remain.
    fn advance_checkpoint(&mut self) -> bool;

    /// Plan a new route from `from` through the primary goal. False when
    /// no feasible route exists.
    fn replan_route(&mut self, from: WaypointId) -> bool;

    /// Remember a blocked waypoint for future planning.
    fn record_blockage(&mut self, waypoint: WaypointId);

    /// Fill in motion parameters for `behavior`.
    fn prepare_order(&self, behavior: Behavior) -> Order;
}
