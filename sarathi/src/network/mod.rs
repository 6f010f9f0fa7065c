//! Road network model.
//!
//! This module provides:
//! - Waypoint graph (nodes, directed edges, grid builder)
//! - Route as a queue of edges still to be driven
//! - Blockage set fed back into route planning

mod blockages;
mod graph;
mod route;

pub use blockages::Blockages;
pub use graph::{WaypointEdge, WaypointGraph, WaypointNode};
pub use route::Route;
