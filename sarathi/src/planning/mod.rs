//! Route planning over the waypoint graph.

mod route_planner;

pub use route_planner::{PlannedRoute, RoutePlanner, RoutePlannerConfig};
