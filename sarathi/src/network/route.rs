//! Remaining plan as an ordered list of graph edges.

use std::collections::VecDeque;

use super::graph::{WaypointEdge, WaypointGraph};
use crate::types::WaypointId;

/// The route still to be driven, nearest edge first.
///
/// A non-empty route's first edge starts at or after the vehicle's last
/// confirmed waypoint. The commander drops edges off the front as the
/// vehicle passes them; the planner replaces the whole list.
#[derive(Clone, Debug, Default)]
pub struct Route {
    edges: VecDeque<WaypointEdge>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges(edges: impl IntoIterator<Item = WaypointEdge>) -> Self {
        Self {
            edges: edges.into_iter().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn peek_first(&self) -> Option<WaypointEdge> {
        self.edges.front().copied()
    }

    pub fn pop_front(&mut self) -> Option<WaypointEdge> {
        self.edges.pop_front()
    }

    /// Swap in a freshly planned route.
    pub fn replace(&mut self, edges: Vec<WaypointEdge>) {
        self.edges = edges.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = &WaypointEdge> + '_ {
        self.edges.iter()
    }

    /// Up to `limit` waypoints along the route: the first edge's start,
    /// then each edge's end. Stops at the first index missing from the graph.
    pub fn upcoming_waypoints(&self, graph: &WaypointGraph, limit: usize) -> Vec<WaypointId> {
        let Some(first) = self.edges.front() else {
            return Vec::new();
        };

        std::iter::once(first.start)
            .chain(self.iter().map(|e| e.end))
            .map_while(|idx| graph.node_at(idx).map(|n| n.id))
            .take(limit)
            .collect()
    }
}
