//! Shortest-route planner over the waypoint graph.
//!
//! Dijkstra search on edge lengths. Blocked waypoints are never entered,
//! except the start itself (the vehicle is already there).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::error::{Result, SarathiError};
use crate::network::{Blockages, WaypointEdge, WaypointGraph};
use crate::types::WaypointId;

/// Configuration for the route planner.
#[derive(Clone, Debug)]
pub struct RoutePlannerConfig {
    /// Maximum node expansions before giving up
    pub max_iterations: usize,
}

impl Default for RoutePlannerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
        }
    }
}

/// Result of route planning.
#[derive(Clone, Debug)]
pub struct PlannedRoute {
    /// Edges from start to goal, in driving order
    pub edges: Vec<WaypointEdge>,
    /// Total length in meters
    pub length: f32,
}

/// Node in the search frontier.
#[derive(Clone, Debug)]
struct SearchNode {
    index: usize,
    cost: f32,
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Cheapest first out of the max-heap
        other.cost.total_cmp(&self.cost)
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

/// Route planner.
#[derive(Clone, Debug, Default)]
pub struct RoutePlanner {
    config: RoutePlannerConfig,
}

impl RoutePlanner {
    pub fn new(config: RoutePlannerConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(RoutePlannerConfig::default())
    }

    /// Plan a route from `from` to `goal`, avoiding blocked waypoints.
    ///
    /// Planning from the goal itself yields an empty route.
    pub fn plan(
        &self,
        graph: &WaypointGraph,
        blockages: &Blockages,
        from: WaypointId,
        goal: WaypointId,
    ) -> Result<PlannedRoute> {
        let start = graph
            .index_of(from)
            .ok_or(SarathiError::UnknownWaypoint(from))?;
        let target = graph
            .index_of(goal)
            .ok_or(SarathiError::UnknownWaypoint(goal))?;

        if start == target {
            return Ok(PlannedRoute {
                edges: Vec::new(),
                length: 0.0,
            });
        }

        let mut open_set = BinaryHeap::new();
        let mut cost: HashMap<usize, f32> = HashMap::new();
        let mut parent: HashMap<usize, WaypointEdge> = HashMap::new();
        let mut closed: HashSet<usize> = HashSet::new();

        cost.insert(start, 0.0);
        open_set.push(SearchNode {
            index: start,
            cost: 0.0,
        });

        let mut iterations = 0;

        while let Some(current) = open_set.pop() {
            iterations += 1;
            if iterations > self.config.max_iterations {
                tracing::warn!("Route search exceeded max iterations");
                return Err(SarathiError::SearchLimit(self.config.max_iterations));
            }

            if current.index == target {
                let edges = Self::reconstruct(&parent, start, target);
                return Ok(PlannedRoute {
                    edges,
                    length: current.cost,
                });
            }

            if !closed.insert(current.index) {
                continue;
            }

            for edge in graph.edges_from(current.index) {
                if closed.contains(&edge.end) {
                    continue;
                }
                let Some(node) = graph.node_at(edge.end) else {
                    continue;
                };
                if blockages.is_blocked(node.id) {
                    continue;
                }

                let new_cost = current.cost + edge.length;
                let existing = *cost.get(&edge.end).unwrap_or(&f32::MAX);
                if new_cost < existing {
                    cost.insert(edge.end, new_cost);
                    parent.insert(edge.end, *edge);
                    open_set.push(SearchNode {
                        index: edge.end,
                        cost: new_cost,
                    });
                }
            }
        }

        Err(SarathiError::NoRoute { from, goal })
    }

    /// Walk parent edges back from the goal.
    fn reconstruct(
        parent: &HashMap<usize, WaypointEdge>,
        start: usize,
        goal: usize,
    ) -> Vec<WaypointEdge> {
        let mut edges = Vec::new();
        let mut current = goal;

        while current != start {
            match parent.get(&current) {
                Some(edge) => {
                    edges.push(*edge);
                    current = edge.start;
                }
                None => break,
            }
        }

        edges.reverse();
        edges
    }
}
