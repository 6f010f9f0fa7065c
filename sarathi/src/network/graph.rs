//! Waypoint graph of the road network.

use std::collections::HashMap;

use crate::error::{Result, SarathiError};
use crate::types::WaypointId;

/// A waypoint node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaypointNode {
    pub id: WaypointId,
    /// Position in the map frame (meters)
    pub x: f32,
    pub y: f32,
}

impl WaypointNode {
    pub fn new(id: WaypointId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    /// Euclidean distance to another node.
    #[inline]
    pub fn distance_to(&self, other: &WaypointNode) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Directed edge between two node indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaypointEdge {
    pub start: usize,
    pub end: usize,
    /// Travel length (meters)
    pub length: f32,
}

impl WaypointEdge {
    pub fn new(start: usize, end: usize, length: f32) -> Self {
        Self { start, end, length }
    }
}

/// Read-only waypoint graph.
///
/// Owned by the mission layer; the commander only borrows it.
#[derive(Clone, Debug, Default)]
pub struct WaypointGraph {
    nodes: Vec<WaypointNode>,
    edges: Vec<WaypointEdge>,
    /// Outgoing edge indices per node
    adjacency: Vec<Vec<usize>>,
    index: HashMap<WaypointId, usize>,
}

impl WaypointGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its index.
    pub fn add_node(&mut self, node: WaypointNode) -> Result<usize> {
        if node.id.is_null() {
            return Err(SarathiError::Graph("null waypoint id".to_string()));
        }
        if self.index.contains_key(&node.id) {
            return Err(SarathiError::Graph(format!("duplicate waypoint {}", node.id)));
        }
        let idx = self.nodes.len();
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        self.index.insert(node.id, idx);
        Ok(idx)
    }

    /// Add a directed edge between existing nodes, length taken from node positions.
    pub fn connect(&mut self, start: usize, end: usize) -> Result<()> {
        let (Some(a), Some(b)) = (self.nodes.get(start), self.nodes.get(end)) else {
            return Err(SarathiError::Graph(format!(
                "edge {start} -> {end} references a missing node"
            )));
        };
        let length = a.distance_to(b);
        self.adjacency[start].push(self.edges.len());
        self.edges.push(WaypointEdge::new(start, end, length));
        Ok(())
    }

    /// Add edges in both directions.
    pub fn connect_both(&mut self, a: usize, b: usize) -> Result<()> {
        self.connect(a, b)?;
        self.connect(b, a)
    }

    /// Node record at `index`, if present.
    #[inline]
    pub fn node_at(&self, index: usize) -> Option<&WaypointNode> {
        self.nodes.get(index)
    }

    /// Index of the node with the given id.
    pub fn index_of(&self, id: WaypointId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Outgoing edges of a node.
    pub fn edges_from(&self, index: usize) -> impl Iterator<Item = &WaypointEdge> + '_ {
        self.adjacency
            .get(index)
            .into_iter()
            .flatten()
            .map(move |&e| &self.edges[e])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Build a rectangular street grid.
    ///
    /// Row `r` becomes segment `r + 1`, column `c` becomes point `c + 1`, all on
    /// lane 1. Neighbours are connected in both directions.
    pub fn grid(rows: u16, cols: u16, spacing: f32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(SarathiError::Graph(format!("empty grid {rows}x{cols}")));
        }

        let mut graph = Self::new();
        for r in 0..rows {
            for c in 0..cols {
                graph.add_node(WaypointNode::new(
                    WaypointId::new(r + 1, 1, c + 1),
                    c as f32 * spacing,
                    r as f32 * spacing,
                ))?;
            }
        }

        let at = |r: u16, c: u16| r as usize * cols as usize + c as usize;
        for r in 0..rows {
            for c in 0..cols {
                if c + 1 < cols {
                    graph.connect_both(at(r, c), at(r, c + 1))?;
                }
                if r + 1 < rows {
                    graph.connect_both(at(r, c), at(r + 1, c))?;
                }
            }
        }

        Ok(graph)
    }
}
