//! Error types for Sarathi

use thiserror::Error;

use crate::types::WaypointId;

/// Sarathi error type
#[derive(Error, Debug)]
pub enum SarathiError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid waypoint id: {0:?}")]
    InvalidWaypoint(String),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Waypoint {0} is not in the road network")]
    UnknownWaypoint(WaypointId),

    #[error("No route from {from} to {goal}")]
    NoRoute { from: WaypointId, goal: WaypointId },

    #[error("Route search exceeded {0} iterations")]
    SearchLimit(usize),

    #[error("Mission aborted after {0} cycles")]
    Aborted(u32),
}

impl From<toml::de::Error> for SarathiError {
    fn from(e: toml::de::Error) -> Self {
        SarathiError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SarathiError>;
