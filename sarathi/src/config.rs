//! Configuration loading for Sarathi

use crate::error::{Result, SarathiError};
use crate::types::WaypointId;
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SarathiConfig {
    #[serde(default)]
    pub commander: CommanderConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Commander settings
#[derive(Clone, Debug, Deserialize)]
pub struct CommanderConfig {
    /// Log state changes at info level when > 0 (default: 1)
    #[serde(default = "default_verbosity")]
    pub verbosity: u8,

    /// Control cycle rate in Hz (default: 20.0)
    #[serde(default = "default_cycle_hz")]
    pub cycle_hz: f32,

    /// Upcoming waypoints carried in each Go order (default: 5)
    #[serde(default = "default_order_waypoints")]
    pub order_waypoints: usize,

    /// Route search expansion limit (default: 100000)
    #[serde(default = "default_max_plan_iterations")]
    pub max_plan_iterations: usize,
}

/// Speed limits passed to the navigator
#[derive(Clone, Debug, Deserialize)]
pub struct MotionConfig {
    /// Maximum speed in m/s (default: 6.0)
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,

    /// Minimum speed in m/s (default: 0.0)
    #[serde(default = "default_min_speed")]
    pub min_speed: f32,
}

/// Simulated road network and navigator
#[derive(Clone, Debug, Deserialize)]
pub struct SimulationConfig {
    /// Grid rows, one road segment each (default: 4)
    #[serde(default = "default_rows")]
    pub rows: u16,

    /// Waypoints per row (default: 6)
    #[serde(default = "default_cols")]
    pub cols: u16,

    /// Waypoint spacing in meters (default: 10.0)
    #[serde(default = "default_spacing")]
    pub spacing: f32,

    /// Starting waypoint (default: 1.1.1)
    #[serde(default = "default_start")]
    pub start: WaypointId,

    /// Checkpoints to visit in order
    #[serde(default = "default_checkpoints")]
    pub checkpoints: Vec<WaypointId>,

    /// Waypoints the navigator finds blocked when it reaches them
    #[serde(default)]
    pub blocked: Vec<WaypointId>,

    /// Cycles spent driving between adjacent waypoints (default: 3)
    #[serde(default = "default_cycles_per_waypoint")]
    pub cycles_per_waypoint: u32,

    /// Stop after this many cycles (default: 1000)
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u32,
}

impl Default for CommanderConfig {
    fn default() -> Self {
        Self {
            verbosity: default_verbosity(),
            cycle_hz: default_cycle_hz(),
            order_waypoints: default_order_waypoints(),
            max_plan_iterations: default_max_plan_iterations(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_speed: default_max_speed(),
            min_speed: default_min_speed(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            spacing: default_spacing(),
            start: default_start(),
            checkpoints: default_checkpoints(),
            blocked: Vec::new(),
            cycles_per_waypoint: default_cycles_per_waypoint(),
            max_cycles: default_max_cycles(),
        }
    }
}

// Default value functions
fn default_verbosity() -> u8 {
    1
}
fn default_cycle_hz() -> f32 {
    20.0
}
fn default_order_waypoints() -> usize {
    5
}
fn default_max_plan_iterations() -> usize {
    100_000
}
fn default_max_speed() -> f32 {
    6.0
}
fn default_min_speed() -> f32 {
    0.0
}

// Simulation defaults
fn default_rows() -> u16 {
    4
}
fn default_cols() -> u16 {
    6
}
fn default_spacing() -> f32 {
    10.0
}
fn default_start() -> WaypointId {
    WaypointId::new(1, 1, 1)
}
fn default_checkpoints() -> Vec<WaypointId> {
    vec![WaypointId::new(1, 1, 6), WaypointId::new(4, 1, 6)]
}
fn default_cycles_per_waypoint() -> u32 {
    3
}
fn default_max_cycles() -> u32 {
    1000
}

impl SarathiConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SarathiError::Config(format!("Failed to read config file: {}", e)))?;
        Self::parse(&content)
    }

    /// Parse and validate TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: SarathiConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.commander.cycle_hz.is_nan() || self.commander.cycle_hz <= 0.0 {
            return Err(SarathiError::Config(format!(
                "cycle_hz must be positive, got {}",
                self.commander.cycle_hz
            )));
        }
        if self.motion.min_speed < 0.0 || self.motion.min_speed > self.motion.max_speed {
            return Err(SarathiError::Config(format!(
                "speed limits out of order: min {} max {}",
                self.motion.min_speed, self.motion.max_speed
            )));
        }
        if self.simulation.checkpoints.is_empty() {
            return Err(SarathiError::Config("no checkpoints given".to_string()));
        }
        if self.simulation.cycles_per_waypoint == 0 {
            return Err(SarathiError::Config(
                "cycles_per_waypoint must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Control cycle period
    pub fn cycle_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f32(1.0 / self.commander.cycle_hz)
    }
}
