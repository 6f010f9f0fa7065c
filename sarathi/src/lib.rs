//! Sarathi - Mission Commander for an autonomous ground vehicle
//!
//! Once per control cycle the commander turns the navigator's latest state
//! into a single order for it: go, initialize, abort or quit.
//!
//! ## Architecture
//!
//! - **fsm**: table-driven state machine and per-cycle event derivation
//! - **commander**: mission layer (route, checkpoints, blockages) the
//!   state machine operates on
//! - **network**: waypoint graph, route and blockage set
//! - **planning**: shortest-route planner over the waypoint graph
//! - **sim**: scripted navigator for running missions end to end

pub mod commander;
pub mod config;
pub mod error;
pub mod fsm;
pub mod network;
pub mod planning;
pub mod sim;
pub mod types;

pub use commander::{Commander, Mission, MissionContext};
pub use config::SarathiConfig;
pub use error::{Result, SarathiError};
pub use fsm::{CommanderFsm, CommanderOps, Event, State};
pub use types::{Behavior, NavigationSnapshot, Order, WaypointId};
