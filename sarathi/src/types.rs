//! Value types shared by the commander and its collaborators.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::SarathiError;

/// Identifier of a waypoint in the road network.
///
/// Written as `segment.lane.point`. The all-zero id is the null waypoint,
/// used by the navigator to mean "unset".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct WaypointId {
    pub seg: u16,
    pub lane: u8,
    pub pt: u16,
}

impl WaypointId {
    /// The null waypoint.
    pub const NULL: WaypointId = WaypointId {
        seg: 0,
        lane: 0,
        pt: 0,
    };

    pub const fn new(seg: u16, lane: u8, pt: u16) -> Self {
        Self { seg, lane, pt }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl fmt::Display for WaypointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.seg, self.lane, self.pt)
    }
}

impl FromStr for WaypointId {
    type Err = SarathiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SarathiError::InvalidWaypoint(s.to_string());

        let mut parts = s.trim().split('.');
        let seg = parts.next().ok_or_else(invalid)?;
        let lane = parts.next().ok_or_else(invalid)?;
        let pt = parts.next().ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            seg: seg.parse().map_err(|_| invalid())?,
            lane: lane.parse().map_err(|_| invalid())?,
            pt: pt.parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for WaypointId {
    type Error = SarathiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Behavior requested from the navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    /// Follow the current route
    Go,
    /// Mission failure, stop immediately
    Abort,
    /// Mission complete, shut down
    Quit,
    /// Stay put while the commander initializes
    Initialize,
}

impl Behavior {
    pub fn name(self) -> &'static str {
        match self {
            Behavior::Go => "Go",
            Behavior::Abort => "Abort",
            Behavior::Quit => "Quit",
            Behavior::Initialize => "Initialize",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Commander order for one control cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub behavior: Behavior,
    /// Upcoming waypoints along the route, nearest first (Go only)
    pub waypoints: Vec<WaypointId>,
    /// Checkpoint currently being driven to
    pub goal: WaypointId,
    /// Minimum speed (m/s)
    pub min_speed: f32,
    /// Maximum speed (m/s)
    pub max_speed: f32,
}

impl Order {
    /// Order with no motion parameters.
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            waypoints: Vec::new(),
            goal: WaypointId::NULL,
            min_speed: 0.0,
            max_speed: 0.0,
        }
    }
}

/// Navigator state as seen by the commander at the start of a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationSnapshot {
    /// Most recently confirmed waypoint
    pub last_waypoint: WaypointId,
    /// Non-null when the navigator wants a new plan from this waypoint
    pub replan_waypoint: WaypointId,
    /// Set with `replan_waypoint` when the road ahead is blocked
    pub road_blocked: bool,
}

impl NavigationSnapshot {
    pub fn at(last_waypoint: WaypointId) -> Self {
        Self {
            last_waypoint,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_display_and_parse() {
        let id = WaypointId::new(3, 1, 12);
        assert_eq!(id.to_string(), "3.1.12");
        assert_eq!("3.1.12".parse::<WaypointId>().unwrap(), id);
        assert_eq!(" 0.0.0 ".parse::<WaypointId>().unwrap(), WaypointId::NULL);
    }

    #[test]
    fn test_waypoint_parse_rejects_malformed() {
        for bad in ["", "1.2", "1.2.3.4", "a.1.1", "1.300.1", "-1.1.1"] {
            assert!(bad.parse::<WaypointId>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_waypoint_ordering() {
        let a = WaypointId::new(1, 1, 9);
        let b = WaypointId::new(1, 2, 1);
        let c = WaypointId::new(2, 1, 1);
        assert!(WaypointId::NULL < a);
        assert!(a < b && b < c);
        assert!(WaypointId::default().is_null());
        assert!(!a.is_null());
    }
}
