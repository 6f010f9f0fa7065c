//! Commander states and events.

use std::fmt;

/// Commander state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    /// Waiting for the first plan
    Initializing,
    /// Driving the route
    OnRoad,
    /// Mission over; absorbs every event
    Finished,
}

impl State {
    pub const COUNT: usize = 3;

    pub const ALL: [State; State::COUNT] = [State::Initializing, State::OnRoad, State::Finished];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            State::Initializing => "Initializing",
            State::OnRoad => "OnRoad",
            State::Finished => "Finished",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Commander event, derived fresh every cycle.
///
/// Declared in priority order: the derived `Ord` puts the most urgent
/// event first, and the discriminant doubles as the table row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Event {
    /// Route references a node missing from the graph
    Fail,
    /// No plan yet; enter the road network
    EnterLane,
    /// Last checkpoint passed
    Finished,
    /// Navigator reports the road ahead blocked
    Blocked,
    /// Navigator requests a new plan
    Replan,
    /// Passed a goal but could not plan onward
    Wait,
    /// Nothing to do this cycle
    None,
}

impl Event {
    pub const COUNT: usize = 7;

    pub const ALL: [Event; Event::COUNT] = [
        Event::Fail,
        Event::EnterLane,
        Event::Finished,
        Event::Blocked,
        Event::Replan,
        Event::Wait,
        Event::None,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Priority rank, 0 most urgent.
    #[inline]
    pub fn priority(self) -> usize {
        self.index()
    }

    pub fn name(self) -> &'static str {
        match self {
            Event::Fail => "Fail",
            Event::EnterLane => "EnterLane",
            Event::Finished => "Finished",
            Event::Blocked => "Blocked",
            Event::Replan => "Replan",
            Event::Wait => "Wait",
            Event::None => "None",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
