//! State transition table.
//!
//! One cell per (event, state) pair holding the next state and the action
//! to run. Every cell starts as (same state, `Action::Error`) and the
//! explicit transitions are written over it, so the table is always total
//! and new events or states only touch their own cells.

use super::state::{Event, State};

/// Transition action, run after the state has changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Unpopulated table cell
    Error,
    /// Mission failure
    Fail,
    /// Keep driving without a new plan
    Wait,
    InFinished,
    InInitializing,
    InRoad,
    ToFinished,
    /// Record blockage and replan
    BlockedInRoad,
    /// Replan from the requested waypoint
    ReplanInRoad,
    /// Initial plan on entering the road network
    InitToRoad,
}

/// Table cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub next: State,
    pub action: Action,
}

/// Dense transition matrix indexed by event then state.
#[derive(Clone, Debug)]
pub struct TransitionTable {
    cells: [[Transition; State::COUNT]; Event::COUNT],
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionTable {
    /// Build the commander transition table.
    pub fn new() -> Self {
        use Action as A;
        use Event as E;
        use State as S;

        let mut table = Self::unpopulated();

        table.add(E::Blocked, A::InFinished, S::Finished, S::Finished);
        table.add(E::Blocked, A::InInitializing, S::Initializing, S::Initializing);
        table.add(E::Blocked, A::BlockedInRoad, S::OnRoad, S::OnRoad);

        table.add(E::Finished, A::InFinished, S::Finished, S::Finished);
        table.add(E::Finished, A::ToFinished, S::Initializing, S::Finished);
        table.add(E::Finished, A::ToFinished, S::OnRoad, S::Finished);

        table.add(E::EnterLane, A::InFinished, S::Finished, S::Finished);
        table.add(E::EnterLane, A::InitToRoad, S::Initializing, S::OnRoad);
        table.add(E::EnterLane, A::InRoad, S::OnRoad, S::OnRoad);

        table.add(E::Fail, A::InFinished, S::Finished, S::Finished);
        table.add(E::Fail, A::Fail, S::Initializing, S::Finished);
        table.add(E::Fail, A::Fail, S::OnRoad, S::Finished);

        table.add(E::None, A::InFinished, S::Finished, S::Finished);
        table.add(E::None, A::InInitializing, S::Initializing, S::Initializing);
        table.add(E::None, A::InRoad, S::OnRoad, S::OnRoad);

        table.add(E::Wait, A::InFinished, S::Finished, S::Finished);
        table.add(E::Wait, A::InInitializing, S::Initializing, S::Initializing);
        table.add(E::Wait, A::Wait, S::OnRoad, S::OnRoad);

        table.add(E::Replan, A::InFinished, S::Finished, S::Finished);
        table.add(E::Replan, A::InInitializing, S::Initializing, S::Initializing);
        table.add(E::Replan, A::ReplanInRoad, S::OnRoad, S::OnRoad);

        table
    }

    /// Table with every cell set to (same state, `Action::Error`).
    pub(crate) fn unpopulated() -> Self {
        let mut cells = [[Transition {
            next: State::Initializing,
            action: Action::Error,
        }; State::COUNT]; Event::COUNT];

        for row in cells.iter_mut() {
            for (cell, state) in row.iter_mut().zip(State::ALL) {
                cell.next = state;
            }
        }

        Self { cells }
    }

    /// Set one transition.
    pub(crate) fn add(&mut self, event: Event, action: Action, from: State, to: State) {
        self.cells[event.index()][from.index()] = Transition { next: to, action };
    }

    /// Transition for `event` in `state`.
    #[inline]
    pub fn lookup(&self, event: Event, state: State) -> Transition {
        self.cells[event.index()][state.index()]
    }
}
