//! Commander finite state machine.
//!
//! States are nodes of a directed graph; each arrow is labelled with the
//! event that triggers it and carries an action. All arrows live in a
//! dense (event, state) table, so adding a state or event only adds cells.
//!
//! Every cycle `control` derives the single most urgent event, looks up
//! the transition for the current state, switches state, then runs the
//! action, which returns the order for this cycle. The state changes
//! before the action runs. Actions never trigger a second transition in
//! the same cycle.

mod events;
mod ops;
mod state;
mod table;

#[cfg(test)]
pub(crate) mod testing;

pub use events::EventDeriver;
pub use ops::CommanderOps;
pub use state::{Event, State};
pub use table::{Action, Transition, TransitionTable};

use crate::types::{Behavior, NavigationSnapshot, Order};

/// Commander state machine.
#[derive(Clone, Debug)]
pub struct CommanderFsm {
    verbosity: u8,
    /// Working copy of this cycle's navigator snapshot
    nav: NavigationSnapshot,
    prev: State,
    state: State,
    table: TransitionTable,
    deriver: EventDeriver,
    last_event: Option<Event>,
}

impl Default for CommanderFsm {
    fn default() -> Self {
        Self::new(0)
    }
}

impl CommanderFsm {
    /// Create a state machine in `Initializing`.
    ///
    /// With `verbosity > 0` state changes are logged at info level.
    pub fn new(verbosity: u8) -> Self {
        Self {
            verbosity,
            nav: NavigationSnapshot::default(),
            prev: State::Initializing,
            state: State::Initializing,
            table: TransitionTable::new(),
            deriver: EventDeriver::new(),
            last_event: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn previous_state(&self) -> State {
        self.prev
    }

    /// Event selected by the most recent cycle.
    pub fn last_event(&self) -> Option<Event> {
        self.last_event
    }

    /// Route progress bookkeeping.
    pub fn progress(&self) -> &EventDeriver {
        &self.deriver
    }

    /// Run one control cycle and return its order.
    pub fn control<O>(&mut self, ops: &mut O, nav: &NavigationSnapshot) -> Order
    where
        O: CommanderOps + ?Sized,
    {
        self.nav = *nav;

        let event = self.deriver.current_event(&self.nav, ops);
        let transition = self.table.lookup(event, self.state);

        self.prev = self.state;
        self.state = transition.next;
        self.last_event = Some(event);

        if self.state != self.prev {
            if self.verbosity > 0 {
                tracing::info!(
                    "Commander state changing from {} to {}, event = {}",
                    self.prev,
                    self.state,
                    event
                );
            } else {
                tracing::debug!(
                    "Commander state changing from {} to {}, event = {}",
                    self.prev,
                    self.state,
                    event
                );
            }
        } else if self.verbosity > 1 {
            tracing::debug!("Current event = {} in {}", event, self.state);
        }

        self.act(transition.action, event, ops)
    }

    /// Dispatch a transition action.
    fn act<O>(&mut self, action: Action, event: Event, ops: &mut O) -> Order
    where
        O: CommanderOps + ?Sized,
    {
        match action {
            Action::Error => self.action_error(event),
            Action::Fail => Self::action_fail(),
            Action::Wait => Self::action_wait(ops),
            Action::InFinished => Order::new(Behavior::Quit),
            Action::InInitializing => Order::new(Behavior::Initialize),
            Action::InRoad => ops.prepare_order(Behavior::Go),
            Action::ToFinished => {
                tracing::info!("Mission completed!");
                Order::new(Behavior::Quit)
            }
            Action::BlockedInRoad => self.blocked_in_road(ops),
            Action::ReplanInRoad => self.replan_in_road(ops),
            Action::InitToRoad => self.init_to_road(ops),
        }
    }

    fn action_error(&self, event: Event) -> Order {
        tracing::error!("Invalid commander event {} in state {}", event, self.prev);
        Self::action_fail()
    }

    fn action_fail() -> Order {
        tracing::error!("Mission failure!");
        Order::new(Behavior::Abort)
    }

    fn action_wait<O>(ops: &mut O) -> Order
    where
        O: CommanderOps + ?Sized,
    {
        tracing::info!("No replan, waiting it out");
        ops.prepare_order(Behavior::Go)
    }

    fn blocked_in_road<O>(&mut self, ops: &mut O) -> Order
    where
        O: CommanderOps + ?Sized,
    {
        tracing::info!(
            "Road blocked at {}, making a new plan",
            self.nav.replan_waypoint
        );
        ops.record_blockage(self.nav.replan_waypoint);

        if !ops.replan_route(self.nav.last_waypoint) {
            return Self::action_wait(ops);
        }
        ops.prepare_order(Behavior::Go)
    }

    fn replan_in_road<O>(&mut self, ops: &mut O) -> Order
    where
        O: CommanderOps + ?Sized,
    {
        tracing::info!("Making new plan from {}", self.nav.replan_waypoint);
        self.nav.last_waypoint = self.nav.replan_waypoint;

        if !ops.replan_route(self.nav.last_waypoint) {
            return Self::action_wait(ops);
        }
        ops.prepare_order(Behavior::Go)
    }

    fn init_to_road<O>(&mut self, ops: &mut O) -> Order
    where
        O: CommanderOps + ?Sized,
    {
        tracing::info!("On the road, making initial plan from {}", self.nav.last_waypoint);

        if !ops.replan_route(self.nav.last_waypoint) {
            return Self::action_fail();
        }
        ops.prepare_order(Behavior::Go)
    }
}
