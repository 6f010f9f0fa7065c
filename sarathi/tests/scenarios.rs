//! End-to-end commander scenarios against a scripted mission layer.
//!
//! Run with: `cargo test --test scenarios`

mod common;

use common::{ScriptedCommander, straight_route, wp};
use sarathi::fsm::{Action, TransitionTable};
use sarathi::network::{Route, WaypointEdge};
use sarathi::{Behavior, CommanderFsm, Event, NavigationSnapshot, State, WaypointId};

// ============================================================================
// Helpers
// ============================================================================

/// Commander on the road at 1.1.1 with a route to 1.1.n.
fn on_road(n: u16, goals: &[WaypointId]) -> (CommanderFsm, ScriptedCommander) {
    let mut ops = ScriptedCommander::straight(n, goals);
    ops.next_route = Some(straight_route(1, n));
    let mut fsm = CommanderFsm::new(0);

    let order = fsm.control(&mut ops, &NavigationSnapshot::at(wp(1)));
    assert_eq!(order.behavior, Behavior::Go);
    assert_eq!(fsm.state(), State::OnRoad);
    ops.replan_calls.clear();
    (fsm, ops)
}

fn blocked_at(last: WaypointId, replan: WaypointId) -> NavigationSnapshot {
    NavigationSnapshot {
        last_waypoint: last,
        replan_waypoint: replan,
        road_blocked: true,
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_start_on_first_checkpoint() {
    let mut ops = ScriptedCommander::straight(5, &[wp(1), wp(5)]);
    ops.next_route = Some(straight_route(1, 5));
    let mut fsm = CommanderFsm::new(0);

    let order = fsm.control(&mut ops, &NavigationSnapshot::at(wp(1)));

    assert_eq!(ops.advance_calls, 1);
    assert_eq!(fsm.last_event(), Some(Event::EnterLane));
    assert_eq!(fsm.previous_state(), State::Initializing);
    assert_eq!(fsm.state(), State::OnRoad);
    assert_eq!(ops.replan_calls, vec![wp(1)]);
    assert_eq!(order.behavior, Behavior::Go);
    assert_eq!(order.goal, wp(5));
}

#[test]
fn test_blocked_road_replans() {
    let (mut fsm, mut ops) = on_road(5, &[wp(5)]);

    let order = fsm.control(&mut ops, &blocked_at(wp(1), wp(2)));

    assert_eq!(fsm.last_event(), Some(Event::Blocked));
    assert_eq!(ops.blockages, vec![wp(2)]);
    assert_eq!(ops.replan_calls.len(), 1);
    assert_eq!(order.behavior, Behavior::Go);
    assert_eq!(fsm.state(), State::OnRoad);
}

#[test]
fn test_replan_without_route_idles() {
    let (mut fsm, mut ops) = on_road(5, &[wp(5)]);
    ops.replan_result = false;

    let order = fsm.control(
        &mut ops,
        &NavigationSnapshot {
            last_waypoint: wp(1),
            replan_waypoint: wp(2),
            road_blocked: false,
        },
    );

    assert_eq!(fsm.last_event(), Some(Event::Replan));
    assert_eq!(ops.replan_calls, vec![wp(2)]);
    assert_eq!(order.behavior, Behavior::Go);
    assert_eq!(fsm.state(), State::OnRoad);
}

#[test]
fn test_final_checkpoint_finishes() {
    let (mut fsm, mut ops) = on_road(5, &[wp(4)]);

    let order = fsm.control(&mut ops, &NavigationSnapshot::at(wp(4)));

    assert_eq!(fsm.last_event(), Some(Event::Finished));
    assert_eq!(fsm.state(), State::Finished);
    assert_eq!(order.behavior, Behavior::Quit);
}

#[test]
fn test_missing_graph_node_aborts() {
    let (mut fsm, mut ops) = on_road(5, &[wp(5)]);
    ops.route = Route::from_edges([WaypointEdge::new(0, 1, 1.0), WaypointEdge::new(64, 2, 1.0)]);

    let order = fsm.control(&mut ops, &NavigationSnapshot::at(wp(3)));

    assert_eq!(fsm.last_event(), Some(Event::Fail));
    assert_eq!(fsm.state(), State::Finished);
    assert_eq!(order.behavior, Behavior::Abort);
}

#[test]
fn test_initializing_with_nothing_to_do() {
    let mut ops = ScriptedCommander::straight(5, &[wp(5)]);
    ops.route = straight_route(1, 5);
    let mut fsm = CommanderFsm::new(0);

    let order = fsm.control(&mut ops, &NavigationSnapshot::default());

    assert_eq!(fsm.last_event(), Some(Event::None));
    assert_eq!(order.behavior, Behavior::Initialize);
    assert_eq!(fsm.state(), State::Initializing);
}

#[test]
fn test_full_drive_with_two_checkpoints() {
    let (mut fsm, mut ops) = on_road(6, &[wp(3), wp(6)]);

    for pt in 2..=5 {
        let order = fsm.control(&mut ops, &NavigationSnapshot::at(wp(pt)));
        assert_eq!(order.behavior, Behavior::Go, "at 1.1.{pt}");
    }
    assert_eq!(ops.advance_calls, 1);
    // Replanned on passing the first checkpoint
    assert_eq!(ops.replan_calls, vec![wp(3)]);

    let order = fsm.control(&mut ops, &NavigationSnapshot::at(wp(6)));
    assert_eq!(order.behavior, Behavior::Quit);
    assert_eq!(fsm.state(), State::Finished);
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_table_totality() {
    let table = TransitionTable::new();
    for event in Event::ALL {
        for state in State::ALL {
            let transition = table.lookup(event, state);
            assert_ne!(transition.action, Action::Error, "{event} in {state}");
        }
    }
}

#[test]
fn test_one_event_every_cycle() {
    let (mut fsm, mut ops) = on_road(6, &[wp(4), wp(6)]);
    let snapshots = [
        NavigationSnapshot::at(wp(1)),
        NavigationSnapshot::at(wp(2)),
        blocked_at(wp(2), wp(3)),
        NavigationSnapshot::at(wp(3)),
        NavigationSnapshot::at(wp(5)),
        NavigationSnapshot::at(wp(6)),
        NavigationSnapshot::default(),
    ];

    for nav in snapshots {
        fsm.control(&mut ops, &nav);
        let event = fsm.last_event().expect("event derived");
        assert!(Event::ALL.contains(&event));
    }
}

#[test]
fn test_finished_outranks_blocked() {
    let (mut fsm, mut ops) = on_road(5, &[wp(3)]);

    let order = fsm.control(&mut ops, &blocked_at(wp(3), wp(4)));

    assert_eq!(fsm.last_event(), Some(Event::Finished));
    assert!(ops.blockages.is_empty());
    assert_eq!(order.behavior, Behavior::Quit);
}

#[test]
fn test_finished_absorbs_everything() {
    let (mut fsm, mut ops) = on_road(5, &[wp(2)]);
    fsm.control(&mut ops, &NavigationSnapshot::at(wp(2)));
    assert_eq!(fsm.state(), State::Finished);

    ops.route = Route::from_edges([WaypointEdge::new(50, 51, 1.0)]);
    let snapshots = [
        NavigationSnapshot::at(wp(4)),
        blocked_at(wp(4), wp(5)),
        NavigationSnapshot {
            last_waypoint: wp(1),
            replan_waypoint: wp(3),
            road_blocked: false,
        },
        NavigationSnapshot::default(),
    ];
    for nav in snapshots {
        let order = fsm.control(&mut ops, &nav);
        assert_eq!(fsm.state(), State::Finished);
        assert_eq!(order.behavior, Behavior::Quit);
    }

    ops.route = Route::new();
    let order = fsm.control(&mut ops, &NavigationSnapshot::at(wp(1)));
    assert_eq!(fsm.last_event(), Some(Event::EnterLane));
    assert_eq!(order.behavior, Behavior::Quit);
}

#[test]
fn test_bootstrap_repeats_until_route_exists() {
    let mut ops = ScriptedCommander::straight(5, &[wp(5)]);
    let mut fsm = CommanderFsm::new(0);

    for _ in 0..5 {
        fsm.control(&mut ops, &NavigationSnapshot::at(wp(2)));
        assert_eq!(fsm.last_event(), Some(Event::EnterLane));
        assert_ne!(fsm.state(), State::Finished);
        assert!(ops.route.is_empty());
    }
    assert_eq!(ops.advance_calls, 0);
    // Only the transition out of Initializing asks for a plan
    assert_eq!(ops.replan_calls.len(), 1);

    ops.route = straight_route(2, 5);
    fsm.control(&mut ops, &NavigationSnapshot::at(wp(2)));
    assert_eq!(fsm.last_event(), Some(Event::None));
}

#[test]
fn test_integrity_failure_beats_everything() {
    let (mut fsm, mut ops) = on_road(5, &[wp(2)]);
    ops.replan_result = false;
    ops.route = Route::from_edges([WaypointEdge::new(0, 1, 1.0), WaypointEdge::new(1, 2, 1.0), WaypointEdge::new(9, 3, 1.0)]);

    // Would pass the last checkpoint and carries a blockage report too
    let order = fsm.control(&mut ops, &blocked_at(wp(4), wp(5)));

    assert_eq!(fsm.last_event(), Some(Event::Fail));
    assert_eq!(fsm.state(), State::Finished);
    assert_eq!(order.behavior, Behavior::Abort);
    assert!(ops.blockages.is_empty());
}
