//! Path manager scenarios
//!
//! Drives the dispatcher through whole flights the way the guidance loop
//! does: one `update` per cycle with the current vehicle position.

use core::f64::consts::FRAC_PI_2;

use waypath_core::dubins::{self, DubinsCase, OrientedPoint};
use waypath_core::manager::{DubinsState, FilletState, ManagerState};
use waypath_core::parameters::{ParamValue, ParameterStore, PathParams};
use waypath_core::{
    Ned, OrbitDirection, PathCommand, PathError, PathEvent, PathManager, PathType,
    VehiclePosition, Waypoint, WaypointList,
};

const TOL: f64 = 1e-6;

// ===== Helpers =====

fn assert_vec_eq(a: &Ned, b: &Ned, tol: f64) {
    assert!((a - b).norm() < tol, "{:?} != {:?}", a, b);
}

/// Vehicle position at a NED point
fn at(ned: &Ned) -> VehiclePosition {
    VehiclePosition::new(ned.x, ned.y, -ned.z)
}

fn list_of(path_type: PathType, points: &[(f64, f64, f64, f64, f64)]) -> WaypointList {
    let mut list = WaypointList::new(path_type);
    for (n, e, d, airspeed, course) in points {
        list.add(Waypoint::new(Ned::new(*n, *e, *d), *airspeed, *course))
            .unwrap();
    }
    list
}

fn reference_list(path_type: PathType) -> WaypointList {
    list_of(
        path_type,
        &[
            (100.0, 1.02, 1000.1, 25.0, 0.0),
            (500.0, 2.03, 1001.1, 35.0, 0.0),
            (10.0, 5.06, 1005.2, 25.0, 0.0),
            (1100.0, 1.02, 1000.1, 25.0, 0.0),
        ],
    )
}

/// 1 km square flown clockwise at 100 m altitude
fn square(path_type: PathType) -> WaypointList {
    list_of(
        path_type,
        &[
            (0.0, 0.0, -100.0, 20.0, 0.0),
            (1000.0, 0.0, -100.0, 22.0, FRAC_PI_2),
            (1000.0, 1000.0, -100.0, 24.0, 2.0 * FRAC_PI_2),
            (0.0, 1000.0, -100.0, 26.0, 3.0 * FRAC_PI_2),
        ],
    )
}

fn advances(events: &[PathEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, PathEvent::WaypointAdvanced { .. }))
        .count()
}

// ===== Tests: Line manager =====

#[test]
fn test_line_reference_scenario() {
    let mut manager = PathManager::new(10.0).unwrap();
    let mut list = reference_list(PathType::StraightLine);

    let update = manager
        .update(&mut list, &VehiclePosition::new(100.0, 1.02, -1000.1))
        .unwrap();
    match update.command {
        PathCommand::Line {
            origin,
            direction,
            airspeed,
        } => {
            assert_vec_eq(&origin, &Ned::new(100.0, 1.02, 1000.1), TOL);
            assert_vec_eq(&direction, &Ned::new(0.99999369, 0.00252498, 0.00249998), TOL);
            assert!((airspeed - 35.0).abs() < TOL);
        }
        other => panic!("expected line, got {:?}", other),
    }
    let hs = manager.halfspace().unwrap();
    assert_vec_eq(&hs.normal, &Ned::new(0.00343307, 0.62534007, 0.7803448), TOL);

    // Cross the bisector plane at waypoint 1
    let update = manager
        .update(&mut list, &at(&Ned::new(500.0, 2.03, 1001.1)))
        .unwrap();
    assert_eq!(manager.pointer().unwrap().indices(), (1, 2, 3));
    assert_eq!(advances(&update.events), 1);
    match update.command {
        PathCommand::Line {
            origin,
            direction,
            airspeed,
        } => {
            assert_vec_eq(&origin, &Ned::new(500.0, 2.03, 1001.1), TOL);
            assert_vec_eq(
                &direction,
                &Ned::new(-0.99994588, 0.00618334, 0.00836689),
                TOL,
            );
            assert!((airspeed - 25.0).abs() < TOL);
        }
        other => panic!("expected line, got {:?}", other),
    }
    let hs = manager.halfspace().unwrap();
    assert_vec_eq(&hs.normal, &Ned::new(0.00817192, 0.55752442, 0.83012032), TOL);
}

#[test]
fn test_line_circuit_wraps() {
    let mut manager = PathManager::new(25.0).unwrap();
    let mut list = square(PathType::StraightLine);
    manager
        .update(&mut list, &VehiclePosition::new(0.0, 0.0, 100.0))
        .unwrap();

    let corners = [
        Ned::new(1000.0, 0.0, -100.0),
        Ned::new(1000.0, 1000.0, -100.0),
        Ned::new(0.0, 1000.0, -100.0),
        Ned::new(0.0, 0.0, -100.0),
    ];
    let expected = [(1, 2, 3), (2, 3, 0), (3, 0, 1), (0, 1, 2)];
    for (corner, window) in corners.iter().zip(expected) {
        let update = manager.update(&mut list, &at(corner)).unwrap();
        assert_eq!(advances(&update.events), 1);
        assert_eq!(manager.pointer().unwrap().indices(), window);
    }
}

#[test]
fn test_idle_cycles_do_not_rebuild() {
    for path_type in [PathType::StraightLine, PathType::Fillet, PathType::Dubins] {
        let mut manager = PathManager::new(50.0).unwrap();
        let mut list = square(path_type);
        let first = manager
            .update(&mut list, &VehiclePosition::new(-20.0, 0.0, 100.0))
            .unwrap();
        let halfspace = *manager.halfspace().unwrap();
        let state = manager.state();

        for _ in 0..10 {
            let update = manager
                .update(&mut list, &VehiclePosition::new(-20.0, 0.0, 100.0))
                .unwrap();
            assert!(update.events.is_empty(), "{:?}", path_type);
            assert_eq!(update.command, first.command);
            assert_eq!(*manager.halfspace().unwrap(), halfspace);
            assert_eq!(manager.state(), state);
        }
    }
}

// ===== Tests: Waypoint list replacement =====

#[test]
fn test_replacement_takes_priority_over_crossing() {
    let mut manager = PathManager::new(25.0).unwrap();
    let mut list = square(PathType::StraightLine);
    manager
        .update(&mut list, &VehiclePosition::new(0.0, 0.0, 100.0))
        .unwrap();
    manager
        .update(&mut list, &VehiclePosition::new(1000.0, 0.0, 100.0))
        .unwrap();
    assert_eq!(manager.pointer().unwrap().indices(), (1, 2, 3));

    // New list arrives on the same cycle the vehicle crosses a plane
    list.replace(&[
        Waypoint::new(Ned::new(0.0, 0.0, -100.0), 30.0, 0.0),
        Waypoint::new(Ned::new(0.0, 800.0, -100.0), 31.0, 0.0),
        Waypoint::new(Ned::new(800.0, 800.0, -100.0), 32.0, 0.0),
    ])
    .unwrap();
    let update = manager
        .update(&mut list, &VehiclePosition::new(5000.0, 5000.0, 100.0))
        .unwrap();

    assert_eq!(manager.pointer().unwrap().indices(), (0, 1, 2));
    assert_eq!(advances(&update.events), 0);
    assert_eq!(
        update.events[0],
        PathEvent::WaypointsReloaded {
            count: 3,
            path_type: PathType::StraightLine
        }
    );
    assert!((update.command.airspeed() - 31.0).abs() < TOL);
    assert!(!list.is_changed());
}

#[test]
fn test_path_type_change_switches_manager() {
    let mut manager = PathManager::new(50.0).unwrap();
    let mut list = square(PathType::StraightLine);
    manager
        .update(&mut list, &VehiclePosition::new(0.0, 0.0, 100.0))
        .unwrap();
    assert_eq!(manager.state(), Some(ManagerState::Line));

    list.set_path_type(PathType::Fillet);
    manager
        .update(&mut list, &VehiclePosition::new(0.0, 0.0, 100.0))
        .unwrap();
    assert_eq!(
        manager.state(),
        Some(ManagerState::Fillet(FilletState::Straight))
    );
    assert!(manager.dubins_path().is_none());
}

#[test]
fn test_rejected_list_then_recovery() {
    let mut manager = PathManager::new(25.0).unwrap();
    let mut list = WaypointList::new(PathType::Fillet);
    list.add(Waypoint::new(Ned::zeros(), 20.0, 0.0)).unwrap();

    assert_eq!(
        manager.update(&mut list, &VehiclePosition::default()),
        Err(PathError::InsufficientWaypoints { count: 1 })
    );
    assert!(manager.requests_waypoints());
    assert_eq!(
        manager.update(&mut list, &VehiclePosition::default()),
        Err(PathError::NoActivePath)
    );

    list.add(Waypoint::new(Ned::new(400.0, 0.0, 0.0), 20.0, 0.0))
        .unwrap();
    manager
        .update(&mut list, &VehiclePosition::default())
        .unwrap();
    assert!(!manager.requests_waypoints());
}

#[test]
fn test_coincident_waypoints_rejected() {
    let mut manager = PathManager::new(25.0).unwrap();
    let mut list = list_of(
        PathType::StraightLine,
        &[
            (0.0, 0.0, -100.0, 20.0, 0.0),
            (0.0, 0.0, -100.0, 20.0, 0.0),
            (100.0, 0.0, -100.0, 20.0, 0.0),
        ],
    );
    assert_eq!(
        manager.update(&mut list, &VehiclePosition::default()),
        Err(PathError::DegenerateSegment { from: 0, to: 1 })
    );
    assert!(!manager.is_active());
    assert!(manager.requests_waypoints());
}

// ===== Tests: Fillet manager =====

#[test]
fn test_fillet_flight_around_square() {
    let radius = 100.0;
    let mut manager = PathManager::new(radius).unwrap();
    let mut list = square(PathType::Fillet);
    manager
        .update(&mut list, &VehiclePosition::new(0.0, 0.0, 100.0))
        .unwrap();
    assert_vec_eq(
        &manager.halfspace().unwrap().point,
        &Ned::new(900.0, 0.0, -100.0),
        1e-9,
    );

    // Enter the first arc
    let update = manager
        .update(&mut list, &VehiclePosition::new(901.0, 0.0, 100.0))
        .unwrap();
    assert_eq!(
        manager.state(),
        Some(ManagerState::Fillet(FilletState::Arc))
    );
    assert!(update.events.contains(&PathEvent::StateChanged {
        from: ManagerState::Fillet(FilletState::Straight),
        to: ManagerState::Fillet(FilletState::Arc),
    }));
    match update.command {
        PathCommand::Orbit {
            center,
            radius: r,
            direction,
            airspeed,
        } => {
            assert_vec_eq(&center, &Ned::new(900.0, 100.0, -100.0), 1e-9);
            assert!((r - radius).abs() < TOL);
            assert_eq!(direction, OrbitDirection::Clockwise);
            assert!((airspeed - 22.0).abs() < TOL);
        }
        other => panic!("expected orbit, got {:?}", other),
    }

    // Leave the arc onto the second leg
    let update = manager
        .update(&mut list, &VehiclePosition::new(1000.0, 101.0, 100.0))
        .unwrap();
    assert_eq!(
        manager.state(),
        Some(ManagerState::Fillet(FilletState::Straight))
    );
    assert_eq!(manager.pointer().unwrap().indices(), (1, 2, 3));
    assert!((update.command.airspeed() - 24.0).abs() < TOL);
    assert_vec_eq(
        &manager.halfspace().unwrap().point,
        &Ned::new(1000.0, 900.0, -100.0),
        1e-9,
    );
}

// ===== Tests: Dubins manager =====

#[test]
fn test_dubins_flight_through_two_pairs() {
    let radius = 100.0;
    let mut manager = PathManager::new(radius).unwrap();
    let mut list = square(PathType::Dubins);

    let path = dubins::solve(
        &OrientedPoint::new(Ned::new(0.0, 0.0, -100.0), 0.0),
        &OrientedPoint::new(Ned::new(1000.0, 0.0, -100.0), FRAC_PI_2),
        radius,
    )
    .unwrap();

    let update = manager
        .update(&mut list, &at(&(path.z1 - 5.0 * path.q1)))
        .unwrap();
    assert_eq!(manager.dubins_path(), Some(&path));
    assert_eq!(
        manager.state(),
        Some(ManagerState::Dubins(DubinsState::StartOrbitTracking))
    );
    assert!(update.command.is_orbit());
    assert!((update.command.airspeed() - 22.0).abs() < TOL);

    // Tangent point z1: straight segment
    let update = manager.update(&mut list, &at(&(path.z1 + path.q1))).unwrap();
    assert_eq!(
        manager.state(),
        Some(ManagerState::Dubins(DubinsState::Straight))
    );
    match update.command {
        PathCommand::Line {
            origin, direction, ..
        } => {
            assert_vec_eq(&origin, &path.z1, 1e-9);
            assert_vec_eq(&direction, &path.q1, 1e-9);
        }
        other => panic!("expected line, got {:?}", other),
    }

    // Tangent point z2: end orbit
    manager.update(&mut list, &at(&(path.z2 + path.q1))).unwrap();
    assert_eq!(
        manager.state(),
        Some(ManagerState::Dubins(DubinsState::EndOrbitTracking))
    );

    // End point: next pair is solved from waypoint 1 to waypoint 2
    let update = manager.update(&mut list, &at(&(path.z3 + path.q3))).unwrap();
    assert_eq!(advances(&update.events), 1);
    assert_eq!(manager.pointer().unwrap().indices(), (1, 2, 3));
    let next = dubins::solve(
        &OrientedPoint::new(Ned::new(1000.0, 0.0, -100.0), FRAC_PI_2),
        &OrientedPoint::new(Ned::new(1000.0, 1000.0, -100.0), 2.0 * FRAC_PI_2),
        radius,
    )
    .unwrap();
    assert_eq!(manager.dubins_path(), Some(&next));
    assert!((update.command.airspeed() - 24.0).abs() < TOL);
}

#[test]
fn test_dubins_reference_pair_selects_rsl() {
    let mut manager = PathManager::new(20.2).unwrap();
    let mut list = list_of(
        PathType::Dubins,
        &[
            (1.0, 2.0, 3.0, 25.0, 0.123),
            (100.0, 300.0, 3.0, 25.0, 6.1),
        ],
    );
    manager
        .update(&mut list, &VehiclePosition::new(1.0, 2.0, -3.0))
        .unwrap();
    let path = manager.dubins_path().unwrap();
    assert_eq!(path.case, DubinsCase::Rsl);
    assert!((path.length - 329.00343169).abs() < TOL);
    assert!(matches!(
        manager.command(),
        Some(PathCommand::Orbit {
            direction: OrbitDirection::Clockwise,
            ..
        })
    ));
}

#[test]
fn test_dubins_state_decoding() {
    assert_eq!(DubinsState::try_from(3), Ok(DubinsState::Straight));
    assert_eq!(
        DubinsState::try_from(7),
        Err(PathError::InvalidManagerState(7))
    );
    assert_eq!(
        FilletState::try_from(9),
        Err(PathError::InvalidManagerState(9))
    );
    assert_eq!(
        ManagerState::Dubins(DubinsState::EndOrbitTracking).code(),
        5
    );
}

// ===== Tests: Configuration =====

#[test]
fn test_manager_from_store() {
    let mut store = ParameterStore::new();
    PathParams::register_defaults(&mut store).unwrap();
    store.set("PATH_RADIUS", ParamValue::Float(60.0)).unwrap();

    let manager = PathManager::from_store(&store).unwrap();
    assert!((manager.radius() - 60.0).abs() < 1e-6);

    let defaults = PathManager::from_store(&ParameterStore::new()).unwrap();
    assert!((defaults.radius() - 25.0).abs() < 1e-6);
}
