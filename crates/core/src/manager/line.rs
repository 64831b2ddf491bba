//! Straight-line manager
//!
//! Flies the leg previous -> current and switches to the next leg when the
//! vehicle crosses the plane through the current waypoint whose normal
//! bisects the incoming and outgoing legs. When the outgoing leg doubles
//! back the bisector is undefined and the plane is normal to the incoming
//! leg instead.

use super::corner::{Corner, CornerKind};
use super::event::{ManagerState, PathEvent, PathEvents};
use super::SegmentManager;
use crate::error::PathError;
use crate::geometry::{normalized, Ned};
use crate::halfspace::HalfSpace;
use crate::log_debug;
use crate::path::PathCommand;
use crate::waypoint::{WaypointList, WaypointPointer};

/// Line manager state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineManager {
    pointer: WaypointPointer,
    command: PathCommand,
    halfspace: HalfSpace,
}

/// Line along the incoming leg and the bisector switching plane
fn construct_line(
    waypoints: &WaypointList,
    pointer: &WaypointPointer,
) -> Result<(PathCommand, HalfSpace), PathError> {
    let corner = Corner::at(waypoints, pointer)?;
    let normal = match corner.kind {
        CornerKind::Reversal => corner.q_prev,
        _ => normalized(&(corner.q_prev + corner.q_next)).unwrap_or(corner.q_prev),
    };
    let command = PathCommand::Line {
        origin: corner.previous,
        direction: corner.q_prev,
        airspeed: corner.airspeed,
    };
    Ok((command, HalfSpace::new(corner.current, normal)))
}

impl SegmentManager for LineManager {
    fn start(
        waypoints: &WaypointList,
        _position: &Ned,
        _radius: f64,
        events: &mut PathEvents,
    ) -> Result<Self, PathError> {
        let pointer = WaypointPointer::start(waypoints.len())?;
        let (command, halfspace) = construct_line(waypoints, &pointer)?;
        let _ = events.push(PathEvent::PathRebuilt { command });
        Ok(Self {
            pointer,
            command,
            halfspace,
        })
    }

    fn update(
        &mut self,
        waypoints: &WaypointList,
        position: &Ned,
        events: &mut PathEvents,
    ) -> Result<(), PathError> {
        if !self.halfspace.contains(position) {
            return Ok(());
        }

        let mut pointer = self.pointer;
        pointer.advance();
        let (command, halfspace) = construct_line(waypoints, &pointer)?;

        self.pointer = pointer;
        self.command = command;
        self.halfspace = halfspace;

        log_debug!("Line: advanced to waypoint {}", pointer.current());
        let (previous, current, next) = pointer.indices();
        let _ = events.push(PathEvent::WaypointAdvanced {
            previous,
            current,
            next,
        });
        let _ = events.push(PathEvent::PathRebuilt { command });
        Ok(())
    }

    fn command(&self) -> &PathCommand {
        &self.command
    }

    fn halfspace(&self) -> &HalfSpace {
        &self.halfspace
    }

    fn pointer(&self) -> &WaypointPointer {
        &self.pointer
    }

    fn state(&self) -> ManagerState {
        ManagerState::Line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waypoint::{PathType, Waypoint};

    const TOL: f64 = 1e-6;

    fn assert_vec_eq(a: &Ned, b: &Ned) {
        assert!((a - b).norm() < TOL, "{:?} != {:?}", a, b);
    }

    fn reference_list() -> WaypointList {
        let mut list = WaypointList::new(PathType::StraightLine);
        for (n, e, d, airspeed) in [
            (100.0, 1.02, 1000.1, 25.0),
            (500.0, 2.03, 1001.1, 35.0),
            (10.0, 5.06, 1005.2, 25.0),
            (1100.0, 1.02, 1000.1, 25.0),
        ] {
            list.add(Waypoint::new(Ned::new(n, e, d), airspeed, 0.0))
                .unwrap();
        }
        list
    }

    fn line_parts(command: &PathCommand) -> (Ned, Ned, f64) {
        match command {
            PathCommand::Line {
                origin,
                direction,
                airspeed,
            } => (*origin, *direction, *airspeed),
            other => panic!("expected line, got {:?}", other),
        }
    }

    #[test]
    fn test_construct_line_reference() {
        let list = reference_list();
        let mut ptr = WaypointPointer::start(list.len()).unwrap();

        let (command, hs) = construct_line(&list, &ptr).unwrap();
        let (origin, direction, airspeed) = line_parts(&command);
        assert_vec_eq(&origin, &Ned::new(100.0, 1.02, 1000.1));
        assert_vec_eq(&direction, &Ned::new(0.99999369, 0.00252498, 0.00249998));
        assert!((airspeed - 35.0).abs() < TOL);
        assert_vec_eq(&hs.point, &Ned::new(500.0, 2.03, 1001.1));
        assert_vec_eq(&hs.normal, &Ned::new(0.00343307, 0.62534007, 0.7803448));

        ptr.advance();
        let (command, hs) = construct_line(&list, &ptr).unwrap();
        let (origin, direction, airspeed) = line_parts(&command);
        assert_vec_eq(&origin, &Ned::new(500.0, 2.03, 1001.1));
        assert_vec_eq(&direction, &Ned::new(-0.99994588, 0.00618334, 0.00836689));
        assert!((airspeed - 25.0).abs() < TOL);
        assert_vec_eq(&hs.normal, &Ned::new(0.00817192, 0.55752442, 0.83012032));
    }

    #[test]
    fn test_update_without_crossing_is_noop() {
        let list = reference_list();
        let mut events = PathEvents::new();
        let mut manager =
            LineManager::start(&list, &Ned::zeros(), 0.0, &mut events).unwrap();
        let before = manager;

        events.clear();
        manager
            .update(&list, &Ned::new(200.0, 1.0, 1000.0), &mut events)
            .unwrap();
        assert!(events.is_empty());
        assert_eq!(manager, before);
    }

    #[test]
    fn test_update_advances_on_crossing() {
        let list = reference_list();
        let mut events = PathEvents::new();
        let mut manager =
            LineManager::start(&list, &Ned::zeros(), 0.0, &mut events).unwrap();

        events.clear();
        manager
            .update(&list, &Ned::new(500.0, 2.03, 1001.1), &mut events)
            .unwrap();
        assert_eq!(manager.pointer().indices(), (1, 2, 3));
        assert_eq!(
            events[0],
            PathEvent::WaypointAdvanced {
                previous: 1,
                current: 2,
                next: 3
            }
        );
        assert!(matches!(events[1], PathEvent::PathRebuilt { .. }));
    }

    #[test]
    fn test_two_waypoint_reversal_uses_incoming_normal() {
        let mut list = WaypointList::new(PathType::StraightLine);
        list.add(Waypoint::new(Ned::new(0.0, 0.0, -100.0), 20.0, 0.0))
            .unwrap();
        list.add(Waypoint::new(Ned::new(300.0, 0.0, -100.0), 20.0, 0.0))
            .unwrap();
        let mut events = PathEvents::new();
        let mut manager =
            LineManager::start(&list, &Ned::zeros(), 0.0, &mut events).unwrap();
        assert_vec_eq(&manager.halfspace().normal, &Ned::new(1.0, 0.0, 0.0));

        manager
            .update(&list, &Ned::new(301.0, 0.0, -100.0), &mut events)
            .unwrap();
        assert_eq!(manager.pointer().indices(), (1, 0, 1));
        assert_vec_eq(&manager.halfspace().normal, &Ned::new(-1.0, 0.0, 0.0));
        assert_vec_eq(&manager.halfspace().point, &Ned::new(0.0, 0.0, -100.0));
    }

    #[test]
    fn test_failed_rebuild_keeps_state() {
        let list = reference_list();
        let mut events = PathEvents::new();
        let mut manager =
            LineManager::start(&list, &Ned::zeros(), 0.0, &mut events).unwrap();
        let before = manager;

        // A shorter list handed over without the changed flag
        let mut short = WaypointList::new(PathType::StraightLine);
        short
            .add(Waypoint::new(Ned::new(100.0, 1.02, 1000.1), 25.0, 0.0))
            .unwrap();
        short
            .add(Waypoint::new(Ned::new(500.0, 2.03, 1001.1), 35.0, 0.0))
            .unwrap();
        let result = manager.update(&short, &Ned::new(500.0, 2.03, 1001.1), &mut events);
        assert_eq!(
            result,
            Err(PathError::WaypointIndexOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(manager, before);
    }
}
