//! Dubins manager
//!
//! Flies the shortest Dubins path from waypoint[previous] to
//! waypoint[current], using each waypoint's course as its heading. The path
//! is walked through five states:
//!
//! 1. `StartOrbitClearing`: on the start circle, waiting to leave H1
//! 2. `StartOrbitTracking`: on the start circle, waiting to reach H1
//! 3. `Straight`: on the tangent line, waiting to reach H2
//! 4. `EndOrbitClearing`: on the end circle, waiting to leave H3
//! 5. `EndOrbitTracking`: on the end circle, waiting to reach H3
//!
//! Reaching H3 in state 5 advances the waypoint window and solves the next
//! pair. The start circle is entered in state 1 when the vehicle is already
//! inside the new H1 and in state 2 otherwise.

use super::event::{ManagerState, PathEvent, PathEvents};
use super::transition::{self, Transition, Trigger};
use super::SegmentManager;
use crate::dubins::{self as solver, DubinsPath, OrientedPoint};
use crate::error::PathError;
use crate::geometry::Ned;
use crate::halfspace::HalfSpace;
use crate::log_debug;
use crate::path::PathCommand;
use crate::waypoint::{WaypointList, WaypointPointer};

/// Dubins manager discrete state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DubinsState {
    /// First part of the start circle, up to leaving H1
    StartOrbitClearing = 1,
    /// Second part of the start circle, up to H1
    StartOrbitTracking = 2,
    /// Tangent line, up to H2
    Straight = 3,
    /// First part of the end circle, up to leaving H3
    EndOrbitClearing = 4,
    /// Second part of the end circle, up to H3
    EndOrbitTracking = 5,
}

impl DubinsState {
    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            DubinsState::StartOrbitClearing => "StartOrbitClearing",
            DubinsState::StartOrbitTracking => "StartOrbitTracking",
            DubinsState::Straight => "Straight",
            DubinsState::EndOrbitClearing => "EndOrbitClearing",
            DubinsState::EndOrbitTracking => "EndOrbitTracking",
        }
    }
}

impl From<DubinsState> for u8 {
    fn from(state: DubinsState) -> u8 {
        state as u8
    }
}

impl TryFrom<u8> for DubinsState {
    type Error = PathError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DubinsState::StartOrbitClearing),
            2 => Ok(DubinsState::StartOrbitTracking),
            3 => Ok(DubinsState::Straight),
            4 => Ok(DubinsState::EndOrbitClearing),
            5 => Ok(DubinsState::EndOrbitTracking),
            other => Err(PathError::InvalidManagerState(other)),
        }
    }
}

/// Geometry built when a transition fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DubinsAction {
    /// Keep the current primitive
    Hold,
    /// Line from z1 along q1, switching at H2
    ConstructLine,
    /// End circle, switching at H3
    ConstructEndOrbit,
    /// Slide the waypoint window and solve the next pair
    AdvancePair,
}

/// Dubins state machine
///
/// The `AdvancePair` row lists `StartOrbitClearing` as its target; the
/// manager replaces it with `StartOrbitTracking` when the vehicle is outside
/// the new H1.
pub const DUBINS_TRANSITIONS: [Transition<DubinsState, DubinsAction>; 5] = [
    Transition {
        from: DubinsState::StartOrbitClearing,
        trigger: Trigger::Exit,
        to: DubinsState::StartOrbitTracking,
        action: DubinsAction::Hold,
    },
    Transition {
        from: DubinsState::StartOrbitTracking,
        trigger: Trigger::Enter,
        to: DubinsState::Straight,
        action: DubinsAction::ConstructLine,
    },
    Transition {
        from: DubinsState::Straight,
        trigger: Trigger::Enter,
        to: DubinsState::EndOrbitClearing,
        action: DubinsAction::ConstructEndOrbit,
    },
    Transition {
        from: DubinsState::EndOrbitClearing,
        trigger: Trigger::Exit,
        to: DubinsState::EndOrbitTracking,
        action: DubinsAction::Hold,
    },
    Transition {
        from: DubinsState::EndOrbitTracking,
        trigger: Trigger::Enter,
        to: DubinsState::StartOrbitClearing,
        action: DubinsAction::AdvancePair,
    },
];

/// Dubins manager state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DubinsManager {
    pointer: WaypointPointer,
    radius: f64,
    state: DubinsState,
    path: DubinsPath,
    airspeed: f64,
    command: PathCommand,
    halfspace: HalfSpace,
}

/// Solve the pair previous -> current
fn solve_pair(
    waypoints: &WaypointList,
    pointer: &WaypointPointer,
    radius: f64,
) -> Result<DubinsPath, PathError> {
    let start = waypoints.get(pointer.previous())?;
    let end = waypoints.get(pointer.current())?;
    solver::solve(
        &OrientedPoint::new(start.position, start.course),
        &OrientedPoint::new(end.position, end.course),
        radius,
    )
}

fn construct_start_orbit(path: &DubinsPath, airspeed: f64) -> (PathCommand, HalfSpace) {
    let command = PathCommand::Orbit {
        center: path.start_center,
        radius: path.radius,
        direction: path.start_direction,
        airspeed,
    };
    (command, HalfSpace::new(path.z1, path.q1))
}

fn construct_line(path: &DubinsPath, airspeed: f64) -> (PathCommand, HalfSpace) {
    let command = PathCommand::Line {
        origin: path.z1,
        direction: path.q1,
        airspeed,
    };
    (command, HalfSpace::new(path.z2, path.q1))
}

fn construct_end_orbit(path: &DubinsPath, airspeed: f64) -> (PathCommand, HalfSpace) {
    let command = PathCommand::Orbit {
        center: path.end_center,
        radius: path.radius,
        direction: path.end_direction,
        airspeed,
    };
    (command, HalfSpace::new(path.z3, path.q3))
}

/// Phase in which to join a freshly built start circle
fn entry_state(halfspace: &HalfSpace, position: &Ned) -> DubinsState {
    if halfspace.contains(position) {
        DubinsState::StartOrbitClearing
    } else {
        DubinsState::StartOrbitTracking
    }
}

impl DubinsManager {
    /// Current discrete state
    pub fn dubins_state(&self) -> DubinsState {
        self.state
    }

    /// Path being flown for the active waypoint pair
    pub fn path(&self) -> &DubinsPath {
        &self.path
    }

    /// One cycle of transitions, applied to `self` as they fire
    fn cascade(
        &mut self,
        waypoints: &WaypointList,
        position: &Ned,
        events: &mut PathEvents,
    ) -> Result<(), PathError> {
        for _ in 0..DUBINS_TRANSITIONS.len() {
            let row = transition::find(&DUBINS_TRANSITIONS, self.state)
                .copied()
                .ok_or(PathError::InvalidManagerState(u8::from(self.state)))?;
            if !row.trigger.fires(&self.halfspace, position) {
                break;
            }

            let from = self.state;
            let mut to = row.to;
            match row.action {
                DubinsAction::Hold => {}
                DubinsAction::ConstructLine => {
                    (self.command, self.halfspace) = construct_line(&self.path, self.airspeed);
                }
                DubinsAction::ConstructEndOrbit => {
                    (self.command, self.halfspace) =
                        construct_end_orbit(&self.path, self.airspeed);
                }
                DubinsAction::AdvancePair => {
                    let mut pointer = self.pointer;
                    pointer.advance();
                    let path = solve_pair(waypoints, &pointer, self.radius)?;
                    let airspeed = waypoints.airspeed(pointer.current())?;
                    let (command, halfspace) = construct_start_orbit(&path, airspeed);

                    self.pointer = pointer;
                    self.path = path;
                    self.airspeed = airspeed;
                    self.command = command;
                    self.halfspace = halfspace;
                    to = entry_state(&halfspace, position);

                    log_debug!(
                        "Dubins: advanced to waypoint {} ({} path)",
                        pointer.current(),
                        path.case.name()
                    );
                    let (previous, current, next) = pointer.indices();
                    let _ = events.push(PathEvent::WaypointAdvanced {
                        previous,
                        current,
                        next,
                    });
                }
            }

            self.state = to;
            log_debug!("Dubins: {} -> {}", from.name(), to.name());
            let _ = events.push(PathEvent::StateChanged {
                from: ManagerState::Dubins(from),
                to: ManagerState::Dubins(to),
            });
            if row.action != DubinsAction::Hold {
                let _ = events.push(PathEvent::PathRebuilt {
                    command: self.command,
                });
            }
            if row.action == DubinsAction::AdvancePair {
                break;
            }
        }
        Ok(())
    }
}

impl SegmentManager for DubinsManager {
    fn start(
        waypoints: &WaypointList,
        position: &Ned,
        radius: f64,
        events: &mut PathEvents,
    ) -> Result<Self, PathError> {
        let pointer = WaypointPointer::start(waypoints.len())?;
        let path = solve_pair(waypoints, &pointer, radius)?;
        let airspeed = waypoints.airspeed(pointer.current())?;
        let (command, halfspace) = construct_start_orbit(&path, airspeed);
        let state = entry_state(&halfspace, position);

        log_debug!(
            "Dubins: {} path, length {}, entering {}",
            path.case.name(),
            path.length,
            state.name()
        );
        let _ = events.push(PathEvent::PathRebuilt { command });
        Ok(Self {
            pointer,
            radius,
            state,
            path,
            airspeed,
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
        let mut staged = *self;
        let mut staged_events = PathEvents::new();
        staged.cascade(waypoints, position, &mut staged_events)?;
        *self = staged;
        for event in staged_events {
            let _ = events.push(event);
        }
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
        ManagerState::Dubins(self.state)
    }
}
