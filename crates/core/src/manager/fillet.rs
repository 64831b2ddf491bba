//! Fillet manager
//!
//! Joins consecutive straight legs with an arc of the minimum turn radius.
//! Each corner is flown as two states:
//!
//! - `Straight`: line along the incoming leg until the plane one fillet
//!   tangent length before the corner vertex
//! - `Arc`: orbit tangent to both legs until the plane through the far
//!   tangent point, then advance to the next leg
//!
//! A corner that continues straight on or doubles back cannot be filleted;
//! the straight state then switches at the vertex and moves directly to the
//! next leg.

use super::corner::{Corner, CornerKind};
use super::event::{ManagerState, PathEvent, PathEvents};
use super::transition::{self, Transition, Trigger};
use super::SegmentManager;
use crate::error::PathError;
use crate::geometry::{normalized, Ned};
use crate::halfspace::HalfSpace;
use crate::log_debug;
use crate::path::{OrbitDirection, PathCommand};
use crate::waypoint::{WaypointList, WaypointPointer};

/// Fillet manager discrete state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilletState {
    /// Flying the straight part of the incoming leg
    Straight = 1,
    /// Flying the corner arc
    Arc = 2,
}

impl FilletState {
    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            FilletState::Straight => "Straight",
            FilletState::Arc => "Arc",
        }
    }
}

impl From<FilletState> for u8 {
    fn from(state: FilletState) -> u8 {
        state as u8
    }
}

impl TryFrom<u8> for FilletState {
    type Error = PathError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FilletState::Straight),
            2 => Ok(FilletState::Arc),
            other => Err(PathError::InvalidManagerState(other)),
        }
    }
}

/// Geometry built when a transition fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilletAction {
    /// Orbit around the corner
    ConstructArc,
    /// Slide the waypoint window and fly the next leg
    AdvanceLeg,
}

/// Fillet state machine
pub const FILLET_TRANSITIONS: [Transition<FilletState, FilletAction>; 2] = [
    Transition {
        from: FilletState::Straight,
        trigger: Trigger::Enter,
        to: FilletState::Arc,
        action: FilletAction::ConstructArc,
    },
    Transition {
        from: FilletState::Arc,
        trigger: Trigger::Enter,
        to: FilletState::Straight,
        action: FilletAction::AdvanceLeg,
    },
];

/// Replaces the `Straight` row at corners without an arc
const SKIP_ARC: Transition<FilletState, FilletAction> = Transition {
    from: FilletState::Straight,
    trigger: Trigger::Enter,
    to: FilletState::Straight,
    action: FilletAction::AdvanceLeg,
};

/// Fillet manager state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilletManager {
    pointer: WaypointPointer,
    radius: f64,
    state: FilletState,
    corner: CornerKind,
    command: PathCommand,
    halfspace: HalfSpace,
}

/// Distance from the corner vertex to each tangent point
fn tangent_distance(corner: &Corner, radius: f64) -> f64 {
    radius / libm::tan(corner.opening_angle() / 2.0)
}

/// Line along the incoming leg, switching before the arc begins
fn construct_fillet_line(corner: &Corner, radius: f64) -> (PathCommand, HalfSpace) {
    let command = PathCommand::Line {
        origin: corner.previous,
        direction: corner.q_prev,
        airspeed: corner.airspeed,
    };
    let point = match corner.kind {
        CornerKind::Turn => corner.current - tangent_distance(corner, radius) * corner.q_prev,
        CornerKind::Straight | CornerKind::Reversal => corner.current,
    };
    (command, HalfSpace::new(point, corner.q_prev))
}

/// Arc tangent to both legs, switching where it meets the outgoing leg
///
/// Only valid for a `Turn` corner.
fn construct_fillet_circle(corner: &Corner, radius: f64) -> (PathCommand, HalfSpace) {
    let half_angle = corner.opening_angle() / 2.0;
    let bisector = normalized(&(corner.q_prev - corner.q_next)).unwrap_or(corner.q_prev);
    let center = corner.current - (radius / libm::sin(half_angle)) * bisector;
    let turn = corner.q_prev.x * corner.q_next.y - corner.q_prev.y * corner.q_next.x;
    let command = PathCommand::Orbit {
        center,
        radius,
        direction: OrbitDirection::from_turn(turn),
        airspeed: corner.airspeed,
    };
    let point = corner.current + tangent_distance(corner, radius) * corner.q_next;
    (command, HalfSpace::new(point, corner.q_next))
}

impl FilletManager {
    /// Current discrete state
    pub fn fillet_state(&self) -> FilletState {
        self.state
    }

    fn next_transition(&self) -> Result<Transition<FilletState, FilletAction>, PathError> {
        if self.state == FilletState::Straight && self.corner != CornerKind::Turn {
            return Ok(SKIP_ARC);
        }
        transition::find(&FILLET_TRANSITIONS, self.state)
            .copied()
            .ok_or(PathError::InvalidManagerState(u8::from(self.state)))
    }

    /// One cycle of transitions, applied to `self` as they fire
    fn cascade(
        &mut self,
        waypoints: &WaypointList,
        position: &Ned,
        events: &mut PathEvents,
    ) -> Result<(), PathError> {
        for _ in 0..FILLET_TRANSITIONS.len() {
            let row = self.next_transition()?;
            if !row.trigger.fires(&self.halfspace, position) {
                break;
            }

            let mut pointer = self.pointer;
            if row.action == FilletAction::AdvanceLeg {
                pointer.advance();
            }
            let corner = Corner::at(waypoints, &pointer)?;
            let (command, halfspace) = match row.action {
                FilletAction::ConstructArc => construct_fillet_circle(&corner, self.radius),
                FilletAction::AdvanceLeg => construct_fillet_line(&corner, self.radius),
            };

            let from = self.state;
            self.pointer = pointer;
            self.corner = corner.kind;
            self.state = row.to;
            self.command = command;
            self.halfspace = halfspace;

            if from != row.to {
                log_debug!("Fillet: {} -> {}", from.name(), row.to.name());
                let _ = events.push(PathEvent::StateChanged {
                    from: ManagerState::Fillet(from),
                    to: ManagerState::Fillet(row.to),
                });
            }
            if row.action == FilletAction::AdvanceLeg {
                log_debug!("Fillet: advanced to waypoint {}", pointer.current());
                let (previous, current, next) = pointer.indices();
                let _ = events.push(PathEvent::WaypointAdvanced {
                    previous,
                    current,
                    next,
                });
                let _ = events.push(PathEvent::PathRebuilt { command });
                break;
            }
            let _ = events.push(PathEvent::PathRebuilt { command });
        }
        Ok(())
    }
}

impl SegmentManager for FilletManager {
    fn start(
        waypoints: &WaypointList,
        _position: &Ned,
        radius: f64,
        events: &mut PathEvents,
    ) -> Result<Self, PathError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(PathError::InvalidRadius);
        }
        let pointer = WaypointPointer::start(waypoints.len())?;
        let corner = Corner::at(waypoints, &pointer)?;
        let (command, halfspace) = construct_fillet_line(&corner, radius);
        let _ = events.push(PathEvent::PathRebuilt { command });
        Ok(Self {
            pointer,
            radius,
            state: FilletState::Straight,
            corner: corner.kind,
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
        ManagerState::Fillet(self.state)
    }
}
