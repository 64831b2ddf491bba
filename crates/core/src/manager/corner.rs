//! Corner geometry at the current waypoint
//!
//! The line and fillet managers both look at the corner formed by the legs
//! previous -> current -> next.

use crate::error::PathError;
use crate::geometry::{unit_tangent, Ned};
use crate::waypoint::{WaypointList, WaypointPointer};

/// Cosine tolerance for classifying a corner as straight or reversing
const COLLINEAR_TOLERANCE: f64 = 1e-9;

/// Shape of the corner at the current waypoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerKind {
    /// Outgoing leg turns away from the incoming leg
    Turn,
    /// Outgoing leg continues straight on
    Straight,
    /// Outgoing leg doubles back along the incoming leg
    Reversal,
}

/// Legs meeting at the current waypoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Waypoint the incoming leg starts from
    pub previous: Ned,
    /// Corner vertex
    pub current: Ned,
    /// Unit direction of the incoming leg
    pub q_prev: Ned,
    /// Unit direction of the outgoing leg
    pub q_next: Ned,
    /// Commanded airspeed for the incoming leg
    pub airspeed: f64,
    pub kind: CornerKind,
}

/// Check every leg i -> (i + 1) mod N of a closed circuit
///
/// Returns `DegenerateSegment` for the first leg whose end points coincide.
pub fn check_legs(waypoints: &WaypointList) -> Result<(), PathError> {
    let count = waypoints.len();
    for from in 0..count {
        let to = (from + 1) % count;
        let a = waypoints.position(from)?;
        let b = waypoints.position(to)?;
        if unit_tangent(&a, &b).is_none() {
            return Err(PathError::DegenerateSegment { from, to });
        }
    }
    Ok(())
}

impl Corner {
    /// Corner at `pointer.current()`
    ///
    /// Returns `DegenerateSegment` if either leg has zero length.
    pub fn at(waypoints: &WaypointList, pointer: &WaypointPointer) -> Result<Self, PathError> {
        let (p, c, n) = pointer.indices();
        let previous = waypoints.position(p)?;
        let current = waypoints.position(c)?;
        let next = waypoints.position(n)?;

        let q_prev =
            unit_tangent(&previous, &current).ok_or(PathError::DegenerateSegment { from: p, to: c })?;
        let q_next =
            unit_tangent(&current, &next).ok_or(PathError::DegenerateSegment { from: c, to: n })?;

        let cos_turn = q_prev.dot(&q_next);
        let kind = if cos_turn > 1.0 - COLLINEAR_TOLERANCE {
            CornerKind::Straight
        } else if cos_turn < -1.0 + COLLINEAR_TOLERANCE {
            CornerKind::Reversal
        } else {
            CornerKind::Turn
        };

        Ok(Self {
            previous,
            current,
            q_prev,
            q_next,
            airspeed: waypoints.airspeed(c)?,
            kind,
        })
    }

    /// Angle between the reversed incoming leg and the outgoing leg
    ///
    /// π for a straight corner, approaching 0 for a hairpin.
    pub fn opening_angle(&self) -> f64 {
        libm::acos((-self.q_prev.dot(&self.q_next)).clamp(-1.0, 1.0))
    }
}
