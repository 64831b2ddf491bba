//! Dubins path solver
//!
//! Computes the shortest path between two oriented points for a vehicle
//! with a minimum turn radius, among the four circle-line-circle classes
//! (RSR, RSL, LSR, LSL). Geometry is planar in the north/east plane: circle
//! centers and the first tangent point keep the start point's down
//! coordinate, the second tangent point keeps the end point's.
//!
//! Opposite-handed classes need the circle centers at least `2R` apart; when
//! they are closer the class is marked infeasible with infinite length and
//! is never selected. If no class is feasible the solver fails with
//! [`PathError::NoFeasibleDubinsPath`].

mod cases;

use crate::error::PathError;
use crate::geometry::{course_vector, Ned};
use crate::path::OrbitDirection;

/// One of the four circle-line-circle path classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DubinsCase {
    /// Right turn, straight, right turn
    Rsr,
    /// Right turn, straight, left turn
    Rsl,
    /// Left turn, straight, right turn
    Lsr,
    /// Left turn, straight, left turn
    Lsl,
}

impl DubinsCase {
    /// All cases in evaluation order (ties resolve to the earlier case)
    pub const ALL: [DubinsCase; 4] = [
        DubinsCase::Rsr,
        DubinsCase::Rsl,
        DubinsCase::Lsr,
        DubinsCase::Lsl,
    ];

    /// Rotation sense of the start circle
    pub fn start_direction(&self) -> OrbitDirection {
        match self {
            DubinsCase::Rsr | DubinsCase::Rsl => OrbitDirection::Clockwise,
            DubinsCase::Lsr | DubinsCase::Lsl => OrbitDirection::CounterClockwise,
        }
    }

    /// Rotation sense of the end circle
    pub fn end_direction(&self) -> OrbitDirection {
        match self {
            DubinsCase::Rsr | DubinsCase::Lsr => OrbitDirection::Clockwise,
            DubinsCase::Rsl | DubinsCase::Lsl => OrbitDirection::CounterClockwise,
        }
    }

    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            DubinsCase::Rsr => "RSR",
            DubinsCase::Rsl => "RSL",
            DubinsCase::Lsr => "LSR",
            DubinsCase::Lsl => "LSL",
        }
    }
}

/// Position with a course angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedPoint {
    /// NED position in meters
    pub position: Ned,
    /// Course in radians
    pub course: f64,
}

impl OrientedPoint {
    /// Create an oriented point
    pub fn new(position: Ned, course: f64) -> Self {
        Self { position, course }
    }
}

/// Geometry of one circle-line-circle path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DubinsPath {
    /// Class this path belongs to
    pub case: DubinsCase,
    /// Total length in meters (infinite when infeasible)
    pub length: f64,
    /// Minimum turn radius used for both circles
    pub radius: f64,
    /// Start circle center
    pub start_center: Ned,
    /// Start circle rotation sense
    pub start_direction: OrbitDirection,
    /// End circle center
    pub end_center: Ned,
    /// End circle rotation sense
    pub end_direction: OrbitDirection,
    /// Tangent point leaving the start circle
    pub z1: Ned,
    /// Unit direction of the straight segment
    pub q1: Ned,
    /// Tangent point joining the end circle
    pub z2: Ned,
    /// End point
    pub z3: Ned,
    /// Unit direction at the end point
    pub q3: Ned,
}

/// A path class evaluated for one pair of oriented points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DubinsCandidate {
    /// False when the class cannot connect the points
    pub feasible: bool,
    /// Geometry of the class (only meaningful when `feasible`)
    pub path: DubinsPath,
}

/// Evaluate all four classes between `start` and `end`
///
/// Returns `InvalidRadius` unless `radius` is positive and finite.
pub fn candidates(
    start: &OrientedPoint,
    end: &OrientedPoint,
    radius: f64,
) -> Result<[DubinsCandidate; 4], PathError> {
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(PathError::InvalidRadius);
    }
    Ok(DubinsCase::ALL.map(|case| cases::evaluate(case, start, end, radius)))
}

/// Relative length difference below which two cases tie
const TIE_TOLERANCE: f64 = 1e-9;

/// Shortest feasible path between `start` and `end`
///
/// Lengths equal to within rounding tie; ties go to the earlier case in
/// [`DubinsCase::ALL`].
pub fn solve(
    start: &OrientedPoint,
    end: &OrientedPoint,
    radius: f64,
) -> Result<DubinsPath, PathError> {
    let mut best: Option<DubinsPath> = None;
    for candidate in candidates(start, end, radius)? {
        if !candidate.feasible {
            continue;
        }
        match best {
            Some(ref current)
                if candidate.path.length
                    >= current.length - TIE_TOLERANCE * current.length.max(1.0) => {}
            _ => best = Some(candidate.path),
        }
    }
    best.ok_or(PathError::NoFeasibleDubinsPath)
}

impl DubinsPath {
    pub(crate) fn end_tangent(end: &OrientedPoint) -> (Ned, Ned) {
        (end.position, course_vector(end.course))
    }
}
