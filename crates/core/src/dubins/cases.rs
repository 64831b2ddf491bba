//! Geometry of the four Dubins path classes
//!
//! Each class places a circle of radius `R` tangent to the start course and
//! one tangent to the end course, then joins them with a common tangent
//! line. Arc lengths are measured as wrapped angular sweeps.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use super::{DubinsCandidate, DubinsCase, DubinsPath, OrientedPoint};
use crate::geometry::{
    bearing, course_vector, horizontal, horizontal_distance, rotate_z, wrap_angle, Ned,
    DEGENERATE_LENGTH,
};
use crate::path::OrbitDirection;

/// Center of the clockwise circle tangent to `point`
fn right_center(point: &OrientedPoint, radius: f64) -> Ned {
    point.position + radius * course_vector(point.course + FRAC_PI_2)
}

/// Center of the counter-clockwise circle tangent to `point`
fn left_center(point: &OrientedPoint, radius: f64) -> Ned {
    point.position + radius * course_vector(point.course - FRAC_PI_2)
}

/// Sweeps this close to a full turn are rounding noise around zero
const FULL_TURN_TOLERANCE: f64 = 1e-9;

/// Arc length of the sweep from angle `from` to angle `to`, in [0, 2πR)
fn sweep(radius: f64, to: f64, from: f64) -> f64 {
    let angle = wrap_angle(wrap_angle(to) - wrap_angle(from));
    if TAU - angle < FULL_TURN_TOLERANCE {
        0.0
    } else {
        radius * angle
    }
}

fn circle_center(point: &OrientedPoint, direction: OrbitDirection, radius: f64) -> Ned {
    match direction {
        OrbitDirection::Clockwise => right_center(point, radius),
        OrbitDirection::CounterClockwise => left_center(point, radius),
    }
}

struct Tangent {
    length: f64,
    feasible: bool,
    z1: Ned,
    q1: Ned,
    z2: Ned,
}

pub(super) fn evaluate(
    case: DubinsCase,
    start: &OrientedPoint,
    end: &OrientedPoint,
    radius: f64,
) -> DubinsCandidate {
    let start_center = circle_center(start, case.start_direction(), radius);
    let end_center = circle_center(end, case.end_direction(), radius);

    let tangent = match case {
        DubinsCase::Rsr => rsr(start, end, radius, &start_center, &end_center),
        DubinsCase::Rsl => rsl(start, end, radius, &start_center, &end_center),
        DubinsCase::Lsr => lsr(start, end, radius, &start_center, &end_center),
        DubinsCase::Lsl => lsl(start, end, radius, &start_center, &end_center),
    };
    let feasible = tangent.feasible && tangent.length.is_finite();
    let (z3, q3) = DubinsPath::end_tangent(end);

    DubinsCandidate {
        feasible,
        path: DubinsPath {
            case,
            length: if feasible { tangent.length } else { f64::INFINITY },
            radius,
            start_center,
            start_direction: case.start_direction(),
            end_center,
            end_direction: case.end_direction(),
            z1: tangent.z1,
            q1: tangent.q1,
            z2: tangent.z2,
            z3,
            q3,
        },
    }
}

/// Outer tangent direction between two same-handed circles
///
/// Falls back to the start course when the centers coincide; the case is
/// then reported infeasible.
fn outer_tangent(start: &OrientedPoint, start_center: &Ned, end_center: &Ned) -> (Ned, bool) {
    let ell = horizontal_distance(start_center, end_center);
    if ell < DEGENERATE_LENGTH {
        (course_vector(start.course), false)
    } else {
        (horizontal(&(end_center - start_center)) / ell, true)
    }
}

/// Inner tangent length between opposite-handed circles
///
/// Returns `(straight length, ratio 2R/ell clamped to 1, feasible)`.
fn inner_tangent(radius: f64, ell: f64) -> (f64, f64, bool) {
    let feasible = ell >= 2.0 * radius - DEGENERATE_LENGTH && ell > DEGENERATE_LENGTH;
    let ratio = if ell > DEGENERATE_LENGTH {
        (2.0 * radius / ell).min(1.0)
    } else {
        1.0
    };
    let straight = libm::sqrt((ell * ell - 4.0 * radius * radius).max(0.0));
    (straight, ratio, feasible)
}

fn rsr(
    start: &OrientedPoint,
    end: &OrientedPoint,
    radius: f64,
    cs: &Ned,
    ce: &Ned,
) -> Tangent {
    let ell = horizontal_distance(cs, ce);
    let theta = bearing(cs, ce);
    let (q1, feasible) = outer_tangent(start, cs, ce);
    let length = ell
        + sweep(radius, theta - FRAC_PI_2, start.course - FRAC_PI_2)
        + sweep(radius, end.course - FRAC_PI_2, theta - FRAC_PI_2);
    let normal = rotate_z(-FRAC_PI_2, &q1);
    Tangent {
        length,
        feasible,
        z1: cs + radius * normal,
        q1,
        z2: ce + radius * normal,
    }
}

fn rsl(
    start: &OrientedPoint,
    end: &OrientedPoint,
    radius: f64,
    cs: &Ned,
    ce: &Ned,
) -> Tangent {
    let ell = horizontal_distance(cs, ce);
    let theta = bearing(cs, ce);
    let (straight, ratio, feasible) = inner_tangent(radius, ell);
    let theta2 = theta - FRAC_PI_2 + libm::asin(ratio);
    let length = straight
        + sweep(radius, theta2, start.course - FRAC_PI_2)
        + sweep(radius, theta2 + PI, end.course + FRAC_PI_2);
    Tangent {
        length,
        feasible,
        z1: cs + radius * course_vector(theta2),
        q1: course_vector(theta2 + FRAC_PI_2),
        z2: ce + radius * course_vector(theta2 + PI),
    }
}

fn lsr(
    start: &OrientedPoint,
    end: &OrientedPoint,
    radius: f64,
    cs: &Ned,
    ce: &Ned,
) -> Tangent {
    let ell = horizontal_distance(cs, ce);
    let theta = bearing(cs, ce);
    let (straight, ratio, feasible) = inner_tangent(radius, ell);
    let theta2 = libm::acos(ratio);
    let length = straight
        + sweep(radius, start.course + FRAC_PI_2, theta + theta2)
        + sweep(radius, end.course - FRAC_PI_2, theta + theta2 - PI);
    Tangent {
        length,
        feasible,
        z1: cs + radius * course_vector(theta + theta2),
        q1: course_vector(theta + theta2 - FRAC_PI_2),
        z2: ce + radius * course_vector(theta + theta2 - PI),
    }
}

fn lsl(
    start: &OrientedPoint,
    end: &OrientedPoint,
    radius: f64,
    cs: &Ned,
    ce: &Ned,
) -> Tangent {
    let ell = horizontal_distance(cs, ce);
    let theta = bearing(cs, ce);
    let (q1, feasible) = outer_tangent(start, cs, ce);
    let length = ell
        + sweep(radius, start.course + FRAC_PI_2, theta + FRAC_PI_2)
        + sweep(radius, theta + FRAC_PI_2, end.course + FRAC_PI_2);
    let normal = rotate_z(FRAC_PI_2, &q1);
    Tangent {
        length,
        feasible,
        z1: cs + radius * normal,
        q1,
        z2: ce + radius * normal,
    }
}
