//! Geometry primitives
//!
//! Vector and angle helpers shared by the path managers and the Dubins
//! solver. Positions are NED (north, east, down) in meters, courses are
//! radians measured from north toward east. Rotations act on the horizontal
//! (north, east) components only; the down component is carried through.

use core::f64::consts::TAU;
use nalgebra::Vector3;

/// NED position or direction
pub type Ned = Vector3<f64>;

/// Length below which a vector is treated as zero
pub const DEGENERATE_LENGTH: f64 = 1e-9;

/// Wrap an angle into [0, 2π)
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = libm::fmod(angle, TAU);
    if wrapped < 0.0 {
        let shifted = wrapped + TAU;
        // A tiny negative remainder rounds up to exactly TAU
        if shifted >= TAU {
            0.0
        } else {
            shifted
        }
    } else {
        wrapped
    }
}

/// Rotate the horizontal components of `v` by `angle` about the down axis
pub fn rotate_z(angle: f64, v: &Ned) -> Ned {
    let (s, c) = (libm::sin(angle), libm::cos(angle));
    Ned::new(c * v.x - s * v.y, s * v.x + c * v.y, v.z)
}

/// Horizontal unit vector pointing along `course`
pub fn course_vector(course: f64) -> Ned {
    Ned::new(libm::cos(course), libm::sin(course), 0.0)
}

/// Unit vector from `from` toward `to`, or `None` if the points coincide
pub fn unit_tangent(from: &Ned, to: &Ned) -> Option<Ned> {
    normalized(&(to - from))
}

/// `v` scaled to unit length, or `None` if it is (numerically) zero
pub fn normalized(v: &Ned) -> Option<Ned> {
    let length = v.norm();
    if length < DEGENERATE_LENGTH || !length.is_finite() {
        None
    } else {
        Some(v / length)
    }
}

/// `v` with its down component zeroed
pub fn horizontal(v: &Ned) -> Ned {
    Ned::new(v.x, v.y, 0.0)
}

/// Horizontal (north, east) distance between two points
pub fn horizontal_distance(a: &Ned, b: &Ned) -> f64 {
    libm::hypot(b.x - a.x, b.y - a.y)
}

/// Horizontal bearing from `a` to `b` in radians
pub fn bearing(a: &Ned, b: &Ned) -> f64 {
    libm::atan2(b.y - a.y, b.x - a.x)
}
