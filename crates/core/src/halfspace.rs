//! Switching half-spaces
//!
//! A half-space is the side of a plane that a normal points into. Managers
//! use one as the trigger for leaving the current path primitive: the
//! vehicle "has crossed" once its position lies on the positive side.

use crate::geometry::Ned;

/// Plane through `point` with unit `normal`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfSpace {
    /// Any point on the plane
    pub point: Ned,
    /// Unit normal pointing into the half-space
    pub normal: Ned,
}

impl HalfSpace {
    /// Create a half-space from a point on its boundary and its normal
    pub const fn new(point: Ned, normal: Ned) -> Self {
        Self { point, normal }
    }

    /// True iff `position` lies on or beyond the plane: (x - p) · n >= 0
    pub fn contains(&self, position: &Ned) -> bool {
        (position - self.point).dot(&self.normal) >= 0.0
    }

    /// Signed distance of `position` from the plane along the normal
    ///
    /// Only meaningful as a distance when `normal` has unit length.
    pub fn signed_distance(&self, position: &Ned) -> f64 {
        (position - self.point).dot(&self.normal)
    }
}
