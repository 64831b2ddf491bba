//! Path manager error types
//!
//! Every fallible operation in this crate reports a [`PathError`]. Geometric
//! fallbacks with a well-defined answer (infeasible Dubins cases, straight or
//! reversing corners) are resolved where they occur and never reach here.

/// Errors from waypoint storage, path construction and manager dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// Waypoint list has fewer than the two entries a path needs
    InsufficientWaypoints {
        /// Number of waypoints in the list
        count: usize,
    },
    /// Waypoint list is at capacity
    WaypointListFull,
    /// Waypoint index is outside the list
    WaypointIndexOutOfRange {
        /// Offending index
        index: usize,
        /// Number of waypoints in the list
        count: usize,
    },
    /// Two consecutive waypoints coincide, so the leg has no direction
    DegenerateSegment {
        /// Index of the waypoint the leg starts from
        from: usize,
        /// Index of the waypoint the leg ends at
        to: usize,
    },
    /// None of the four Dubins cases is geometrically feasible
    NoFeasibleDubinsPath,
    /// Minimum turn radius is not a positive finite number
    InvalidRadius,
    /// Numeric manager state outside the manager's enumeration
    InvalidManagerState(u8),
    /// No waypoint list has been consumed yet
    NoActivePath,
}

impl core::fmt::Display for PathError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PathError::InsufficientWaypoints { count } => {
                write!(f, "need at least 2 waypoints, got {}", count)
            }
            PathError::WaypointListFull => write!(f, "waypoint list full"),
            PathError::WaypointIndexOutOfRange { index, count } => {
                write!(f, "waypoint index {} out of range (count {})", index, count)
            }
            PathError::DegenerateSegment { from, to } => {
                write!(f, "waypoints {} and {} coincide", from, to)
            }
            PathError::NoFeasibleDubinsPath => write!(f, "no feasible Dubins path"),
            PathError::InvalidRadius => write!(f, "minimum turn radius must be positive"),
            PathError::InvalidManagerState(state) => {
                write!(f, "invalid manager state {}", state)
            }
            PathError::NoActivePath => write!(f, "no active path"),
        }
    }
}

impl PathError {
    /// Short static name for log output
    pub fn name(&self) -> &'static str {
        match self {
            PathError::InsufficientWaypoints { .. } => "InsufficientWaypoints",
            PathError::WaypointListFull => "WaypointListFull",
            PathError::WaypointIndexOutOfRange { .. } => "WaypointIndexOutOfRange",
            PathError::DegenerateSegment { .. } => "DegenerateSegment",
            PathError::NoFeasibleDubinsPath => "NoFeasibleDubinsPath",
            PathError::InvalidRadius => "InvalidRadius",
            PathError::InvalidManagerState(_) => "InvalidManagerState",
            PathError::NoActivePath => "NoActivePath",
        }
    }
}
