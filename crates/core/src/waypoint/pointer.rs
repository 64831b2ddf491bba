//! Waypoint pointer
//!
//! Sliding (previous, current, next) window over a waypoint list. Indices
//! are taken modulo the list length, so the window wraps to the start after
//! the final waypoint and never points outside the list. For a two-waypoint
//! list the window degrades to (0, 1, 0) and alternates with (1, 0, 1).

use crate::error::PathError;

/// Three-wide window of waypoint indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaypointPointer {
    previous: usize,
    current: usize,
    next: usize,
    count: usize,
}

impl WaypointPointer {
    /// Initial window (0, 1, 2) for a list of `count` waypoints
    ///
    /// Returns `InsufficientWaypoints` when `count < 2`.
    pub fn start(count: usize) -> Result<Self, PathError> {
        if count < 2 {
            return Err(PathError::InsufficientWaypoints { count });
        }
        Ok(Self {
            previous: 0,
            current: 1,
            next: 2 % count,
            count,
        })
    }

    /// Slide the window forward by one waypoint, wrapping at the end
    pub fn advance(&mut self) {
        self.previous = self.current;
        self.current = self.next;
        self.next = (self.next + 1) % self.count;
    }

    /// Index of the waypoint the active leg starts from
    pub fn previous(&self) -> usize {
        self.previous
    }

    /// Index of the waypoint the active leg ends at
    pub fn current(&self) -> usize {
        self.current
    }

    /// Index of the waypoint after `current`
    pub fn next(&self) -> usize {
        self.next
    }

    /// Length of the list the window was built for
    pub fn count(&self) -> usize {
        self.count
    }

    /// (previous, current, next)
    pub fn indices(&self) -> (usize, usize, usize) {
        (self.previous, self.current, self.next)
    }
}
