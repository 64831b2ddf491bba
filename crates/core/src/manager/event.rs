//! Path manager events
//!
//! Every update cycle returns the list of things that happened during the
//! cycle. An empty list means the cycle changed nothing.

use heapless::Vec;

use super::dubins::DubinsState;
use super::fillet::FilletState;
use crate::path::PathCommand;
use crate::waypoint::PathType;

/// Maximum path events emitted per update cycle
pub const MAX_PATH_EVENTS: usize = 16;

/// Event list returned by one update cycle
pub type PathEvents = Vec<PathEvent, MAX_PATH_EVENTS>;

/// Discrete state of the active manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerState {
    /// Line manager (single state)
    Line,
    /// Fillet manager state
    Fillet(FilletState),
    /// Dubins manager state
    Dubins(DubinsState),
}

impl ManagerState {
    /// Numeric encoding used in diagnostics (0 for the line manager)
    pub fn code(&self) -> u8 {
        match self {
            ManagerState::Line => 0,
            ManagerState::Fillet(state) => u8::from(*state),
            ManagerState::Dubins(state) => u8::from(*state),
        }
    }

    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            ManagerState::Line => "Line",
            ManagerState::Fillet(state) => state.name(),
            ManagerState::Dubins(state) => state.name(),
        }
    }
}

/// Something that happened during an update cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEvent {
    /// A replaced waypoint list was consumed
    WaypointsReloaded { count: usize, path_type: PathType },
    /// A new path primitive was constructed
    PathRebuilt { command: PathCommand },
    /// The manager moved between discrete states
    StateChanged {
        from: ManagerState,
        to: ManagerState,
    },
    /// The waypoint window slid forward
    WaypointAdvanced {
        previous: usize,
        current: usize,
        next: usize,
    },
}
