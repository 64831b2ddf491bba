//! Path manager
//!
//! Turns a waypoint list and the vehicle's position into the path command
//! to fly this cycle. The [`PathManager`] dispatcher owns the manager for
//! the list's declared topology and its state between cycles:
//!
//! - [`line::LineManager`]: straight legs switched at bisector planes
//! - [`fillet::FilletManager`]: straight legs joined by minimum-radius arcs
//! - [`dubins::DubinsManager`]: Dubins paths between oriented waypoints
//!
//! A replaced waypoint list is always consumed before any half-space test:
//! on the cycle the changed flag is seen, the manager is rebuilt from the
//! start of the list and no crossing is evaluated. A vehicle already past
//! the first switching plane therefore switches one cycle later.
//!
//! Line and fillet lists are checked leg by leg when they are loaded, so a
//! list with coincident consecutive waypoints is rejected up front instead
//! of failing when the vehicle reaches the bad leg.

pub mod corner;
pub mod dubins;
pub mod event;
pub mod fillet;
pub mod line;
pub mod transition;

use crate::dubins::DubinsPath;
use crate::error::PathError;
use crate::geometry::Ned;
use crate::halfspace::HalfSpace;
use crate::parameters::{ParameterStore, PathParams};
use crate::path::PathCommand;
use crate::waypoint::{PathType, WaypointList, WaypointPointer};
use crate::{log_info, log_warn};

pub use dubins::{DubinsManager, DubinsState};
pub use event::{ManagerState, PathEvent, PathEvents, MAX_PATH_EVENTS};
pub use fillet::{FilletManager, FilletState};
pub use line::LineManager;

/// Topology-specific path manager
///
/// Implementations keep their previous output until a half-space crossing
/// fires a transition; a cycle without a crossing changes nothing.
pub trait SegmentManager {
    /// Build the manager at the start of `waypoints`
    fn start(
        waypoints: &WaypointList,
        position: &Ned,
        radius: f64,
        events: &mut PathEvents,
    ) -> Result<Self, PathError>
    where
        Self: Sized;

    /// Run the switching logic for one cycle
    ///
    /// On error the manager is left as it was before the call.
    fn update(
        &mut self,
        waypoints: &WaypointList,
        position: &Ned,
        events: &mut PathEvents,
    ) -> Result<(), PathError>;

    /// Path command currently being flown
    fn command(&self) -> &PathCommand;

    /// Half-space whose crossing fires the next transition
    fn halfspace(&self) -> &HalfSpace;

    /// Active waypoint window
    fn pointer(&self) -> &WaypointPointer;

    /// Discrete state
    fn state(&self) -> ManagerState;
}

/// Vehicle position from the state estimator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VehiclePosition {
    /// North position in meters
    pub north: f64,
    /// East position in meters
    pub east: f64,
    /// Altitude in meters (positive up)
    pub altitude: f64,
}

impl VehiclePosition {
    /// Create a position from north, east and altitude
    pub fn new(north: f64, east: f64, altitude: f64) -> Self {
        Self {
            north,
            east,
            altitude,
        }
    }

    /// Position in the NED frame (down = -altitude)
    pub fn to_ned(&self) -> Ned {
        Ned::new(self.north, self.east, -self.altitude)
    }
}

/// Result of one update cycle
#[derive(Debug, Clone, PartialEq)]
pub struct PathUpdate {
    /// Path command to fly
    pub command: PathCommand,
    /// What happened during the cycle
    pub events: PathEvents,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ActiveManager {
    Line(LineManager),
    Fillet(FilletManager),
    Dubins(DubinsManager),
}

impl ActiveManager {
    fn start(
        waypoints: &WaypointList,
        position: &Ned,
        radius: f64,
        events: &mut PathEvents,
    ) -> Result<Self, PathError> {
        Ok(match waypoints.path_type() {
            PathType::StraightLine => {
                corner::check_legs(waypoints)?;
                ActiveManager::Line(LineManager::start(waypoints, position, radius, events)?)
            }
            PathType::Fillet => {
                corner::check_legs(waypoints)?;
                ActiveManager::Fillet(FilletManager::start(waypoints, position, radius, events)?)
            }
            PathType::Dubins => {
                ActiveManager::Dubins(DubinsManager::start(waypoints, position, radius, events)?)
            }
        })
    }

    fn get(&self) -> &dyn SegmentManager {
        match self {
            ActiveManager::Line(manager) => manager,
            ActiveManager::Fillet(manager) => manager,
            ActiveManager::Dubins(manager) => manager,
        }
    }

    fn get_mut(&mut self) -> &mut dyn SegmentManager {
        match self {
            ActiveManager::Line(manager) => manager,
            ActiveManager::Fillet(manager) => manager,
            ActiveManager::Dubins(manager) => manager,
        }
    }
}

/// Path manager dispatcher
///
/// Selects the manager from the waypoint list's topology and keeps it
/// across cycles. Exclusively owned by the guidance loop.
#[derive(Debug, Clone)]
pub struct PathManager {
    radius: f64,
    active: Option<ActiveManager>,
    requests_waypoints: bool,
}

impl PathManager {
    /// Create a manager with the given minimum turn radius in meters
    pub fn new(radius: f64) -> Result<Self, PathError> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(PathError::InvalidRadius);
        }
        Ok(Self {
            radius,
            active: None,
            requests_waypoints: true,
        })
    }

    /// Create a manager from path parameters
    pub fn from_params(params: &PathParams) -> Result<Self, PathError> {
        Self::new(f64::from(params.min_turn_radius))
    }

    /// Create a manager from the parameter store
    pub fn from_store(store: &ParameterStore) -> Result<Self, PathError> {
        Self::from_params(&PathParams::from_store(store))
    }

    /// Run one guidance cycle
    ///
    /// Consumes the list's changed flag if set and rebuilds the manager from
    /// the start of the list; otherwise runs the active manager's switching
    /// logic for `position`.
    ///
    /// # Errors
    ///
    /// - `InsufficientWaypoints` if a replaced list has fewer than 2 entries
    /// - `NoActivePath` if no valid list has been consumed yet
    /// - `DegenerateSegment` if a replaced line or fillet list has coincident
    ///   consecutive waypoints anywhere in the circuit
    /// - Construction errors (`DegenerateSegment`, `NoFeasibleDubinsPath`,
    ///   `WaypointIndexOutOfRange`) from the active manager
    pub fn update(
        &mut self,
        waypoints: &mut WaypointList,
        position: &VehiclePosition,
    ) -> Result<PathUpdate, PathError> {
        let ned = position.to_ned();
        let mut events = PathEvents::new();

        if waypoints.take_changed() {
            self.reload(waypoints, &ned, &mut events)?;
        } else {
            let active = self.active.as_mut().ok_or(PathError::NoActivePath)?;
            if let Err(err) = active.get_mut().update(waypoints, &ned, &mut events) {
                log_warn!("Path manager update failed: {}", err.name());
                return Err(err);
            }
        }

        let command = *self.command().ok_or(PathError::NoActivePath)?;
        Ok(PathUpdate { command, events })
    }

    fn reload(
        &mut self,
        waypoints: &WaypointList,
        position: &Ned,
        events: &mut PathEvents,
    ) -> Result<(), PathError> {
        self.active = None;
        self.requests_waypoints = true;

        let count = waypoints.len();
        let path_type = waypoints.path_type();
        if count < 2 {
            log_warn!("Rejected waypoint list with {} waypoints", count);
            return Err(PathError::InsufficientWaypoints { count });
        }

        let _ = events.push(PathEvent::WaypointsReloaded { count, path_type });
        match ActiveManager::start(waypoints, position, self.radius, events) {
            Ok(manager) => {
                log_info!(
                    "Loaded {} waypoints ({} path, radius {})",
                    count,
                    path_type.name(),
                    self.radius
                );
                self.active = Some(manager);
                self.requests_waypoints = false;
                Ok(())
            }
            Err(err) => {
                log_warn!("Failed to build {} path: {}", path_type.name(), err.name());
                Err(err)
            }
        }
    }

    /// Minimum turn radius in meters
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// True until a usable waypoint list has been consumed
    pub fn requests_waypoints(&self) -> bool {
        self.requests_waypoints
    }

    /// True once a waypoint list has been consumed successfully
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Path command being flown
    pub fn command(&self) -> Option<&PathCommand> {
        self.active.as_ref().map(|m| m.get().command())
    }

    /// Half-space that fires the next transition
    pub fn halfspace(&self) -> Option<&HalfSpace> {
        self.active.as_ref().map(|m| m.get().halfspace())
    }

    /// Active waypoint window
    pub fn pointer(&self) -> Option<&WaypointPointer> {
        self.active.as_ref().map(|m| m.get().pointer())
    }

    /// Discrete state of the active manager
    pub fn state(&self) -> Option<ManagerState> {
        self.active.as_ref().map(|m| m.get().state())
    }

    /// Dubins path being flown, when the active manager is a Dubins manager
    pub fn dubins_path(&self) -> Option<&DubinsPath> {
        match &self.active {
            Some(ActiveManager::Dubins(manager)) => Some(manager.path()),
            _ => None,
        }
    }
}
