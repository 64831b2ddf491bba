//! Waypoint Storage
//!
//! Pure data structures for the waypoint list a path manager consumes.
//!
//! # Waypoint List
//!
//! - Fixed-size waypoint array (max 64 waypoints)
//! - NED positions in meters with per-waypoint airspeed and course
//! - Optional planner metadata (cost, parent, goal connectivity)
//! - Declared path topology (straight line, fillet, Dubins)
//! - "Changed" flag set by every mutation and consumed exactly once
//!
//! # Note
//!
//! Producers replace the list through the mutating methods below; each of
//! them marks the list changed, so a consumer never misses a replacement.

pub mod pointer;

use heapless::Vec;

use crate::error::PathError;
use crate::geometry::Ned;

pub use pointer::WaypointPointer;

/// Maximum number of waypoints in a list
pub const MAX_WAYPOINTS: usize = 64;

/// Path topology used to connect consecutive waypoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathType {
    /// Straight segments switched at bisector planes
    #[default]
    StraightLine,
    /// Straight segments joined by minimum-radius arcs
    Fillet,
    /// Shortest curvature-bounded paths between oriented waypoints
    Dubins,
}

impl PathType {
    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            PathType::StraightLine => "line",
            PathType::Fillet => "fillet",
            PathType::Dubins => "dubins",
        }
    }
}

/// Metadata attached by a sampling planner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerMetadata {
    /// Path cost from the tree root to this waypoint
    pub cost: f64,
    /// Index of the parent waypoint in the planner tree (None for the root)
    pub parent: Option<usize>,
    /// Waypoint connects directly to the goal
    pub connects_to_goal: bool,
}

/// Single waypoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// NED position in meters
    pub position: Ned,
    /// Commanded airspeed in m/s for the leg ending at this waypoint
    pub airspeed: f64,
    /// Commanded course in radians (used by Dubins paths)
    pub course: f64,
    /// Planner metadata, if the list came from a planner
    pub planner: Option<PlannerMetadata>,
}

impl Waypoint {
    /// Create a waypoint without planner metadata
    ///
    /// # Arguments
    ///
    /// * `position` - NED position in meters
    /// * `airspeed` - Commanded airspeed in m/s
    /// * `course` - Commanded course in radians
    pub fn new(position: Ned, airspeed: f64, course: f64) -> Self {
        Self {
            position,
            airspeed,
            course,
            planner: None,
        }
    }

    /// Attach planner metadata
    pub fn with_planner(mut self, metadata: PlannerMetadata) -> Self {
        self.planner = Some(metadata);
        self
    }
}

/// Ordered waypoint list with a changed flag
#[derive(Debug, Clone)]
pub struct WaypointList {
    waypoints: Vec<Waypoint, MAX_WAYPOINTS>,
    path_type: PathType,
    changed: bool,
}

impl Default for WaypointList {
    fn default() -> Self {
        Self::new(PathType::default())
    }
}

impl WaypointList {
    /// Create an empty list with the given topology
    pub const fn new(path_type: PathType) -> Self {
        Self {
            waypoints: Vec::new(),
            path_type,
            changed: false,
        }
    }

    /// Build a list from a slice of waypoints, marked changed
    pub fn from_slice(path_type: PathType, waypoints: &[Waypoint]) -> Result<Self, PathError> {
        let mut list = Self::new(path_type);
        list.replace(waypoints)?;
        Ok(list)
    }

    /// Append a waypoint and mark the list changed
    ///
    /// Returns `WaypointListFull` if the list is at capacity.
    pub fn add(&mut self, waypoint: Waypoint) -> Result<(), PathError> {
        self.waypoints
            .push(waypoint)
            .map_err(|_| PathError::WaypointListFull)?;
        self.changed = true;
        Ok(())
    }

    /// Replace every waypoint and mark the list changed
    ///
    /// On overflow the list keeps the waypoints that fit and is still marked
    /// changed, so the consumer sees the partial list rather than stale data.
    pub fn replace(&mut self, waypoints: &[Waypoint]) -> Result<(), PathError> {
        self.waypoints.clear();
        self.changed = true;
        for waypoint in waypoints {
            self.add(*waypoint)?;
        }
        Ok(())
    }

    /// Remove all waypoints and mark the list changed
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.changed = true;
    }

    /// Change the declared topology and mark the list changed
    pub fn set_path_type(&mut self, path_type: PathType) {
        self.path_type = path_type;
        self.changed = true;
    }

    /// Re-announce the current contents without modifying them
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Check the changed flag without consuming it
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Consume the changed flag, returning whether it was set
    pub fn take_changed(&mut self) -> bool {
        core::mem::replace(&mut self.changed, false)
    }

    /// Declared topology
    pub fn path_type(&self) -> PathType {
        self.path_type
    }

    /// Number of waypoints
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Get a waypoint by index
    pub fn get(&self, index: usize) -> Result<&Waypoint, PathError> {
        self.waypoints
            .get(index)
            .ok_or(PathError::WaypointIndexOutOfRange {
                index,
                count: self.waypoints.len(),
            })
    }

    /// Position of the waypoint at `index`
    pub fn position(&self, index: usize) -> Result<Ned, PathError> {
        self.get(index).map(|wp| wp.position)
    }

    /// Airspeed of the waypoint at `index`
    pub fn airspeed(&self, index: usize) -> Result<f64, PathError> {
        self.get(index).map(|wp| wp.airspeed)
    }

    /// Course of the waypoint at `index`
    pub fn course(&self, index: usize) -> Result<f64, PathError> {
        self.get(index).map(|wp| wp.course)
    }

    /// Iterate over waypoints in order
    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter()
    }

    /// Index of the first waypoint the planner marked as reaching the goal
    pub fn goal_index(&self) -> Option<usize> {
        self.waypoints
            .iter()
            .position(|wp| wp.planner.map(|m| m.connects_to_goal).unwrap_or(false))
    }
}
