//! waypath_core - Waypoint-to-path-command management for fixed-wing guidance
//!
//! This crate turns an ordered list of waypoints into a stream of flyable
//! path primitives (straight lines and orbits) and decides, once per
//! guidance cycle, when the vehicle should switch to the next primitive.
//!
//! # Design Principles
//!
//! - **no_std, no heap**: `no_std` outside unit tests, where logging prints
//!   through std; firmware builds log through `defmt` behind the `defmt`
//!   feature
//! - **Fixed capacity**: Waypoint lists, event lists and parameters live in
//!   `heapless` containers
//! - **Explicit state machines**: Manager states are enums driven by
//!   constant transition tables
//!
//! # Modules
//!
//! - [`geometry`]: Vector, rotation and angle-wrapping helpers
//! - [`halfspace`]: Switching half-space test
//! - [`path`]: Path commands (line, orbit)
//! - [`waypoint`]: Waypoint list and the sliding waypoint pointer
//! - [`dubins`]: Dubins shortest-path solver
//! - [`manager`]: Line, fillet and Dubins managers and the dispatcher
//! - [`parameters`]: Parameter store and path manager parameters
//! - [`error`]: Error types
//! - [`logging`]: Logging macros (`defmt` on embedded targets)

#![cfg_attr(not(test), no_std)]

pub mod logging;

pub mod dubins;
pub mod error;
pub mod geometry;
pub mod halfspace;
pub mod manager;
pub mod parameters;
pub mod path;
pub mod waypoint;

pub use error::PathError;
pub use geometry::Ned;
pub use halfspace::HalfSpace;
pub use manager::{PathEvent, PathManager, PathUpdate, VehiclePosition};
pub use path::{OrbitDirection, PathCommand};
pub use waypoint::{PathType, Waypoint, WaypointList, WaypointPointer};
