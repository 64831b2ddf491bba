//! Path Manager Parameter Definitions
//!
//! # Parameters
//!
//! - `PATH_RADIUS` - Minimum turn radius in meters used for fillet arcs
//!   and Dubins circles

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

/// Default minimum turn radius in meters
const DEFAULT_RADIUS: f32 = 25.0;

/// Minimum accepted turn radius in meters
const MIN_RADIUS: f32 = 1.0;

/// Maximum accepted turn radius in meters
const MAX_RADIUS: f32 = 1000.0;

/// Path manager parameters loaded from parameter store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathParams {
    /// Minimum turn radius in meters
    pub min_turn_radius: f32,
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            min_turn_radius: DEFAULT_RADIUS,
        }
    }
}

impl PathParams {
    /// Register path parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "PATH_RADIUS",
            ParamValue::Float(DEFAULT_RADIUS),
            ParamFlags::empty(),
        )
    }

    /// Load path parameters from parameter store
    ///
    /// Missing values fall back to defaults; out-of-range values are clamped.
    pub fn from_store(store: &ParameterStore) -> Self {
        let min_turn_radius = match store.get("PATH_RADIUS") {
            Some(ParamValue::Float(v)) if v.is_finite() => (*v).clamp(MIN_RADIUS, MAX_RADIUS),
            Some(ParamValue::Int(v)) => (*v as f32).clamp(MIN_RADIUS, MAX_RADIUS),
            _ => DEFAULT_RADIUS,
        };
        Self { min_turn_radius }
    }
}
