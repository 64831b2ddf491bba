//! Path commands
//!
//! The output of a path manager: one flyable primitive for the path
//! follower to track until the next switching half-space is crossed.

use crate::geometry::Ned;

/// Rotation sense of an orbit, viewed from above
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitDirection {
    /// Clockwise (right turn)
    Clockwise,
    /// Counter-clockwise (left turn)
    CounterClockwise,
}

impl OrbitDirection {
    /// +1 for clockwise, -1 for counter-clockwise
    pub fn sign(&self) -> i8 {
        match self {
            OrbitDirection::Clockwise => 1,
            OrbitDirection::CounterClockwise => -1,
        }
    }

    /// Direction from the sign of a turn rate (positive is clockwise)
    pub fn from_turn(turn: f64) -> Self {
        if turn > 0.0 {
            OrbitDirection::Clockwise
        } else {
            OrbitDirection::CounterClockwise
        }
    }

    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            OrbitDirection::Clockwise => "CW",
            OrbitDirection::CounterClockwise => "CCW",
        }
    }
}

/// Flyable path primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Straight line through `origin` along unit `direction`
    Line {
        origin: Ned,
        direction: Ned,
        airspeed: f64,
    },
    /// Circle of `radius` about `center`, flown in `direction`
    Orbit {
        center: Ned,
        radius: f64,
        direction: OrbitDirection,
        airspeed: f64,
    },
}

impl PathCommand {
    /// Commanded airspeed in m/s
    pub fn airspeed(&self) -> f64 {
        match self {
            PathCommand::Line { airspeed, .. } | PathCommand::Orbit { airspeed, .. } => *airspeed,
        }
    }

    /// True for a line command
    pub fn is_line(&self) -> bool {
        matches!(self, PathCommand::Line { .. })
    }

    /// True for an orbit command
    pub fn is_orbit(&self) -> bool {
        matches!(self, PathCommand::Orbit { .. })
    }

    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            PathCommand::Line { .. } => "line",
            PathCommand::Orbit { .. } => "orbit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_direction_sign() {
        assert_eq!(OrbitDirection::Clockwise.sign(), 1);
        assert_eq!(OrbitDirection::CounterClockwise.sign(), -1);
        assert_eq!(OrbitDirection::from_turn(0.5), OrbitDirection::Clockwise);
        assert_eq!(
            OrbitDirection::from_turn(-0.5),
            OrbitDirection::CounterClockwise
        );
        assert_eq!(
            OrbitDirection::from_turn(0.0),
            OrbitDirection::CounterClockwise
        );
    }

    #[test]
    fn test_path_command_accessors() {
        let line = PathCommand::Line {
            origin: Ned::zeros(),
            direction: Ned::new(1.0, 0.0, 0.0),
            airspeed: 25.0,
        };
        let orbit = PathCommand::Orbit {
            center: Ned::zeros(),
            radius: 50.0,
            direction: OrbitDirection::Clockwise,
            airspeed: 30.0,
        };
        assert!(line.is_line() && !line.is_orbit());
        assert!(orbit.is_orbit() && !orbit.is_line());
        assert!((line.airspeed() - 25.0).abs() < 1e-12);
        assert!((orbit.airspeed() - 30.0).abs() < 1e-12);
        assert_eq!(line.name(), "line");
    }
}
