//! Half-space transition tables
//!
//! Each manager declares its discrete state machine as a constant table of
//! [`Transition`] rows. A row fires when its trigger holds for the row's
//! half-space; the manager then runs the row's action and moves to `to`.

use crate::geometry::Ned;
use crate::halfspace::HalfSpace;

/// Half-space condition that fires a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Vehicle is inside the half-space
    Enter,
    /// Vehicle is outside the half-space
    Exit,
}

impl Trigger {
    /// Evaluate the trigger for `position`
    pub fn fires(&self, halfspace: &HalfSpace, position: &Ned) -> bool {
        match self {
            Trigger::Enter => halfspace.contains(position),
            Trigger::Exit => !halfspace.contains(position),
        }
    }
}

/// One row of a transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S, A> {
    pub from: S,
    pub trigger: Trigger,
    pub to: S,
    pub action: A,
}

/// Row leaving `from`, if the table has one
pub fn find<S: PartialEq, A>(table: &[Transition<S, A>], from: S) -> Option<&Transition<S, A>> {
    table.iter().find(|row| row.from == from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_fires() {
        let hs = HalfSpace::new(Ned::zeros(), Ned::new(1.0, 0.0, 0.0));
        let inside = Ned::new(1.0, 0.0, 0.0);
        let outside = Ned::new(-1.0, 0.0, 0.0);
        assert!(Trigger::Enter.fires(&hs, &inside));
        assert!(!Trigger::Enter.fires(&hs, &outside));
        assert!(Trigger::Exit.fires(&hs, &outside));
        assert!(!Trigger::Exit.fires(&hs, &inside));
    }

    #[test]
    fn test_find_row() {
        const TABLE: [Transition<u8, ()>; 2] = [
            Transition {
                from: 1,
                trigger: Trigger::Enter,
                to: 2,
                action: (),
            },
            Transition {
                from: 2,
                trigger: Trigger::Exit,
                to: 1,
                action: (),
            },
        ];
        assert_eq!(find(&TABLE, 2).map(|row| row.to), Some(1));
        assert!(find(&TABLE, 3).is_none());
    }
}
