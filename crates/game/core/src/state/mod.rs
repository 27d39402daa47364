//! Combatant state machine.
//!
//! A combatant's condition is a literal bitset ([`EntityState`]) mutated
//! exclusively through [`StateMachine`]. [`StateWait`] is the tick-counted
//! "hold this state" primitive used by skill execution.
mod flags;
mod machine;
mod wait;

pub use flags::EntityState;
pub use machine::{StateChange, StateMachine, StateObserver};
pub use wait::{StateWait, WaitStatus};

/// Discrete time unit of the frame clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}
