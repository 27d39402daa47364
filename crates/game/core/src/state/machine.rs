use std::fmt;
use std::sync::Arc;

use super::{EntityState, StateWait};

/// Notification fired whenever the composite state is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChange {
    pub old: EntityState,
    pub new: EntityState,
    pub forced: bool,
}

/// Receives [`StateChange`] notifications (animation selection, UI).
pub trait StateObserver: Send + Sync {
    fn on_state_changed(&self, change: &StateChange);
}

/// Bitflag state machine owned by exactly one combatant.
#[derive(Clone)]
pub struct StateMachine {
    state: EntityState,
    default_state: EntityState,
    observers: Vec<Arc<dyn StateObserver>>,
}

impl StateMachine {
    pub fn new(default_state: EntityState) -> Self {
        Self {
            state: default_state,
            default_state,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Arc<dyn StateObserver>) {
        self.observers.push(observer);
    }

    pub fn get(&self) -> EntityState {
        self.state
    }

    /// ORs `flags` into the state.
    ///
    /// Observers are notified even when every bit was already set, so they
    /// can re-run selection logic.
    pub fn add_state(&mut self, flags: EntityState) {
        let old = self.state;
        self.state |= flags;
        self.notify(old, false);
    }

    /// Clears `flags`. Returns false (and notifies nobody) if none were set.
    pub fn remove_state(&mut self, flags: EntityState) -> bool {
        if !self.state.intersects(flags) {
            return false;
        }

        let old = self.state;
        self.state.remove(flags);
        self.notify(old, false);
        true
    }

    /// Overwrites the whole composite state.
    pub fn force_state(&mut self, state: EntityState) {
        let old = self.state;
        self.state = state;
        self.notify(old, true);
    }

    /// Any-match test.
    pub fn is_state(&self, flags: EntityState) -> bool {
        self.state.intersects(flags)
    }

    /// All-match test.
    pub fn is_every_state(&self, flags: EntityState) -> bool {
        self.state.contains(flags)
    }

    pub fn default_state(&self) -> EntityState {
        self.default_state
    }

    pub fn set_default_state(&mut self, state: EntityState) {
        self.default_state = state;
    }

    pub fn is_default_state(&self) -> bool {
        self.state == self.default_state
    }

    pub fn reset_state(&mut self) {
        self.force_state(self.default_state);
    }

    /// Starts a wait that completes after `frames` ticks unless every bit of
    /// `state` is cleared first.
    pub fn while_in_state(&self, frames: u32, state: EntityState) -> StateWait {
        let mut wait = StateWait::new(frames, state);
        wait.check(self.state);
        wait
    }

    fn notify(&self, old: EntityState, forced: bool) {
        let change = StateChange {
            old,
            new: self.state,
            forced,
        };

        tracing::trace!(old = ?change.old, new = ?change.new, forced, "state changed");
        for observer in &self.observers {
            observer.on_state_changed(&change);
        }
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new(EntityState::IDLE)
    }
}

impl fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("state", &self.state)
            .field("default_state", &self.default_state)
            .field("observers", &self.observers.len())
            .finish()
    }
}
