//! Tick-counted waits that are abandoned when the watched state disappears.

use super::EntityState;

/// Progress of a [`StateWait`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaitStatus {
    /// Still counting down.
    Pending,
    /// All ticks elapsed while the watched state held.
    Completed,
    /// The watched state was lost before the countdown finished.
    Rejected,
}

impl WaitStatus {
    #[inline]
    pub fn is_settled(self) -> bool {
        !matches!(self, WaitStatus::Pending)
    }
}

/// "Hold this state for N ticks" primitive.
///
/// The wait is raced against the composite state: every [`advance`] first
/// checks that at least one watched bit is still set, so a mutation made
/// between two ticks rejects the wait on the very next tick instead of
/// after the remaining countdown.
///
/// [`advance`]: StateWait::advance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateWait {
    remaining: u32,
    watch: EntityState,
    status: WaitStatus,
}

impl StateWait {
    pub fn new(frames: u32, watch: EntityState) -> Self {
        let status = if frames == 0 {
            WaitStatus::Completed
        } else {
            WaitStatus::Pending
        };

        Self {
            remaining: frames,
            watch,
            status,
        }
    }

    /// Re-checks the watched bits without consuming a tick.
    pub fn check(&mut self, state: EntityState) -> WaitStatus {
        if self.status == WaitStatus::Pending && !state.intersects(self.watch) {
            self.status = WaitStatus::Rejected;
        }
        self.status
    }

    /// Consumes one tick of the frame clock.
    pub fn advance(&mut self, state: EntityState) -> WaitStatus {
        if self.check(state) != WaitStatus::Pending {
            return self.status;
        }

        self.remaining -= 1;
        if self.remaining == 0 {
            self.status = WaitStatus::Completed;
        }
        self.status
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn watch(&self) -> EntityState {
        self.watch
    }

    pub fn status(&self) -> WaitStatus {
        self.status
    }
}
