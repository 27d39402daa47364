//! Bounded per-combatant input history.

use arrayvec::ArrayVec;

use super::InputBits;
use crate::config::CombatConfig;

/// Whether an input event pressed or released its bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputChange {
    Press,
    Release,
}

/// A single decoded press/release from the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputEvent {
    pub bits: InputBits,
    pub change: InputChange,
    pub at_millis: u64,
}

impl InputEvent {
    pub fn press(bits: impl Into<InputBits>, at_millis: u64) -> Self {
        Self {
            bits: bits.into(),
            change: InputChange::Press,
            at_millis,
        }
    }

    pub fn release(bits: impl Into<InputBits>, at_millis: u64) -> Self {
        Self {
            bits: bits.into(),
            change: InputChange::Release,
            at_millis,
        }
    }
}

/// One distinct held combination of directions and buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeldInput {
    pub bits: InputBits,
    /// How long this combination was (or has so far been) held.
    pub held_millis: u64,
    /// The event that produced this combination, if known.
    pub change: Option<InputChange>,
    /// When the combination began.
    pub at_millis: u64,
}

impl HeldInput {
    pub fn new(bits: impl Into<InputBits>, held_millis: u64, at_millis: u64) -> Self {
        Self {
            bits: bits.into(),
            held_millis,
            change: None,
            at_millis,
        }
    }

    pub fn with_change(mut self, change: InputChange) -> Self {
        self.change = Some(change);
        self
    }
}

/// Time-ordered history of [`HeldInput`]s; the oldest entry is evicted
/// once the capacity is reached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputHistory {
    entries: ArrayVec<HeldInput, { CombatConfig::MAX_INPUT_HISTORY }>,
    held: InputBits,
}

impl InputHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a press/release and appends the resulting combination.
    ///
    /// An event that leaves the held bits unchanged only extends the
    /// current entry.
    pub fn record(&mut self, event: InputEvent) {
        match event.change {
            InputChange::Press => self.held |= event.bits,
            InputChange::Release => self.held.remove(event.bits),
        }

        self.touch(event.at_millis);
        if self.entries.last().is_some_and(|last| last.bits == self.held) {
            return;
        }

        self.append(HeldInput {
            bits: self.held,
            held_millis: 0,
            change: Some(event.change),
            at_millis: event.at_millis,
        });
    }

    /// Appends an already-built descriptor.
    ///
    /// Descriptors repeating the previous combination are merged into it.
    pub fn push(&mut self, input: HeldInput) {
        if let Some(last) = self.entries.last_mut() {
            if last.bits == input.bits {
                last.held_millis = last.held_millis.saturating_add(input.held_millis);
                return;
            }
        }

        self.held = input.bits;
        self.append(input);
    }

    /// Extends the newest entry's hold duration up to `now_millis`.
    pub fn touch(&mut self, now_millis: u64) {
        if let Some(last) = self.entries.last_mut() {
            last.held_millis = now_millis.saturating_sub(last.at_millis);
        }
    }

    pub fn held(&self) -> InputBits {
        self.held
    }

    pub fn entries(&self) -> &[HeldInput] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.held = InputBits::empty();
    }

    fn append(&mut self, input: HeldInput) {
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push(input);
    }
}
