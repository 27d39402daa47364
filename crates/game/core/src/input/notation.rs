//! Motion patterns and their numpad notation.
//!
//! ```text
//! 236P     quarter-circle forward + Punch
//! 2K       crouching Kick (command normal)
//! [4]6S    charge back, then forward + Slash
//! 5]P[     neutral, release Punch
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorSeverity, GameError};

use super::{Button, InputBits, InputChange, Motion};

/// One required element of a motion pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionStep {
    pub bits: InputBits,
    pub min_held_millis: u64,
    /// `Some` for button steps, `None` for direction steps.
    pub change: Option<InputChange>,
}

impl MotionStep {
    pub fn direction(motion: Motion) -> Self {
        Self {
            bits: motion.bits(),
            min_held_millis: 0,
            change: None,
        }
    }

    pub fn charge(motion: Motion, min_held_millis: u64) -> Self {
        Self {
            bits: motion.bits(),
            min_held_millis,
            change: None,
        }
    }

    pub fn press(button: Button) -> Self {
        Self {
            bits: button.bit(),
            min_held_millis: 0,
            change: Some(InputChange::Press),
        }
    }

    pub fn release(button: Button) -> Self {
        Self {
            bits: button.bit(),
            min_held_millis: 0,
            change: Some(InputChange::Release),
        }
    }

    pub fn is_button(&self) -> bool {
        self.change.is_some()
    }

    pub fn is_neutral(&self) -> bool {
        !self.is_button() && self.bits.is_neutral()
    }
}

/// Errors produced while authoring a motion pattern.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("motion pattern is empty")]
    Empty,

    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("unterminated charge or release starting at offset {offset}")]
    Unterminated { offset: usize },
}

impl GameError for NotationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            NotationError::Empty => "NOTATION_EMPTY",
            NotationError::UnexpectedChar { .. } => "NOTATION_UNEXPECTED_CHAR",
            NotationError::Unterminated { .. } => "NOTATION_UNTERMINATED",
        }
    }
}

/// Input pattern a player must reproduce to trigger a skill.
///
/// Never empty; authored once and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionInput {
    steps: Vec<MotionStep>,
}

impl MotionInput {
    /// Hold time required by `[d]` charge notation.
    pub const DEFAULT_CHARGE_MILLIS: u64 = 500;

    pub fn from_steps(steps: Vec<MotionStep>) -> Result<Self, NotationError> {
        if steps.is_empty() {
            return Err(NotationError::Empty);
        }
        Ok(Self { steps })
    }

    pub fn parse(notation: &str) -> Result<Self, NotationError> {
        let chars: Vec<(usize, char)> = notation
            .char_indices()
            .filter(|(_, c)| !c.is_whitespace() && *c != ',')
            .collect();

        let mut steps = Vec::with_capacity(chars.len());
        let mut i = 0;
        while i < chars.len() {
            let (offset, ch) = chars[i];
            match ch {
                '[' => {
                    let motion = chars
                        .get(i + 1)
                        .and_then(|&(_, d)| Motion::from_digit(d))
                        .ok_or(NotationError::Unterminated { offset })?;
                    if chars.get(i + 2).map(|&(_, c)| c) != Some(']') {
                        return Err(NotationError::Unterminated { offset });
                    }
                    steps.push(MotionStep::charge(motion, Self::DEFAULT_CHARGE_MILLIS));
                    i += 3;
                }
                ']' => {
                    let (button, width) = parse_button(&chars[i + 1..])
                        .ok_or(NotationError::Unterminated { offset })?;
                    if chars.get(i + 1 + width).map(|&(_, c)| c) != Some('[') {
                        return Err(NotationError::Unterminated { offset });
                    }
                    steps.push(MotionStep::release(button));
                    i += width + 2;
                }
                d if d.is_ascii_digit() => {
                    let motion =
                        Motion::from_digit(d).ok_or(NotationError::UnexpectedChar { ch, offset })?;
                    steps.push(MotionStep::direction(motion));
                    i += 1;
                }
                _ => {
                    let (button, width) = parse_button(&chars[i..])
                        .ok_or(NotationError::UnexpectedChar { ch, offset })?;
                    steps.push(MotionStep::press(button));
                    i += width;
                }
            }
        }

        Self::from_steps(steps)
    }

    pub fn steps(&self) -> &[MotionStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// No button component: only the directional skeleton matters.
    pub fn is_motion_only(&self) -> bool {
        !self.steps.iter().any(MotionStep::is_button)
    }

    pub fn requires_neutral(&self) -> bool {
        self.steps.iter().any(MotionStep::is_neutral)
    }

    pub fn requires_release(&self) -> bool {
        self.steps
            .iter()
            .any(|s| s.change == Some(InputChange::Release))
    }

    /// A direction plus a button (or a lone button/direction) that must be
    /// matched exactly rather than leniently.
    pub fn is_command_normal(&self) -> bool {
        self.steps.len() <= 2 && !self.is_motion_only()
    }
}

/// Two-letter tokens win over one-letter ones (`SP` is Sweep, not S + P).
fn parse_button(chars: &[(usize, char)]) -> Option<(Button, usize)> {
    let token = |n: usize| -> Option<String> {
        (chars.len() >= n).then(|| chars[..n].iter().map(|&(_, c)| c).collect())
    };

    if let Some(button) = token(2).and_then(|t| Button::from_str(&t).ok()) {
        return Some((button, 2));
    }
    token(1)
        .and_then(|t| Button::from_str(&t).ok())
        .map(|b| (b, 1))
}

impl FromStr for MotionInput {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MotionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            match step.change {
                None => {
                    let digit = Motion::from_bits(step.bits).digit();
                    if step.min_held_millis > 0 {
                        write!(f, "[{digit}]")?;
                    } else {
                        write!(f, "{digit}")?;
                    }
                }
                Some(change) => {
                    for button in step.bits.iter_buttons() {
                        match change {
                            InputChange::Press => write!(f, "{button}")?,
                            InputChange::Release => write!(f, "]{button}[")?,
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
