//! Decoded input history and motion recognition.
//!
//! The input layer feeds already-decoded direction/button bits into an
//! [`InputHistory`]; [`validate_motion`] matches that history against the
//! [`MotionInput`] patterns a character binds to its skills.
mod bits;
mod history;
mod notation;
mod recognizer;

pub use bits::{Button, InputBits, Motion};
pub use history::{HeldInput, InputChange, InputEvent, InputHistory};
pub use notation::{MotionInput, MotionStep, NotationError};
pub use recognizer::{MotionMatch, validate_motion};
