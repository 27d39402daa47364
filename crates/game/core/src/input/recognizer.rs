//! Matches a combatant's recent input history against every motion pattern
//! registered on its character.
//!
//! History is first decoded into tokens: one direction token per distinct
//! held direction, and one button token per press or release (remembering
//! the direction held at that moment). Patterns are turned into tokens the
//! same way and compared against the tail of the decoded history.

use crate::config::CombatConfig;
use crate::skill::{Character, SkillCatalog, SkillId};

use super::{HeldInput, InputBits, InputChange, InputHistory, MotionInput};

/// A skill whose pattern is satisfied by the current history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionMatch<'a> {
    pub motion: &'a MotionInput,
    pub skill: SkillId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token {
    Direction {
        bits: InputBits,
        held_millis: u64,
    },
    Button {
        bits: InputBits,
        change: InputChange,
        /// `None` on pattern tokens that accept any concurrent direction.
        direction: Option<InputBits>,
    },
}

impl Token {
    fn is_neutral(&self) -> bool {
        matches!(self, Token::Direction { bits, .. } if bits.is_empty())
    }

    fn is_change(&self, expected: InputChange) -> bool {
        matches!(self, Token::Button { change, .. } if *change == expected)
    }
}

/// Returns every skill of `character` whose motion is satisfied as a suffix
/// of `history`, longest pattern first.
///
/// Skills needing more gauge than `available_gauge` are left out. An empty
/// result means nothing matched.
pub fn validate_motion<'a>(
    history: &InputHistory,
    character: &'a Character,
    catalog: &SkillCatalog,
    available_gauge: u32,
    config: &CombatConfig,
) -> Vec<MotionMatch<'a>> {
    let decoded = decode(history.entries(), config.motion_window_millis);
    if decoded.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<MotionMatch<'a>> = character
        .skills()
        .iter()
        .filter(|(motion, id)| {
            let Some(skill) = catalog.get(*id) else {
                tracing::warn!(skill = %id, character = %character.name, "motion bound to unregistered skill");
                return false;
            };
            if skill.gauge_required > available_gauge {
                tracing::trace!(skill = %id, required = skill.gauge_required, available_gauge, "insufficient gauge");
                return false;
            }
            matches_motion(motion, &decoded)
        })
        .map(|(motion, id)| MotionMatch { motion, skill: *id })
        .collect();

    matches.sort_by(|a, b| b.motion.len().cmp(&a.motion.len()));
    tracing::trace!(count = matches.len(), "motion matches");
    matches
}

/// Decodes the entries that began within `window_millis` of the newest one.
fn decode(entries: &[HeldInput], window_millis: u64) -> Vec<Token> {
    let Some(newest) = entries.last() else {
        return Vec::new();
    };
    let start = entries
        .iter()
        .position(|e| e.at_millis.saturating_add(window_millis) >= newest.at_millis)
        .unwrap_or(entries.len() - 1);

    let mut tokens = Vec::with_capacity((entries.len() - start) * 2);
    let mut held_buttons = match start {
        0 => InputBits::empty(),
        n => entries[n - 1].bits.buttons(),
    };
    let mut last_direction: Option<usize> = None;

    for entry in &entries[start..] {
        let direction = entry.bits.direction();

        match last_direction.map(|i| (i, tokens[i])) {
            Some((i, Token::Direction { bits, held_millis })) if bits == direction => {
                tokens[i] = Token::Direction {
                    bits,
                    held_millis: held_millis.saturating_add(entry.held_millis),
                };
            }
            _ => {
                last_direction = Some(tokens.len());
                tokens.push(Token::Direction {
                    bits: direction,
                    held_millis: entry.held_millis,
                });
            }
        }

        let buttons = entry.bits.buttons();
        for (changed, change) in [
            (buttons.difference(held_buttons), InputChange::Press),
            (held_buttons.difference(buttons), InputChange::Release),
        ] {
            for button in changed.iter_buttons() {
                tokens.push(Token::Button {
                    bits: button.bit(),
                    change,
                    direction: Some(direction),
                });
            }
        }
        held_buttons = buttons;
    }

    tokens
}

fn pattern_tokens(motion: &MotionInput) -> Vec<(Token, u64)> {
    let mut tokens = Vec::with_capacity(motion.len());
    let mut direction = None;

    for step in motion.steps() {
        match step.change {
            None => {
                direction = Some(step.bits.direction());
                tokens.push((
                    Token::Direction {
                        bits: step.bits.direction(),
                        held_millis: 0,
                    },
                    step.min_held_millis,
                ));
            }
            Some(change) => {
                for button in step.bits.iter_buttons() {
                    tokens.push((
                        Token::Button {
                            bits: button.bit(),
                            change,
                            direction,
                        },
                        step.min_held_millis,
                    ));
                }
            }
        }
    }

    tokens
}

fn matches_motion(motion: &MotionInput, decoded: &[Token]) -> bool {
    let motion_only = motion.is_motion_only();
    let keep_neutral = motion.requires_neutral();
    let keep_release = motion.requires_release();
    // Release-only patterns ignore the presses that necessarily precede them.
    let keep_press = !keep_release
        || motion
            .steps()
            .iter()
            .any(|s| s.change == Some(InputChange::Press));
    let exact = motion.is_command_normal();

    let history: Vec<Token> = decoded
        .iter()
        .copied()
        .filter(|t| !motion_only || matches!(t, Token::Direction { .. }))
        .filter(|t| keep_release || !t.is_change(InputChange::Release))
        .filter(|t| keep_press || !t.is_change(InputChange::Press))
        .filter(|t| keep_neutral || !t.is_neutral())
        .collect();
    let pattern = pattern_tokens(motion);

    if history.len() < pattern.len() {
        return false;
    }

    history
        .iter()
        .rev()
        .zip(pattern.iter().rev())
        .all(|(actual, (expected, min_held))| token_matches(actual, expected, *min_held, exact))
}

fn token_matches(actual: &Token, expected: &Token, min_held: u64, exact: bool) -> bool {
    match (actual, expected) {
        (
            Token::Direction { bits, held_millis },
            Token::Direction {
                bits: required, ..
            },
        ) => {
            let direction_ok = if exact || required.is_empty() {
                bits == required
            } else {
                bits.contains(*required)
            };
            direction_ok && *held_millis >= min_held
        }
        (
            Token::Button {
                bits,
                change,
                direction,
            },
            Token::Button {
                bits: required,
                change: required_change,
                direction: required_direction,
            },
        ) => {
            let concurrent_ok = !exact
                || required_direction.is_none()
                || direction == required_direction;
            bits == required && change == required_change && concurrent_ok
        }
        _ => false,
    }
}
