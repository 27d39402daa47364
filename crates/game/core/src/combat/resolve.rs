//! Contact resolution.

use crate::config::CombatConfig;
use crate::skill::Skill;
use crate::state::EntityState;

use super::{Contact, HitResult};

/// What a single contact does to its defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactOutcome {
    /// `Blocked`, `Contact` or `Counter`.
    pub result: HitResult,
    /// Block-stun to add when blocked, hit-stun to set otherwise.
    pub stun: u32,
}

/// Resolves one contact of `skill` against a defender in `defender_state`.
///
/// # Rules
///
/// ```text
/// blocking  = (BLOCK set || contact.guarding) && !(HITSTUN || KNOCKDOWN)
/// blocked   = blocking && region blocked at the defender's height
///             (crouching: Low/High, standing: High/Overhead)
/// blocked   -> block_stun            (x crouch multiplier when crouching)
/// counter   = can_counter && (HITSTUN || KNOCKDOWN || STARTUP)
/// otherwise -> hit_stun              (x counter multiplier on counter,
///                                     x crouch multiplier when crouching)
/// ```
///
/// Pure: applying the outcome is the caller's job.
pub fn resolve_contact(
    skill: &Skill,
    defender_state: EntityState,
    contact: &Contact,
    config: &CombatConfig,
) -> ContactOutcome {
    let frame_data = &skill.frame_data;
    let crouching = defender_state.contains(EntityState::CROUCH);
    let attacked = defender_state.was_attacked();
    let blocking = (defender_state.contains(EntityState::BLOCK) || contact.guarding) && !attacked;

    if blocking && frame_data.hitbox.region.is_blocked_by(crouching) {
        let mut stun = frame_data.block_stun;
        if crouching {
            stun = CombatConfig::scale(stun, config.crouch_stun_permille);
        }
        return ContactOutcome {
            result: HitResult::Blocked,
            stun,
        };
    }

    let counter = skill.can_counter && (attacked || defender_state.is_counterable());
    let mut stun = frame_data.hit_stun;
    if counter {
        stun = CombatConfig::scale(stun, config.counter_stun_permille);
    }
    if crouching {
        stun = CombatConfig::scale(stun, config.crouch_stun_permille);
    }

    ContactOutcome {
        result: if counter {
            HitResult::Counter
        } else {
            HitResult::Contact
        },
        stun,
    }
}
