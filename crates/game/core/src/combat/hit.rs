//! Hit outcome types.

use crate::entity::CombatantId;
use crate::skill::SkillId;

/// Outcome of one skill execution.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HitResult {
    /// The execution was abandoned because its state was cleared under it.
    Canceled,
    /// The activation condition did not hold; no phase ran.
    Unknown,
    /// The hitbox never touched anyone.
    Whiffed,
    Blocked,
    Contact,
    /// Contact on a defender that was in startup or already being comboed.
    Counter,
}

impl HitResult {
    /// Contact or counter: the skill connected and gatlings open up.
    pub fn is_hit(self) -> bool {
        matches!(self, HitResult::Contact | HitResult::Counter)
    }

    /// An execution touching several defenders reports its highest-ranked
    /// outcome.
    pub(crate) fn rank(self) -> u8 {
        match self {
            HitResult::Canceled | HitResult::Unknown => 0,
            HitResult::Whiffed => 1,
            HitResult::Blocked => 2,
            HitResult::Contact => 3,
            HitResult::Counter => 4,
        }
    }
}

/// Result reported when an execution settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitData {
    pub attacker: CombatantId,
    /// Last defender touched by the execution, if any.
    pub attacked: Option<CombatantId>,
    pub skill: SkillId,
    pub hit_result: HitResult,
}

/// Height class of a hitbox, deciding which guard stops it.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum HitboxRegion {
    /// Must be blocked crouching.
    Low,
    /// Blocked either way.
    #[default]
    High,
    /// Must be blocked standing.
    Overhead,
}

impl HitboxRegion {
    pub fn is_blocked_by(self, crouching: bool) -> bool {
        match self {
            HitboxRegion::Low => crouching,
            HitboxRegion::High => true,
            HitboxRegion::Overhead => !crouching,
        }
    }
}

/// One defender reported by the hitbox oracle on an active tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contact {
    pub defender: CombatantId,
    /// The defender is holding away from the attacker while facing it.
    pub guarding: bool,
}

impl Contact {
    pub fn new(defender: CombatantId) -> Self {
        Self {
            defender,
            guarding: false,
        }
    }

    pub fn guarded(defender: CombatantId) -> Self {
        Self {
            defender,
            guarding: true,
        }
    }
}
