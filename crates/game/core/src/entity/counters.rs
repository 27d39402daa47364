use crate::skill::{Character, SkillId};

use super::CombatantId;

/// Per-combatant resource and timer block.
///
/// Stun and hit-stop values are ticks remaining; zero means inactive.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counters {
    pub health: u32,
    pub max_health: u32,
    pub stamina: u32,
    pub max_stamina: u32,
    pub gauge: u32,
    pub air_options: u8,
    pub air_jumps: u8,
    pub air_dashes: u8,
    pub hit_stop: u32,
    pub block_stun: u32,
    pub hit_stun: u32,
    /// Attacker whose last hit on this combatant was a counter-hit.
    pub counter: Option<CombatantId>,
    /// Skill most recently launched by this combatant.
    pub previous_skill: Option<SkillId>,
    limits: AirLimits,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct AirLimits {
    options: u8,
    jumps: u8,
    dashes: u8,
}

impl Counters {
    pub const DEFAULT_MAX_HEALTH: u32 = 100;
    pub const DEFAULT_MAX_STAMINA: u32 = 100;

    pub fn new(character: &Character) -> Self {
        let limits = AirLimits {
            options: character.max_air_options,
            jumps: character.max_air_jumps,
            dashes: character.max_air_dashes,
        };

        Self {
            health: Self::DEFAULT_MAX_HEALTH,
            max_health: Self::DEFAULT_MAX_HEALTH,
            stamina: Self::DEFAULT_MAX_STAMINA,
            max_stamina: Self::DEFAULT_MAX_STAMINA,
            gauge: 0,
            air_options: limits.options,
            air_jumps: limits.jumps,
            air_dashes: limits.dashes,
            hit_stop: 0,
            block_stun: 0,
            hit_stun: 0,
            counter: None,
            previous_skill: None,
            limits,
        }
    }

    /// Restores every counter for a new round. Gauge is kept.
    pub fn reset(&mut self) {
        self.health = self.max_health;
        self.stamina = self.max_stamina;
        self.restore_air_options();
        self.hit_stop = 0;
        self.block_stun = 0;
        self.hit_stun = 0;
        self.counter = None;
        self.previous_skill = None;
    }

    /// Refills air options on landing.
    pub fn restore_air_options(&mut self) {
        self.air_options = self.limits.options;
        self.air_jumps = self.limits.jumps;
        self.air_dashes = self.limits.dashes;
    }

    pub fn spend_gauge(&mut self, amount: u32) -> bool {
        if amount > self.gauge {
            return false;
        }
        self.gauge -= amount;
        true
    }

    pub fn is_stunned(&self) -> bool {
        self.hit_stun > 0 || self.block_stun > 0
    }
}
