use crate::combat::Contact;
use crate::entity::CombatantId;
use crate::skill::Skill;

/// Hitbox volume queries against the host's physics world.
pub trait HitboxOracle: Send + Sync {
    /// Returns the defenders overlapping `skill`'s hitbox on this active tick.
    ///
    /// `elapsed` counts ticks since the execution was launched. Contacts with
    /// the attacker itself or with unknown combatants are ignored.
    fn query(&self, attacker: CombatantId, skill: &Skill, elapsed: u32) -> Vec<Contact>;
}
