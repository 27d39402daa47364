//! Traits describing the host engine collaborators.
//!
//! Oracles expose animation playback, hitbox volume queries and ground
//! sensing. The [`Env`] aggregate bundles them so executions can reach what
//! they need without coupling to concrete implementations. Every oracle is
//! optional: without one there is no animation, no contact, and every
//! combatant counts as grounded.
mod animation;
mod hitbox;
mod movement;

pub use animation::{AnimationHandle, AnimationOracle};
pub use hitbox::HitboxOracle;
pub use movement::MovementOracle;

use crate::combat::Contact;
use crate::entity::CombatantId;
use crate::skill::{AnimationRef, Skill};

/// Aggregates the oracles consulted while combatants act.
pub struct Env<'a, A, H, M>
where
    A: AnimationOracle + ?Sized,
    H: HitboxOracle + ?Sized,
    M: MovementOracle + ?Sized,
{
    animation: Option<&'a A>,
    hitbox: Option<&'a H>,
    movement: Option<&'a M>,
}

pub type CombatEnv<'a> =
    Env<'a, dyn AnimationOracle + 'a, dyn HitboxOracle + 'a, dyn MovementOracle + 'a>;

impl<A, H, M> Clone for Env<'_, A, H, M>
where
    A: AnimationOracle + ?Sized,
    H: HitboxOracle + ?Sized,
    M: MovementOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, H, M> Copy for Env<'_, A, H, M>
where
    A: AnimationOracle + ?Sized,
    H: HitboxOracle + ?Sized,
    M: MovementOracle + ?Sized,
{
}

impl<'a, A, H, M> Env<'a, A, H, M>
where
    A: AnimationOracle + ?Sized,
    H: HitboxOracle + ?Sized,
    M: MovementOracle + ?Sized,
{
    pub fn new(animation: Option<&'a A>, hitbox: Option<&'a H>, movement: Option<&'a M>) -> Self {
        Self {
            animation,
            hitbox,
            movement,
        }
    }

    pub fn with_all(animation: &'a A, hitbox: &'a H, movement: &'a M) -> Self {
        Self::new(Some(animation), Some(hitbox), Some(movement))
    }

    pub fn empty() -> Self {
        Self {
            animation: None,
            hitbox: None,
            movement: None,
        }
    }

    pub fn animation(&self) -> Option<&'a A> {
        self.animation
    }

    pub fn hitbox(&self) -> Option<&'a H> {
        self.hitbox
    }

    pub fn movement(&self) -> Option<&'a M> {
        self.movement
    }

    /// Loads and starts `animation`; `None` without an animation oracle.
    pub fn play(&self, owner: CombatantId, animation: &AnimationRef) -> Option<AnimationHandle> {
        let oracle = self.animation?;
        let handle = oracle.load(owner, animation)?;
        oracle.play(handle);
        Some(handle)
    }

    pub fn stop(&self, handle: AnimationHandle) {
        if let Some(oracle) = self.animation {
            if oracle.is_playing(handle) {
                oracle.stop(handle);
            }
        }
    }

    pub fn query_hitbox(&self, attacker: CombatantId, skill: &Skill, elapsed: u32) -> Vec<Contact> {
        self.hitbox
            .map(|oracle| oracle.query(attacker, skill, elapsed))
            .unwrap_or_default()
    }

    pub fn is_grounded(&self, combatant: CombatantId) -> bool {
        self.movement
            .is_none_or(|oracle| oracle.is_grounded(combatant))
    }

    pub fn face_movement_direction(&self, combatant: CombatantId) {
        if let Some(oracle) = self.movement {
            oracle.face_movement_direction(combatant);
        }
    }
}

impl<'a, A, H, M> Env<'a, A, H, M>
where
    A: AnimationOracle + 'a,
    H: HitboxOracle + 'a,
    M: MovementOracle + 'a,
{
    /// Converts concrete oracles into the trait-object based [`CombatEnv`].
    pub fn as_combat_env(&self) -> CombatEnv<'a> {
        let animation: Option<&'a dyn AnimationOracle> = self.animation.map(|a| a as _);
        let hitbox: Option<&'a dyn HitboxOracle> = self.hitbox.map(|h| h as _);
        let movement: Option<&'a dyn MovementOracle> = self.movement.map(|m| m as _);
        Env::new(animation, hitbox, movement)
    }
}
