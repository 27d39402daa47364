//! Timing contract of a skill.

use std::fmt;
use std::sync::Arc;

use crate::combat::HitboxRegion;
use crate::entity::Combatant;

use super::{BuildError, Skill};

/// Predicate deciding whether a skill may start at all.
pub type Condition = Arc<dyn Fn(&Combatant, &Skill) -> bool + Send + Sync>;

/// Callback fired once at a fixed elapsed-tick offset of an execution.
pub type EffectFn = Arc<dyn Fn(&mut Combatant, &Skill) + Send + Sync>;

/// Key of the animation asset played for a skill.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationRef(pub String);

impl AnimationRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

/// Hitbox descriptor handed to the hitbox oracle while a skill is active.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hitbox {
    pub region: HitboxRegion,
    /// Body part the hitbox volume is attached to.
    pub origin: String,
}

impl Hitbox {
    pub fn new(region: HitboxRegion, origin: impl Into<String>) -> Self {
        Self {
            region,
            origin: origin.into(),
        }
    }
}

#[derive(Clone)]
pub struct FrameEffect {
    /// Elapsed ticks since launch (0 fires on the launch tick).
    pub at: u32,
    pub effect: EffectFn,
}

impl fmt::Debug for FrameEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameEffect").field("at", &self.at).finish_non_exhaustive()
    }
}

/// Frame counts of one skill, shared read-only by all its executions.
///
/// All counts are ticks of the frame clock.
#[derive(Clone)]
pub struct FrameData {
    pub startup: u32,
    pub active: u32,
    pub recovery: u32,
    pub block_stun: u32,
    pub hit_stun: u32,
    /// Recovery ticks forgiven to the attacker when the skill is blocked.
    pub block_advantage: u32,
    /// Recovery ticks forgiven to the attacker when the skill connects.
    pub contact: u32,
    pub animation: Option<AnimationRef>,
    pub hitbox: Hitbox,
    effects: Vec<FrameEffect>,
    condition: Option<Condition>,
}

impl FrameData {
    pub fn builder() -> FrameDataBuilder {
        FrameDataBuilder::default()
    }

    /// Startup + active + recovery, without any trim.
    pub fn total_frames(&self) -> u32 {
        self.startup
            .saturating_add(self.active)
            .saturating_add(self.recovery)
    }

    /// Evaluates the activation condition; skills without one always pass.
    pub fn allows(&self, combatant: &Combatant, skill: &Skill) -> bool {
        self.condition
            .as_ref()
            .is_none_or(|condition| condition(combatant, skill))
    }

    pub fn effects(&self) -> &[FrameEffect] {
        &self.effects
    }

    pub fn effects_at(&self, elapsed: u32) -> impl Iterator<Item = &FrameEffect> {
        self.effects.iter().filter(move |e| e.at == elapsed)
    }
}

impl fmt::Debug for FrameData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameData")
            .field("startup", &self.startup)
            .field("active", &self.active)
            .field("recovery", &self.recovery)
            .field("block_stun", &self.block_stun)
            .field("hit_stun", &self.hit_stun)
            .field("block_advantage", &self.block_advantage)
            .field("contact", &self.contact)
            .field("animation", &self.animation)
            .field("hitbox", &self.hitbox)
            .field("effects", &self.effects)
            .field("condition", &self.condition.is_some())
            .finish()
    }
}

/// Builder for [`FrameData`]. A hitbox is mandatory.
#[derive(Default)]
pub struct FrameDataBuilder {
    startup: u32,
    active: u32,
    recovery: u32,
    block_stun: u32,
    hit_stun: u32,
    block_advantage: u32,
    contact: u32,
    animation: Option<AnimationRef>,
    hitbox: Option<Hitbox>,
    effects: Vec<FrameEffect>,
    condition: Option<Condition>,
}

impl FrameDataBuilder {
    pub fn startup(mut self, frames: u32) -> Self {
        self.startup = frames;
        self
    }

    pub fn active(mut self, frames: u32) -> Self {
        self.active = frames;
        self
    }

    pub fn recovery(mut self, frames: u32) -> Self {
        self.recovery = frames;
        self
    }

    pub fn block_stun(mut self, frames: u32) -> Self {
        self.block_stun = frames;
        self
    }

    pub fn hit_stun(mut self, frames: u32) -> Self {
        self.hit_stun = frames;
        self
    }

    pub fn block_advantage(mut self, frames: u32) -> Self {
        self.block_advantage = frames;
        self
    }

    pub fn contact(mut self, frames: u32) -> Self {
        self.contact = frames;
        self
    }

    pub fn animation(mut self, animation: AnimationRef) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn hitbox(mut self, hitbox: Hitbox) -> Self {
        self.hitbox = Some(hitbox);
        self
    }

    pub fn effect(
        mut self,
        at: u32,
        effect: impl Fn(&mut Combatant, &Skill) + Send + Sync + 'static,
    ) -> Self {
        self.effects.push(FrameEffect {
            at,
            effect: Arc::new(effect),
        });
        self
    }

    pub fn condition(
        mut self,
        condition: impl Fn(&Combatant, &Skill) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.condition = Some(Arc::new(condition));
        self
    }

    pub fn build(self) -> Result<FrameData, BuildError> {
        let hitbox = self.hitbox.ok_or(BuildError::MissingHitbox)?;
        let total = self
            .startup
            .checked_add(self.active)
            .and_then(|total| total.checked_add(self.recovery))
            .ok_or(BuildError::FrameOverflow)?;
        if let Some(effect) = self.effects.iter().find(|e| e.at >= total.max(1)) {
            return Err(BuildError::EffectOutOfRange {
                at: effect.at,
                total,
            });
        }

        Ok(FrameData {
            startup: self.startup,
            active: self.active,
            recovery: self.recovery,
            block_stun: self.block_stun,
            hit_stun: self.hit_stun,
            block_advantage: self.block_advantage,
            contact: self.contact,
            animation: self.animation,
            hitbox,
            effects: self.effects,
            condition: self.condition,
        })
    }
}
