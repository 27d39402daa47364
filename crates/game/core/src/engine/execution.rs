//! Resumable skill execution.
//!
//! An [`Execution`] walks Startup → Active → Recovery one tick at a time.
//! Each phase holds its state bit through a [`StateWait`], so clearing the
//! bit from outside (being hit, a forced state) rejects the wait on the next
//! tick. Before every resumption the execution re-checks that it is still
//! the combatant's current one and withdraws silently if it is not.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::combat::{HitData, HitResult};
use crate::config::CombatConfig;
use crate::entity::{Combatant, CombatantId};
use crate::env::{AnimationHandle, CombatEnv};
use crate::skill::{Skill, SkillId};
use crate::state::{EntityState, StateWait, WaitStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Startup,
    Active,
    Recovery,
}

/// Result of advancing an execution by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    Running { hitbox_open: bool },
    Finished(HitData),
    /// Active ended and the skill links straight into `next`.
    Linked { finished: HitData, next: SkillId },
    Canceled(HitData),
    /// Superseded by a newer execution; nothing was touched.
    Withdrawn,
}

/// One in-flight skill of one combatant.
#[derive(Clone, Debug)]
pub struct Execution {
    skill: Arc<Skill>,
    serial: u64,
    phase: Phase,
    wait: StateWait,
    elapsed: u32,
    result: HitResult,
    attacked: Option<CombatantId>,
    struck: ArrayVec<CombatantId, { CombatConfig::MAX_CONTACTS_PER_EXECUTION }>,
    animation: Option<AnimationHandle>,
    linked_from: Option<SkillId>,
}

impl Execution {
    /// Enters the first phase of `skill` on `combatant`.
    ///
    /// The caller has already stamped the combatant with `serial`. Returns
    /// `None` when a launch-tick effect superseded the execution.
    pub(crate) fn begin(
        combatant: &mut Combatant,
        skill: Arc<Skill>,
        serial: u64,
        linked_from: Option<SkillId>,
        env: &CombatEnv<'_>,
    ) -> Option<Self> {
        let id = combatant.id();
        let startup = skill.frame_data.startup;
        let animation = skill
            .frame_data
            .animation
            .as_ref()
            .and_then(|animation| env.play(id, animation));

        let state = combatant.state_mut();
        state.remove_state(EntityState::IDLE);
        // Without startup the launch frame is already the first active one.
        let (phase, wait) = if startup > 0 {
            state.add_state(EntityState::STARTUP);
            (
                Phase::Startup,
                state.while_in_state(startup, EntityState::STARTUP),
            )
        } else {
            state.add_state(EntityState::ATTACK);
            (
                Phase::Active,
                state.while_in_state(skill.frame_data.active, EntityState::ATTACK),
            )
        };

        let mut execution = Self {
            skill,
            serial,
            phase,
            wait,
            elapsed: 0,
            result: HitResult::Whiffed,
            attacked: None,
            struck: ArrayVec::new(),
            animation,
            linked_from,
        };

        execution.fire_effects(combatant);
        if !execution.is_current_for(combatant) {
            execution.stop_animation(env);
            return None;
        }
        Some(execution)
    }

    pub fn skill(&self) -> &Arc<Skill> {
        &self.skill
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks since launch.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Result accumulated so far (`Whiffed` until something is touched).
    pub fn result(&self) -> HitResult {
        self.result
    }

    pub fn linked_from(&self) -> Option<SkillId> {
        self.linked_from
    }

    pub fn animation(&self) -> Option<AnimationHandle> {
        self.animation
    }

    /// Active or recovering: the window in which cancels are considered.
    pub fn is_cancelable(&self) -> bool {
        matches!(self.phase, Phase::Active | Phase::Recovery)
    }

    pub(crate) fn serial(&self) -> u64 {
        self.serial
    }

    pub(crate) fn is_current_for(&self, combatant: &Combatant) -> bool {
        combatant.serial() == self.serial
            && combatant.counters().previous_skill == Some(self.skill.id)
    }

    pub(crate) fn has_struck(&self, defender: CombatantId) -> bool {
        self.struck.contains(&defender)
    }

    pub(crate) fn can_strike(&self) -> bool {
        !self.struck.is_full()
    }

    /// Remembers a resolved contact; each defender is resolved at most once.
    pub(crate) fn record_contact(&mut self, defender: CombatantId, result: HitResult) {
        if self.struck.try_push(defender).is_err() {
            return;
        }
        self.attacked = Some(defender);
        if result.rank() > self.result.rank() {
            self.result = result;
        }
    }

    pub(crate) fn hit_data(&self, attacker: CombatantId, hit_result: HitResult) -> HitData {
        HitData {
            attacker,
            attacked: self.attacked,
            skill: self.skill.id,
            hit_result,
        }
    }

    pub(crate) fn stop_animation(&self, env: &CombatEnv<'_>) {
        if let Some(handle) = self.animation {
            env.stop(handle);
        }
    }

    /// Consumes one tick.
    pub(crate) fn advance(&mut self, combatant: &mut Combatant, env: &CombatEnv<'_>) -> Step {
        if !self.is_current_for(combatant) {
            return Step::Withdrawn;
        }

        self.elapsed += 1;
        self.fire_effects(combatant);
        if !self.is_current_for(combatant) {
            return Step::Withdrawn;
        }
        if combatant.was_attacked() {
            return self.abandon(combatant, env);
        }

        match self.wait.advance(combatant.state().get()) {
            WaitStatus::Rejected => return self.abandon(combatant, env),
            WaitStatus::Pending => {
                return Step::Running {
                    hitbox_open: self.phase == Phase::Active,
                };
            }
            WaitStatus::Completed => {}
        }

        match self.phase {
            Phase::Startup => self.enter_active(combatant, env),
            Phase::Active => self.end_active(combatant, env),
            Phase::Recovery => self.finish(combatant, env),
        }
    }

    fn fire_effects(&self, combatant: &mut Combatant) {
        let skill = Arc::clone(&self.skill);
        for effect in skill.frame_data.effects_at(self.elapsed) {
            if !self.is_current_for(combatant) {
                break;
            }
            (effect.effect)(combatant, &skill);
        }
    }

    fn enter_active(&mut self, combatant: &mut Combatant, env: &CombatEnv<'_>) -> Step {
        let state = combatant.state_mut();
        state.remove_state(EntityState::STARTUP);
        state.add_state(EntityState::ATTACK);
        self.phase = Phase::Active;
        self.wait = state.while_in_state(self.skill.frame_data.active, EntityState::ATTACK);

        tracing::debug!(
            combatant = %combatant.id(),
            skill = %self.skill.id,
            elapsed = self.elapsed,
            "active"
        );

        if self.wait.status() == WaitStatus::Completed {
            return self.end_active(combatant, env);
        }
        Step::Running { hitbox_open: true }
    }

    fn end_active(&mut self, combatant: &mut Combatant, env: &CombatEnv<'_>) -> Step {
        combatant.state_mut().remove_state(EntityState::ATTACK);
        let attacker = combatant.id();

        if let Some(next) = self.skill.links_into {
            self.stop_animation(env);
            return Step::Linked {
                finished: self.hit_data(attacker, self.result),
                next,
            };
        }

        let frame_data = &self.skill.frame_data;
        let trim = match self.result {
            HitResult::Blocked => frame_data.block_advantage,
            HitResult::Contact | HitResult::Counter => frame_data.contact,
            _ => 0,
        };
        let frames = frame_data.recovery.saturating_sub(trim);
        if frames == 0 {
            return self.finish(combatant, env);
        }

        let state = combatant.state_mut();
        state.add_state(EntityState::RECOVERY);
        self.phase = Phase::Recovery;
        self.wait = state.while_in_state(frames, EntityState::RECOVERY);

        tracing::debug!(
            combatant = %attacker,
            skill = %self.skill.id,
            frames,
            result = %self.result,
            "recovery"
        );
        Step::Running { hitbox_open: false }
    }

    fn finish(&mut self, combatant: &mut Combatant, env: &CombatEnv<'_>) -> Step {
        combatant.state_mut().remove_state(EntityState::RECOVERY);
        self.stop_animation(env);
        combatant.settle();

        tracing::debug!(
            combatant = %combatant.id(),
            skill = %self.skill.id,
            result = %self.result,
            elapsed = self.elapsed,
            "finished"
        );
        Step::Finished(self.hit_data(combatant.id(), self.result))
    }

    /// The watched state was cleared from outside: drop every phase bit this
    /// execution owns.
    fn abandon(&mut self, combatant: &mut Combatant, env: &CombatEnv<'_>) -> Step {
        combatant.state_mut().remove_state(EntityState::SKILL_PHASES);
        self.stop_animation(env);
        self.result = HitResult::Canceled;
        combatant.settle();

        tracing::debug!(
            combatant = %combatant.id(),
            skill = %self.skill.id,
            phase = %self.phase,
            "abandoned"
        );
        Step::Canceled(self.hit_data(combatant.id(), HitResult::Canceled))
    }
}
