//! Combatant facade.
//!
//! A [`Combatant`] composes one [`StateMachine`], one [`Counters`] block, an
//! input history and at most one in-flight [`Execution`]. Input layers, AI
//! and the [`Arena`](crate::engine::Arena) driver all act through it.
mod counters;

pub use counters::Counters;

use std::fmt;
use std::sync::Arc;

use crate::combat::{ContactOutcome, HitData, HitResult};
use crate::config::CombatConfig;
use crate::engine::{Execution, Launch};
use crate::env::CombatEnv;
use crate::input::{InputEvent, InputHistory, MotionMatch, validate_motion};
use crate::skill::{Character, Skill, SkillCatalog, SkillId};
use crate::state::{EntityState, StateMachine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "combatant#{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Combatant {
    id: CombatantId,
    character: Arc<Character>,
    state: StateMachine,
    counters: Counters,
    input: InputHistory,
    execution: Option<Execution>,
    /// Skill that most recently made contact; its gatlings are open.
    last_landed: Option<SkillId>,
    /// Bumped on every launch and interrupt; executions compare against it.
    serial: u64,
}

impl Combatant {
    pub fn new(id: CombatantId, character: Arc<Character>) -> Self {
        let counters = Counters::new(&character);
        Self {
            id,
            character,
            state: StateMachine::default(),
            counters,
            input: InputHistory::new(),
            execution: None,
            last_landed: None,
            serial: 0,
        }
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn character(&self) -> &Arc<Character> {
        &self.character
    }

    pub fn state(&self) -> &StateMachine {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StateMachine {
        &mut self.state
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn counters_mut(&mut self) -> &mut Counters {
        &mut self.counters
    }

    pub fn input(&self) -> &InputHistory {
        &self.input
    }

    pub fn execution(&self) -> Option<&Execution> {
        self.execution.as_ref()
    }

    pub fn last_landed(&self) -> Option<SkillId> {
        self.last_landed
    }

    pub(crate) fn serial(&self) -> u64 {
        self.serial
    }

    pub(crate) fn take_execution(&mut self) -> Option<Execution> {
        self.execution.take()
    }

    /// Puts a stepped execution back unless something newer replaced it.
    pub(crate) fn restore_execution(&mut self, execution: Execution) {
        if self.execution.is_none() && execution.is_current_for(self) {
            self.execution = Some(execution);
        }
    }

    // ===== predicates =====

    /// Cannot act freely: in a skill phase, stunned, airborne transition or
    /// dashing.
    pub fn is_negative(&self) -> bool {
        self.state.get().is_negative() || self.counters.is_stunned()
    }

    /// A hit landing now would be a counter-hit.
    pub fn can_counter(&self) -> bool {
        self.state.get().is_counterable()
    }

    pub fn was_attacked(&self) -> bool {
        self.state.get().was_attacked()
    }

    pub fn is_attacking(&self) -> bool {
        self.state.get().is_aggressive()
    }

    pub fn is_neutral(&self) -> bool {
        self.state.get().is_neutral()
    }

    pub fn counter(&self) -> Option<CombatantId> {
        self.counters.counter
    }

    // ===== timers =====

    /// Sets the hit-stun countdown.
    ///
    /// Positive frames raise `HITSTUN` and drop the skill phase bits, so an
    /// in-flight execution abandons on its next step even if the stun has
    /// already run out by then. Zero releases the combatant.
    pub fn set_hit_stun(&mut self, frames: u32) {
        self.counters.hit_stun = frames;
        if frames == 0 {
            self.state.remove_state(EntityState::HITSTUN);
            self.settle();
            return;
        }

        self.last_landed = None;
        self.state.remove_state(EntityState::IDLE | EntityState::SKILL_PHASES);
        if !self.state.is_state(EntityState::HITSTUN) {
            self.state.add_state(EntityState::HITSTUN);
        }
    }

    /// Adds to (rather than replaces) the block-stun countdown.
    pub fn add_block_stun(&mut self, frames: u32) {
        self.counters.block_stun = self.counters.block_stun.saturating_add(frames);
    }

    pub fn clear_block_stun(&mut self) {
        self.counters.block_stun = 0;
    }

    pub fn set_hit_stop(&mut self, frames: u32) {
        self.counters.hit_stop = frames;
    }

    pub fn clear_hit_stop(&mut self) {
        self.counters.hit_stop = 0;
    }

    /// Per-tick countdown of hit-stop and stun. Returns true while frozen
    /// in hit-stop, in which case nothing else advances this tick.
    pub(crate) fn countdown(&mut self) -> bool {
        if self.counters.hit_stop > 0 {
            self.counters.hit_stop -= 1;
            return true;
        }

        if self.counters.hit_stun > 0 {
            self.counters.hit_stun -= 1;
            if self.counters.hit_stun == 0 {
                self.state.remove_state(EntityState::HITSTUN);
                self.settle();
            }
        }
        if self.counters.block_stun > 0 {
            self.counters.block_stun -= 1;
        }
        false
    }

    /// Falls back to `IDLE` once nothing keeps the combatant busy.
    pub(crate) fn settle(&mut self) {
        if self.execution.is_none() {
            self.last_landed = None;
        }
        if !self.is_negative() && !self.state.is_state(EntityState::IDLE) {
            self.state.add_state(EntityState::IDLE);
        }
    }

    // ===== contact callbacks =====

    /// Called on the attacker when its skill touched a defender.
    pub fn on_skill_contact(&mut self, skill: SkillId, result: HitResult) {
        if result.is_hit() {
            self.last_landed = Some(skill);
        }
    }

    /// Called on the defender with the resolved outcome of a contact.
    ///
    /// Returns the interrupted execution's result when the hit cut one short.
    pub fn on_skill_contacted(
        &mut self,
        attacker: CombatantId,
        outcome: &ContactOutcome,
        env: &CombatEnv<'_>,
    ) -> Option<HitData> {
        if outcome.result == HitResult::Blocked {
            self.add_block_stun(outcome.stun);
            return None;
        }

        let interrupted = self.interrupt(env);
        self.set_hit_stun(outcome.stun);
        if outcome.result == HitResult::Counter {
            self.counters.counter = Some(attacker);
        }

        tracing::debug!(
            defender = %self.id,
            %attacker,
            result = %outcome.result,
            hit_stun = outcome.stun,
            "contacted"
        );
        interrupted
    }

    /// Cancels the in-flight execution, if any, clearing its phase bits.
    pub fn interrupt(&mut self, env: &CombatEnv<'_>) -> Option<HitData> {
        self.serial += 1;
        self.last_landed = None;
        self.state.remove_state(EntityState::SKILL_PHASES);
        let execution = self.execution.take();
        self.settle();

        let execution = execution?;
        execution.stop_animation(env);
        Some(execution.hit_data(self.id, HitResult::Canceled))
    }

    // ===== input =====

    pub fn record_input(&mut self, event: InputEvent) {
        self.input.record(event);
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Skills whose motion the recent input satisfies, longest first.
    pub fn recognize<'a>(
        &'a self,
        catalog: &SkillCatalog,
        config: &CombatConfig,
    ) -> Vec<MotionMatch<'a>> {
        validate_motion(
            &self.input,
            &self.character,
            catalog,
            self.counters.gauge,
            config,
        )
    }

    // ===== execution =====

    /// Starts the first eligible skill of `priority`.
    ///
    /// Candidates are walked in priority order. A skill is eligible when its
    /// grounded type fits, the gauge covers its cost and, while the combatant
    /// is negative, it is a gatling of the skill that just landed or a rekka
    /// of the skill in flight. Nothing starts while being hit or stunned.
    pub fn execute_skill(
        &mut self,
        priority: &[SkillId],
        catalog: &SkillCatalog,
        env: &CombatEnv<'_>,
    ) -> Option<Launch> {
        if self.was_attacked() || self.counters.is_stunned() {
            tracing::trace!(combatant = %self.id, "cannot act while stunned");
            return None;
        }

        let in_flight = self.execution.as_ref().filter(|e| e.is_cancelable());
        let landed = in_flight
            .filter(|e| self.last_landed == Some(e.skill().id))
            .map(|e| Arc::clone(e.skill()));
        let current = in_flight.map(|e| Arc::clone(e.skill()));
        let negative = self.is_negative();
        let grounded = env.is_grounded(self.id);

        let chosen = priority.iter().find_map(|&id| {
            let Some(skill) = catalog.get(id) else {
                tracing::warn!(combatant = %self.id, skill = %id, "requested unregistered skill");
                return None;
            };

            let is_cancel = landed.as_ref().is_some_and(|s| s.gatlings_into(id))
                || current.as_ref().is_some_and(|s| s.rekkas_into(id));
            if negative && !is_cancel {
                return None;
            }
            if !skill.grounded.allows(grounded) || skill.gauge_required > self.counters.gauge {
                return None;
            }
            Some(Arc::clone(skill))
        })?;

        if !chosen.frame_data.allows(self, &chosen) {
            self.state.remove_state(EntityState::ATTACK);
            tracing::debug!(combatant = %self.id, skill = %chosen.id, "condition not met");
            return Some(Launch::Refused(HitData {
                attacker: self.id,
                attacked: None,
                skill: chosen.id,
                hit_result: HitResult::Unknown,
            }));
        }

        env.face_movement_direction(self.id);
        let id = chosen.id;
        if !self.launch(chosen, None, env) {
            return None;
        }
        Some(Launch::Started(id))
    }

    /// Replaces any in-flight execution with a fresh one of `skill`.
    ///
    /// The superseded execution loses its animation and phase bits and never
    /// reaches recovery. Returns false, touching nothing, when the gauge
    /// cannot pay for `skill`.
    pub(crate) fn launch(
        &mut self,
        skill: Arc<Skill>,
        linked_from: Option<SkillId>,
        env: &CombatEnv<'_>,
    ) -> bool {
        if !self.counters.spend_gauge(skill.gauge_required) {
            tracing::warn!(
                combatant = %self.id,
                skill = %skill.id,
                cost = skill.gauge_required,
                gauge = self.counters.gauge,
                "gauge cannot pay for launch"
            );
            return false;
        }

        if let Some(previous) = self.execution.take() {
            previous.stop_animation(env);
            self.state.remove_state(EntityState::SKILL_PHASES);
            tracing::debug!(
                combatant = %self.id,
                from = %previous.skill().id,
                to = %skill.id,
                "canceled into"
            );
        }

        self.serial += 1;
        self.last_landed = None;
        self.counters.previous_skill = Some(skill.id);

        tracing::debug!(
            combatant = %self.id,
            skill = %skill.id,
            name = %skill.name,
            linked_from = ?linked_from,
            "launch"
        );
        let serial = self.serial;
        self.execution = Execution::begin(self, skill, serial, linked_from, env);
        true
    }

    /// Round reset: default state, full counters, no execution or input.
    pub fn reset(&mut self, env: &CombatEnv<'_>) {
        if let Some(execution) = self.execution.take() {
            execution.stop_animation(env);
        }
        self.serial += 1;
        self.last_landed = None;
        self.counters.reset();
        self.input.clear();
        self.state.reset_state();
    }
}
