//! Frame-driven skill execution.
//!
//! The [`Arena`] owns every combatant and the shared [`SkillCatalog`]; it is
//! the only thing that advances time. Each [`Arena::tick`] runs two passes:
//!
//! 1. hit-stop freeze and stun countdown for every combatant,
//! 2. one step of every in-flight [`Execution`], in combatant order, with
//!    hitbox contacts resolved against the other combatants.
//!
//! Everything that happened is reported as [`CombatEvent`]s. Contacts of a
//! zero-startup skill land on its launch frame and are reported with the
//! following tick.

mod execution;

pub use execution::{Execution, Phase};

pub(crate) use execution::Step;

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::combat::{HitData, HitResult, resolve_contact};
use crate::config::CombatConfig;
use crate::entity::{Combatant, CombatantId};
use crate::env::CombatEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::input::InputEvent;
use crate::skill::{Character, SkillCatalog, SkillId};
use crate::state::{EntityState, Tick};

/// Outcome of asking a combatant to execute a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Launch {
    Started(SkillId),
    /// The chosen skill's activation condition failed (`HitResult::Unknown`).
    Refused(HitData),
}

/// Something observable that happened during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// A linked skill started without player input.
    Linked {
        tick: Tick,
        combatant: CombatantId,
        skill: SkillId,
        from: SkillId,
    },
    Contact {
        tick: Tick,
        attacker: CombatantId,
        defender: CombatantId,
        skill: SkillId,
        result: HitResult,
        stun: u32,
    },
    /// An execution settled: finished, abandoned or interrupted.
    Settled { tick: Tick, hit: HitData },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArenaError {
    #[error("arena is full ({0} combatants)")]
    Full(usize),

    #[error("unknown combatant {0}")]
    UnknownCombatant(CombatantId),
}

impl GameError for ArenaError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ArenaError::Full(_) => ErrorSeverity::Fatal,
            ArenaError::UnknownCombatant(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ArenaError::Full(_) => "ARENA_FULL",
            ArenaError::UnknownCombatant(_) => "ARENA_UNKNOWN_COMBATANT",
        }
    }
}

/// Lockstep driver for every combatant of a match.
#[derive(Debug)]
pub struct Arena {
    catalog: Arc<SkillCatalog>,
    config: CombatConfig,
    combatants: ArrayVec<Combatant, { CombatConfig::MAX_COMBATANTS }>,
    now: Tick,
    /// Contacts made on a launch frame, reported with the next tick.
    pending: Vec<CombatEvent>,
}

impl Arena {
    pub fn new(catalog: Arc<SkillCatalog>, config: CombatConfig) -> Self {
        Self {
            catalog,
            config,
            combatants: ArrayVec::new(),
            now: Tick::ZERO,
            pending: Vec::new(),
        }
    }

    pub fn spawn(&mut self, character: Arc<Character>) -> Result<CombatantId, ArenaError> {
        if self.combatants.is_full() {
            return Err(ArenaError::Full(self.combatants.len()));
        }

        let id = CombatantId(self.combatants.len() as u32);
        tracing::info!(combatant = %id, character = %character.name, "spawned");
        self.combatants.push(Combatant::new(id, character));
        Ok(id)
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<SkillCatalog> {
        &self.catalog
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.0 as usize)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.0 as usize)
    }

    pub fn record_input(&mut self, id: CombatantId, event: InputEvent) -> Result<(), ArenaError> {
        self.get_mut(id)?.record_input(event);
        Ok(())
    }

    /// Runs the priority list through the combatant's facade.
    pub fn execute_skill(
        &mut self,
        id: CombatantId,
        priority: &[SkillId],
        env: &CombatEnv<'_>,
    ) -> Result<Option<Launch>, ArenaError> {
        let catalog = Arc::clone(&self.catalog);
        let launch = self.get_mut(id)?.execute_skill(priority, &catalog, env);
        self.strike_on_launch(id, launch, env);
        Ok(launch)
    }

    /// Recognizes motions from the combatant's input and executes the best
    /// eligible match.
    pub fn execute_motion(
        &mut self,
        id: CombatantId,
        env: &CombatEnv<'_>,
    ) -> Result<Option<Launch>, ArenaError> {
        let catalog = Arc::clone(&self.catalog);
        let priority: Vec<SkillId> = self
            .get(id)?
            .recognize(&catalog, &self.config)
            .iter()
            .map(|m| m.skill)
            .collect();
        if priority.is_empty() {
            return Ok(None);
        }
        let launch = self.get_mut(id)?.execute_skill(&priority, &catalog, env);
        self.strike_on_launch(id, launch, env);
        Ok(launch)
    }

    /// Starts a new round: every combatant back to its default state.
    pub fn reset_round(&mut self, env: &CombatEnv<'_>) {
        for combatant in &mut self.combatants {
            combatant.reset(env);
        }
        self.pending.clear();
        tracing::info!(tick = %self.now, "round reset");
    }

    /// Advances the frame clock by one tick.
    pub fn tick(&mut self, env: &CombatEnv<'_>) -> Vec<CombatEvent> {
        self.now = self.now.next();
        let mut events = std::mem::take(&mut self.pending);

        let mut frozen = [false; CombatConfig::MAX_COMBATANTS];
        for (index, combatant) in self.combatants.iter_mut().enumerate() {
            frozen[index] = combatant.countdown();
        }

        for index in 0..self.combatants.len() {
            if frozen[index] {
                continue;
            }
            let Some(mut execution) = self.combatants[index].take_execution() else {
                continue;
            };

            let step = execution.advance(&mut self.combatants[index], env);
            match step {
                Step::Running { hitbox_open } => {
                    if hitbox_open {
                        self.resolve_contacts(index, &mut execution, env, &mut events);
                    }
                    self.combatants[index].restore_execution(execution);
                }
                Step::Finished(hit) | Step::Canceled(hit) => {
                    events.push(CombatEvent::Settled { tick: self.now, hit });
                }
                Step::Linked { finished, next } => {
                    events.push(CombatEvent::Settled {
                        tick: self.now,
                        hit: finished,
                    });
                    self.launch_link(index, next, finished.skill, env, &mut events);
                }
                Step::Withdrawn => execution.stop_animation(env),
            }
        }

        events
    }

    fn resolve_contacts(
        &mut self,
        index: usize,
        execution: &mut Execution,
        env: &CombatEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) {
        let attacker = self.combatants[index].id();
        let skill = Arc::clone(execution.skill());

        for contact in env.query_hitbox(attacker, &skill, execution.elapsed()) {
            if contact.defender == attacker || execution.has_struck(contact.defender) {
                continue;
            }
            if !execution.can_strike() {
                tracing::warn!(%attacker, skill = %skill.id, "contact limit reached");
                break;
            }
            let Some(defender) = self.combatants.get_mut(contact.defender.0 as usize) else {
                tracing::warn!(%attacker, defender = %contact.defender, "contact with unknown combatant");
                continue;
            };

            let outcome = resolve_contact(&skill, defender.state().get(), &contact, &self.config);
            if let Some(hit) = defender.on_skill_contacted(attacker, &outcome, env) {
                events.push(CombatEvent::Settled { tick: self.now, hit });
            }
            if self.config.contact_hit_stop > 0 {
                defender.set_hit_stop(self.config.contact_hit_stop);
            }

            execution.record_contact(contact.defender, outcome.result);
            let owner = &mut self.combatants[index];
            owner.on_skill_contact(skill.id, outcome.result);
            if self.config.contact_hit_stop > 0 {
                owner.set_hit_stop(self.config.contact_hit_stop);
            }

            events.push(CombatEvent::Contact {
                tick: self.now,
                attacker,
                defender: contact.defender,
                skill: skill.id,
                result: outcome.result,
                stun: outcome.stun,
            });
        }
    }

    /// A zero-startup skill is active on its launch frame, so its hitbox is
    /// checked right away rather than one tick late.
    fn strike_on_launch(&mut self, id: CombatantId, launch: Option<Launch>, env: &CombatEnv<'_>) {
        if !matches!(launch, Some(Launch::Started(_))) {
            return;
        }
        let mut events = std::mem::take(&mut self.pending);
        self.strike_if_active(id.0 as usize, env, &mut events);
        self.pending = events;
    }

    fn strike_if_active(
        &mut self,
        index: usize,
        env: &CombatEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) {
        let Some(mut execution) = self.combatants[index].take_execution() else {
            return;
        };
        if execution.phase() == Phase::Active && execution.elapsed() == 0 {
            self.resolve_contacts(index, &mut execution, env, events);
        }
        self.combatants[index].restore_execution(execution);
    }

    /// Starts the follow-up of a link, under the same activation condition
    /// and gauge rules as a requested skill. A refused link settles with
    /// `HitResult::Unknown`.
    fn launch_link(
        &mut self,
        index: usize,
        next: SkillId,
        from: SkillId,
        env: &CombatEnv<'_>,
        events: &mut Vec<CombatEvent>,
    ) {
        let combatant = &mut self.combatants[index];
        let Some(skill) = self.catalog.get(next).map(Arc::clone) else {
            tracing::warn!(combatant = %combatant.id(), skill = %next, "link into unregistered skill");
            combatant.settle();
            return;
        };

        let affordable = skill.gauge_required <= combatant.counters().gauge;
        if !affordable || !skill.frame_data.allows(combatant, &skill) {
            combatant.state_mut().remove_state(EntityState::ATTACK);
            combatant.settle();
            tracing::debug!(combatant = %combatant.id(), skill = %next, %from, "link refused");
            events.push(CombatEvent::Settled {
                tick: self.now,
                hit: HitData {
                    attacker: combatant.id(),
                    attacked: None,
                    skill: next,
                    hit_result: HitResult::Unknown,
                },
            });
            return;
        }

        combatant.launch(skill, Some(from), env);
        events.push(CombatEvent::Linked {
            tick: self.now,
            combatant: combatant.id(),
            skill: next,
            from,
        });
        self.strike_if_active(index, env, events);
    }

    fn get(&self, id: CombatantId) -> Result<&Combatant, ArenaError> {
        self.combatant(id).ok_or(ArenaError::UnknownCombatant(id))
    }

    fn get_mut(&mut self, id: CombatantId) -> Result<&mut Combatant, ArenaError> {
        self.combatant_mut(id)
            .ok_or(ArenaError::UnknownCombatant(id))
    }
}
