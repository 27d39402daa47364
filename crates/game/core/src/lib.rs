//! Deterministic fighting-game combat core.
//!
//! `fight-core` holds the rules deciding what a combatant may do on any tick:
//! the bitflag [`state`] machine, motion [`input`] recognition, [`skill`]
//! frame data and the [`engine`] that runs executions against a fixed frame
//! clock. All time flows through [`engine::Arena::tick`]; host systems
//! (animation, hitboxes, locomotion) are reached through the oracles in
//! [`env`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod entity;
pub mod env;
pub mod error;
pub mod input;
pub mod skill;
pub mod state;

pub use combat::{Contact, ContactOutcome, HitData, HitResult, HitboxRegion, resolve_contact};
pub use config::CombatConfig;
pub use engine::{Arena, ArenaError, CombatEvent, Execution, Launch, Phase};
pub use entity::{Combatant, CombatantId, Counters};
pub use env::{
    AnimationHandle, AnimationOracle, CombatEnv, Env, HitboxOracle, MovementOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use input::{
    Button, HeldInput, InputBits, InputChange, InputEvent, InputHistory, Motion, MotionInput,
    MotionMatch, MotionStep, NotationError, validate_motion,
};
pub use skill::{
    AnimationRef, BuildError, CancelEdge, CatalogError, Character, FrameData, FrameDataBuilder,
    GroundedType, Hitbox, Skill, SkillBuilder, SkillCatalog, SkillId, SkillKind,
};
pub use state::{EntityState, StateChange, StateMachine, StateObserver, StateWait, Tick, WaitStatus};
