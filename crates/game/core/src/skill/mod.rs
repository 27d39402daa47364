//! Skill definitions, frame data and the skill catalog.
//!
//! Skills are built once with [`SkillBuilder`], registered into a
//! [`SkillCatalog`] during content load and never mutated afterwards.
mod catalog;
mod character;
mod definition;
mod frame_data;

pub use catalog::{CatalogError, SkillCatalog};
pub use character::Character;
pub use definition::{
    BuildError, CancelEdge, GroundedType, Skill, SkillBuilder, SkillId, SkillKind,
};
pub use frame_data::{
    AnimationRef, Condition, EffectFn, FrameData, FrameDataBuilder, FrameEffect, Hitbox,
};
