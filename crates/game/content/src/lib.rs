//! Data-driven combat content and loaders.
//!
//! This crate reads the TOML files a match is assembled from:
//! - Combat configuration (stun multipliers, motion window, hit-stop)
//! - Skill catalogs (frame data, hitbox region, cancel edges)
//! - Character rosters (air limits and motion bindings)
//!
//! Loaded content is handed to `fight-core` as plain values; nothing here
//! takes part in the simulation itself.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CharacterLoader, CharacterSpec, ConfigLoader, ContentFactory, SkillLoader, SkillSpec,
};
