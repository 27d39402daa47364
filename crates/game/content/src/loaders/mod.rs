//! Content loaders for reading combat data from files.
//!
//! Every loader parses TOML into `fight-core` values and validates them
//! before returning, so a bad data file aborts startup rather than a match.

pub mod characters;
pub mod config;
pub mod factory;
pub mod skills;

pub use characters::{CharacterLoader, CharacterSpec};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use skills::{SkillLoader, SkillSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
