//! Content factory for assembling a match from a data directory.

use std::path::{Path, PathBuf};

use fight_core::{Character, CombatConfig, SkillCatalog};

use crate::loaders::{CharacterLoader, ConfigLoader, LoadResult, SkillLoader};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.toml
/// └── characters.toml
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the validated skill catalog from `skills.toml`.
    pub fn load_skills(&self) -> LoadResult<SkillCatalog> {
        SkillLoader::load(&self.data_dir.join("skills.toml"))
    }

    /// Load the roster from `characters.toml`, resolved against `catalog`.
    pub fn load_characters(&self, catalog: &SkillCatalog) -> LoadResult<Vec<Character>> {
        CharacterLoader::load(&self.data_dir.join("characters.toml"), catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use fight_core::{MotionInput, SkillId};

    use super::*;

    fn bundled() -> ContentFactory {
        ContentFactory::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    #[test]
    fn bundled_content_loads() {
        let factory = bundled();
        let config = factory.load_config().unwrap();
        let catalog = factory.load_skills().unwrap();
        let characters = factory.load_characters(&catalog).unwrap();

        assert_eq!(config.tick_rate, 60);
        assert!(!catalog.is_empty());
        assert!(!characters.is_empty());
        for character in &characters {
            for (_, skill) in character.skills() {
                assert!(catalog.contains(*skill), "{} binds {}", character.name, skill);
            }
        }
    }

    #[test]
    fn bundled_fireball_is_a_quarter_circle() {
        let factory = bundled();
        let catalog = factory.load_skills().unwrap();
        let characters = factory.load_characters(&catalog).unwrap();

        let motions: Vec<&MotionInput> = characters[0].motions_for(SkillId(10)).collect();
        assert_eq!(motions, vec![&MotionInput::parse("236P").unwrap()]);
    }
}
