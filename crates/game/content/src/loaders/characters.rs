//! Character roster loader.

use std::path::Path;

use fight_core::{Character, MotionInput, SkillCatalog, SkillId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveSpec {
    pub motion: String,
    pub skill: SkillId,
}

/// One `[[characters]]` entry. Air limits default to the character defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSpec {
    pub name: String,
    #[serde(default)]
    pub max_air_options: Option<u8>,
    #[serde(default)]
    pub max_air_jumps: Option<u8>,
    #[serde(default)]
    pub max_air_dashes: Option<u8>,
    #[serde(default)]
    pub moves: Vec<MoveSpec>,
}

impl CharacterSpec {
    /// Builds the character, checking every move against `catalog`.
    pub fn build(&self, catalog: &SkillCatalog) -> LoadResult<Character> {
        let mut character = Character::new(self.name.clone());
        if let Some(options) = self.max_air_options {
            character.max_air_options = options;
        }
        if let Some(jumps) = self.max_air_jumps {
            character.max_air_jumps = jumps;
        }
        if let Some(dashes) = self.max_air_dashes {
            character.max_air_dashes = dashes;
        }

        for entry in &self.moves {
            if !catalog.contains(entry.skill) {
                anyhow::bail!(
                    "{}: move {:?} binds unknown {}",
                    self.name,
                    entry.motion,
                    entry.skill
                );
            }
            let motion = MotionInput::parse(&entry.motion).map_err(|e| {
                anyhow::anyhow!("{}: bad motion {:?}: {}", self.name, entry.motion, e)
            })?;
            character.bind(motion, entry.skill);
        }
        Ok(character)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CharacterFile {
    characters: Vec<CharacterSpec>,
}

/// Loader for character rosters from TOML files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load every character of a roster file, resolving moves in `catalog`.
    pub fn load(path: &Path, catalog: &SkillCatalog) -> LoadResult<Vec<Character>> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    pub fn parse(content: &str, catalog: &SkillCatalog) -> LoadResult<Vec<Character>> {
        let file: CharacterFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse characters TOML: {}", e))?;

        let characters = file
            .characters
            .iter()
            .map(|spec| spec.build(catalog))
            .collect::<LoadResult<Vec<_>>>()?;
        tracing::info!(count = characters.len(), "loaded characters");
        Ok(characters)
    }
}

#[cfg(test)]
mod tests {
    use fight_core::{FrameData, Hitbox, HitboxRegion, Skill};

    use super::*;

    fn catalog() -> SkillCatalog {
        let mut catalog = SkillCatalog::new();
        for id in [1, 10] {
            let frame_data = FrameData::builder()
                .startup(3)
                .active(2)
                .recovery(5)
                .hitbox(Hitbox::new(HitboxRegion::High, "RightArm"))
                .build()
                .unwrap();
            catalog
                .register(
                    Skill::builder(SkillId(id), format!("skill-{id}"))
                        .frame_data(frame_data)
                        .build()
                        .unwrap(),
                )
                .unwrap();
        }
        catalog
    }

    #[test]
    fn binds_moves_and_overrides_air_limits() {
        let content = r#"
[[characters]]
name = "Ryu"
max_air_jumps = 2
moves = [
    { motion = "5P", skill = 1 },
    { motion = "236P", skill = 10 },
]
"#;
        let characters = CharacterLoader::parse(content, &catalog()).unwrap();
        assert_eq!(characters.len(), 1);

        let ryu = &characters[0];
        assert_eq!(ryu.name, "Ryu");
        assert_eq!(ryu.max_air_jumps, 2);
        assert_eq!(ryu.max_air_dashes, Character::DEFAULT_MAX_AIR_DASHES);
        assert_eq!(ryu.skills().len(), 2);
        assert_eq!(ryu.motions_for(SkillId(10)).count(), 1);
    }

    #[test]
    fn unknown_skill_is_rejected() {
        let content = r#"
[[characters]]
name = "Ken"
moves = [{ motion = "623P", skill = 99 }]
"#;
        let err = CharacterLoader::parse(content, &catalog()).unwrap_err();
        assert!(err.to_string().contains("skill#99"));
    }
}
