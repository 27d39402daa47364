//! Skill catalog loader.
//!
//! File format:
//! ```toml
//! [[skills]]
//! id = 1
//! name = "Jab"
//! frames = { startup = 3, active = 2, recovery = 5, hit_stun = 12 }
//! hitbox = { region = "High", origin = "RightArm" }
//! gatlings = [{ motion = "5K", skill = 2 }]
//! ```
//!
//! Frame effects and activation conditions are code, not data; attach them
//! by building the skill yourself from [`SkillSpec::builder`].

use std::path::Path;

use fight_core::{
    AnimationRef, FrameData, GroundedType, Hitbox, HitboxRegion, MotionInput, Skill, SkillBuilder,
    SkillCatalog, SkillId, SkillKind,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSpec {
    pub startup: u32,
    pub active: u32,
    pub recovery: u32,
    pub block_stun: u32,
    pub hit_stun: u32,
    pub block_advantage: u32,
    pub contact: u32,
    pub animation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitboxSpec {
    #[serde(default)]
    pub region: HitboxRegion,
    pub origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelSpec {
    /// Numpad notation, e.g. `"5K"` or `"236P"`.
    pub motion: String,
    pub skill: SkillId,
}

/// One `[[skills]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSpec {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: SkillKind,
    #[serde(default)]
    pub grounded: GroundedType,
    #[serde(default = "default_can_counter")]
    pub can_counter: bool,
    #[serde(default)]
    pub reversal: bool,
    #[serde(default)]
    pub gauge_required: u32,
    pub frames: FrameSpec,
    pub hitbox: HitboxSpec,
    #[serde(default)]
    pub gatlings: Vec<CancelSpec>,
    #[serde(default)]
    pub rekkas: Vec<CancelSpec>,
    #[serde(default)]
    pub links_into: Option<SkillId>,
}

fn default_can_counter() -> bool {
    true
}

impl SkillSpec {
    /// Builder pre-filled from this entry, ready for effects or a condition.
    pub fn builder(&self) -> LoadResult<SkillBuilder> {
        let frames = &self.frames;
        let mut frame_data = FrameData::builder()
            .startup(frames.startup)
            .active(frames.active)
            .recovery(frames.recovery)
            .block_stun(frames.block_stun)
            .hit_stun(frames.hit_stun)
            .block_advantage(frames.block_advantage)
            .contact(frames.contact)
            .hitbox(Hitbox::new(self.hitbox.region, self.hitbox.origin.clone()));
        if let Some(animation) = &frames.animation {
            frame_data = frame_data.animation(AnimationRef::new(animation.clone()));
        }

        let mut builder = Skill::builder(self.id, self.name.clone())
            .description(self.description.clone())
            .kind(self.kind)
            .grounded(self.grounded)
            .can_counter(self.can_counter)
            .reversal(self.reversal)
            .gauge_required(self.gauge_required)
            .frame_data(frame_data.build()?);

        for edge in &self.gatlings {
            builder = builder.gatling(parse_motion(self.id, &edge.motion)?, edge.skill);
        }
        for edge in &self.rekkas {
            builder = builder.rekka(parse_motion(self.id, &edge.motion)?, edge.skill);
        }
        if let Some(next) = self.links_into {
            builder = builder.links_into(next);
        }
        Ok(builder)
    }

    pub fn build(&self) -> LoadResult<Skill> {
        Ok(self.builder()?.build()?)
    }
}

fn parse_motion(skill: SkillId, notation: &str) -> LoadResult<MotionInput> {
    MotionInput::parse(notation)
        .map_err(|e| anyhow::anyhow!("{skill}: bad cancel motion {notation:?}: {e}"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SkillFile {
    skills: Vec<SkillSpec>,
}

/// Loader for skill catalogs from TOML files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load and validate a skill catalog from a TOML file.
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        let mut catalog = SkillCatalog::new();
        for spec in Self::parse_specs(content)? {
            catalog.register(spec.build()?)?;
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Raw entries, for callers that attach effects before registering.
    pub fn parse_specs(content: &str) -> LoadResult<Vec<SkillSpec>> {
        let file: SkillFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skills TOML: {}", e))?;
        Ok(file.skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKILLS: &str = r#"
[[skills]]
id = 1
name = "Jab"
frames = { startup = 3, active = 2, recovery = 5, hit_stun = 12, animation = "jab" }
hitbox = { origin = "RightArm" }
gatlings = [{ motion = "5K", skill = 2 }]

[[skills]]
id = 2
name = "Strong Kick"
frames = { startup = 6, active = 3, recovery = 12, block_advantage = 2 }
hitbox = { region = "Low", origin = "RightLeg" }

[[skills]]
id = 10
name = "Fireball"
kind = "Special"
gauge_required = 0
can_counter = false
frames = { startup = 10, active = 1, recovery = 20 }
hitbox = { origin = "Projectile" }
"#;

    #[test]
    fn loads_and_validates_catalog() {
        let catalog = SkillLoader::parse(SKILLS).unwrap();
        assert_eq!(catalog.len(), 3);

        let jab = catalog.get(SkillId(1)).unwrap();
        assert_eq!(jab.frame_data.total_frames(), 10);
        assert_eq!(jab.frame_data.hitbox.region, HitboxRegion::High);
        assert_eq!(jab.frame_data.animation, Some(AnimationRef::new("jab")));
        assert!(jab.gatlings_into(SkillId(2)));
        assert!(jab.can_counter);

        let kick = catalog.get(SkillId(2)).unwrap();
        assert_eq!(kick.frame_data.hitbox.region, HitboxRegion::Low);
        assert_eq!(kick.frame_data.block_advantage, 2);

        let fireball = catalog.get(SkillId(10)).unwrap();
        assert_eq!(fireball.kind, SkillKind::Special);
        assert!(!fireball.can_counter);
    }

    #[test]
    fn dangling_cancel_fails_validation() {
        let content = r#"
[[skills]]
id = 1
name = "Jab"
frames = { startup = 3, active = 2, recovery = 5 }
hitbox = { origin = "RightArm" }
rekkas = [{ motion = "236P", skill = 9 }]
"#;
        assert!(SkillLoader::parse(content).is_err());
    }

    #[test]
    fn malformed_motion_names_the_skill() {
        let content = r#"
[[skills]]
id = 4
name = "Bad"
frames = { startup = 1, active = 1, recovery = 1 }
hitbox = { origin = "RightArm" }
gatlings = [{ motion = "2[", skill = 4 }]
"#;
        let err = SkillLoader::parse(content).unwrap_err();
        assert!(err.to_string().contains("skill#4"));
    }

    #[test]
    fn overflowing_frame_counts_fail_to_load() {
        let content = r#"
[[skills]]
id = 5
name = "Endless"
frames = { startup = 4294967295, active = 1, recovery = 1 }
hitbox = { origin = "RightArm" }
"#;
        assert!(SkillLoader::parse(content).is_err());
    }
}
