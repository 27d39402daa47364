use crate::input::MotionInput;

use super::SkillId;

/// A playable character: its motion table and air-mobility limits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Character {
    pub name: String,
    pub max_air_options: u8,
    pub max_air_jumps: u8,
    pub max_air_dashes: u8,
    skills: Vec<(MotionInput, SkillId)>,
}

impl Character {
    pub const DEFAULT_MAX_AIR_OPTIONS: u8 = 2;
    pub const DEFAULT_MAX_AIR_JUMPS: u8 = 1;
    pub const DEFAULT_MAX_AIR_DASHES: u8 = 1;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_air_options: Self::DEFAULT_MAX_AIR_OPTIONS,
            max_air_jumps: Self::DEFAULT_MAX_AIR_JUMPS,
            max_air_dashes: Self::DEFAULT_MAX_AIR_DASHES,
            skills: Vec::new(),
        }
    }

    /// Binds `motion` to `skill`. The same skill may be bound to several
    /// motions.
    pub fn bind(&mut self, motion: MotionInput, skill: SkillId) {
        self.skills.push((motion, skill));
    }

    pub fn with_skill(mut self, motion: MotionInput, skill: SkillId) -> Self {
        self.bind(motion, skill);
        self
    }

    pub fn skills(&self) -> &[(MotionInput, SkillId)] {
        &self.skills
    }

    pub fn motions_for(&self, skill: SkillId) -> impl Iterator<Item = &MotionInput> {
        self.skills
            .iter()
            .filter(move |(_, id)| *id == skill)
            .map(|(motion, _)| motion)
    }
}
