use std::fmt;

use crate::error::{ErrorSeverity, GameError};
use crate::input::MotionInput;

use super::FrameData;

/// Explicit skill identifier, resolved through the catalog by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub u32);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skill#{}", self.0)
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum SkillKind {
    #[default]
    Normal,
    Special,
    Super,
}

/// Where a skill may be started from.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GroundedType {
    #[default]
    Ground,
    AirOk,
    AirOnly,
}

impl GroundedType {
    pub fn allows(self, grounded: bool) -> bool {
        match self {
            GroundedType::Ground => grounded,
            GroundedType::AirOk => true,
            GroundedType::AirOnly => !grounded,
        }
    }
}

/// Follow-up reachable from a skill, keyed by the motion that requests it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CancelEdge {
    pub motion: MotionInput,
    pub skill: SkillId,
}

/// Errors produced while assembling skills and frame data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("frame data has no hitbox")]
    MissingHitbox,

    #[error("skill {0} has no frame data")]
    MissingFrameData(SkillId),

    #[error("skill {0} has an empty name")]
    EmptyName(SkillId),

    #[error("frame effect at tick {at} never fires (skill lasts {total} ticks)")]
    EffectOutOfRange { at: u32, total: u32 },

    #[error("frame counts overflow a tick counter")]
    FrameOverflow,
}

impl GameError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            BuildError::MissingHitbox => "SKILL_MISSING_HITBOX",
            BuildError::MissingFrameData(_) => "SKILL_MISSING_FRAME_DATA",
            BuildError::EmptyName(_) => "SKILL_EMPTY_NAME",
            BuildError::EffectOutOfRange { .. } => "SKILL_EFFECT_OUT_OF_RANGE",
            BuildError::FrameOverflow => "SKILL_FRAME_OVERFLOW",
        }
    }
}

/// Immutable skill definition.
///
/// Cancel edges reference other skills by id and are resolved lazily at
/// execution time, so forward references are allowed.
#[derive(Clone, Debug)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    pub kind: SkillKind,
    pub frame_data: FrameData,
    pub grounded: GroundedType,
    pub can_counter: bool,
    pub is_reversal: bool,
    pub gauge_required: u32,
    /// On-contact cancels.
    pub gatlings: Vec<CancelEdge>,
    /// Cancels usable any time before recovery completes.
    pub rekkas: Vec<CancelEdge>,
    /// Skill launched unconditionally when the active phase ends.
    pub links_into: Option<SkillId>,
}

impl Skill {
    pub fn builder(id: SkillId, name: impl Into<String>) -> SkillBuilder {
        SkillBuilder {
            id,
            name: name.into(),
            description: String::new(),
            kind: SkillKind::default(),
            frame_data: None,
            grounded: GroundedType::default(),
            can_counter: true,
            is_reversal: false,
            gauge_required: 0,
            gatlings: Vec::new(),
            rekkas: Vec::new(),
            links_into: None,
        }
    }

    pub fn gatlings_into(&self, id: SkillId) -> bool {
        self.gatlings.iter().any(|edge| edge.skill == id)
    }

    pub fn rekkas_into(&self, id: SkillId) -> bool {
        self.rekkas.iter().any(|edge| edge.skill == id)
    }

    /// Every skill id referenced by a cancel edge or link.
    pub fn references(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.gatlings
            .iter()
            .chain(&self.rekkas)
            .map(|edge| edge.skill)
            .chain(self.links_into)
    }
}

pub struct SkillBuilder {
    id: SkillId,
    name: String,
    description: String,
    kind: SkillKind,
    frame_data: Option<FrameData>,
    grounded: GroundedType,
    can_counter: bool,
    is_reversal: bool,
    gauge_required: u32,
    gatlings: Vec<CancelEdge>,
    rekkas: Vec<CancelEdge>,
    links_into: Option<SkillId>,
}

impl SkillBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn kind(mut self, kind: SkillKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn frame_data(mut self, frame_data: FrameData) -> Self {
        self.frame_data = Some(frame_data);
        self
    }

    pub fn grounded(mut self, grounded: GroundedType) -> Self {
        self.grounded = grounded;
        self
    }

    pub fn can_counter(mut self, can_counter: bool) -> Self {
        self.can_counter = can_counter;
        self
    }

    pub fn reversal(mut self, is_reversal: bool) -> Self {
        self.is_reversal = is_reversal;
        self
    }

    pub fn gauge_required(mut self, gauge: u32) -> Self {
        self.gauge_required = gauge;
        self
    }

    pub fn gatling(mut self, motion: MotionInput, skill: SkillId) -> Self {
        self.gatlings.push(CancelEdge { motion, skill });
        self
    }

    pub fn rekka(mut self, motion: MotionInput, skill: SkillId) -> Self {
        self.rekkas.push(CancelEdge { motion, skill });
        self
    }

    pub fn links_into(mut self, skill: SkillId) -> Self {
        self.links_into = Some(skill);
        self
    }

    pub fn build(self) -> Result<Skill, BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::EmptyName(self.id));
        }
        let frame_data = self
            .frame_data
            .ok_or(BuildError::MissingFrameData(self.id))?;

        Ok(Skill {
            id: self.id,
            name: self.name,
            description: self.description,
            kind: self.kind,
            frame_data,
            grounded: self.grounded,
            can_counter: self.can_counter,
            is_reversal: self.is_reversal,
            gauge_required: self.gauge_required,
            gatlings: self.gatlings,
            rekkas: self.rekkas,
            links_into: self.links_into,
        })
    }
}
