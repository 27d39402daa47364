//! Write-once registry of skill definitions.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ErrorSeverity, GameError};

use super::{Skill, SkillId, SkillKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("skill {0} is already registered")]
    DuplicateSkill(SkillId),

    #[error("skill {from} references unregistered skill {to}")]
    UnknownReference { from: SkillId, to: SkillId },

    #[error("skill {from} gatlings into {to}, which is a {kind} skill")]
    GatlingTargetNotNormal {
        from: SkillId,
        to: SkillId,
        kind: SkillKind,
    },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CatalogError::DuplicateSkill(_) | CatalogError::UnknownReference { .. } => {
                ErrorSeverity::Fatal
            }
            CatalogError::GatlingTargetNotNormal { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CatalogError::DuplicateSkill(_) => "CATALOG_DUPLICATE_SKILL",
            CatalogError::UnknownReference { .. } => "CATALOG_UNKNOWN_REFERENCE",
            CatalogError::GatlingTargetNotNormal { .. } => "CATALOG_GATLING_TARGET_NOT_NORMAL",
        }
    }
}

/// Skill definitions keyed by id.
///
/// Populated during content load, then shared read-only behind an `Arc`
/// by every combatant's executions.
#[derive(Clone, Debug, Default)]
pub struct SkillCatalog {
    skills: HashMap<SkillId, Arc<Skill>>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, skill: Skill) -> Result<(), CatalogError> {
        if self.skills.contains_key(&skill.id) {
            return Err(CatalogError::DuplicateSkill(skill.id));
        }

        tracing::info!(skill = %skill.id, name = %skill.name, kind = %skill.kind, "registered skill");
        self.skills.insert(skill.id, Arc::new(skill));
        Ok(())
    }

    pub fn get(&self, id: SkillId) -> Option<&Arc<Skill>> {
        self.skills.get(&id)
    }

    pub fn contains(&self, id: SkillId) -> bool {
        self.skills.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Skill>> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Checks that every cancel edge and link resolves, and that gatlings
    /// only lead into normal skills.
    ///
    /// Skills are visited in id order so the reported error is stable.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut ids: Vec<SkillId> = self.skills.keys().copied().collect();
        ids.sort_unstable();

        for id in ids {
            let skill = &self.skills[&id];
            for to in skill.references() {
                if !self.contains(to) {
                    return Err(CatalogError::UnknownReference { from: id, to });
                }
            }
            for edge in &skill.gatlings {
                let kind = self.skills[&edge.skill].kind;
                if kind != SkillKind::Normal {
                    return Err(CatalogError::GatlingTargetNotNormal {
                        from: id,
                        to: edge.skill,
                        kind,
                    });
                }
            }
        }

        Ok(())
    }
}
