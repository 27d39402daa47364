use crate::entity::CombatantId;

/// Locomotion and ground sensing owned by the host engine.
pub trait MovementOracle: Send + Sync {
    fn is_grounded(&self, combatant: CombatantId) -> bool;

    /// Turns `combatant` towards its current movement direction.
    fn face_movement_direction(&self, _combatant: CombatantId) {}
}
