use crate::entity::CombatantId;
use crate::skill::AnimationRef;

/// Opaque handle to a loaded animation track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationHandle(pub u64);

/// Animation playback owned by the host engine.
pub trait AnimationOracle: Send + Sync {
    /// Loads `animation` for `owner`. `None` when the asset is unavailable.
    fn load(&self, owner: CombatantId, animation: &AnimationRef) -> Option<AnimationHandle>;
    fn play(&self, handle: AnimationHandle);
    fn stop(&self, handle: AnimationHandle);
    fn is_playing(&self, handle: AnimationHandle) -> bool;
}
