/// Combat configuration constants and tunable parameters.
///
/// Stun multipliers are stored as per-mille integers so that every scaled
/// frame count is computed with integer arithmetic and stays deterministic
/// across platforms.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Hit-stun and block-stun multiplier applied to crouching defenders (‰).
    pub crouch_stun_permille: u32,

    /// Hit-stun multiplier applied on a counter-hit (‰).
    pub counter_stun_permille: u32,

    /// Only input entries that began within this many milliseconds of the
    /// newest entry take part in motion recognition.
    pub motion_window_millis: u64,

    /// Hit-stop frames applied to both parties when a hit or block lands.
    pub contact_hit_stop: u32,

    /// Frame clock rate in ticks per second.
    pub tick_rate: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_INPUT_HISTORY: usize = 32;
    pub const MAX_COMBATANTS: usize = 8;
    pub const MAX_CONTACTS_PER_EXECUTION: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CROUCH_STUN_PERMILLE: u32 = 1250;
    pub const DEFAULT_COUNTER_STUN_PERMILLE: u32 = 1628;
    pub const DEFAULT_MOTION_WINDOW_MILLIS: u64 = 1000;
    pub const DEFAULT_CONTACT_HIT_STOP: u32 = 0;
    pub const DEFAULT_TICK_RATE: u32 = 60;

    pub fn new() -> Self {
        Self {
            crouch_stun_permille: Self::DEFAULT_CROUCH_STUN_PERMILLE,
            counter_stun_permille: Self::DEFAULT_COUNTER_STUN_PERMILLE,
            motion_window_millis: Self::DEFAULT_MOTION_WINDOW_MILLIS,
            contact_hit_stop: Self::DEFAULT_CONTACT_HIT_STOP,
            tick_rate: Self::DEFAULT_TICK_RATE,
        }
    }

    pub fn with_contact_hit_stop(mut self, frames: u32) -> Self {
        self.contact_hit_stop = frames;
        self
    }

    pub fn with_motion_window(mut self, millis: u64) -> Self {
        self.motion_window_millis = millis;
        self
    }

    /// Scales a frame count by a per-mille multiplier, rounding down.
    pub fn scale(frames: u32, permille: u32) -> u32 {
        let scaled = frames as u64 * permille as u64 / 1000;
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
