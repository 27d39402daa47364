use bitflags::bitflags;

bitflags! {
    /// Composite condition of a combatant.
    ///
    /// Each bit is an independent condition, so combinations such as
    /// `CROUCH | HITSTUN` are meaningful. `STARTUP`, `ATTACK` and `RECOVERY`
    /// are the phases of a single skill execution and are never set together.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct EntityState: u16 {
        const IDLE      = 0x0001;
        const WALK      = 0x0002;
        const DASH      = 0x0004;
        const SPRINT    = 0x0008;
        const HITSTUN   = 0x0010;
        const KNOCKDOWN = 0x0020;
        const BLOCK     = 0x0040;
        const CROUCH    = 0x0080;
        const JUMPING   = 0x0100;
        const MIDAIR    = 0x0200;
        const LANDING   = 0x0400;
        const STARTUP   = 0x0800;
        const ATTACK    = 0x1000;
        const RECOVERY  = 0x2000;
    }
}

impl EntityState {
    /// Bits owned by a running skill execution.
    pub const SKILL_PHASES: Self = Self::STARTUP.union(Self::ATTACK).union(Self::RECOVERY);

    /// Bits that mean the combatant is currently being punished.
    pub const ATTACKED: Self = Self::HITSTUN.union(Self::KNOCKDOWN);

    const NEGATIVE: Self = Self::SKILL_PHASES
        .union(Self::ATTACKED)
        .union(Self::JUMPING)
        .union(Self::LANDING)
        .union(Self::DASH);

    const NEUTRAL: Self = Self::IDLE
        .union(Self::CROUCH)
        .union(Self::WALK)
        .union(Self::JUMPING)
        .union(Self::MIDAIR)
        .union(Self::LANDING);

    /// True when the combatant cannot freely act, ignoring the `exclude` bits.
    pub fn is_negative_except(self, exclude: Self) -> bool {
        self.intersects(Self::NEGATIVE.difference(exclude))
    }

    pub fn is_negative(self) -> bool {
        self.is_negative_except(Self::empty())
    }

    /// A hit landing in this state may become a counter-hit.
    pub fn is_counterable(self) -> bool {
        self.contains(Self::STARTUP)
    }

    pub fn is_punishable(self) -> bool {
        self.intersects(Self::ATTACK.union(Self::RECOVERY))
    }

    pub fn is_aggressive(self) -> bool {
        self.intersects(Self::SKILL_PHASES)
    }

    pub fn is_neutral(self) -> bool {
        self.intersects(Self::NEUTRAL)
    }

    pub fn was_attacked(self) -> bool {
        self.intersects(Self::ATTACKED)
    }
}
