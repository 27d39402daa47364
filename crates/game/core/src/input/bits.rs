//! Decoded direction and button bits.

use bitflags::bitflags;

bitflags! {
    /// Union of held directions and buttons, relative to the combatant's
    /// facing (`FORWARD` always points at the opponent side).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct InputBits: u16 {
        const UP      = 1 << 0;
        const DOWN    = 1 << 1;
        const BACK    = 1 << 2;
        const FORWARD = 1 << 3;

        const PUNCH   = 1 << 4;
        const KICK    = 1 << 5;
        const SLASH   = 1 << 6;
        const HEAVY   = 1 << 7;
        const DUST    = 1 << 8;
        const DASH    = 1 << 9;
        const SWEEP   = 1 << 10;
        const ROMAN   = 1 << 11;
        const BURST   = 1 << 12;
    }
}

impl InputBits {
    pub const DIRECTIONS: Self = Self::UP
        .union(Self::DOWN)
        .union(Self::BACK)
        .union(Self::FORWARD);

    pub const BUTTONS: Self = Self::all().difference(Self::DIRECTIONS);

    pub fn direction(self) -> Self {
        self.intersection(Self::DIRECTIONS)
    }

    pub fn buttons(self) -> Self {
        self.intersection(Self::BUTTONS)
    }

    /// No direction held.
    pub fn is_neutral(self) -> bool {
        self.direction().is_empty()
    }

    /// Iterates the individual buttons contained in these bits.
    pub fn iter_buttons(self) -> impl Iterator<Item = Button> {
        <Button as strum::IntoEnumIterator>::iter().filter(move |b| self.contains(b.bit()))
    }
}

/// Numpad direction notation (`5` is neutral, `6` is forward).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Motion {
    DownBack = 1,
    Down = 2,
    DownForward = 3,
    Back = 4,
    Neutral = 5,
    Forward = 6,
    UpBack = 7,
    Up = 8,
    UpForward = 9,
}

impl Motion {
    pub fn bits(self) -> InputBits {
        match self {
            Motion::DownBack => InputBits::DOWN | InputBits::BACK,
            Motion::Down => InputBits::DOWN,
            Motion::DownForward => InputBits::DOWN | InputBits::FORWARD,
            Motion::Back => InputBits::BACK,
            Motion::Neutral => InputBits::empty(),
            Motion::Forward => InputBits::FORWARD,
            Motion::UpBack => InputBits::UP | InputBits::BACK,
            Motion::Up => InputBits::UP,
            Motion::UpForward => InputBits::UP | InputBits::FORWARD,
        }
    }

    /// Resolves the direction part of `bits`.
    ///
    /// Opposing directions held together cancel out to neutral on that axis.
    pub fn from_bits(bits: InputBits) -> Motion {
        let vertical = match (bits.contains(InputBits::UP), bits.contains(InputBits::DOWN)) {
            (true, false) => 1,
            (false, true) => -1,
            _ => 0,
        };
        let horizontal = match (
            bits.contains(InputBits::FORWARD),
            bits.contains(InputBits::BACK),
        ) {
            (true, false) => 1,
            (false, true) => -1,
            _ => 0,
        };

        match (vertical, horizontal) {
            (-1, -1) => Motion::DownBack,
            (-1, 0) => Motion::Down,
            (-1, _) => Motion::DownForward,
            (0, -1) => Motion::Back,
            (0, 0) => Motion::Neutral,
            (0, _) => Motion::Forward,
            (_, -1) => Motion::UpBack,
            (_, 0) => Motion::Up,
            _ => Motion::UpForward,
        }
    }

    pub fn from_digit(digit: char) -> Option<Motion> {
        Some(match digit {
            '1' => Motion::DownBack,
            '2' => Motion::Down,
            '3' => Motion::DownForward,
            '4' => Motion::Back,
            '5' => Motion::Neutral,
            '6' => Motion::Forward,
            '7' => Motion::UpBack,
            '8' => Motion::Up,
            '9' => Motion::UpForward,
            _ => return None,
        })
    }

    pub fn digit(self) -> char {
        char::from(b'0' + self as u8)
    }

    pub fn is_diagonal(self) -> bool {
        self.bits().bits().count_ones() == 2
    }
}

/// Attack and system buttons with their notation tokens.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Button {
    #[strum(serialize = "P")]
    Punch,
    #[strum(serialize = "K")]
    Kick,
    #[strum(serialize = "S")]
    Slash,
    #[strum(serialize = "HS")]
    Heavy,
    #[strum(serialize = "DT")]
    Dust,
    #[strum(serialize = "DS")]
    Dash,
    #[strum(serialize = "SP")]
    Sweep,
    #[strum(serialize = "RC")]
    Roman,
    #[strum(serialize = "BR")]
    Burst,
}

impl Button {
    pub fn bit(self) -> InputBits {
        match self {
            Button::Punch => InputBits::PUNCH,
            Button::Kick => InputBits::KICK,
            Button::Slash => InputBits::SLASH,
            Button::Heavy => InputBits::HEAVY,
            Button::Dust => InputBits::DUST,
            Button::Dash => InputBits::DASH,
            Button::Sweep => InputBits::SWEEP,
            Button::Roman => InputBits::ROMAN,
            Button::Burst => InputBits::BURST,
        }
    }
}

impl From<Motion> for InputBits {
    fn from(motion: Motion) -> Self {
        motion.bits()
    }
}

impl From<Button> for InputBits {
    fn from(button: Button) -> Self {
        button.bit()
    }
}
