//! Key actions, modifier flags and mouse buttons.

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Whether a key or button went down, came up, or is auto-repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Action {
    Release = 0,
    Press = 1,
    Repeat = 2,
}

impl Action {
    /// `Press` when `pressed` is true, `Release` otherwise.
    pub fn from_pressed(pressed: bool) -> Self {
        if pressed {
            Action::Press
        } else {
            Action::Release
        }
    }
}

/// Bitmask of modifier keys held when an input event was generated.
///
/// Bit layout:
///
/// | bit | constant    |
/// |-----|-------------|
/// | 0   | `SHIFT`     |
/// | 1   | `CONTROL`   |
/// | 2   | `ALT`       |
/// | 3   | `SUPER`     |
/// | 4   | `CAPS_LOCK` |
/// | 5   | `NUM_LOCK`  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);
    pub const SUPER: Self = Self(1 << 3);
    pub const CAPS_LOCK: Self = Self(1 << 4);
    pub const NUM_LOCK: Self = Self(1 << 5);

    /// Returns `true` if every bit of `other` is set in `self`.
    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no modifier bit is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the Control bit is set.
    pub fn ctrl(self) -> bool {
        self.contains(Self::CONTROL)
    }

    /// Returns `true` if the Shift bit is set.
    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    /// Returns `true` if the Alt bit is set.
    pub fn alt(self) -> bool {
        self.contains(Self::ALT)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Canonical mouse button identifier.
///
/// Values match the windowing library's button numbering (left is 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
    Button4 = 3,
    Button5 = 4,
}

impl MouseButton {
    /// Returns the numeric button index.
    pub fn index(self) -> u8 {
        self as u8
    }
}
