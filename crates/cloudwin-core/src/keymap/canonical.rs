//! Canonical key identifiers.
//!
//! This is the stable, backend-independent key space that application code
//! sees.  Every backend translates its native key codes into these values at
//! the input boundary, so a game written against [`Key::W`] works the same
//! whether the keystroke came from a local keyboard or from a streaming
//! client on the other side of the internet.
//!
//! # Numbering
//!
//! The numeric value of each variant is the value the windowing library has
//! always used for that key.  Printable keys use their US-layout ASCII value
//! (`Key::A` is 65, `Key::Space` is 32); non-printable keys start at 256.
//!
//! | Key            | Value |
//! |----------------|-------|
//! | `Space`        | 32    |
//! | `A`            | 65    |
//! | `Escape`       | 256   |
//! | `F1`           | 290   |
//! | `Kp0`          | 320   |
//! | `LeftShift`    | 340   |
//!
//! # The `Unknown` sentinel
//!
//! [`Key::Unknown`] (value -1) is reported for any physical key the backend
//! cannot name.  The raw remote code is still delivered alongside it as the
//! scancode, so applications can bind unnamed keys if they want to.

use serde::{Deserialize, Serialize};

/// Canonical key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum Key {
    Unknown = -1,

    // Printable keys
    Space = 32,
    Apostrophe = 39,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    Num0 = 48,
    Num1 = 49,
    Num2 = 50,
    Num3 = 51,
    Num4 = 52,
    Num5 = 53,
    Num6 = 54,
    Num7 = 55,
    Num8 = 56,
    Num9 = 57,
    Semicolon = 59,
    Equal = 61,
    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,
    LeftBracket = 91,
    Backslash = 92,
    RightBracket = 93,
    GraveAccent = 96,

    // Function and navigation keys
    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Insert = 260,
    Delete = 261,
    Right = 262,
    Left = 263,
    Down = 264,
    Up = 265,
    PageUp = 266,
    PageDown = 267,
    Home = 268,
    End = 269,
    CapsLock = 280,
    ScrollLock = 281,
    NumLock = 282,
    PrintScreen = 283,
    Pause = 284,
    F1 = 290,
    F2 = 291,
    F3 = 292,
    F4 = 293,
    F5 = 294,
    F6 = 295,
    F7 = 296,
    F8 = 297,
    F9 = 298,
    F10 = 299,
    F11 = 300,
    F12 = 301,
    F13 = 302,
    F14 = 303,
    F15 = 304,
    F16 = 305,
    F17 = 306,
    F18 = 307,
    F19 = 308,
    F20 = 309,
    F21 = 310,
    F22 = 311,
    F23 = 312,
    F24 = 313,

    // Keypad
    Kp0 = 320,
    Kp1 = 321,
    Kp2 = 322,
    Kp3 = 323,
    Kp4 = 324,
    Kp5 = 325,
    Kp6 = 326,
    Kp7 = 327,
    Kp8 = 328,
    Kp9 = 329,
    KpDecimal = 330,
    KpDivide = 331,
    KpMultiply = 332,
    KpSubtract = 333,
    KpAdd = 334,
    KpEnter = 335,
    KpEqual = 336,

    // Modifiers
    LeftShift = 340,
    LeftControl = 341,
    LeftAlt = 342,
    LeftSuper = 343,
    RightShift = 344,
    RightControl = 345,
    RightAlt = 346,
    RightSuper = 347,
    Menu = 348,
}

impl Key {
    /// Returns the numeric value the windowing library uses for this key.
    pub fn code(self) -> i32 {
        self as i16 as i32
    }

    /// Returns `true` for the left/right Shift, Control, Alt and Super keys.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Key::LeftShift
                | Key::LeftControl
                | Key::LeftAlt
                | Key::LeftSuper
                | Key::RightShift
                | Key::RightControl
                | Key::RightAlt
                | Key::RightSuper
        )
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::Unknown
    }
}
