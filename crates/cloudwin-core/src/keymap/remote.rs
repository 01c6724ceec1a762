//! Remote key codes delivered by the streaming input service.
//!
//! The streaming service reports keys using USB HID Usage IDs from the
//! Keyboard/Keypad page (0x07).  These identify *physical key positions*:
//! the key labelled "A" on a US keyboard is 0x04 regardless of the client's
//! layout.
//!
//! # Why a newtype instead of an enum?
//!
//! The service may send values this crate has never heard of (vendor keys,
//! future additions to the usage table).  A `u16` newtype lets those values
//! flow through untouched: they translate to [`Key::Unknown`] but are still
//! reported as the scancode, and they still participate in per-key state
//! tracking when they fall inside the table range.
//!
//! [`Key::Unknown`]: super::canonical::Key::Unknown

use serde::{Deserialize, Serialize};

use super::canonical::Key;

/// A key code as reported by the remote input service (HID usage ID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RemoteKeyCode(pub u16);

impl RemoteKeyCode {
    pub const A: Self = Self(0x04);
    pub const B: Self = Self(0x05);
    pub const C: Self = Self(0x06);
    pub const D: Self = Self(0x07);
    pub const E: Self = Self(0x08);
    pub const F: Self = Self(0x09);
    pub const G: Self = Self(0x0A);
    pub const H: Self = Self(0x0B);
    pub const I: Self = Self(0x0C);
    pub const J: Self = Self(0x0D);
    pub const K: Self = Self(0x0E);
    pub const L: Self = Self(0x0F);
    pub const M: Self = Self(0x10);
    pub const N: Self = Self(0x11);
    pub const O: Self = Self(0x12);
    pub const P: Self = Self(0x13);
    pub const Q: Self = Self(0x14);
    pub const R: Self = Self(0x15);
    pub const S: Self = Self(0x16);
    pub const T: Self = Self(0x17);
    pub const U: Self = Self(0x18);
    pub const V: Self = Self(0x19);
    pub const W: Self = Self(0x1A);
    pub const X: Self = Self(0x1B);
    pub const Y: Self = Self(0x1C);
    pub const Z: Self = Self(0x1D);

    pub const DIGIT_1: Self = Self(0x1E);
    pub const DIGIT_2: Self = Self(0x1F);
    pub const DIGIT_3: Self = Self(0x20);
    pub const DIGIT_4: Self = Self(0x21);
    pub const DIGIT_5: Self = Self(0x22);
    pub const DIGIT_6: Self = Self(0x23);
    pub const DIGIT_7: Self = Self(0x24);
    pub const DIGIT_8: Self = Self(0x25);
    pub const DIGIT_9: Self = Self(0x26);
    pub const DIGIT_0: Self = Self(0x27);

    pub const ENTER: Self = Self(0x28);
    pub const ESCAPE: Self = Self(0x29);
    pub const BACKSPACE: Self = Self(0x2A);
    /// The usage table calls Backspace "Delete"; this is NOT forward delete.
    pub const DELETE: Self = Self::BACKSPACE;
    pub const TAB: Self = Self(0x2B);
    pub const SPACEBAR: Self = Self(0x2C);
    pub const MINUS: Self = Self(0x2D);
    pub const EQUAL: Self = Self(0x2E);
    pub const LEFT_BRACE: Self = Self(0x2F);
    pub const RIGHT_BRACE: Self = Self(0x30);
    pub const BACK_SLASH: Self = Self(0x31);
    pub const NON_US_HASH: Self = Self(0x32);
    pub const SEMICOLON: Self = Self(0x33);
    pub const QUOTE: Self = Self(0x34);
    pub const GRAVE_ACCENT: Self = Self(0x35);
    pub const COMMA: Self = Self(0x36);
    pub const PERIOD: Self = Self(0x37);
    pub const FORWARD_SLASH: Self = Self(0x38);
    pub const CAPS_LOCK: Self = Self(0x39);

    pub const F1: Self = Self(0x3A);
    pub const F2: Self = Self(0x3B);
    pub const F3: Self = Self(0x3C);
    pub const F4: Self = Self(0x3D);
    pub const F5: Self = Self(0x3E);
    pub const F6: Self = Self(0x3F);
    pub const F7: Self = Self(0x40);
    pub const F8: Self = Self(0x41);
    pub const F9: Self = Self(0x42);
    pub const F10: Self = Self(0x43);
    pub const F11: Self = Self(0x44);
    pub const F12: Self = Self(0x45);

    pub const PRINT_SCREEN: Self = Self(0x46);
    pub const SCROLL_LOCK: Self = Self(0x47);
    pub const PAUSE: Self = Self(0x48);
    pub const INSERT: Self = Self(0x49);
    pub const HOME: Self = Self(0x4A);
    pub const PAGE_UP: Self = Self(0x4B);
    pub const DELETE_FORWARD: Self = Self(0x4C);
    pub const END: Self = Self(0x4D);
    pub const PAGE_DOWN: Self = Self(0x4E);
    pub const RIGHT: Self = Self(0x4F);
    pub const LEFT: Self = Self(0x50);
    pub const DOWN: Self = Self(0x51);
    pub const UP: Self = Self(0x52);

    pub const KEYPAD_NUM_LOCK: Self = Self(0x53);
    pub const KEYPAD_DIVIDE: Self = Self(0x54);
    pub const KEYPAD_MULTIPLY: Self = Self(0x55);
    pub const KEYPAD_SUBTRACT: Self = Self(0x56);
    pub const KEYPAD_ADD: Self = Self(0x57);
    pub const KEYPAD_ENTER: Self = Self(0x58);
    pub const KEYPAD_1: Self = Self(0x59);
    pub const KEYPAD_2: Self = Self(0x5A);
    pub const KEYPAD_3: Self = Self(0x5B);
    pub const KEYPAD_4: Self = Self(0x5C);
    pub const KEYPAD_5: Self = Self(0x5D);
    pub const KEYPAD_6: Self = Self(0x5E);
    pub const KEYPAD_7: Self = Self(0x5F);
    pub const KEYPAD_8: Self = Self(0x60);
    pub const KEYPAD_9: Self = Self(0x61);
    pub const KEYPAD_0: Self = Self(0x62);
    pub const KEYPAD_PERIOD: Self = Self(0x63);
    pub const NON_US_BACKSLASH: Self = Self(0x64);
    pub const MENU: Self = Self(0x65);
    pub const KEYPAD_EQUAL: Self = Self(0x67);

    pub const F13: Self = Self(0x68);
    pub const F14: Self = Self(0x69);
    pub const F15: Self = Self(0x6A);
    pub const F16: Self = Self(0x6B);
    pub const F17: Self = Self(0x6C);
    pub const F18: Self = Self(0x6D);
    pub const F19: Self = Self(0x6E);
    pub const F20: Self = Self(0x6F);
    pub const F21: Self = Self(0x70);
    pub const F22: Self = Self(0x71);
    pub const F23: Self = Self(0x72);
    pub const F24: Self = Self(0x73);

    pub const LEFT_CONTROL: Self = Self(0xE0);
    pub const LEFT_SHIFT: Self = Self(0xE1);
    pub const LEFT_ALT: Self = Self(0xE2);
    pub const LEFT_GUI: Self = Self(0xE3);
    pub const RIGHT_CONTROL: Self = Self(0xE4);
    pub const RIGHT_SHIFT: Self = Self(0xE5);
    pub const RIGHT_ALT: Self = Self(0xE6);
    pub const RIGHT_GUI: Self = Self(0xE7);

    /// Highest key code the remote service defines.
    pub const MAX: Self = Self::RIGHT_GUI;

    /// Index of this code in a per-key table, or `None` if it lies outside
    /// the range the service defines.
    pub fn index(self) -> Option<usize> {
        let idx = self.0 as usize;
        (idx < REMOTE_KEY_COUNT).then_some(idx)
    }
}

impl From<u16> for RemoteKeyCode {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

/// Number of entries in a table indexed by [`RemoteKeyCode`].
pub const REMOTE_KEY_COUNT: usize = RemoteKeyCode::MAX.0 as usize + 1;

/// Translates a remote key code to a canonical [`Key`].
///
/// Returns [`Key::Unknown`] for codes outside the table and for codes with no
/// explicit mapping.
pub fn remote_to_key(code: RemoteKeyCode) -> Key {
    match code.index() {
        Some(idx) => REMOTE_TO_KEY_TABLE[idx],
        None => Key::Unknown,
    }
}

/// Complete remote -> canonical mapping table indexed by remote key code.
///
/// Every slot starts as `Unknown`; the explicit overrides below are the only
/// keys the backend can name.
pub(crate) const REMOTE_TO_KEY_TABLE: [Key; REMOTE_KEY_COUNT] = {
    let mut t = [Key::Unknown; REMOTE_KEY_COUNT];

    // ── Printable keys ────────────────────────────────────────────────────────
    t[RemoteKeyCode::SPACEBAR.0 as usize] = Key::Space;
    t[RemoteKeyCode::QUOTE.0 as usize] = Key::Apostrophe;
    t[RemoteKeyCode::COMMA.0 as usize] = Key::Comma;
    t[RemoteKeyCode::MINUS.0 as usize] = Key::Minus;
    t[RemoteKeyCode::PERIOD.0 as usize] = Key::Period;
    t[RemoteKeyCode::FORWARD_SLASH.0 as usize] = Key::Slash;
    t[RemoteKeyCode::SEMICOLON.0 as usize] = Key::Semicolon;
    t[RemoteKeyCode::EQUAL.0 as usize] = Key::Equal;
    t[RemoteKeyCode::LEFT_BRACE.0 as usize] = Key::LeftBracket;
    t[RemoteKeyCode::BACK_SLASH.0 as usize] = Key::Backslash;
    t[RemoteKeyCode::RIGHT_BRACE.0 as usize] = Key::RightBracket;
    t[RemoteKeyCode::GRAVE_ACCENT.0 as usize] = Key::GraveAccent;

    // ── Digit row ─────────────────────────────────────────────────────────────
    t[RemoteKeyCode::DIGIT_0.0 as usize] = Key::Num0;
    t[RemoteKeyCode::DIGIT_1.0 as usize] = Key::Num1;
    t[RemoteKeyCode::DIGIT_2.0 as usize] = Key::Num2;
    t[RemoteKeyCode::DIGIT_3.0 as usize] = Key::Num3;
    t[RemoteKeyCode::DIGIT_4.0 as usize] = Key::Num4;
    t[RemoteKeyCode::DIGIT_5.0 as usize] = Key::Num5;
    t[RemoteKeyCode::DIGIT_6.0 as usize] = Key::Num6;
    t[RemoteKeyCode::DIGIT_7.0 as usize] = Key::Num7;
    t[RemoteKeyCode::DIGIT_8.0 as usize] = Key::Num8;
    t[RemoteKeyCode::DIGIT_9.0 as usize] = Key::Num9;

    // ── Letters ───────────────────────────────────────────────────────────────
    t[RemoteKeyCode::A.0 as usize] = Key::A;
    t[RemoteKeyCode::B.0 as usize] = Key::B;
    t[RemoteKeyCode::C.0 as usize] = Key::C;
    t[RemoteKeyCode::D.0 as usize] = Key::D;
    t[RemoteKeyCode::E.0 as usize] = Key::E;
    t[RemoteKeyCode::F.0 as usize] = Key::F;
    t[RemoteKeyCode::G.0 as usize] = Key::G;
    t[RemoteKeyCode::H.0 as usize] = Key::H;
    t[RemoteKeyCode::I.0 as usize] = Key::I;
    t[RemoteKeyCode::J.0 as usize] = Key::J;
    t[RemoteKeyCode::K.0 as usize] = Key::K;
    t[RemoteKeyCode::L.0 as usize] = Key::L;
    t[RemoteKeyCode::M.0 as usize] = Key::M;
    t[RemoteKeyCode::N.0 as usize] = Key::N;
    t[RemoteKeyCode::O.0 as usize] = Key::O;
    t[RemoteKeyCode::P.0 as usize] = Key::P;
    t[RemoteKeyCode::Q.0 as usize] = Key::Q;
    t[RemoteKeyCode::R.0 as usize] = Key::R;
    t[RemoteKeyCode::S.0 as usize] = Key::S;
    t[RemoteKeyCode::T.0 as usize] = Key::T;
    t[RemoteKeyCode::U.0 as usize] = Key::U;
    t[RemoteKeyCode::V.0 as usize] = Key::V;
    t[RemoteKeyCode::W.0 as usize] = Key::W;
    t[RemoteKeyCode::X.0 as usize] = Key::X;
    t[RemoteKeyCode::Y.0 as usize] = Key::Y;
    t[RemoteKeyCode::Z.0 as usize] = Key::Z;

    // ── Control and navigation ────────────────────────────────────────────────
    t[RemoteKeyCode::ESCAPE.0 as usize] = Key::Escape;
    t[RemoteKeyCode::ENTER.0 as usize] = Key::Enter;
    t[RemoteKeyCode::TAB.0 as usize] = Key::Tab;
    t[RemoteKeyCode::BACKSPACE.0 as usize] = Key::Backspace;
    t[RemoteKeyCode::INSERT.0 as usize] = Key::Insert;
    t[RemoteKeyCode::DELETE_FORWARD.0 as usize] = Key::Delete;
    t[RemoteKeyCode::RIGHT.0 as usize] = Key::Right;
    t[RemoteKeyCode::LEFT.0 as usize] = Key::Left;
    t[RemoteKeyCode::DOWN.0 as usize] = Key::Down;
    t[RemoteKeyCode::UP.0 as usize] = Key::Up;
    t[RemoteKeyCode::PAGE_UP.0 as usize] = Key::PageUp;
    t[RemoteKeyCode::PAGE_DOWN.0 as usize] = Key::PageDown;
    t[RemoteKeyCode::HOME.0 as usize] = Key::Home;
    t[RemoteKeyCode::END.0 as usize] = Key::End;
    t[RemoteKeyCode::CAPS_LOCK.0 as usize] = Key::CapsLock;
    t[RemoteKeyCode::SCROLL_LOCK.0 as usize] = Key::ScrollLock;
    t[RemoteKeyCode::KEYPAD_NUM_LOCK.0 as usize] = Key::NumLock;
    t[RemoteKeyCode::PRINT_SCREEN.0 as usize] = Key::PrintScreen;
    t[RemoteKeyCode::PAUSE.0 as usize] = Key::Pause;
    t[RemoteKeyCode::MENU.0 as usize] = Key::Menu;

    // ── Function keys ─────────────────────────────────────────────────────────
    t[RemoteKeyCode::F1.0 as usize] = Key::F1;
    t[RemoteKeyCode::F2.0 as usize] = Key::F2;
    t[RemoteKeyCode::F3.0 as usize] = Key::F3;
    t[RemoteKeyCode::F4.0 as usize] = Key::F4;
    t[RemoteKeyCode::F5.0 as usize] = Key::F5;
    t[RemoteKeyCode::F6.0 as usize] = Key::F6;
    t[RemoteKeyCode::F7.0 as usize] = Key::F7;
    t[RemoteKeyCode::F8.0 as usize] = Key::F8;
    t[RemoteKeyCode::F9.0 as usize] = Key::F9;
    t[RemoteKeyCode::F10.0 as usize] = Key::F10;
    t[RemoteKeyCode::F11.0 as usize] = Key::F11;
    t[RemoteKeyCode::F12.0 as usize] = Key::F12;
    t[RemoteKeyCode::F13.0 as usize] = Key::F13;
    t[RemoteKeyCode::F14.0 as usize] = Key::F14;
    t[RemoteKeyCode::F15.0 as usize] = Key::F15;
    t[RemoteKeyCode::F16.0 as usize] = Key::F16;
    t[RemoteKeyCode::F17.0 as usize] = Key::F17;
    t[RemoteKeyCode::F18.0 as usize] = Key::F18;
    t[RemoteKeyCode::F19.0 as usize] = Key::F19;
    t[RemoteKeyCode::F20.0 as usize] = Key::F20;
    t[RemoteKeyCode::F21.0 as usize] = Key::F21;
    t[RemoteKeyCode::F22.0 as usize] = Key::F22;
    t[RemoteKeyCode::F23.0 as usize] = Key::F23;
    t[RemoteKeyCode::F24.0 as usize] = Key::F24;

    // ── Keypad ────────────────────────────────────────────────────────────────
    t[RemoteKeyCode::KEYPAD_0.0 as usize] = Key::Kp0;
    t[RemoteKeyCode::KEYPAD_1.0 as usize] = Key::Kp1;
    t[RemoteKeyCode::KEYPAD_2.0 as usize] = Key::Kp2;
    t[RemoteKeyCode::KEYPAD_3.0 as usize] = Key::Kp3;
    t[RemoteKeyCode::KEYPAD_4.0 as usize] = Key::Kp4;
    t[RemoteKeyCode::KEYPAD_5.0 as usize] = Key::Kp5;
    t[RemoteKeyCode::KEYPAD_6.0 as usize] = Key::Kp6;
    t[RemoteKeyCode::KEYPAD_7.0 as usize] = Key::Kp7;
    t[RemoteKeyCode::KEYPAD_8.0 as usize] = Key::Kp8;
    t[RemoteKeyCode::KEYPAD_9.0 as usize] = Key::Kp9;
    t[RemoteKeyCode::KEYPAD_PERIOD.0 as usize] = Key::KpDecimal;
    t[RemoteKeyCode::KEYPAD_DIVIDE.0 as usize] = Key::KpDivide;
    t[RemoteKeyCode::KEYPAD_MULTIPLY.0 as usize] = Key::KpMultiply;
    t[RemoteKeyCode::KEYPAD_SUBTRACT.0 as usize] = Key::KpSubtract;
    t[RemoteKeyCode::KEYPAD_ADD.0 as usize] = Key::KpAdd;
    t[RemoteKeyCode::KEYPAD_ENTER.0 as usize] = Key::KpEnter;
    t[RemoteKeyCode::KEYPAD_EQUAL.0 as usize] = Key::KpEqual;

    // ── Modifiers ─────────────────────────────────────────────────────────────
    t[RemoteKeyCode::LEFT_SHIFT.0 as usize] = Key::LeftShift;
    t[RemoteKeyCode::LEFT_CONTROL.0 as usize] = Key::LeftControl;
    t[RemoteKeyCode::LEFT_ALT.0 as usize] = Key::LeftAlt;
    t[RemoteKeyCode::RIGHT_SHIFT.0 as usize] = Key::RightShift;
    t[RemoteKeyCode::RIGHT_CONTROL.0 as usize] = Key::RightControl;
    t[RemoteKeyCode::RIGHT_ALT.0 as usize] = Key::RightAlt;

    t
};
