//! Per-window modifier key cache.
//!
//! Left and right modifier keys are tracked as separate bits so releasing
//! one side while the other is still held keeps the modifier active.

use cloudwin_core::{Modifiers, RemoteKeyCode};

const LEFT_CONTROL: u8 = 1 << 0;
const RIGHT_CONTROL: u8 = 1 << 1;
const LEFT_SHIFT: u8 = 1 << 2;
const RIGHT_SHIFT: u8 = 1 << 3;
const LEFT_ALT: u8 = 1 << 4;
const RIGHT_ALT: u8 = 1 << 5;

const CONTROL_KEYS: u8 = LEFT_CONTROL | RIGHT_CONTROL;
const SHIFT_KEYS: u8 = LEFT_SHIFT | RIGHT_SHIFT;
const ALT_KEYS: u8 = LEFT_ALT | RIGHT_ALT;

fn physical_bit(code: RemoteKeyCode) -> Option<u8> {
    match code {
        RemoteKeyCode::LEFT_CONTROL => Some(LEFT_CONTROL),
        RemoteKeyCode::RIGHT_CONTROL => Some(RIGHT_CONTROL),
        RemoteKeyCode::LEFT_SHIFT => Some(LEFT_SHIFT),
        RemoteKeyCode::RIGHT_SHIFT => Some(RIGHT_SHIFT),
        RemoteKeyCode::LEFT_ALT => Some(LEFT_ALT),
        RemoteKeyCode::RIGHT_ALT => Some(RIGHT_ALT),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierCache {
    held: u8,
}

impl ModifierCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a transition of `code`.  Non-modifier keys are ignored.
    pub fn update(&mut self, code: RemoteKeyCode, pressed: bool) {
        let Some(bit) = physical_bit(code) else {
            return;
        };
        if pressed {
            self.held |= bit;
        } else {
            self.held &= !bit;
        }
    }

    /// Modifier flags to stamp on the next key or mouse callback.
    pub fn current(&self) -> Modifiers {
        let mut mods = Modifiers::NONE;
        if self.held & CONTROL_KEYS != 0 {
            mods |= Modifiers::CONTROL;
        }
        if self.held & SHIFT_KEYS != 0 {
            mods |= Modifiers::SHIFT;
        }
        if self.held & ALT_KEYS != 0 {
            mods |= Modifiers::ALT;
        }
        mods
    }

    pub fn reset(&mut self) {
        self.held = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cache_reports_no_modifiers() {
        assert!(ModifierCache::new().current().is_empty());
    }

    #[test]
    fn test_left_control_press_and_release() {
        // Arrange
        let mut cache = ModifierCache::new();

        // Act / Assert
        cache.update(RemoteKeyCode::LEFT_CONTROL, true);
        assert_eq!(cache.current(), Modifiers::CONTROL);
        cache.update(RemoteKeyCode::LEFT_CONTROL, false);
        assert!(cache.current().is_empty());
    }

    #[test]
    fn test_releasing_one_side_keeps_modifier_while_other_side_held() {
        // Arrange
        let mut cache = ModifierCache::new();
        cache.update(RemoteKeyCode::LEFT_SHIFT, true);
        cache.update(RemoteKeyCode::RIGHT_SHIFT, true);

        // Act
        cache.update(RemoteKeyCode::LEFT_SHIFT, false);

        // Assert
        assert!(cache.current().shift());

        cache.update(RemoteKeyCode::RIGHT_SHIFT, false);
        assert!(!cache.current().shift());
    }

    #[test]
    fn test_combined_modifiers() {
        let mut cache = ModifierCache::new();
        cache.update(RemoteKeyCode::RIGHT_CONTROL, true);
        cache.update(RemoteKeyCode::LEFT_ALT, true);
        assert_eq!(cache.current(), Modifiers::CONTROL | Modifiers::ALT);
    }

    #[test]
    fn test_non_modifier_keys_are_ignored() {
        let mut cache = ModifierCache::new();
        cache.update(RemoteKeyCode::A, true);
        cache.update(RemoteKeyCode::LEFT_GUI, true);
        assert!(cache.current().is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut cache = ModifierCache::new();
        cache.update(RemoteKeyCode::LEFT_CONTROL, true);
        cache.reset();
        assert!(cache.current().is_empty());
    }
}
