//! Input management system
//!
//! Window-system independent key/button identifiers plus the state the
//! editor derives from raw events: held keys and the mouse cursor.

pub mod mouse;

pub use mouse::MouseState;

use std::collections::HashSet;

/// Input manager
///
/// Tracks which keys are currently held so per-frame movement can be polled
/// instead of reacting to individual key events.
#[derive(Debug, Default)]
pub struct InputManager {
    pressed_keys: HashSet<KeyCode>,
    mouse: MouseState,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.pressed_keys.insert(key);
        } else {
            self.pressed_keys.remove(&key);
        }
    }

    /// Whether `key` is currently held
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Mouse cursor and button state
    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    /// Mutable mouse cursor and button state
    pub fn mouse_mut(&mut self) -> &mut MouseState {
        &mut self.mouse
    }

    /// Forget every held key (focus lost)
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.mouse.handle_button(MouseButton::Middle, false);
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Delete key
    Delete,
    /// F1 key
    F1,
    /// F2 key
    F2,
    /// F3 key
    F3,
    /// F4 key
    F4,
    /// F5 key
    F5,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state_tracking() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::W, true);
        assert!(input.is_key_pressed(KeyCode::W));
        input.handle_key_input(KeyCode::W, false);
        assert!(!input.is_key_pressed(KeyCode::W));

        input.handle_key_input(KeyCode::A, true);
        input.release_all();
        assert!(!input.is_key_pressed(KeyCode::A));
    }
}
