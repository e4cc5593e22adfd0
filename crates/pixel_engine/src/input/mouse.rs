//! Mouse state for picking and camera orbit
//!
//! Cursor positions arrive in window pixels (origin top-left). The state keeps
//! the last position for picking and turns successive positions into orbit
//! deltas while the middle button is held.

use super::MouseButton;

/// Mouse state for picking operations
#[derive(Debug, Clone)]
pub struct MouseState {
    /// Last cursor X position (pixels from left)
    pub last_x: f32,
    /// Last cursor Y position (pixels from top)
    pub last_y: f32,
    /// Whether the cursor is over the scene viewport
    pub hovered: bool,
    orbiting: bool,
    first_sample: bool,
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl MouseState {
    /// Create a new mouse state with the cursor at `(x, y)`
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            last_x: x,
            last_y: y,
            hovered: false,
            orbiting: false,
            first_sample: true,
        }
    }

    /// Record a cursor move and return the orbit delta `(dx, dy)`
    ///
    /// The delta is `None` unless the middle button is held over the viewport.
    /// `dy` is positive when the cursor moves up. The first sample after the
    /// button goes down only re-anchors the cursor and yields a zero delta.
    pub fn handle_move(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        if self.first_sample {
            self.last_x = x;
            self.last_y = y;
            self.first_sample = false;
        }

        let delta = (x - self.last_x, self.last_y - y);
        self.last_x = x;
        self.last_y = y;

        (self.orbiting && self.hovered).then_some(delta)
    }

    /// Record a button transition
    pub fn handle_button(&mut self, button: MouseButton, pressed: bool) {
        if button == MouseButton::Middle && self.orbiting != pressed {
            self.orbiting = pressed;
            self.first_sample = true;
        }
    }

    /// Whether the middle button is held
    pub fn is_orbiting(&self) -> bool {
        self.orbiting
    }

    /// Last cursor position minus the viewport's top-left offset
    pub fn viewport_position(&self, offset: (f32, f32)) -> (f32, f32) {
        (self.last_x - offset.0, self.last_y - offset.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_delta_only_while_middle_held() {
        let mut mouse = MouseState::new(0.0, 0.0);
        mouse.hovered = true;
        assert_eq!(mouse.handle_move(10.0, 10.0), None);

        mouse.handle_button(MouseButton::Middle, true);
        assert_eq!(mouse.handle_move(20.0, 10.0), Some((0.0, 0.0)));
        assert_eq!(mouse.handle_move(25.0, 4.0), Some((5.0, 6.0)));

        mouse.handle_button(MouseButton::Middle, false);
        assert_eq!(mouse.handle_move(30.0, 4.0), None);
        assert_eq!(mouse.last_x, 30.0);
    }

    #[test]
    fn test_no_orbit_outside_viewport() {
        let mut mouse = MouseState::new(0.0, 0.0);
        mouse.handle_button(MouseButton::Middle, true);
        mouse.handle_move(1.0, 1.0);
        assert_eq!(mouse.handle_move(2.0, 2.0), None);
    }

    #[test]
    fn test_viewport_position_applies_offset() {
        let mouse = MouseState::new(116.0, 150.0);
        assert_eq!(mouse.viewport_position((16.0, 50.0)), (100.0, 100.0));
    }
}
