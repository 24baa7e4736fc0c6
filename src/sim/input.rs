//! Per-frame input snapshot
//!
//! Held keys persist across frames; one-shot flags are cleared after the
//! substep that consumed them.

use glam::Vec2;

/// Input commands for a single substep (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Arrow keys / WASD currently held
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in logical coordinates, if over the game
    pub pointer: Option<Vec2>,
    /// Pointer button / touch currently held
    pub pointer_held: bool,
    /// Pointer went down this frame
    pub pointer_pressed: bool,
    /// Pointer went up this frame
    pub pointer_released: bool,
    /// Last pointer interaction came from a touch screen
    pub touch: bool,
    /// Space (emergency meeting)
    pub space: bool,
    /// K (test kill)
    pub kill_key: bool,
    /// Escape (close overlays)
    pub escape: bool,
    /// Current contents of the player-name field, while it exists
    pub name_text: Option<String>,
}

impl FrameInput {
    /// Keyboard direction with unit axis components (-1, 0 or 1).
    /// Right wins over left and down wins over up.
    pub fn key_direction(&self) -> Vec2 {
        let x = if self.right {
            1.0
        } else if self.left {
            -1.0
        } else {
            0.0
        };
        let y = if self.down {
            1.0
        } else if self.up {
            -1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }

    /// Reset one-shot flags after a substep consumed them
    pub fn clear_one_shots(&mut self) {
        self.pointer_pressed = false;
        self.pointer_released = false;
        self.space = false;
        self.kill_key = false;
        self.escape = false;
    }

    /// Release every held key (window hidden / focus lost)
    pub fn release_all(&mut self) {
        self.up = false;
        self.down = false;
        self.left = false;
        self.right = false;
        self.pointer_held = false;
    }

    /// Copy with pointer interaction removed, for scenes beneath an overlay
    pub fn without_pointer(&self) -> Self {
        Self {
            pointer: None,
            pointer_held: false,
            pointer_pressed: false,
            pointer_released: false,
            space: false,
            kill_key: false,
            escape: false,
            ..self.clone()
        }
    }

    pub fn pointer_pressed_at(&self) -> Option<Vec2> {
        self.pointer.filter(|_| self.pointer_pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_direction() {
        let mut input = FrameInput::default();
        assert_eq!(input.key_direction(), Vec2::ZERO);
        input.left = true;
        input.up = true;
        assert_eq!(input.key_direction(), Vec2::new(-1.0, -1.0));
        input.right = true;
        assert_eq!(input.key_direction(), Vec2::new(1.0, -1.0));
        input.down = true;
        assert_eq!(input.key_direction(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_clear_one_shots_keeps_held() {
        let mut input = FrameInput {
            right: true,
            pointer_held: true,
            pointer_pressed: true,
            space: true,
            escape: true,
            ..Default::default()
        };
        input.clear_one_shots();
        assert!(input.right && input.pointer_held);
        assert!(!input.pointer_pressed && !input.space && !input.escape);
    }

    #[test]
    fn test_without_pointer() {
        let input = FrameInput {
            pointer: Some(Vec2::ONE),
            pointer_pressed: true,
            down: true,
            ..Default::default()
        };
        let masked = input.without_pointer();
        assert!(masked.pointer.is_none());
        assert!(!masked.pointer_pressed);
        assert!(masked.down);
    }
}
