//! Floating touch joystick

use glam::Vec2;

use super::assets::TextureKey;
use super::draw::{DrawList, Sprite};
use super::input::FrameInput;
use super::tween::{Ease, Tween};

/// Maximum handle displacement from the base
pub const MAX_DISTANCE: f32 = 40.0;
/// The joystick disappears this long after release
pub const DESTROY_DELAY: f32 = 3.0;
const RETURN_DURATION: f32 = 0.2;
const BASE_SCALE: f32 = 0.8;
const HANDLE_SCALE: f32 = 0.6;
/// Presses this close to the base grab the handle
const GRAB_RADIUS: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct Joystick {
    pub base: Vec2,
    /// Handle offset from the base
    pub handle: Vec2,
    dragging: bool,
    /// (offset at release, 0..1 progress tween)
    returning: Option<(Vec2, Tween)>,
    destroy_in: Option<f32>,
}

impl Joystick {
    /// Create a joystick near `pointer`, clamped to the bottom-left corner
    pub fn spawn(pointer: Vec2, screen_h: f32) -> Self {
        let base = Vec2::new(
            pointer.x.clamp(80.0, 150.0),
            pointer.y.clamp(screen_h - 150.0, screen_h - 80.0),
        );
        Self {
            base,
            handle: Vec2::ZERO,
            dragging: false,
            returning: None,
            destroy_in: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin_drag(&mut self, pointer: Vec2) {
        self.dragging = true;
        self.returning = None;
        self.destroy_in = None;
        self.drag(pointer);
    }

    /// Move the handle toward the pointer, clamped to the base radius
    pub fn drag(&mut self, pointer: Vec2) {
        let offset = pointer - self.base;
        self.handle = if offset.length() <= MAX_DISTANCE {
            offset
        } else {
            offset.normalize_or_zero() * MAX_DISTANCE
        };
    }

    pub fn release(&mut self) {
        self.dragging = false;
        self.returning = Some((self.handle, Tween::new(0.0, 1.0, RETURN_DURATION).with_ease(Ease::Power2)));
        self.destroy_in = Some(DESTROY_DELAY);
    }

    /// Normalised direction (length at most 1); zero when not dragging
    pub fn direction(&self) -> Vec2 {
        if self.dragging {
            self.handle / MAX_DISTANCE
        } else {
            Vec2::ZERO
        }
    }

    /// Advance timers; returns false once the joystick should be destroyed
    pub fn update(&mut self, dt: f32) -> bool {
        if let Some((start, tween)) = self.returning.as_mut() {
            let t = tween.update(dt);
            self.handle = start.lerp(Vec2::ZERO, t);
            if tween.is_finished() {
                self.returning = None;
            }
        }
        if let Some(remaining) = self.destroy_in.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                return false;
            }
        }
        true
    }

    pub fn draw(&self, out: &mut DrawList) {
        out.ui_sprite(Sprite::new(TextureKey::JoystickBase, self.base, BASE_SCALE).with_alpha(0.7));
        out.ui_sprite(
            Sprite::new(TextureKey::JoystickHandle, self.base + self.handle, HANDLE_SCALE)
                .with_alpha(0.8),
        );
    }
}

/// Owns the optional joystick and feeds it pointer input
#[derive(Debug, Clone, Default)]
pub struct JoystickControl {
    pub joystick: Option<Joystick>,
}

/// What happened to the joystick this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JoystickUpdate {
    /// Not in use
    Idle,
    /// Being dragged in this direction
    Drag(Vec2),
    /// Just released; the character should stop
    Released,
}

impl JoystickControl {
    /// Handle touch input; `allow_spawn` is false when the press hit a button
    pub fn update(
        &mut self,
        input: &FrameInput,
        screen_h: f32,
        allow_spawn: bool,
        dt: f32,
    ) -> JoystickUpdate {
        if let Some(pointer) = input.pointer_pressed_at() {
            if self.joystick.is_none() {
                if input.touch && allow_spawn {
                    let mut stick = Joystick::spawn(pointer, screen_h);
                    stick.begin_drag(pointer);
                    self.joystick = Some(stick);
                }
            } else if let Some(stick) = self.joystick.as_mut() {
                if pointer.distance(stick.base) <= GRAB_RADIUS {
                    stick.begin_drag(pointer);
                }
            }
        }

        let mut result = JoystickUpdate::Idle;
        if let Some(stick) = self.joystick.as_mut() {
            if stick.is_dragging() {
                if input.pointer_released || !input.pointer_held {
                    stick.release();
                    result = JoystickUpdate::Released;
                } else {
                    if let Some(p) = input.pointer {
                        stick.drag(p);
                    }
                    result = JoystickUpdate::Drag(stick.direction());
                }
            }
            if !stick.update(dt) {
                self.joystick = None;
            }
        }
        result
    }

    pub fn draw(&self, out: &mut DrawList) {
        if let Some(stick) = &self.joystick {
            stick.draw(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn touch_at(p: Vec2) -> FrameInput {
        FrameInput {
            pointer: Some(p),
            pointer_held: true,
            touch: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_spawn_clamped() {
        let stick = Joystick::spawn(Vec2::new(600.0, 100.0), 720.0);
        assert_eq!(stick.base, Vec2::new(150.0, 570.0));
        let stick = Joystick::spawn(Vec2::new(10.0, 715.0), 720.0);
        assert_eq!(stick.base, Vec2::new(80.0, 640.0));
    }

    #[test]
    fn test_drag_clamped_direction() {
        let mut stick = Joystick::spawn(Vec2::new(100.0, 600.0), 720.0);
        stick.begin_drag(Vec2::new(300.0, 600.0));
        assert!((stick.handle - Vec2::new(40.0, 0.0)).length() < 1e-4);
        assert!((stick.direction() - Vec2::X).length() < 1e-4);

        stick.drag(Vec2::new(100.0, 620.0));
        assert!((stick.direction() - Vec2::new(0.0, 0.5)).length() < 1e-4);
    }

    #[test]
    fn test_release_returns_and_destroys() {
        let mut control = JoystickControl::default();
        let mut press = touch_at(Vec2::new(120.0, 600.0));
        press.pointer_pressed = true;
        control.update(&press, 720.0, true, 1.0 / 60.0);
        assert!(control.joystick.is_some());

        let drag = touch_at(Vec2::new(200.0, 600.0));
        assert!(matches!(control.update(&drag, 720.0, true, 1.0 / 60.0), JoystickUpdate::Drag(d) if d.x > 0.99));

        let mut up = touch_at(Vec2::new(200.0, 600.0));
        up.pointer_held = false;
        up.pointer_released = true;
        assert_eq!(control.update(&up, 720.0, true, 1.0 / 60.0), JoystickUpdate::Released);

        let idle = FrameInput::default();
        control.update(&idle, 720.0, true, 0.25);
        let stick = control.joystick.as_ref().unwrap();
        assert!(stick.handle.length() < 1e-4);

        control.update(&idle, 720.0, true, 3.0);
        assert!(control.joystick.is_none());
    }

    #[test]
    fn test_new_drag_cancels_destroy() {
        let mut control = JoystickControl::default();
        let mut press = touch_at(Vec2::new(120.0, 600.0));
        press.pointer_pressed = true;
        control.update(&press, 720.0, true, 0.0);
        let mut up = FrameInput::default();
        up.pointer_released = true;
        control.update(&up, 720.0, true, 0.0);
        control.update(&FrameInput::default(), 720.0, true, 2.5);

        control.update(&press, 720.0, true, 0.0);
        control.update(&touch_at(Vec2::new(120.0, 600.0)), 720.0, true, 1.0);
        assert!(control.joystick.as_ref().is_some_and(|s| s.is_dragging()));
    }

    #[test]
    fn test_mouse_does_not_spawn() {
        let mut control = JoystickControl::default();
        let press = FrameInput {
            pointer: Some(Vec2::new(120.0, 600.0)),
            pointer_pressed: true,
            pointer_held: true,
            ..Default::default()
        };
        control.update(&press, 720.0, true, 0.0);
        assert!(control.joystick.is_none());
    }

    proptest! {
        #[test]
        fn prop_handle_never_exceeds_radius(x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
            let mut stick = Joystick::spawn(Vec2::new(100.0, 600.0), 720.0);
            stick.begin_drag(Vec2::new(x, y));
            prop_assert!(stick.handle.length() <= MAX_DISTANCE + 1e-3);
            prop_assert!(stick.direction().length() <= 1.0 + 1e-4);
        }
    }
}
