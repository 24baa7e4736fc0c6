//! Clickable image and text buttons
//!
//! A click fires when the pointer is released over a button that was also
//! pressed over it.

use glam::Vec2;

use super::assets::TextureKey;
use super::draw::{DrawList, Label, Sprite, estimate_text_width};
use super::geom::Rect;
use super::input::FrameInput;
use super::tween::Tween;

const HOVER_TINT: u32 = 0xffff99;

#[derive(Debug, Clone, PartialEq)]
pub enum ButtonStyle {
    /// Texture that grows and tints on hover
    Image {
        texture: TextureKey,
        scale: f32,
        hover_scale: f32,
        down_scale: f32,
    },
    /// Text on a coloured box that changes colour on hover
    Text {
        text: String,
        font_px: f32,
        color: u32,
        background: u32,
        hover_background: u32,
        padding: Vec2,
    },
}

#[derive(Debug, Clone)]
pub struct Button<A> {
    pub action: A,
    pub pos: Vec2,
    pub style: ButtonStyle,
    pub visible: bool,
    pub alpha: f32,
    /// Fixed hit/box size for text buttons
    pub size: Option<Vec2>,
    hovered: bool,
    pressed: bool,
    bob: Option<Tween>,
}

impl<A: Copy> Button<A> {
    /// Image button using the menu scales (0.8 / 0.85 / 0.75)
    pub fn image(action: A, texture: TextureKey, pos: Vec2) -> Self {
        Self::image_scaled(action, texture, pos, 0.8, 0.85)
    }

    /// Image button; pressing shrinks it as far below `scale` as hovering grows it
    pub fn image_scaled(
        action: A,
        texture: TextureKey,
        pos: Vec2,
        scale: f32,
        hover_scale: f32,
    ) -> Self {
        Self {
            action,
            pos,
            style: ButtonStyle::Image {
                texture,
                scale,
                hover_scale,
                down_scale: scale - (hover_scale - scale),
            },
            visible: true,
            alpha: 1.0,
            size: None,
            hovered: false,
            pressed: false,
            bob: None,
        }
    }

    pub fn text(
        action: A,
        text: impl Into<String>,
        pos: Vec2,
        font_px: f32,
        background: u32,
        hover_background: u32,
    ) -> Self {
        Self {
            action,
            pos,
            style: ButtonStyle::Text {
                text: text.into(),
                font_px,
                color: 0xffffff,
                background,
                hover_background,
                padding: Vec2::new(20.0, 10.0),
            },
            visible: true,
            alpha: 1.0,
            size: None,
            hovered: false,
            pressed: false,
            bob: None,
        }
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_padding(mut self, pad: Vec2) -> Self {
        if let ButtonStyle::Text { padding, .. } = &mut self.style {
            *padding = pad;
        }
        self
    }

    /// Add a vertical bob of `amount` pixels
    pub fn with_bob(mut self, amount: f32, duration: f32) -> Self {
        self.bob = Some(Tween::pulse(0.0, amount, duration));
        self
    }

    /// Place the button so its resting box starts at `corner`
    pub fn at_top_left(mut self, corner: Vec2) -> Self {
        self.anchor_top_left(corner);
        self
    }

    pub fn anchor_top_left(&mut self, corner: Vec2) {
        self.pos = corner + self.box_size() / 2.0;
    }

    pub fn set_text(&mut self, new_text: impl Into<String>) {
        if let ButtonStyle::Text { text, .. } = &mut self.style {
            *text = new_text.into();
        }
    }

    pub fn set_background(&mut self, bg: u32, hover_bg: u32) {
        if let ButtonStyle::Text {
            background,
            hover_background,
            ..
        } = &mut self.style
        {
            *background = bg;
            *hover_background = hover_bg;
        }
    }

    pub fn set_text_color(&mut self, new_color: u32) {
        if let ButtonStyle::Text { color, .. } = &mut self.style {
            *color = new_color;
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Current drawn centre, including the bob offset
    pub fn draw_pos(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, self.bob.as_ref().map_or(0.0, |t| t.value()))
    }

    /// Current scale for image buttons
    pub fn current_scale(&self) -> f32 {
        match &self.style {
            ButtonStyle::Image {
                scale,
                hover_scale,
                down_scale,
                ..
            } => {
                if self.pressed && self.hovered {
                    *down_scale
                } else if self.hovered {
                    *hover_scale
                } else {
                    *scale
                }
            }
            ButtonStyle::Text { .. } => 1.0,
        }
    }

    /// Box size at rest
    pub fn box_size(&self) -> Vec2 {
        if let Some(size) = self.size {
            return size;
        }
        match &self.style {
            ButtonStyle::Image { texture, scale, .. } => texture.size() * *scale,
            ButtonStyle::Text {
                text,
                font_px,
                padding,
                ..
            } => Vec2::new(
                estimate_text_width(text, *font_px) + padding.x * 2.0,
                font_px * 1.2 + padding.y * 2.0,
            ),
        }
    }

    pub fn hit_rect(&self) -> Rect {
        Rect::centered(self.draw_pos(), self.box_size())
    }

    /// Advance effects and handle pointer input; returns the action when clicked
    pub fn update(&mut self, input: &FrameInput, dt: f32) -> Option<A> {
        if let Some(bob) = self.bob.as_mut() {
            bob.update(dt);
        }
        if !self.visible {
            self.hovered = false;
            self.pressed = false;
            return None;
        }

        self.hovered = input.pointer.is_some_and(|p| self.hit_rect().contains(p));
        if input.pointer_pressed && self.hovered {
            self.pressed = true;
        }
        if input.pointer_released {
            let clicked = self.pressed && self.hovered;
            self.pressed = false;
            if clicked {
                return Some(self.action);
            }
        }
        None
    }

    pub fn draw(&self, out: &mut DrawList) {
        if !self.visible {
            return;
        }
        match &self.style {
            ButtonStyle::Image { texture, .. } => {
                let mut sprite = Sprite::new(*texture, self.draw_pos(), self.current_scale())
                    .with_alpha(self.alpha);
                if self.hovered {
                    sprite = sprite.with_tint(HOVER_TINT);
                }
                out.ui_sprite(sprite);
            }
            ButtonStyle::Text {
                text,
                font_px,
                color,
                background,
                hover_background,
                padding,
            } => {
                let bg = if self.hovered {
                    *hover_background
                } else {
                    *background
                };
                let mut label = Label::new(text.clone(), self.draw_pos(), *font_px, *color)
                    .with_background(bg, *padding)
                    .with_alpha(self.alpha)
                    .with_box(self.box_size());
                label.bold = true;
                out.label(label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Act {
        Go,
    }

    fn at(p: Vec2) -> FrameInput {
        FrameInput {
            pointer: Some(p),
            ..Default::default()
        }
    }

    #[test]
    fn test_image_button_scales() {
        let mut b = Button::image(Act::Go, TextureKey::PlayButton, Vec2::new(640.0, 400.0));
        assert!((b.current_scale() - 0.8).abs() < 1e-6);

        b.update(&at(Vec2::new(640.0, 400.0)), 0.0);
        assert!((b.current_scale() - 0.85).abs() < 1e-6);

        let mut down = at(Vec2::new(640.0, 400.0));
        down.pointer_pressed = true;
        b.update(&down, 0.0);
        assert!((b.current_scale() - 0.75).abs() < 1e-6);

        let mut up = at(Vec2::new(640.0, 400.0));
        up.pointer_released = true;
        assert_eq!(b.update(&up, 0.0), Some(Act::Go));
        assert!((b.current_scale() - 0.85).abs() < 1e-6);

        b.update(&at(Vec2::ZERO), 0.0);
        assert!((b.current_scale() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_release_elsewhere_does_not_click() {
        let mut b = Button::text(Act::Go, "Back", Vec2::new(100.0, 100.0), 20.0, 0xe74c3c, 0xc0392b);
        let mut down = at(Vec2::new(100.0, 100.0));
        down.pointer_pressed = true;
        b.update(&down, 0.0);
        let mut up = at(Vec2::new(500.0, 500.0));
        up.pointer_released = true;
        assert_eq!(b.update(&up, 0.0), None);
    }

    #[test]
    fn test_hidden_button_ignores_input() {
        let mut b = Button::image(Act::Go, TextureKey::PlayButton, Vec2::new(100.0, 100.0));
        b.visible = false;
        let mut click = at(Vec2::new(100.0, 100.0));
        click.pointer_pressed = true;
        click.pointer_released = true;
        assert_eq!(b.update(&click, 0.0), None);
    }

    #[test]
    fn test_text_button_label_matches_hit_box() {
        let b = Button::text(Act::Go, "Apply", Vec2::new(300.0, 300.0), 20.0, 0x27ae60, 0x229954);
        let mut list = DrawList::new(0);
        b.draw(&mut list);
        assert_eq!(list.labels[0].box_size, Some(b.hit_rect().size()));
        assert_eq!(list.labels[0].background, Some(0x27ae60));
    }

    #[test]
    fn test_bob_moves_hit_rect() {
        let mut b = Button::image(Act::Go, TextureKey::PlayButton, Vec2::new(100.0, 100.0))
            .with_bob(10.0, 1.5);
        b.update(&FrameInput::default(), 1.5);
        assert!((b.draw_pos().y - 110.0).abs() < 1e-3);
    }
}
