//! Frame description produced by scenes
//!
//! Scenes describe what to draw each frame as sprites, primitive shapes and
//! text labels. The renderer turns sprites and shapes into triangles; labels
//! go to the DOM text layer.

use glam::Vec2;

use super::assets::TextureKey;
use super::character::{Character, CharacterState, HAT_SCALE, PET_SCALE};
use super::geom::Rect;

/// A textured quad
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: TextureKey,
    pub frame: u32,
    /// Centre position
    pub pos: Vec2,
    pub scale: Vec2,
    /// Multiplied into the tinted layer of the texture
    pub tint: Option<u32>,
    pub alpha: f32,
    pub flip_x: bool,
    /// Faint white outline for dark tints
    pub outline: bool,
}

impl Sprite {
    pub fn new(texture: TextureKey, pos: Vec2, scale: f32) -> Self {
        Self {
            texture,
            frame: 0,
            pos,
            scale: Vec2::splat(scale),
            tint: None,
            alpha: 1.0,
            flip_x: false,
            outline: false,
        }
    }

    pub fn with_tint(mut self, tint: u32) -> Self {
        self.tint = Some(tint);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Drawn bounds
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.texture.size() * self.scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: u32,
    pub alpha: f32,
}

/// Untextured primitives
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        rect: Rect,
        color: u32,
        alpha: f32,
        radius: f32,
        stroke: Option<Stroke>,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: u32,
        alpha: f32,
    },
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: u32,
        alpha: f32,
    },
}

impl Shape {
    pub fn rect(rect: Rect, color: u32, alpha: f32) -> Self {
        Shape::Rect {
            rect,
            color,
            alpha,
            radius: 0.0,
            stroke: None,
        }
    }

    pub fn panel(rect: Rect, color: u32, alpha: f32, radius: f32, stroke: Option<Stroke>) -> Self {
        Shape::Rect {
            rect,
            color,
            alpha,
            radius,
            stroke,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Sprite(Sprite),
    Shape(Shape),
}

/// A line of text in screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub font_px: f32,
    pub color: u32,
    pub background: Option<u32>,
    pub padding: Vec2,
    /// Anchor within the text box (0.5, 0.5 is centred)
    pub origin: Vec2,
    pub alpha: f32,
    pub bold: bool,
    /// Text outline colour
    pub stroke: Option<u32>,
    /// Fixed box size; otherwise the box fits the text
    pub box_size: Option<Vec2>,
}

impl Label {
    pub fn new(text: impl Into<String>, pos: Vec2, font_px: f32, color: u32) -> Self {
        Self {
            text: text.into(),
            pos,
            font_px,
            color,
            background: None,
            padding: Vec2::ZERO,
            origin: Vec2::splat(0.5),
            alpha: 1.0,
            bold: false,
            stroke: None,
            box_size: None,
        }
    }

    pub fn with_background(mut self, color: u32, padding: Vec2) -> Self {
        self.background = Some(color);
        self.padding = padding;
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_stroke(mut self, color: u32) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn with_box(mut self, size: Vec2) -> Self {
        self.box_size = Some(size);
        self
    }
}

/// Rough width of a text run, for sizing boxes around labels
pub fn estimate_text_width(text: &str, font_px: f32) -> f32 {
    text.chars().count() as f32 * font_px * 0.55
}

/// Everything a scene wants drawn this frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Clear colour
    pub background: u32,
    /// Top-left of the visible world region
    pub camera: Vec2,
    /// Drawn with the camera offset
    pub world: Vec<DrawCmd>,
    /// Drawn in screen space above the world
    pub ui: Vec<DrawCmd>,
    pub labels: Vec<Label>,
}

impl DrawList {
    pub fn new(background: u32) -> Self {
        Self {
            background,
            ..Default::default()
        }
    }

    pub fn world_sprite(&mut self, sprite: Sprite) {
        self.world.push(DrawCmd::Sprite(sprite));
    }

    pub fn world_shape(&mut self, shape: Shape) {
        self.world.push(DrawCmd::Shape(shape));
    }

    pub fn ui_sprite(&mut self, sprite: Sprite) {
        self.ui.push(DrawCmd::Sprite(sprite));
    }

    pub fn ui_shape(&mut self, shape: Shape) {
        self.ui.push(DrawCmd::Shape(shape));
    }

    pub fn label(&mut self, label: Label) {
        self.labels.push(label);
    }

    /// Add a label positioned in world coordinates
    pub fn world_label(&mut self, mut label: Label) {
        label.pos -= self.camera;
        self.labels.push(label);
    }

    /// Body, accessories and name tag of a character
    pub fn character(&mut self, c: &Character) {
        let pos = c.draw_position();
        self.world_sprite(Sprite {
            texture: c.state.texture(),
            frame: c.frame(),
            pos,
            scale: c.scale_xy(),
            tint: Some(c.color),
            alpha: c.alpha,
            flip_x: c.facing_left,
            outline: c.outlined(),
        });

        // Dead bodies carry no accessories
        if matches!(c.state, CharacterState::Death | CharacterState::KillAnimation) {
            return;
        }

        if let Some(skin) = c.skin {
            self.world_sprite(Sprite {
                flip_x: c.facing_left,
                ..Sprite::new(TextureKey::Skin(skin), pos, c.scale).with_alpha(c.alpha)
            });
        }
        if let Some(hat) = c.hat {
            let hat_pos = c.hat_position() + Vec2::new(0.0, c.float_offset());
            self.world_sprite(
                Sprite::new(TextureKey::Hat(hat), hat_pos, HAT_SCALE)
                    .with_tint(c.color)
                    .with_alpha(c.alpha),
            );
        }
        if let Some(pet) = c.pet {
            self.world_sprite(
                Sprite::new(TextureKey::Pet(pet), c.pet_position(), PET_SCALE).with_alpha(c.alpha),
            );
        }

        self.world_label(
            Label::new(c.name.clone(), c.name_tag_position(), c.name_tag_px, 0xffffff)
                .with_background(0x000000, Vec2::new(4.0, 2.0))
                .with_alpha(c.alpha),
        );
    }

    /// Fade every label (used beneath overlays)
    pub fn dim_labels(&mut self, factor: f32) {
        for label in &mut self.labels {
            label.alpha *= factor;
        }
    }

    /// Append another list drawn on top of this one
    pub fn append(&mut self, mut other: DrawList) {
        self.ui.append(&mut other.world);
        self.ui.append(&mut other.ui);
        self.labels.append(&mut other.labels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::character::{CharacterConfig, CharacterSystem, PlayerId};
    use crate::sim::assets::Hat;

    #[test]
    fn test_world_label_uses_camera() {
        let mut list = DrawList::new(0);
        list.camera = Vec2::new(100.0, 50.0);
        list.world_label(Label::new("x", Vec2::new(150.0, 60.0), 12.0, 0xffffff));
        assert_eq!(list.labels[0].pos, Vec2::new(50.0, 10.0));
    }

    #[test]
    fn test_character_draws_accessories_and_name() {
        let mut sys = CharacterSystem::new();
        sys.create_character(
            PlayerId(0),
            Vec2::new(200.0, 200.0),
            CharacterConfig {
                name: "Ada".into(),
                hat: Some(Hat::Pompous),
                color: 0x000000,
                ..Default::default()
            },
        );
        let mut list = DrawList::new(0);
        list.character(&sys.all()[0]);
        assert_eq!(list.world.len(), 2);
        assert_eq!(list.labels[0].text, "Ada");
        assert_eq!(list.labels[0].pos, Vec2::new(200.0, 160.0));
        match &list.world[0] {
            DrawCmd::Sprite(s) => {
                assert!(s.outline);
                assert_eq!(s.tint, Some(0x000000));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_dead_character_has_no_name_tag() {
        let mut sys = CharacterSystem::new();
        sys.create_character(PlayerId(0), Vec2::ZERO, CharacterConfig::default());
        sys.perform_kill(None, PlayerId(0), false);
        let mut list = DrawList::new(0);
        list.character(&sys.all()[0]);
        assert_eq!(list.world.len(), 1);
        assert!(list.labels.is_empty());
    }
}
