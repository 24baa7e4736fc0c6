//! Turn a `DrawList` into triangles
//!
//! Output is in logical screen pixels (1280x720, y down); the pipeline maps
//! it to clip space on upload.

use glam::Vec2;

use super::shapes;
use super::sprites::{Part, Prim, SpriteAtlas};
use super::vertex::{Vertex, rgba};
use crate::sim::{DrawCmd, DrawList, Shape, Sprite};

/// Dark characters get a faint white halo this much larger than the body
const OUTLINE_GROWTH: f32 = 1.1;
const OUTLINE_ALPHA: f32 = 0.35;

enum Outline {
    Fill(Vec<Vec2>),
    Band(Vec<Vec2>, Vec<Vec2>),
}

/// Outline of a template part in template space
fn outline(prim: &Prim, detail: f32) -> Outline {
    match prim {
        Prim::Ellipse { center, radii } => Outline::Fill(shapes::ellipse_points(
            *center,
            *radii,
            shapes::segments_for(radii.max_element() * detail),
        )),
        Prim::Rect { min, max, radius } => {
            Outline::Fill(shapes::rounded_rect_points(*min, *max, *radius))
        }
        Prim::Border {
            min,
            max,
            radius,
            width,
        } => {
            let inset = Vec2::splat(*width);
            Outline::Band(
                shapes::rounded_rect_points(*min, *max, *radius),
                shapes::rounded_rect_points(*min + inset, *max - inset, (*radius - *width).max(0.0)),
            )
        }
        Prim::Line { a, b, width } => Outline::Fill(shapes::segment_points(*a, *b, *width)),
        Prim::Poly(points) => Outline::Fill(points.clone()),
    }
}

fn emit_part(out: &mut Vec<Vertex>, part: &Part, color: [f32; 4], detail: f32, xf: &impl Fn(Vec2) -> Vec2) {
    match outline(&part.prim, detail) {
        Outline::Fill(points) => {
            let points: Vec<Vec2> = points.into_iter().map(xf).collect();
            out.extend(shapes::fill_convex(&points, color));
        }
        Outline::Band(outer, inner) => {
            let outer: Vec<Vec2> = outer.into_iter().map(xf).collect();
            let inner: Vec<Vec2> = inner.into_iter().map(xf).collect();
            out.extend(shapes::band(&outer, &inner, color));
        }
    }
}

fn sprite(out: &mut Vec<Vertex>, sprite: &Sprite, offset: Vec2, atlas: &SpriteAtlas) {
    let Some(template) = atlas.get(sprite.texture, sprite.frame) else {
        log::trace!("Texture {} not loaded", sprite.texture.name());
        return;
    };
    if sprite.alpha <= 0.0 {
        return;
    }

    let center = sprite.pos - offset;
    let flip = if sprite.flip_x { -1.0 } else { 1.0 };
    let detail = sprite.scale.max_element();
    let transform = |scale: Vec2| move |p: Vec2| center + Vec2::new(p.x * flip, p.y) * scale;

    if sprite.outline {
        let halo = transform(sprite.scale * OUTLINE_GROWTH);
        let color = rgba(0xffffff, OUTLINE_ALPHA * sprite.alpha);
        for part in template.parts.iter().filter(|p| p.paint.is_tinted()) {
            emit_part(out, part, color, detail, &halo);
        }
    }

    let xf = transform(sprite.scale);
    for part in &template.parts {
        let color = rgba(part.paint.resolve(sprite.tint), part.alpha * sprite.alpha);
        emit_part(out, part, color, detail, &xf);
    }
}

fn shape(out: &mut Vec<Vertex>, shape: &Shape, offset: Vec2) {
    match shape {
        Shape::Rect {
            rect,
            color,
            alpha,
            radius,
            stroke,
        } => {
            let mut r = *rect;
            r.x -= offset.x;
            r.y -= offset.y;
            out.extend(shapes::rect(&r, *radius, rgba(*color, *alpha)));
            if let Some(stroke) = stroke {
                out.extend(shapes::rect_border(
                    &r,
                    *radius,
                    stroke.width,
                    rgba(stroke.color, stroke.alpha),
                ));
            }
        }
        Shape::Circle {
            center,
            radius,
            color,
            alpha,
        } => out.extend(shapes::circle(
            *center - offset,
            *radius,
            rgba(*color, *alpha),
            shapes::segments_for(*radius),
        )),
        Shape::Ring {
            center,
            radius,
            width,
            color,
            alpha,
        } => out.extend(shapes::ring(
            *center - offset,
            (radius - width / 2.0).max(0.0),
            radius + width / 2.0,
            rgba(*color, *alpha),
            shapes::segments_for(*radius),
        )),
    }
}

fn command(out: &mut Vec<Vertex>, cmd: &DrawCmd, offset: Vec2, atlas: &SpriteAtlas) {
    match cmd {
        DrawCmd::Sprite(s) => sprite(out, s, offset, atlas),
        DrawCmd::Shape(s) => shape(out, s, offset),
    }
}

/// Triangles for the whole frame: world layer under the camera, then UI
pub fn tessellate(list: &DrawList, atlas: &SpriteAtlas) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for cmd in &list.world {
        command(&mut vertices, cmd, list.camera, atlas);
    }
    for cmd in &list.ui {
        command(&mut vertices, cmd, Vec2::ZERO, atlas);
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Rect, TextureKey};

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        vertices.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec2::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    #[test]
    fn test_world_layer_is_offset_by_camera() {
        let mut list = DrawList::new(0);
        list.camera = Vec2::new(100.0, 40.0);
        list.world_shape(Shape::rect(Rect::new(100.0, 40.0, 10.0, 10.0), 0xffffff, 1.0));
        list.ui_shape(Shape::rect(Rect::new(100.0, 40.0, 10.0, 10.0), 0xffffff, 1.0));
        let v = tessellate(&list, &SpriteAtlas::new());
        assert_eq!(v.len(), 12);
        assert_eq!(bounds(&v[..6]), (Vec2::ZERO, Vec2::splat(10.0)));
        assert_eq!(bounds(&v[6..]).0, Vec2::new(100.0, 40.0));
    }

    #[test]
    fn test_unloaded_sprite_draws_nothing() {
        let mut list = DrawList::new(0);
        list.ui_sprite(Sprite::new(TextureKey::Logo, Vec2::ZERO, 1.0));
        assert!(tessellate(&list, &SpriteAtlas::new()).is_empty());
    }

    #[test]
    fn test_sprite_scales_and_flips() {
        let mut atlas = SpriteAtlas::new();
        atlas.load(TextureKey::PlayButton);
        let mut list = DrawList::new(0);
        list.ui_sprite(Sprite::new(TextureKey::PlayButton, Vec2::new(640.0, 360.0), 0.5));
        let (lo, hi) = bounds(&tessellate(&list, &atlas));
        assert!((lo.x - 565.0).abs() < 0.5 && (hi.x - 715.0).abs() < 0.5);
        assert!((lo.y - 335.0).abs() < 0.5 && (hi.y - 385.0).abs() < 0.5);

        atlas.load(TextureKey::Character(crate::sim::CharacterState::Idle));
        let body = |flip: bool| {
            let mut list = DrawList::new(0);
            list.ui_sprite(Sprite {
                flip_x: flip,
                ..Sprite::new(crate::sim::CharacterState::Idle.texture(), Vec2::ZERO, 1.0)
            });
            bounds(&tessellate(&list, &atlas))
        };
        let (right_lo, right_hi) = body(false);
        let (left_lo, left_hi) = body(true);
        assert!((right_lo.x + left_hi.x).abs() < 1e-3);
        assert!((right_hi.x + left_lo.x).abs() < 1e-3);
    }

    #[test]
    fn test_tint_and_outline() {
        let key = crate::sim::CharacterState::Idle.texture();
        let mut atlas = SpriteAtlas::new();
        atlas.load(key);
        let plain = {
            let mut list = DrawList::new(0);
            list.ui_sprite(Sprite::new(key, Vec2::ZERO, 1.0).with_tint(0x000000));
            tessellate(&list, &atlas)
        };
        let outlined = {
            let mut list = DrawList::new(0);
            list.ui_sprite(Sprite {
                outline: true,
                ..Sprite::new(key, Vec2::ZERO, 1.0).with_tint(0x000000)
            });
            tessellate(&list, &atlas)
        };
        assert!(outlined.len() > plain.len());
        assert!(outlined[0].color[0] > 0.99);
        assert!(plain.iter().any(|v| v.color[..3] == [0.0, 0.0, 0.0]));
    }
}
