//! Procedural sprite templates
//!
//! Every texture is a list of vector parts laid out in texture pixels around
//! the texture centre. Parts painted `Tinted` are multiplied by the sprite's
//! tint; `Fixed` parts keep their colour. Templates are built once when the
//! preload scene asks for a texture and cached in the atlas.

use std::collections::HashMap;

use glam::Vec2;

use super::glyphs;
use super::vertex::multiply;
use crate::sim::character::CharacterState;
use crate::sim::scene::{dropship, map};
use crate::sim::{ActionKind, Hat, Pet, Rect, Skin, TextureKey};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fixed(u32),
    /// Multiplied by the sprite tint (white when untinted)
    Tinted(u32),
}

impl Paint {
    pub fn resolve(&self, tint: Option<u32>) -> u32 {
        match (*self, tint) {
            (Paint::Fixed(c), _) => c,
            (Paint::Tinted(c), Some(t)) => multiply(c, t),
            (Paint::Tinted(c), None) => c,
        }
    }

    pub fn is_tinted(&self) -> bool {
        matches!(self, Paint::Tinted(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prim {
    Ellipse { center: Vec2, radii: Vec2 },
    Rect { min: Vec2, max: Vec2, radius: f32 },
    /// Inner border of a rounded rectangle
    Border {
        min: Vec2,
        max: Vec2,
        radius: f32,
        width: f32,
    },
    /// Thick line segment
    Line { a: Vec2, b: Vec2, width: f32 },
    /// Convex polygon
    Poly(Vec<Vec2>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub prim: Prim,
    pub paint: Paint,
    pub alpha: f32,
}

/// Vector drawing for one frame of a texture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub parts: Vec<Part>,
}

impl Template {
    fn push(&mut self, prim: Prim, paint: Paint) -> &mut Self {
        self.parts.push(Part {
            prim,
            paint,
            alpha: 1.0,
        });
        self
    }

    /// Set the alpha of the most recently added part
    fn alpha(&mut self, alpha: f32) -> &mut Self {
        if let Some(part) = self.parts.last_mut() {
            part.alpha = alpha;
        }
        self
    }

    fn ellipse(&mut self, center: Vec2, radii: Vec2, paint: Paint) -> &mut Self {
        self.push(Prim::Ellipse { center, radii }, paint)
    }

    fn circle(&mut self, center: Vec2, radius: f32, paint: Paint) -> &mut Self {
        self.ellipse(center, Vec2::splat(radius), paint)
    }

    fn rect(&mut self, min: Vec2, max: Vec2, radius: f32, paint: Paint) -> &mut Self {
        self.push(Prim::Rect { min, max, radius }, paint)
    }

    fn border(&mut self, min: Vec2, max: Vec2, radius: f32, width: f32, paint: Paint) -> &mut Self {
        self.push(
            Prim::Border {
                min,
                max,
                radius,
                width,
            },
            paint,
        )
    }

    fn line(&mut self, a: Vec2, b: Vec2, width: f32, paint: Paint) -> &mut Self {
        self.push(Prim::Line { a, b, width }, paint)
    }

    fn poly(&mut self, points: &[Vec2], paint: Paint) -> &mut Self {
        self.push(Prim::Poly(points.to_vec()), paint)
    }

    fn text(&mut self, text: &str, center: Vec2, height: f32, width: f32, paint: Paint) -> &mut Self {
        for (a, b) in glyphs::text_segments(text, center, height) {
            self.line(a, b, width, paint);
        }
        self
    }

    /// Fill a rectangle given in the 1280x720 screen space of a full-screen texture
    fn screen_rect(&mut self, rect: &Rect, radius: f32, paint: Paint) -> &mut Self {
        let min = Vec2::new(rect.x, rect.y) - SCREEN_CENTER;
        self.rect(min, min + rect.size(), radius, paint)
    }
}

const SCREEN_CENTER: Vec2 = Vec2::new(640.0, 360.0);

fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

/// Placement of a crewmate figure inside a template
#[derive(Debug, Clone, Copy)]
struct Pose {
    offset: Vec2,
    scale: f32,
    /// Vertical offset of the left and right leg
    legs: [f32; 2],
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            legs: [0.0, 0.0],
        }
    }
}

const VISOR: u32 = 0x9fd6e8;

/// Bean body with backpack, legs and visor, facing right
fn crewmate(t: &mut Template, pose: Pose, paint: impl Fn(u32) -> Paint) {
    let p = |x: f32, y: f32| pose.offset + v(x, y) * pose.scale;
    let s = pose.scale;

    t.rect(p(-23.0, -8.0), p(-12.0, 14.0), 4.0 * s, paint(0xa0a0a0));
    t.rect(
        p(-16.0, 10.0 + pose.legs[0]),
        p(-3.0, 26.0 + pose.legs[0]),
        4.0 * s,
        paint(0xc8c8c8),
    );
    t.rect(
        p(3.0, 10.0 + pose.legs[1]),
        p(16.0, 26.0 + pose.legs[1]),
        4.0 * s,
        paint(0xc8c8c8),
    );
    t.rect(p(-16.0, -24.0), p(16.0, 18.0), 15.0 * s, paint(0xffffff));
    t.rect(p(-2.0, -15.0), p(18.0, -2.0), 6.0 * s, Paint::Fixed(VISOR));
    t.rect(p(5.0, -12.0), p(14.0, -8.0), 2.0 * s, Paint::Fixed(0xffffff))
        .alpha(0.8);
}

fn character(state: CharacterState, frame: u32) -> Template {
    let mut t = Template::default();
    match state {
        CharacterState::Idle | CharacterState::Lobby => {
            crewmate(&mut t, Pose::default(), Paint::Tinted);
        }
        CharacterState::Walk => {
            let stride = [0.0, -4.0, 0.0, 4.0][(frame % 4) as usize];
            let bob = if frame % 2 == 1 { -1.5 } else { 0.0 };
            crewmate(
                &mut t,
                Pose {
                    offset: v(0.0, bob),
                    legs: [stride, -stride],
                    ..Default::default()
                },
                Paint::Tinted,
            );
        }
        CharacterState::Vent => {
            crewmate(
                &mut t,
                Pose {
                    offset: v(0.0, 10.0),
                    ..Default::default()
                },
                Paint::Tinted,
            );
            vent_grate(&mut t, v(0.0, 24.0));
        }
        CharacterState::VentPlayer => {
            vent_grate(&mut t, v(0.0, 20.0));
        }
        CharacterState::Ghost => {
            t.rect(v(-16.0, -24.0), v(16.0, 14.0), 15.0, Paint::Tinted(0xffffff));
            for x in [-10.0, 0.0, 10.0] {
                t.circle(v(x, 14.0), 6.0, Paint::Tinted(0xffffff));
            }
            t.rect(v(-2.0, -15.0), v(18.0, -2.0), 6.0, Paint::Fixed(VISOR));
        }
        CharacterState::VoteIcon => {
            t.ellipse(v(0.0, 4.0), v(20.0, 18.0), Paint::Tinted(0xffffff));
            t.rect(v(-4.0, -4.0), v(18.0, 8.0), 5.0, Paint::Fixed(VISOR));
        }
        CharacterState::Death => dead_body(&mut t, 1.0),
        CharacterState::Ejected => {
            crewmate(
                &mut t,
                Pose {
                    legs: [-6.0, 3.0],
                    ..Default::default()
                },
                Paint::Tinted,
            );
        }
        CharacterState::KillAnimation => {
            let frame = frame.min(7);
            if frame < 4 {
                crewmate(&mut t, Pose::default(), Paint::Tinted);
                let reach = (frame + 1) as f32 / 4.0;
                t.line(
                    v(-28.0, -26.0),
                    v(-28.0 + 56.0 * reach, -26.0 + 40.0 * reach),
                    3.0,
                    Paint::Fixed(0xe74c3c),
                );
            } else {
                let spread = (frame - 3) as f32 / 4.0;
                t.ellipse(v(0.0, 22.0), v(26.0 * spread, 6.0 * spread), Paint::Fixed(0x8b0000))
                    .alpha(0.8);
                dead_body(&mut t, spread);
            }
        }
    }
    t
}

/// Lower half of a body with a bone sticking out
fn dead_body(t: &mut Template, bone: f32) {
    t.rect(v(-16.0, 10.0), v(-3.0, 26.0), 4.0, Paint::Tinted(0xc8c8c8));
    t.rect(v(3.0, 10.0), v(16.0, 26.0), 4.0, Paint::Tinted(0xc8c8c8));
    t.rect(v(-16.0, 0.0), v(16.0, 18.0), 6.0, Paint::Tinted(0xffffff));
    t.ellipse(v(0.0, 1.0), v(14.0, 3.0), Paint::Fixed(0x8b0000));
    let top = 1.0 - 12.0 * bone;
    t.line(v(0.0, 1.0), v(0.0, top), 4.0, Paint::Fixed(0xf5f5f5));
    t.circle(v(-2.5, top), 2.5, Paint::Fixed(0xf5f5f5));
    t.circle(v(2.5, top), 2.5, Paint::Fixed(0xf5f5f5));
}

fn vent_grate(t: &mut Template, center: Vec2) {
    let half = v(26.0, 7.0);
    t.rect(center - half, center + half, 3.0, Paint::Fixed(0x57606f));
    for i in 0..4 {
        let x = center.x - 18.0 + i as f32 * 12.0;
        t.line(v(x, center.y - 4.0), v(x, center.y + 4.0), 3.0, Paint::Fixed(0x2f3542));
    }
}

fn hat(hat: Hat) -> Template {
    let mut t = Template::default();
    match hat {
        Hat::Eggscellent => {
            t.ellipse(v(0.0, 4.0), v(20.0, 14.0), Paint::Fixed(0xfdfdfd));
            t.circle(v(2.0, 2.0), 8.0, Paint::Fixed(0xf9ca24));
        }
        Hat::GiftWrapped => {
            t.rect(v(-18.0, -8.0), v(18.0, 18.0), 3.0, Paint::Tinted(0xffffff));
            t.line(v(0.0, -8.0), v(0.0, 18.0), 5.0, Paint::Fixed(0xf1c40f));
            t.line(v(-18.0, 5.0), v(18.0, 5.0), 5.0, Paint::Fixed(0xf1c40f));
            t.ellipse(v(-6.0, -12.0), v(6.0, 4.0), Paint::Fixed(0xf1c40f));
            t.ellipse(v(6.0, -12.0), v(6.0, 4.0), Paint::Fixed(0xf1c40f));
        }
        Hat::Knighted => {
            t.ellipse(v(-6.0, -20.0), v(5.0, 10.0), Paint::Tinted(0xffffff));
            t.rect(v(-18.0, -12.0), v(18.0, 20.0), 12.0, Paint::Fixed(0xb2bec3));
            t.line(v(-4.0, 6.0), v(16.0, 6.0), 3.0, Paint::Fixed(0x2d3436));
        }
        Hat::Pompous => {
            t.rect(v(-22.0, 14.0), v(22.0, 20.0), 2.0, Paint::Fixed(0x222222));
            t.rect(v(-14.0, -18.0), v(14.0, 16.0), 2.0, Paint::Fixed(0x222222));
            t.rect(v(-14.0, 6.0), v(14.0, 11.0), 0.0, Paint::Tinted(0xffffff));
        }
        Hat::Punkin => {
            t.line(v(0.0, -10.0), v(3.0, -18.0), 4.0, Paint::Fixed(0x27ae60));
            for x in [-10.0, 10.0, 0.0] {
                t.ellipse(v(x, 4.0), v(12.0, 14.0), Paint::Fixed(0xe67e22));
            }
            t.poly(&[v(-8.0, 0.0), v(-4.0, -5.0), v(0.0, 0.0)], Paint::Fixed(0x2d3436));
            t.poly(&[v(4.0, 0.0), v(8.0, -5.0), v(12.0, 0.0)], Paint::Fixed(0x2d3436));
        }
    }
    t
}

fn skin(skin: Skin) -> Template {
    let mut t = Template::default();
    match skin {
        Skin::Flashy => {
            t.rect(v(-16.0, 0.0), v(16.0, 18.0), 6.0, Paint::Fixed(0xe84393));
            t.line(v(-12.0, 4.0), v(12.0, 14.0), 2.0, Paint::Fixed(0xfdcb6e));
            t.line(v(-12.0, 14.0), v(12.0, 4.0), 2.0, Paint::Fixed(0xfdcb6e));
        }
        Skin::Officer => {
            t.rect(v(-16.0, 0.0), v(16.0, 18.0), 6.0, Paint::Fixed(0x2c3e50));
            t.circle(v(8.0, 6.0), 3.5, Paint::Fixed(0xf1c40f));
            t.line(v(-16.0, 15.0), v(16.0, 15.0), 3.0, Paint::Fixed(0x1e272e));
        }
        Skin::Suited => {
            t.rect(v(-16.0, 0.0), v(16.0, 18.0), 6.0, Paint::Fixed(0x222222));
            t.poly(&[v(-2.0, 0.0), v(14.0, 0.0), v(6.0, 12.0)], Paint::Fixed(0xfdfdfd));
            t.poly(&[v(4.0, 2.0), v(8.0, 2.0), v(6.0, 12.0)], Paint::Fixed(0xc0392b));
        }
    }
    t
}

fn pet(pet: Pet) -> Template {
    let mut t = Template::default();
    match pet {
        Pet::MiniCrewmate => {
            crewmate(
                &mut t,
                Pose {
                    offset: v(0.0, 4.0),
                    scale: 0.7,
                    ..Default::default()
                },
                |shade| Paint::Fixed(multiply(0x3498db, shade)),
            );
        }
        Pet::Bedcrab => {
            t.line(v(-18.0, 4.0), v(-26.0, -6.0), 4.0, Paint::Fixed(0xa0522d));
            t.line(v(18.0, 4.0), v(26.0, -6.0), 4.0, Paint::Fixed(0xa0522d));
            t.ellipse(v(0.0, 8.0), v(20.0, 12.0), Paint::Fixed(0xd2691e));
            t.rect(v(-16.0, -6.0), v(16.0, 4.0), 3.0, Paint::Fixed(0xecf0f1));
            t.circle(v(-6.0, 8.0), 2.5, Paint::Fixed(0x111111));
            t.circle(v(6.0, 8.0), 2.5, Paint::Fixed(0x111111));
        }
        Pet::Robot => {
            t.line(v(0.0, -12.0), v(0.0, -22.0), 2.0, Paint::Fixed(0x95a5a6));
            t.circle(v(0.0, -23.0), 3.0, Paint::Fixed(0xe74c3c));
            t.rect(v(-14.0, -12.0), v(14.0, 16.0), 6.0, Paint::Fixed(0xbdc3c7));
            t.rect(v(-9.0, -6.0), v(9.0, 4.0), 3.0, Paint::Fixed(0x2d3436));
            t.circle(v(4.0, -1.0), 2.5, Paint::Fixed(0x00cec9));
        }
    }
    t
}

fn action(kind: ActionKind) -> Template {
    let mut t = Template::default();
    t.circle(Vec2::ZERO, 48.0, Paint::Fixed(0x1e272e)).alpha(0.85);
    t.border(v(-48.0, -48.0), v(48.0, 48.0), 48.0, 4.0, Paint::Tinted(0xffffff));
    let icon = Paint::Tinted(0xffffff);
    match kind {
        ActionKind::Report => {
            t.poly(&[v(-20.0, -8.0), v(8.0, -22.0), v(8.0, 14.0), v(-20.0, 4.0)], icon);
            t.rect(v(-26.0, -8.0), v(-18.0, 4.0), 1.0, icon);
            t.line(v(-14.0, 4.0), v(-10.0, 14.0), 4.0, icon);
        }
        ActionKind::Use => {
            t.rect(v(-18.0, -18.0), v(18.0, 14.0), 4.0, icon);
            t.rect(v(-12.0, -12.0), v(12.0, 6.0), 2.0, Paint::Fixed(0x1e272e));
            t.line(v(-8.0, 0.0), v(0.0, -6.0), 3.0, icon);
        }
        ActionKind::Kill => {
            t.poly(&[v(-20.0, 10.0), v(16.0, -22.0), v(-10.0, 16.0)], icon);
            t.line(v(-16.0, 6.0), v(-6.0, 18.0), 5.0, Paint::Tinted(0xe74c3c));
            t.line(v(-12.0, 12.0), v(-22.0, 22.0), 6.0, Paint::Tinted(0xe74c3c));
        }
        ActionKind::Sabotage => {
            t.poly(&[v(4.0, -24.0), v(-14.0, 2.0), v(2.0, 2.0)], Paint::Tinted(0xf1c40f));
            t.poly(&[v(-2.0, -2.0), v(14.0, -2.0), v(-4.0, 22.0)], Paint::Tinted(0xf1c40f));
        }
        ActionKind::Vent => {
            t.rect(v(-22.0, -14.0), v(22.0, 10.0), 4.0, icon);
            for i in 0..4 {
                let x = -13.0 + i as f32 * 9.0;
                t.line(v(x, -8.0), v(x, 4.0), 3.0, Paint::Fixed(0x1e272e));
            }
        }
    }
    let caption = match kind {
        ActionKind::Report => "REPORT",
        ActionKind::Use => "USE",
        ActionKind::Kill => "KILL",
        ActionKind::Sabotage => "SABOTAGE",
        ActionKind::Vent => "VENT",
    };
    t.text(caption, v(0.0, 33.0), 9.0, 2.0, Paint::Tinted(0xffffff));
    t
}

/// Menu button face: dark plate, white border and caption
fn menu_button(caption: &str, plate: u32) -> Template {
    let mut t = Template::default();
    let half = v(150.0, 50.0);
    t.rect(-half, half, 18.0, Paint::Fixed(plate)).alpha(0.92);
    t.border(-half, half, 18.0, 5.0, Paint::Tinted(0xffffff));
    t.text(caption, Vec2::ZERO, 36.0, 6.0, Paint::Tinted(0xffffff));
    t
}

fn logo() -> Template {
    let mut t = Template::default();
    let center = v(0.0, -10.0);
    t.text("CREWMATE", center, 96.0, 22.0, Paint::Fixed(0xffffff));
    t.text("CREWMATE", center, 96.0, 12.0, Paint::Fixed(0xc51111));
    crewmate(
        &mut t,
        Pose {
            offset: v(0.0, 110.0),
            scale: 0.9,
            ..Default::default()
        },
        |shade| Paint::Fixed(multiply(0xc51111, shade)),
    );
    t
}

fn gear() -> Template {
    let mut t = Template::default();
    let tooth = Paint::Tinted(0xbdc3c7);
    for i in 0..8 {
        let theta = i as f32 * std::f32::consts::PI / 4.0;
        let dir = v(theta.cos(), theta.sin());
        t.line(dir * 28.0, dir * 42.0, 14.0, tooth);
    }
    t.circle(Vec2::ZERO, 32.0, tooth);
    t.circle(Vec2::ZERO, 13.0, Paint::Fixed(0x2c3e50));
    t
}

fn emergency_button() -> Template {
    let mut t = Template::default();
    t.circle(Vec2::ZERO, 48.0, Paint::Fixed(0x7f8c8d));
    t.circle(Vec2::ZERO, 40.0, Paint::Fixed(0x2d3436));
    t.circle(v(0.0, -3.0), 34.0, Paint::Tinted(0xe74c3c));
    t.ellipse(v(-10.0, -16.0), v(12.0, 7.0), Paint::Fixed(0xffffff))
        .alpha(0.35);
    t
}

fn laptop() -> Template {
    let mut t = Template::default();
    t.rect(v(-30.0, -28.0), v(30.0, 12.0), 4.0, Paint::Fixed(0x636e72));
    t.rect(v(-25.0, -23.0), v(25.0, 7.0), 2.0, Paint::Fixed(0x0984e3));
    t.rect(v(-40.0, 12.0), v(40.0, 24.0), 4.0, Paint::Fixed(0xb2bec3));
    t.line(v(-18.0, -12.0), v(8.0, -12.0), 3.0, Paint::Fixed(0x74b9ff));
    t.line(v(-18.0, -4.0), v(16.0, -4.0), 3.0, Paint::Fixed(0x74b9ff));
    t
}

fn shhh() -> Template {
    let mut t = Template::default();
    t.ellipse(v(0.0, -20.0), v(230.0, 170.0), Paint::Fixed(0xc51111));
    t.ellipse(v(0.0, -20.0), v(190.0, 135.0), Paint::Fixed(0xe74c3c))
        .alpha(0.6);
    crewmate(
        &mut t,
        Pose {
            offset: v(-10.0, -40.0),
            scale: 3.2,
            ..Default::default()
        },
        |shade| Paint::Fixed(multiply(0xecf0f1, shade)),
    );
    t.rect(v(50.0, -60.0), v(66.0, -10.0), 6.0, Paint::Fixed(0xecf0f1));
    t.text("SHHHHH!", v(0.0, 160.0), 56.0, 10.0, Paint::Fixed(0xffffff));
    t
}

fn dropship_floor() -> Template {
    let mut t = Template::default();
    t.rect(-SCREEN_CENTER, SCREEN_CENTER, 0.0, Paint::Fixed(0x3b4252));
    for i in 1..16 {
        let x = -SCREEN_CENTER.x + i as f32 * 80.0;
        t.line(v(x, -SCREEN_CENTER.y), v(x, SCREEN_CENTER.y), 2.0, Paint::Fixed(0x434c5e));
    }
    for i in 1..9 {
        let y = -SCREEN_CENTER.y + i as f32 * 80.0;
        t.line(v(-SCREEN_CENTER.x, y), v(SCREEN_CENTER.x, y), 2.0, Paint::Fixed(0x434c5e));
    }
    for wall in &dropship::BOUNDS {
        t.screen_rect(wall, 0.0, Paint::Fixed(0x1e222b));
        let min = v(wall.x, wall.y) - SCREEN_CENTER;
        t.border(min, min + wall.size(), 0.0, 3.0, Paint::Fixed(0x4c566a));
    }
    for seat in &dropship::SEATS {
        let c = *seat - SCREEN_CENTER + v(0.0, 22.0);
        t.rect(c - v(22.0, 8.0), c + v(22.0, 8.0), 4.0, Paint::Fixed(0x5e81ac))
            .alpha(0.6);
    }
    t
}

fn map_floor() -> Template {
    let mut t = Template::default();
    t.rect(-SCREEN_CENTER, SCREEN_CENTER, 0.0, Paint::Fixed(0x2d3436));
    for i in 0..8 {
        for j in 0..5 {
            let min = v(i as f32 * 160.0, j as f32 * 144.0) - SCREEN_CENTER;
            t.border(min, min + v(160.0, 144.0), 0.0, 1.5, Paint::Fixed(0x353b48));
        }
    }
    for wall in &map::BOUNDS {
        t.screen_rect(wall, 6.0, Paint::Fixed(0x636e72));
        let min = v(wall.x, wall.y) - SCREEN_CENTER;
        t.border(min, min + wall.size(), 6.0, 3.0, Paint::Fixed(0x4b5359));
    }
    t
}

fn joystick(base: bool) -> Template {
    let mut t = Template::default();
    if base {
        t.circle(Vec2::ZERO, 50.0, Paint::Fixed(0x2d3436));
        t.border(v(-50.0, -50.0), v(50.0, 50.0), 50.0, 3.0, Paint::Fixed(0xdfe6e9));
    } else {
        t.circle(Vec2::ZERO, 25.0, Paint::Fixed(0xdfe6e9));
        t.circle(v(-6.0, -6.0), 10.0, Paint::Fixed(0xffffff))
            .alpha(0.5);
    }
    t
}

/// Number of animation frames stored for a texture
pub fn frame_count(key: TextureKey) -> u32 {
    match key {
        TextureKey::Character(state) => state.animation().map_or(1, |a| a.frames),
        _ => 1,
    }
}

/// Build one frame of a texture
pub fn build(key: TextureKey, frame: u32) -> Template {
    match key {
        TextureKey::Character(state) => character(state, frame),
        TextureKey::Hat(h) => hat(h),
        TextureKey::Skin(s) => skin(s),
        TextureKey::Pet(p) => pet(p),
        TextureKey::Action(a) => action(a),
        TextureKey::Logo => logo(),
        TextureKey::PlayButton => menu_button("PLAY", 0x1e272e),
        TextureKey::LocalButton => menu_button("LOCAL", 0x1e272e),
        TextureKey::SettingsButton => menu_button("SETTINGS", 0x1e272e),
        TextureKey::StartButton => menu_button("START", 0x1e8449),
        TextureKey::Gear => gear(),
        TextureKey::EmergencyButton => emergency_button(),
        TextureKey::Laptop => laptop(),
        TextureKey::Shhh => shhh(),
        TextureKey::DropshipFloor => dropship_floor(),
        TextureKey::MapFloor => map_floor(),
        TextureKey::JoystickBase => joystick(true),
        TextureKey::JoystickHandle => joystick(false),
    }
}

/// Cache of built templates, one entry per frame
#[derive(Debug, Default)]
pub struct SpriteAtlas {
    textures: HashMap<TextureKey, Vec<Template>>,
}

impl SpriteAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every frame of `key`; loading twice is a no-op
    pub fn load(&mut self, key: TextureKey) {
        self.textures.entry(key).or_insert_with(|| {
            let frames = (0..frame_count(key)).map(|f| build(key, f)).collect();
            log::debug!("Built texture {}", key.name());
            frames
        });
    }

    pub fn is_loaded(&self, key: TextureKey) -> bool {
        self.textures.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Template for a frame; out-of-range frames wrap
    pub fn get(&self, key: TextureKey, frame: u32) -> Option<&Template> {
        let frames = self.textures.get(&key)?;
        frames.get(frame as usize % frames.len().max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::assets::manifest;

    #[test]
    fn test_every_manifest_texture_builds() {
        let mut atlas = SpriteAtlas::new();
        for key in manifest() {
            atlas.load(key);
            for f in 0..frame_count(key) {
                let template = atlas.get(key, f).expect("loaded");
                assert!(!template.parts.is_empty(), "{} frame {f} is empty", key.name());
            }
        }
        assert_eq!(atlas.len(), manifest().len());
    }

    #[test]
    fn test_parts_fit_texture_bounds() {
        for key in manifest() {
            let half = key.size() / 2.0 + Vec2::splat(1.0);
            for f in 0..frame_count(key) {
                for part in &build(key, f).parts {
                    let center = match &part.prim {
                        Prim::Ellipse { center, .. } => *center,
                        Prim::Rect { min, max, .. } | Prim::Border { min, max, .. } => {
                            (*min + *max) / 2.0
                        }
                        Prim::Line { a, b, .. } => (*a + *b) / 2.0,
                        Prim::Poly(points) => points.iter().copied().sum::<Vec2>() / points.len() as f32,
                    };
                    assert!(
                        center.x.abs() <= half.x && center.y.abs() <= half.y,
                        "{} part outside frame at {center}",
                        key.name()
                    );
                }
            }
        }
    }

    #[test]
    fn test_walk_frames_differ() {
        assert_ne!(
            build(CharacterState::Walk.texture(), 1),
            build(CharacterState::Walk.texture(), 3)
        );
        assert_eq!(frame_count(CharacterState::KillAnimation.texture()), 8);
    }

    #[test]
    fn test_tint_multiplies_tinted_paint_only() {
        assert_eq!(Paint::Tinted(0xffffff).resolve(Some(0xc51111)), 0xc51111);
        assert_eq!(Paint::Fixed(VISOR).resolve(Some(0xc51111)), VISOR);
        assert_eq!(Paint::Tinted(0xa0a0a0).resolve(None), 0xa0a0a0);
    }

    #[test]
    fn test_unloaded_texture_is_missing() {
        let atlas = SpriteAtlas::new();
        assert!(atlas.get(TextureKey::Logo, 0).is_none());
        assert!(!atlas.is_loaded(TextureKey::Logo));
    }
}
