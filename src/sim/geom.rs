//! Axis-aligned rectangles and body-vs-wall overlap

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centred on a point
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            w: size.x,
            h: size.y,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Point containment (edges inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// True when a body of `size` centred on `pos` overlaps any of `bounds`
pub fn collides(pos: Vec2, size: Vec2, bounds: &[Rect]) -> bool {
    let body = Rect::centered(pos, size);
    bounds.iter().any(|b| body.overlaps(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_rule() {
        let wall = Rect::new(100.0, 100.0, 50.0, 50.0);
        let size = Vec2::new(30.0, 40.0);

        // Body centre inside the wall
        assert!(collides(Vec2::new(125.0, 125.0), size, &[wall]));
        // Body edge exactly touching the wall's left edge: no overlap
        assert!(!collides(Vec2::new(85.0, 125.0), size, &[wall]));
        // One pixel further in overlaps
        assert!(collides(Vec2::new(86.0, 125.0), size, &[wall]));
        // Far away
        assert!(!collides(Vec2::new(400.0, 400.0), size, &[wall]));
    }

    #[test]
    fn test_contains_and_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(r.center(), Vec2::new(60.0, 40.0));
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(r.contains(Vec2::new(110.0, 60.0)));
        assert!(!r.contains(Vec2::new(111.0, 60.0)));
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..200.0, ah in 1.0f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..200.0, bh in 1.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_centered_roundtrip(cx in -500.0f32..500.0, cy in -500.0f32..500.0, w in 1.0f32..100.0, h in 1.0f32..100.0) {
            let r = Rect::centered(Vec2::new(cx, cy), Vec2::new(w, h));
            prop_assert!((r.center() - Vec2::new(cx, cy)).length() < 1e-3);
        }
    }
}
