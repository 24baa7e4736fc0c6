//! Fit the logical 1280x720 game area into the browser window
//!
//! Scale mode is "fit, centered": uniform scale, letterboxed, with the
//! displayed size clamped between 800x600 and 1920x1080.

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

const MIN_SIZE: Vec2 = Vec2::new(800.0, 600.0);
const MAX_SIZE: Vec2 = Vec2::new(1920.0, 1080.0);

/// Placement of the game area inside the window (CSS pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Top-left corner of the game area
    pub offset: Vec2,
    /// Uniform logical-to-CSS scale
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// Compute the fitted viewport for a window size
    pub fn fit(window_w: f32, window_h: f32) -> Self {
        let min_scale = (MIN_SIZE.x / SCREEN_WIDTH).max(MIN_SIZE.y / SCREEN_HEIGHT);
        let max_scale = (MAX_SIZE.x / SCREEN_WIDTH).min(MAX_SIZE.y / SCREEN_HEIGHT);

        let scale = (window_w / SCREEN_WIDTH)
            .min(window_h / SCREEN_HEIGHT)
            .clamp(min_scale, max_scale);

        let size = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) * scale;
        let offset = ((Vec2::new(window_w, window_h) - size) * 0.5).max(Vec2::ZERO);

        Self { offset, scale }
    }

    /// Displayed size in CSS pixels
    pub fn size(&self) -> Vec2 {
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) * self.scale
    }

    /// Convert a position relative to the game element into logical coordinates
    pub fn to_logical(&self, css: Vec2) -> Vec2 {
        css / self.scale
    }

    /// Convert a logical position into a position relative to the game element
    pub fn to_css(&self, logical: Vec2) -> Vec2 {
        logical * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_exact() {
        let vp = Viewport::fit(1280.0, 720.0);
        assert!((vp.scale - 1.0).abs() < 1e-6);
        assert_eq!(vp.offset, Vec2::ZERO);
    }

    #[test]
    fn test_fit_letterbox() {
        // Wide window: height limits, horizontal bars
        let vp = Viewport::fit(1600.0, 720.0);
        assert!((vp.scale - 1.0).abs() < 1e-6);
        assert!((vp.offset.x - 160.0).abs() < 1e-4);
        assert_eq!(vp.offset.y, 0.0);
    }

    #[test]
    fn test_fit_clamped() {
        let small = Viewport::fit(400.0, 300.0);
        assert!(small.size().x >= 800.0 - 1e-3);
        assert!(small.size().y >= 600.0 - 1e-3);

        let huge = Viewport::fit(4000.0, 3000.0);
        assert!(huge.size().x <= 1920.0 + 1e-3);
        assert!(huge.size().y <= 1080.0 + 1e-3);
    }

    #[test]
    fn test_roundtrip() {
        let vp = Viewport::fit(1920.0, 1080.0);
        let p = Vec2::new(640.0, 360.0);
        let back = vp.to_logical(vp.to_css(p));
        assert!((back - p).length() < 1e-3);
    }
}
