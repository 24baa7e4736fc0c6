//! Stroke font for text baked into sprite templates
//!
//! Glyphs are line segments on a 4x6 grid (y down). Only uppercase letters,
//! digits and a little punctuation are needed for button faces.

use glam::Vec2;

const GRID_W: f32 = 4.0;
const GRID_H: f32 = 6.0;
/// Horizontal advance in grid units
const ADVANCE: f32 = 6.0;

type Seg = (u8, u8, u8, u8);

fn glyph(c: char) -> &'static [Seg] {
    match c {
        'A' => &[(0, 6, 0, 2), (0, 2, 2, 0), (2, 0, 4, 2), (4, 2, 4, 6), (0, 3, 4, 3)],
        'B' => &[
            (0, 0, 0, 6),
            (0, 0, 3, 0),
            (3, 0, 4, 1),
            (4, 1, 4, 2),
            (4, 2, 3, 3),
            (0, 3, 3, 3),
            (3, 3, 4, 4),
            (4, 4, 4, 5),
            (4, 5, 3, 6),
            (3, 6, 0, 6),
        ],
        'C' => &[(4, 0, 0, 0), (0, 0, 0, 6), (0, 6, 4, 6)],
        'D' => &[(0, 0, 0, 6), (0, 0, 2, 0), (2, 0, 4, 2), (4, 2, 4, 4), (4, 4, 2, 6), (2, 6, 0, 6)],
        'E' => &[(4, 0, 0, 0), (0, 0, 0, 6), (0, 6, 4, 6), (0, 3, 3, 3)],
        'F' => &[(4, 0, 0, 0), (0, 0, 0, 6), (0, 3, 3, 3)],
        'G' => &[(4, 0, 0, 0), (0, 0, 0, 6), (0, 6, 4, 6), (4, 6, 4, 3), (4, 3, 2, 3)],
        'H' => &[(0, 0, 0, 6), (4, 0, 4, 6), (0, 3, 4, 3)],
        'I' => &[(0, 0, 4, 0), (2, 0, 2, 6), (0, 6, 4, 6)],
        'J' => &[(4, 0, 4, 6), (4, 6, 0, 6), (0, 6, 0, 4)],
        'K' => &[(0, 0, 0, 6), (4, 0, 0, 3), (0, 3, 4, 6)],
        'L' => &[(0, 0, 0, 6), (0, 6, 4, 6)],
        'M' => &[(0, 6, 0, 0), (0, 0, 2, 3), (2, 3, 4, 0), (4, 0, 4, 6)],
        'N' => &[(0, 6, 0, 0), (0, 0, 4, 6), (4, 6, 4, 0)],
        'O' | '0' => &[(0, 0, 4, 0), (4, 0, 4, 6), (4, 6, 0, 6), (0, 6, 0, 0)],
        'P' => &[(0, 6, 0, 0), (0, 0, 4, 0), (4, 0, 4, 3), (4, 3, 0, 3)],
        'Q' => &[(0, 0, 4, 0), (4, 0, 4, 6), (4, 6, 0, 6), (0, 6, 0, 0), (2, 4, 4, 6)],
        'R' => &[(0, 6, 0, 0), (0, 0, 4, 0), (4, 0, 4, 3), (4, 3, 0, 3), (1, 3, 4, 6)],
        'S' | '5' => &[(4, 0, 0, 0), (0, 0, 0, 3), (0, 3, 4, 3), (4, 3, 4, 6), (4, 6, 0, 6)],
        'T' => &[(0, 0, 4, 0), (2, 0, 2, 6)],
        'U' => &[(0, 0, 0, 6), (0, 6, 4, 6), (4, 6, 4, 0)],
        'V' => &[(0, 0, 2, 6), (2, 6, 4, 0)],
        'W' => &[(0, 0, 1, 6), (1, 6, 2, 3), (2, 3, 3, 6), (3, 6, 4, 0)],
        'X' => &[(0, 0, 4, 6), (4, 0, 0, 6)],
        'Y' => &[(0, 0, 2, 3), (4, 0, 2, 3), (2, 3, 2, 6)],
        'Z' => &[(0, 0, 4, 0), (4, 0, 0, 6), (0, 6, 4, 6)],
        '1' => &[(1, 1, 2, 0), (2, 0, 2, 6), (0, 6, 4, 6)],
        '2' => &[(0, 0, 4, 0), (4, 0, 4, 3), (4, 3, 0, 3), (0, 3, 0, 6), (0, 6, 4, 6)],
        '3' => &[(0, 0, 4, 0), (4, 0, 4, 6), (4, 6, 0, 6), (1, 3, 4, 3)],
        '!' => &[(2, 0, 2, 4), (2, 5, 2, 6)],
        '?' => &[(0, 0, 4, 0), (4, 0, 4, 3), (4, 3, 2, 3), (2, 3, 2, 4), (2, 5, 2, 6)],
        '-' => &[(1, 3, 3, 3)],
        _ => &[],
    }
}

/// Width of `text` drawn with glyphs `height` tall
pub fn text_width(text: &str, height: f32) -> f32 {
    let n = text.chars().count();
    if n == 0 {
        return 0.0;
    }
    let unit = height / GRID_H;
    ((n - 1) as f32 * ADVANCE + GRID_W) * unit
}

/// Line segments for `text` centred on `center`
pub fn text_segments(text: &str, center: Vec2, height: f32) -> Vec<(Vec2, Vec2)> {
    let unit = height / GRID_H;
    let origin = center - Vec2::new(text_width(text, height), height) / 2.0;
    let mut segments = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let left = origin + Vec2::new(i as f32 * ADVANCE * unit, 0.0);
        for &(x1, y1, x2, y2) in glyph(c.to_ascii_uppercase()) {
            segments.push((
                left + Vec2::new(x1 as f32, y1 as f32) * unit,
                left + Vec2::new(x2 as f32, y2 as f32) * unit,
            ));
        }
    }
    segments
}
