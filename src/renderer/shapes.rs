//! Shape generation for 2D primitives
//!
//! Outlines are produced as point loops so sprite templates can transform
//! them before they are filled.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;
use crate::sim::Rect;

/// Segments used for each quarter-circle corner
pub const CORNER_SEGMENTS: u32 = 6;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let inner = ellipse_points(center, Vec2::splat(inner_radius), segments);
    let outer = ellipse_points(center, Vec2::splat(outer_radius), segments);
    band(&outer, &inner, color)
}

/// Segment count that keeps a curve of this radius smooth on screen
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 0.75) as u32).clamp(12, 64)
}

/// Points around an ellipse, counter-clockwise from +x
pub fn ellipse_points(center: Vec2, radii: Vec2, segments: u32) -> Vec<Vec2> {
    (0..segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * 2.0 * PI;
            center + Vec2::new(radii.x * theta.cos(), radii.y * theta.sin())
        })
        .collect()
}

/// Points around a rectangle with rounded corners
///
/// Always yields `4 * (CORNER_SEGMENTS + 1)` points so two outlines of
/// different sizes pair up for `band`.
pub fn rounded_rect_points(min: Vec2, max: Vec2, radius: f32) -> Vec<Vec2> {
    let size = max - min;
    let r = radius.clamp(0.0, size.x.min(size.y) / 2.0);
    let corners = [
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), FRAC_PI_2),
        (Vec2::new(min.x + r, min.y + r), PI),
        (Vec2::new(max.x - r, min.y + r), PI + FRAC_PI_2),
    ];

    let mut points = Vec::with_capacity(4 * (CORNER_SEGMENTS as usize + 1));
    for (center, start) in corners {
        for i in 0..=CORNER_SEGMENTS {
            let theta = start + FRAC_PI_2 * i as f32 / CORNER_SEGMENTS as f32;
            points.push(center + Vec2::new(theta.cos(), theta.sin()) * r);
        }
    }
    points
}

/// Points of a thick line segment as a quad, extended by half the width at each end
pub fn segment_points(a: Vec2, b: Vec2, width: f32) -> Vec<Vec2> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let a = a - dir * (width / 2.0);
    let b = b + dir * (width / 2.0);
    vec![a + perp, b + perp, b - perp, a - perp]
}

/// Fill a convex outline as a triangle fan around its centroid
pub fn fill_convex(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let center = points.iter().copied().sum::<Vec2>() / points.len() as f32;
    let mut vertices = Vec::with_capacity(points.len() * 3);
    for i in 0..points.len() {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }
    vertices
}

/// Fill the band between two outlines with matching point counts
pub fn band(outer: &[Vec2], inner: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    let n = outer.len().min(inner.len());
    let mut vertices = Vec::with_capacity(n * 6);
    for i in 0..n {
        let j = (i + 1) % n;
        let (o1, o2, i1, i2) = (outer[i], outer[j], inner[i], inner[j]);

        vertices.push(Vertex::new(i1.x, i1.y, color));
        vertices.push(Vertex::new(o1.x, o1.y, color));
        vertices.push(Vertex::new(i2.x, i2.y, color));

        vertices.push(Vertex::new(i2.x, i2.y, color));
        vertices.push(Vertex::new(o1.x, o1.y, color));
        vertices.push(Vertex::new(o2.x, o2.y, color));
    }
    vertices
}

/// Filled rectangle, rounded when `radius` is positive
pub fn rect(rect: &Rect, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let min = Vec2::new(rect.x, rect.y);
    let max = min + rect.size();
    if radius <= 0.0 {
        return quad(min, max, color);
    }
    fill_convex(&rounded_rect_points(min, max, radius), color)
}

/// Border drawn inside the edge of a rectangle
pub fn rect_border(rect: &Rect, radius: f32, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let min = Vec2::new(rect.x, rect.y);
    let max = min + rect.size();
    let inset = Vec2::splat(width.min(rect.w / 2.0).min(rect.h / 2.0));
    let outer = rounded_rect_points(min, max, radius);
    let inner = rounded_rect_points(min + inset, max - inset, (radius - width).max(0.0));
    band(&outer, &inner, color)
}

fn quad(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_rect_point_count_is_stable() {
        let a = rounded_rect_points(Vec2::ZERO, Vec2::new(100.0, 50.0), 10.0);
        let b = rounded_rect_points(Vec2::ZERO, Vec2::new(4.0, 4.0), 0.0);
        assert_eq!(a.len(), b.len());
        for p in &a {
            assert!(p.x >= -1e-3 && p.x <= 100.001);
            assert!(p.y >= -1e-3 && p.y <= 50.001);
        }
    }

    #[test]
    fn test_sharp_rect_is_two_triangles() {
        let v = rect(&Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, [1.0; 4]);
        assert_eq!(v.len(), 6);
    }

    #[test]
    fn test_segment_quad_extends_past_endpoints() {
        let q = segment_points(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0);
        let min_x = q.iter().map(|p| p.x).fold(f32::MAX, f32::min);
        let max_x = q.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!((min_x + 1.0).abs() < 1e-5);
        assert!((max_x - 11.0).abs() < 1e-5);
    }

    #[test]
    fn test_ring_vertex_count() {
        assert_eq!(ring(Vec2::ZERO, 5.0, 10.0, [1.0; 4], 16).len(), 16 * 6);
    }
}
