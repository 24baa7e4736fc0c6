//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::rgb_to_rgba;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Packed 0xRRGGBB plus alpha as a vertex color
#[inline]
pub fn rgba(color: u32, alpha: f32) -> [f32; 4] {
    rgb_to_rgba(color, alpha.clamp(0.0, 1.0))
}

/// Component-wise product of two packed colors
pub fn multiply(a: u32, b: u32) -> u32 {
    let channel = |shift: u32| {
        let x = (a >> shift) & 0xff;
        let y = (b >> shift) & 0xff;
        ((x * y + 127) / 255) << shift
    };
    channel(16) | channel(8) | channel(0)
}

/// Convert an sRGB-encoded color to linear for sRGB render targets
pub fn srgb_to_linear(color: [f32; 4]) -> [f32; 4] {
    let conv = |c: f32| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [conv(color[0]), conv(color[1]), conv(color[2]), color[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply() {
        assert_eq!(multiply(0xffffff, 0x3498db), 0x3498db);
        assert_eq!(multiply(0x000000, 0xffffff), 0x000000);
        assert_eq!(multiply(0xffffff, 0xffff99), 0xffff99);
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        let c = srgb_to_linear([0.0, 1.0, 0.5, 0.7]);
        assert_eq!(c[0], 0.0);
        assert!((c[1] - 1.0).abs() < 1e-5);
        assert!(c[2] > 0.2 && c[2] < 0.22);
        assert_eq!(c[3], 0.7);
    }
}
