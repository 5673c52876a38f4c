//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

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

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND_TOP: [f32; 4] = [0.059, 0.090, 0.165, 1.0]; // #0f172a
    pub const BACKGROUND_BOTTOM: [f32; 4] = [0.008, 0.024, 0.090, 1.0]; // #020617
    pub const GUIDE_LINE: [f32; 4] = [0.580, 0.639, 0.722, 0.7];
    pub const PLAYER_FRONT: [f32; 4] = [0.220, 0.741, 0.973, 1.0]; // #38bdf8
    pub const PLAYER_BACK: [f32; 4] = [0.659, 0.333, 0.969, 1.0]; // #a855f7
    pub const PLAYER_FACE: [f32; 4] = [0.059, 0.090, 0.165, 1.0];
    pub const OBSTACLE_FLOOR: [f32; 4] = [0.984, 0.573, 0.235, 1.0]; // #fb923c
    pub const OBSTACLE_CEILING: [f32; 4] = [0.980, 0.800, 0.082, 1.0]; // #facc15
    pub const OBSTACLE_BORDER: [f32; 4] = [0.059, 0.090, 0.165, 0.7];
    pub const SPIKE: [f32; 4] = [0.976, 0.451, 0.086, 1.0]; // #f97316
}
