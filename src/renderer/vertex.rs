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
}

/// Colors for game elements
pub mod colors {
    pub const SEA: [f32; 4] = [0.05, 0.25, 0.45, 1.0];
    pub const MOUNTAIN: [f32; 4] = [0.45, 0.4, 0.35, 1.0];
    pub const BOAT: [f32; 4] = [0.85, 0.75, 0.55, 1.0];
    pub const PIRATE_BOAT: [f32; 4] = [0.2, 0.15, 0.15, 1.0];
    pub const BULLET: [f32; 4] = [1.0, 0.9, 0.3, 1.0];
    pub const PIRATE_BULLET: [f32; 4] = [1.0, 0.35, 0.2, 1.0];
    pub const BOOM: [f32; 4] = [1.0, 0.55, 0.1, 1.0];
    pub const HEART: [f32; 4] = [0.9, 0.1, 0.2, 1.0];
    pub const FLASH: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
}
