//! Instance layout shared with the host renderer

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Semantic material of a drawn element; the host maps it to a shader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MaterialTag {
    Ball = 0,
    BallStripe = 1,
    Backboard = 2,
    Rim = 3,
    Pole = 4,
    Net = 5,
    Court = 6,
    Wall = 7,
    Text = 8,
}

impl MaterialTag {
    /// Base color for this material
    pub fn color(&self) -> [f32; 4] {
        match self {
            MaterialTag::Ball => colors::BASKETBALL,
            MaterialTag::BallStripe => colors::BLACK,
            MaterialTag::Backboard | MaterialTag::Court | MaterialTag::Net => colors::WHITE,
            MaterialTag::Rim | MaterialTag::Pole => colors::RED,
            MaterialTag::Wall => colors::BLACK,
            MaterialTag::Text => colors::WHITE,
        }
    }
}

/// One drawable: world transform + material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderInstance {
    pub transform: Mat4,
    pub material: MaterialTag,
}

impl RenderInstance {
    pub fn new(transform: Mat4, material: MaterialTag) -> Self {
        Self {
            transform,
            material,
        }
    }

    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw {
            model: self.transform.to_cols_array_2d(),
            color: self.material.color(),
            material: self.material as u32,
            _pad: [0; 3],
        }
    }
}

/// GPU-ready instance (column-major model matrix, 96 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub material: u32,
    pub _pad: [u32; 3],
}

/// Colors for game elements
pub mod colors {
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const BASKETBALL: [f32; 4] = [0.973, 0.506, 0.345, 1.0]; // #f88158
}
