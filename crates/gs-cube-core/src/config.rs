//! Scene and display configuration.

use glam::Vec4;
use gs_cube_hal::{DepthFormat, PixelFormat};

use crate::gs::registers::ZTest;

/// Perspective clip planes. Left and right are scaled by the display aspect
/// ratio when the projection is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipPlanes {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

/// Everything the renderer needs to know about the fixed scene.
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    /// Framebuffer width in pixels.
    pub width: u16,
    /// Framebuffer height in pixels.
    pub height: u16,
    pub psm: PixelFormat,
    pub zsm: DepthFormat,
    pub z_test: ZTest,
    /// Centre of the GS primitive coordinate space (pixels).
    pub origin: f32,
    /// Significant bits of the depth value written with each vertex.
    pub z_bits: u32,
    pub clip: ClipPlanes,
    /// Drawing context (0 or 1) used for every context-dependent register.
    pub context: u8,
    /// Distance moved per direction event.
    pub step: f32,
    /// Alpha written with every converted vertex colour.
    pub alpha: u8,
    /// RGBA set along with PRIM when the triangle list starts.
    pub prim_color: [u8; 4],
    pub clear_color: [u8; 3],
    pub object_position: Vec4,
    pub object_rotation: Vec4,
    pub camera_position: Vec4,
    pub camera_rotation: Vec4,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 512,
            psm: PixelFormat::Psmct32,
            zsm: DepthFormat::Z32,
            z_test: ZTest::GreaterEqual,
            origin: 2048.0,
            z_bits: 32,
            clip: ClipPlanes {
                left: -3.0,
                right: 3.0,
                bottom: -3.0,
                top: 3.0,
                near: 1.0,
                far: 2000.0,
            },
            context: 0,
            step: 0.2,
            alpha: 0x80,
            prim_color: [0x80, 0x80, 0x80, 0x80],
            clear_color: [0x00, 0x00, 0x00],
            object_position: Vec4::new(0.0, 0.0, 0.0, 1.0),
            object_rotation: Vec4::new(0.0, 0.2, 0.0, 1.0),
            camera_position: Vec4::new(0.0, 0.0, 100.0, 1.0),
            camera_rotation: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl RenderConfig {
    /// Primitive coordinate of the framebuffer's top-left pixel: the
    /// coordinate space centre minus half the display resolution.
    pub fn xy_offset(&self) -> (f32, f32) {
        (
            self.origin - f32::from(self.width) / 2.0,
            self.origin - f32::from(self.height) / 2.0,
        )
    }
}
