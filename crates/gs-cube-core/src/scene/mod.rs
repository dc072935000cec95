//! Scene state carried across frames.

use glam::Vec4;

use crate::config::RenderConfig;
use crate::input::Direction;

/// Object and camera placement. The object accumulates direction events;
/// the camera stays fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    pub object_position: Vec4,
    pub object_rotation: Vec4,
    pub camera_position: Vec4,
    pub camera_rotation: Vec4,
}

impl FrameContext {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            object_position: config.object_position,
            object_rotation: config.object_rotation,
            camera_position: config.camera_position,
            camera_rotation: config.camera_rotation,
        }
    }

    /// Move the object one `step` in `direction`.
    pub fn apply(&mut self, direction: Direction, step: f32) {
        match direction {
            Direction::Left => self.object_position.x -= step,
            Direction::Right => self.object_position.x += step,
            Direction::Up => self.object_position.y += step,
            Direction::Down => self.object_position.y -= step,
        }
    }
}
