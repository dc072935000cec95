//! Camera pipeline matrices and the per-vertex transform.
//!
//! Matrices follow glam's column-vector convention, so the row-vector chain
//! `local_world . world_view . view_screen` is built right to left.

use glam::{Mat4, Vec3, Vec4};

/// Object rotation (Euler angles in `rotation.xyz`, applied X, then Y, then
/// Z) followed by translation to `position.xyz`.
pub fn create_local_world(position: Vec4, rotation: Vec4) -> Mat4 {
    Mat4::from_translation(position.truncate())
        * Mat4::from_rotation_z(rotation.z)
        * Mat4::from_rotation_y(rotation.y)
        * Mat4::from_rotation_x(rotation.x)
}

/// Inverse of the camera's own local_world: undo its translation, then its
/// rotation in reverse order.
pub fn create_world_view(position: Vec4, rotation: Vec4) -> Mat4 {
    Mat4::from_rotation_x(-rotation.x)
        * Mat4::from_rotation_y(-rotation.y)
        * Mat4::from_rotation_z(-rotation.z)
        * Mat4::from_translation(-position.truncate())
}

/// Perspective projection for the GS.
///
/// `left`/`right` are scaled by `aspect`. The camera looks down -Z; w' = -z.
/// Depth is mapped so that nearer points get larger z, matching a
/// greater-or-equal depth test.
pub fn create_view_screen(
    aspect: f32,
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    let left = left * aspect;
    let right = right * aspect;

    Mat4::from_cols(
        Vec4::new(2.0 * near / (right - left), 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / (top - bottom), 0.0, 0.0),
        Vec4::new(
            (right + left) / (right - left),
            (top + bottom) / (top - bottom),
            (far + near) / (far - near),
            -1.0,
        ),
        Vec4::new(0.0, 0.0, 2.0 * far * near / (far - near), 0.0),
    )
}

/// Compose `local_world`, then `world_view`, then `view_screen`.
pub fn create_local_screen(local_world: &Mat4, world_view: &Mat4, view_screen: &Mat4) -> Mat4 {
    *view_screen * *world_view * *local_world
}

/// Transform one homogeneous position and divide x, y, z by w (w is kept
/// for Q). A vanishing w skips the divide.
pub fn transform_vertex(local_screen: &Mat4, position: Vec4) -> Vec4 {
    let clip = *local_screen * position;
    let w = clip.w;
    if libm::fabsf(w) > 1e-6 {
        let ndc: Vec3 = clip.truncate() / w;
        ndc.extend(w)
    } else {
        clip
    }
}

/// Transform every vertex of a mesh into `out`, clearing it first.
///
/// Stops at `out`'s capacity.
pub fn calculate_vertices<const N: usize>(
    out: &mut heapless::Vec<Vec4, N>,
    positions: &[Vec4],
    local_screen: &Mat4,
) {
    out.clear();
    for &position in positions {
        if out.push(transform_vertex(local_screen, position)).is_err() {
            break;
        }
    }
}
