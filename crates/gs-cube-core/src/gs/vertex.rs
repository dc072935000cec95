//! GsVertex: vertex data packed into GS register format, and the per-frame
//! float to fixed-point converters.

use glam::{Vec3, Vec4};

use super::registers;
use crate::math::fixed;

/// A vertex packed for a REGLIST (RGBAQ, XYZ2) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GsVertex {
    /// [7:0]=R, [15:8]=G, [23:16]=B, [31:24]=A, [63:32]=Q (f32 bits).
    pub rgbaq: u64,
    /// [15:0]=X (12.4), [31:16]=Y (12.4), [63:32]=Z.
    pub xyz2: u64,
}

/// Where normalized device coordinates land in the primitive coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XyzFormat {
    /// NDC (0, 0) maps to (`center_x`, `center_y`) pixels.
    pub center_x: f32,
    pub center_y: f32,
    /// Significant depth bits (1..=32).
    pub z_bits: u32,
}

/// Convert one perspective-divided vertex to XYZ2.
///
/// NDC x -1..1 spans 0..2 * `center_x` pixels; y is flipped so that +y is up
/// on screen; z -1..1 spans the full depth range.
pub fn pack_xyz(format: &XyzFormat, v: Vec4) -> u64 {
    let x = fixed::ftoi4((v.x + 1.0) * format.center_x);
    let y = fixed::ftoi4((1.0 - v.y) * format.center_y);
    let z = fixed::depth_to_fixed(v.z, format.z_bits);
    registers::xyz(x, y, z)
}

/// Convert one vertex colour to RGBAQ. Channels 0.0..1.0 map to 0..255; Q is
/// 1/w, or 1.0 when w is zero.
pub fn pack_rgbq(color: Vec3, w: f32, alpha: u8) -> u64 {
    let q = if w != 0.0 { 1.0 / w } else { 1.0 };
    registers::rgbaq(
        fixed::unit_to_u8(color.x),
        fixed::unit_to_u8(color.y),
        fixed::unit_to_u8(color.z),
        alpha,
        q,
    )
}

/// Convert a frame's transformed vertices and the mesh colours into packed
/// register pairs, one per vertex, in order.
///
/// `out` is cleared first; conversion stops at its capacity.
pub fn convert_vertices<const N: usize>(
    out: &mut heapless::Vec<GsVertex, N>,
    format: &XyzFormat,
    transformed: &[Vec4],
    colors: &[Vec3],
    alpha: u8,
) {
    out.clear();
    for (v, color) in transformed.iter().zip(colors) {
        let packed = GsVertex {
            rgbaq: pack_rgbq(*color, v.w, alpha),
            xyz2: pack_xyz(format, *v),
        };
        if out.push(packed).is_err() {
            break;
        }
    }
}
