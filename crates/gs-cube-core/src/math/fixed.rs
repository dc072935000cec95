//! Fixed-point conversion helpers for GS register formats.
//!
//! Converts f32 values to the GS's native register formats:
//! - 12.4 unsigned fixed-point for primitive X/Y coordinates
//! - unsigned integer depth scaled to a configurable bit width
//! - 8-bit colour channels

use fixed::types::U12F4;

/// Convert f32 to 12.4 unsigned fixed-point (`ftoi4`).
///
/// Range: 0.0 to 4095.9375 (1/16 pixel resolution). Out-of-range values
/// saturate; NaN maps to 0.
pub fn ftoi4(val: f32) -> u16 {
    if val.is_nan() {
        return 0;
    }
    U12F4::saturating_from_num(val).to_bits()
}

/// Convert an NDC depth (-1.0 .. 1.0) to an unsigned depth of `bits`
/// significant bits. `bits` must be 1..=32.
pub fn depth_to_fixed(ndc_z: f32, bits: u32) -> u32 {
    let half_range = (1u64 << (bits - 1)) as f32;
    // Float to int casts saturate; 1.0 lands exactly on the range limit.
    let scaled = ((ndc_z + 1.0) * half_range) as u64;
    scaled.min((1u64 << bits) - 1) as u32
}

/// Convert a 0.0 .. 1.0 colour channel to 0 .. 255.
pub fn unit_to_u8(val: f32) -> u8 {
    (val.clamp(0.0, 1.0) * 255.0) as u8
}
