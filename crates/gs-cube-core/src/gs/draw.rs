//! Drawing commands appended to a packet: pixel tests, clears, primitives,
//! finish events.

use gs_cube_hal::Qword;

use super::packet::PacketBuilder;
use super::registers::{
    self, AlphaFail, AlphaTest, GifFlag, MappingType, PixelTest, PrimType, Primitive, Shading,
    ZTest,
};
use super::vertex::GsVertex;
use super::ZBuffer;
use crate::math::fixed::ftoi4;

/// Width of one clear sprite, one VRAM page column.
pub const CLEAR_STRIP_WIDTH: u16 = 64;

/// Number of sprite strips needed to clear `width` pixels.
pub fn clear_strips(width: u16) -> usize {
    usize::from(width).div_ceil(usize::from(CLEAR_STRIP_WIDTH))
}

/// Quadwords emitted by [`PacketBuilder::clear`] for a `width` pixel wide area.
pub fn clear_qwords(width: u16) -> usize {
    // GIF tag, PRIM, RGBAQ, then two XYZ2 per strip.
    3 + 2 * clear_strips(width)
}

fn test_register(z_enable: bool, z_method: ZTest) -> u64 {
    PixelTest {
        alpha_enable: true,
        alpha_method: AlphaTest::NotEqual,
        alpha_ref: 0x00,
        alpha_fail: AlphaFail::FramebufferOnly,
        dest_alpha_enable: false,
        dest_alpha_mode: false,
        z_enable,
        z_method,
    }
    .to_bits()
}

impl PacketBuilder<'_> {
    /// Append a PACKED A+D GIF tag followed by one register write per entry.
    pub fn ad(&mut self, writes: &[(u8, u64)], eop: bool) {
        let tag = registers::gif_tag(
            writes.len() as u16,
            eop,
            None,
            GifFlag::Packed,
            1,
            registers::GIF_REG_AD as u64,
        );
        self.push(Qword(tag));
        for &(reg, data) in writes {
            self.push(Qword::new(data, reg as u64));
        }
    }

    /// Let every pixel through the depth test so a clear cannot be rejected.
    pub fn disable_tests(&mut self, context: u8) {
        let test = test_register(true, ZTest::Always);
        self.ad(&[(registers::TEST_1 + context, test)], false);
    }

    /// Restore the depth buffer's configured test.
    pub fn enable_tests(&mut self, context: u8, zbuf: &ZBuffer) {
        let test = test_register(zbuf.enable, zbuf.method);
        self.ad(&[(registers::TEST_1 + context, test)], false);
    }

    /// Fill a `width` x `height` area whose top-left corner is at primitive
    /// coordinate (`x`, `y`) with an opaque colour, using sprite strips.
    pub fn clear(&mut self, context: u8, x: f32, y: f32, width: u16, height: u16, rgb: [u8; 3]) {
        let strips = clear_strips(width);
        let sprite = Primitive {
            kind: PrimType::Sprite,
            shading: Shading::Flat,
            mapping: false,
            fogging: false,
            blending: false,
            antialiasing: false,
            mapping_type: MappingType::St,
            colorfix: false,
        };

        let nloop = 2 + 2 * strips;
        let tag = registers::gif_tag(
            nloop as u16,
            false,
            None,
            GifFlag::Packed,
            1,
            registers::GIF_REG_AD as u64,
        );
        self.push(Qword(tag));
        self.push(Qword::new(sprite.to_bits(context), registers::PRIM as u64));
        self.push(Qword::new(
            registers::rgbaq(rgb[0], rgb[1], rgb[2], 0x80, 1.0),
            registers::RGBAQ as u64,
        ));

        let y0 = ftoi4(y);
        let y1 = ftoi4(y + f32::from(height));
        let right = x + f32::from(width);
        for strip in 0..strips {
            let x0 = x + (strip as f32) * f32::from(CLEAR_STRIP_WIDTH);
            let x1 = (x0 + f32::from(CLEAR_STRIP_WIDTH)).min(right);
            self.push(Qword::new(registers::xyz(ftoi4(x0), y0, 0), registers::XYZ2 as u64));
            self.push(Qword::new(registers::xyz(ftoi4(x1), y1, 0), registers::XYZ2 as u64));
        }
    }

    /// Set PRIM and the primitive's base colour, then open a REGLIST block
    /// for vertices. Close it with [`PacketBuilder::prim_end`].
    pub fn prim_start(&mut self, context: u8, prim: &Primitive, color: u64) {
        self.ad(
            &[
                (registers::PRIM, prim.to_bits(context)),
                (registers::RGBAQ, color),
            ],
            false,
        );
        self.reserve_prim_tag();
    }

    /// Append one (RGBAQ, XYZ2) register pair.
    pub fn vertex(&mut self, vertex: &GsVertex) {
        self.push(Qword::new(vertex.rgbaq, vertex.xyz2));
    }

    /// Close the open primitive: patch its REGLIST tag with the loop count
    /// implied by the data emitted since [`PacketBuilder::prim_start`].
    pub fn prim_end(&mut self, nreg: u8, reglist: u64) {
        // Nothing open, or the tag slot itself overflowed.
        let Some(tag_index) = self.take_prim_tag() else {
            return;
        };
        // Each quadword carries two 64-bit register writes.
        let words = (self.len() - tag_index - 1) * 2;
        let nloop = words / usize::from(nreg.max(1));
        let tag = registers::gif_tag(
            nloop.min(registers::GIF_NLOOP_MAX) as u16,
            true,
            None,
            GifFlag::Reglist,
            nreg,
            reglist,
        );
        self.patch(tag_index, Qword(tag));
    }

    /// Request a FINISH event once everything before it has been drawn.
    pub fn finish(&mut self) {
        self.ad(&[(registers::FINISH, 1)], true);
    }
}
