//! Per-frame command stream: clear, draw the mesh as a triangle list, finish.

use crate::config::RenderConfig;
use crate::gs::draw::clear_qwords;
use crate::gs::packet::{CommandBuffer, PacketError};
use crate::gs::registers::{self, MappingType, PrimType, Primitive, Shading};
use crate::gs::vertex::GsVertex;
use crate::gs::ZBuffer;

/// Frame-invariant drawing state.
#[derive(Clone, Copy, Debug)]
pub struct DrawSetup {
    pub context: u8,
    pub zbuf: ZBuffer,
    /// Primitive coordinate of the framebuffer's top-left pixel.
    pub clear_x: f32,
    pub clear_y: f32,
    pub width: u16,
    pub height: u16,
    pub clear_color: [u8; 3],
    pub primitive: Primitive,
    /// RGBAQ set along with PRIM.
    pub prim_color: u64,
}

impl DrawSetup {
    pub fn new(config: &RenderConfig, zbuf: ZBuffer) -> Self {
        let (clear_x, clear_y) = config.xy_offset();
        let [r, g, b, a] = config.prim_color;
        Self {
            context: config.context,
            zbuf,
            clear_x,
            clear_y,
            width: config.width,
            height: config.height,
            clear_color: config.clear_color,
            primitive: mesh_primitive(),
            prim_color: registers::rgbaq(r, g, b, a, 1.0),
        }
    }
}

/// Flat shaded, untextured, unblended, antialiased triangle list.
pub fn mesh_primitive() -> Primitive {
    Primitive {
        kind: PrimType::Triangle,
        shading: Shading::Flat,
        mapping: false,
        fogging: false,
        blending: false,
        antialiasing: true,
        mapping_type: MappingType::St,
        colorfix: false,
    }
}

/// Quadwords a frame packet occupies for `index_count` indices on a
/// `width` pixel wide framebuffer, DMA tag included.
pub fn frame_packet_qwords(width: u16, index_count: usize) -> usize {
    1 // DMA tag
        + 2 // disable tests
        + clear_qwords(width)
        + 2 // enable tests
        + 4 // PRIM/RGBAQ A+D block and the REGLIST tag
        + index_count
        + 2 // finish
}

/// Build one frame's DMA chain into `buffer`.
///
/// Emits one (RGBAQ, XYZ2) pair per entry of `points`, in order. Returns the
/// packet length in quadwords, DMA tag included.
pub fn build_frame_packet(
    buffer: &mut CommandBuffer,
    setup: &DrawSetup,
    vertices: &[GsVertex],
    points: &[u16],
) -> Result<usize, PacketError> {
    let ctx = setup.context;
    let mut packet = buffer.chain();

    // Clear the framebuffer with the depth test forced to pass.
    packet.disable_tests(ctx);
    packet.clear(
        ctx,
        setup.clear_x,
        setup.clear_y,
        setup.width,
        setup.height,
        setup.clear_color,
    );
    packet.enable_tests(ctx, &setup.zbuf);

    packet.prim_start(ctx, &setup.primitive, setup.prim_color);
    for &index in points {
        // Indices were range-checked when the mesh was loaded.
        if let Some(vertex) = vertices.get(usize::from(index)) {
            packet.vertex(vertex);
        }
    }
    packet.prim_end(2, registers::RGBAQ_XYZ2_REGLIST);

    packet.finish();
    packet.finalize()
}
