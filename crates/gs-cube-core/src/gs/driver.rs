//! Display buffer allocation and the one-off drawing environment upload.
//!
//! Generic over the `gs-cube-hal` traits so it works on any platform.

use core::fmt;

use gs_cube_hal::{DisplaySurface, DmaChannel, FlowControl};

use super::packet::{CommandBuffer, PacketError};
use super::registers;
use super::{DisplayBuffers, FrameBuffer, ZBuffer};
use crate::config::RenderConfig;
use crate::math::fixed::ftoi4;

/// Error type for GS setup, generic over display surface errors.
#[derive(Debug)]
pub enum GsError<E: fmt::Debug> {
    /// VRAM allocation failed.
    ResourceExhaustion(E),
}

impl<E: fmt::Debug> fmt::Display for GsError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GsError::ResourceExhaustion(e) => write!(f, "VRAM allocation failed: {e:?}"),
        }
    }
}

impl DisplayBuffers {
    /// Allocate the framebuffer and depth buffer and tie the display read
    /// circuit to the framebuffer.
    pub fn allocate<S: DisplaySurface>(
        surface: &mut S,
        config: &RenderConfig,
    ) -> Result<Self, GsError<S::Error>> {
        let frame_address = surface
            .allocate_framebuffer(config.width, config.height, config.psm)
            .map_err(GsError::ResourceExhaustion)?;
        let frame = FrameBuffer {
            width: config.width,
            height: config.height,
            psm: config.psm,
            mask: 0,
            address: frame_address,
        };

        let z_address = surface
            .allocate_depthbuffer(config.width, config.height, config.zsm)
            .map_err(GsError::ResourceExhaustion)?;
        let zbuf = ZBuffer {
            enable: true,
            mask: false,
            method: config.z_test,
            zsm: config.zsm,
            address: z_address,
        };

        surface.init_display(frame.address, frame.width, frame.height, frame.psm);
        log::info!(
            "display {}x{} {:?} at 0x{:05X}, depth {:?} at 0x{:05X}",
            frame.width,
            frame.height,
            frame.psm,
            frame.address,
            zbuf.zsm,
            zbuf.address
        );

        Ok(Self { frame, zbuf })
    }
}

/// Build the drawing environment: render target, depth buffer, primitive
/// offset, scissor and default pixel pipeline state, closed by a FINISH.
pub fn build_environment(
    buffer: &mut CommandBuffer,
    buffers: &DisplayBuffers,
    config: &RenderConfig,
) -> Result<usize, PacketError> {
    let ctx = config.context;
    let frame = &buffers.frame;
    let zbuf = &buffers.zbuf;
    let (offset_x, offset_y) = config.xy_offset();

    let mut packet = buffer.normal();
    packet.ad(
        &[
            (
                registers::FRAME_1 + ctx,
                registers::frame(frame.address, frame.width, frame.psm as u8, frame.mask),
            ),
            (
                registers::ZBUF_1 + ctx,
                registers::zbuf(zbuf.address, zbuf.zsm as u8, zbuf.mask),
            ),
            (
                registers::XYOFFSET_1 + ctx,
                registers::xyoffset(ftoi4(offset_x), ftoi4(offset_y)),
            ),
            (
                registers::SCISSOR_1 + ctx,
                registers::scissor(0, frame.width - 1, 0, frame.height - 1),
            ),
            (registers::PRMODECONT, 1),
            (registers::COLCLAMP, 1),
            (registers::DTHE, 0),
            (registers::PABE, 0),
            (registers::FBA_1 + ctx, 0),
        ],
        false,
    );
    packet.enable_tests(ctx, zbuf);
    packet.finish();
    packet.finalize()
}

/// Upload the drawing environment with a normal transfer and wait until the
/// GS has applied it.
pub fn setup_environment<H: DmaChannel + FlowControl>(
    hw: &mut H,
    buffers: &DisplayBuffers,
    config: &RenderConfig,
) -> Result<(), PacketError> {
    let mut buffer = CommandBuffer::new();
    let qwords = build_environment(&mut buffer, buffers, config)?;

    hw.send_normal(buffer.as_slice());
    hw.wait_transfer_idle();
    hw.wait_render_finished();

    log::debug!("drawing environment uploaded ({qwords} quadwords)");
    Ok(())
}
