//! GS command layer: register formats, packet building, display setup.

pub mod draw;
pub mod driver;
pub mod packet;
pub mod registers;
pub mod vertex;

pub use driver::GsError;
pub use packet::{CommandBuffer, PacketBuilder, PacketError};
pub use registers::{Primitive, ZTest};
pub use vertex::GsVertex;

use gs_cube_hal::{DepthFormat, PixelFormat};

/// Colour buffer descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u16,
    pub height: u16,
    pub psm: PixelFormat,
    /// Bits set here are never written.
    pub mask: u32,
    /// VRAM word address.
    pub address: u32,
}

/// Depth buffer descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZBuffer {
    pub enable: bool,
    /// Disable depth writes.
    pub mask: bool,
    pub method: ZTest,
    pub zsm: DepthFormat,
    /// VRAM word address.
    pub address: u32,
}

/// The buffers allocated at startup and read by every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayBuffers {
    pub frame: FrameBuffer,
    pub zbuf: ZBuffer,
}
