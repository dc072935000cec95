#![no_std]

/// One 128-bit quadword, the transfer unit of the DMA controller and the GIF.
///
/// `0` holds the low doubleword (bits 63:0), `1` the high one (bits 127:64).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct Qword(pub [u64; 2]);

impl Qword {
    pub const ZERO: Qword = Qword([0, 0]);

    pub const fn new(lo: u64, hi: u64) -> Self {
        Qword([lo, hi])
    }

    pub const fn lo(&self) -> u64 {
        self.0[0]
    }

    pub const fn hi(&self) -> u64 {
        self.0[1]
    }
}

/// Framebuffer pixel storage mode (GS PSM field).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PixelFormat {
    Psmct32 = 0x00,
    Psmct24 = 0x01,
    Psmct16 = 0x02,
    Psmct16s = 0x0A,
}

impl PixelFormat {
    /// Bytes per stored pixel in VRAM.
    pub const fn bytes_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Psmct32 | PixelFormat::Psmct24 => 4,
            PixelFormat::Psmct16 | PixelFormat::Psmct16s => 2,
        }
    }
}

/// Depth buffer storage mode (GS ZSM/PSM field).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DepthFormat {
    Z32 = 0x30,
    Z24 = 0x31,
    Z16 = 0x32,
    Z16s = 0x3A,
}

impl DepthFormat {
    /// Bytes per stored depth sample in VRAM.
    pub const fn bytes_per_pixel(self) -> u32 {
        match self {
            DepthFormat::Z32 | DepthFormat::Z24 => 4,
            DepthFormat::Z16 | DepthFormat::Z16s => 2,
        }
    }
}

/// Abstracts VRAM allocation and display output setup.
///
/// Addresses are VRAM word addresses (32-bit words), page aligned.
pub trait DisplaySurface {
    type Error: core::fmt::Debug;

    /// Reserve VRAM for a colour buffer.
    fn allocate_framebuffer(
        &mut self,
        width: u16,
        height: u16,
        psm: PixelFormat,
    ) -> Result<u32, Self::Error>;

    /// Reserve VRAM for a depth buffer.
    fn allocate_depthbuffer(
        &mut self,
        width: u16,
        height: u16,
        zsm: DepthFormat,
    ) -> Result<u32, Self::Error>;

    /// Configure the video mode and tie the read circuit to `address`.
    fn init_display(&mut self, address: u32, width: u16, height: u16, psm: PixelFormat);

    /// World-space horizontal scale correcting for non-square display pixels.
    fn aspect_ratio(&self) -> f32;
}

/// Abstracts the DMA channel feeding the GIF.
///
/// Sends only start a transfer; the caller must not rebuild the data until
/// `wait_transfer_idle` has returned.
pub trait DmaChannel {
    /// Start a source-chain transfer. `chain[0]` is the leading DMA tag.
    fn send_chain(&mut self, chain: &[Qword]);

    /// Start a normal transfer of `data` (no DMA tags).
    fn send_normal(&mut self, data: &[Qword]);

    /// Block until the channel has no transfer in progress.
    fn wait_transfer_idle(&mut self);
}

/// Abstracts the coprocessor status signals used for frame pacing.
pub trait FlowControl {
    /// Block until the GS has processed a FINISH register write, then
    /// acknowledge it.
    fn wait_render_finished(&mut self);

    /// Block until the start of the next vertical blank.
    fn wait_vsync(&mut self);
}

/// Abstracts the controller port.
pub trait InputSource {
    type Error: core::fmt::Debug;

    /// Open the port and bring the pad into a readable state.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Read the current button state. Non-blocking.
    ///
    /// Returns the raw active-low button word as reported by the pad
    /// (a cleared bit means pressed), or `None` when the pad is disconnected.
    fn poll_buttons(&mut self) -> Option<u16>;
}
