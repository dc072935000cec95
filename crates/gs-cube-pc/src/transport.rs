//! Simulated GS and DMA channel for running the renderer on a desktop.
//!
//! Transfers complete as soon as they are started, but the channel stays
//! busy until `wait_transfer_idle` is called, so ordering mistakes in the
//! caller still show up. Every transfer is walked GIF tag by GIF tag and the
//! register writes it carries are counted.

use std::thread;
use std::time::{Duration, Instant};

use gs_cube_core::gs::registers::{self, DmaTagId, GifFlag};
use gs_cube_hal::{DepthFormat, DisplaySurface, DmaChannel, FlowControl, PixelFormat, Qword};

use crate::error::SimError;

/// GS local memory in 32-bit words (4 MiB).
pub const VRAM_WORDS: u32 = 1 << 20;

/// Buffers start on a page boundary (8 KiB).
pub const VRAM_PAGE_WORDS: u32 = 2048;

/// NTSC field rate.
pub const VSYNC_HZ: u32 = 60;

/// Aspect ratio of the displayed picture.
const DISPLAY_ASPECT: f32 = 4.0 / 3.0;

/// Register writes found in one transfer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GifSummary {
    pub tags: u32,
    pub prims: u32,
    pub vertices: u32,
    pub finishes: u32,
    /// Writes to any other register.
    pub other: u32,
}

impl GifSummary {
    fn record(&mut self, reg: u8) {
        match reg {
            registers::PRIM => self.prims += 1,
            registers::XYZ2 => self.vertices += 1,
            registers::FINISH => self.finishes += 1,
            _ => self.other += 1,
        }
    }
}

/// Walk a GIF stream and count the register writes it carries.
pub fn walk_gif(data: &[Qword]) -> Result<GifSummary, SimError> {
    let mut summary = GifSummary::default();
    let mut offset = 0;

    while offset < data.len() {
        let tag = data[offset];
        let nloop = (tag.lo() & 0x7FFF) as usize;
        let flag = GifFlag::from_bits(((tag.lo() >> 58) & 0x3) as u8);
        let nreg = match ((tag.lo() >> 60) & 0xF) as usize {
            0 => 16,
            n => n,
        };
        let regs = tag.hi();
        let reg_at = |i: usize| ((regs >> (4 * (i % nreg))) & 0xF) as u8;
        summary.tags += 1;

        let needed = match flag {
            GifFlag::Packed => nloop * nreg,
            GifFlag::Reglist => (nloop * nreg).div_ceil(2),
            GifFlag::Image => nloop,
        };
        let remaining = data.len() - offset - 1;
        if needed > remaining {
            return Err(SimError::Truncated {
                offset,
                needed,
                remaining,
            });
        }
        let body = &data[offset + 1..offset + 1 + needed];

        match flag {
            GifFlag::Packed => {
                for (i, qword) in body.iter().enumerate() {
                    match reg_at(i) {
                        registers::GIF_REG_AD => summary.record((qword.hi() & 0xFF) as u8),
                        // PRIM, RGBAQ and XYZ2 descriptors map straight onto
                        // their registers.
                        desc => summary.record(desc),
                    }
                }
            }
            GifFlag::Reglist => {
                for i in 0..nloop * nreg {
                    summary.record(reg_at(i));
                }
            }
            GifFlag::Image => {}
        }

        offset += 1 + needed;
    }

    Ok(summary)
}

/// Check a source chain's leading END tag and return the data after it.
pub fn validate_chain(chain: &[Qword]) -> Result<&[Qword], SimError> {
    let Some((tag, data)) = chain.split_first() else {
        return Err(SimError::QwcMismatch { qwc: 0, actual: 0 });
    };
    let id = DmaTagId::from_bits(((tag.lo() >> 28) & 0x7) as u8);
    if id != DmaTagId::End {
        return Err(SimError::UnsupportedTag { id: id as u8 });
    }
    let qwc = (tag.lo() & 0xFFFF) as usize;
    if qwc != data.len() {
        return Err(SimError::QwcMismatch {
            qwc,
            actual: data.len(),
        });
    }
    Ok(data)
}

/// Transfer counters since startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    pub chains: u32,
    pub normals: u32,
    pub qwords: u64,
    pub vertices: u64,
    pub finishes: u32,
    /// Transfers refused by validation.
    pub rejected: u32,
    /// Vertical blanks waited for.
    pub vsyncs: u32,
}

/// The display the read circuit is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayMode {
    pub address: u32,
    pub width: u16,
    pub height: u16,
    pub psm: PixelFormat,
}

/// Desktop stand-in for the GS, its local memory and the GIF DMA channel.
pub struct SimulatedGs {
    vram_next: u32,
    display: Option<DisplayMode>,
    busy: bool,
    finish_pending: bool,
    paced: bool,
    frame_period: Duration,
    next_vsync: Instant,
    last_summary: GifSummary,
    stats: SimStats,
}

impl Default for SimulatedGs {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedGs {
    /// A GS whose `wait_vsync` sleeps to hold 60 Hz.
    pub fn new() -> Self {
        let frame_period = Duration::from_secs(1) / VSYNC_HZ;
        Self {
            vram_next: 0,
            display: None,
            busy: false,
            finish_pending: false,
            paced: true,
            frame_period,
            next_vsync: Instant::now() + frame_period,
            last_summary: GifSummary::default(),
            stats: SimStats::default(),
        }
    }

    /// A GS whose vertical blanks arrive immediately.
    pub fn unpaced() -> Self {
        Self {
            paced: false,
            ..Self::new()
        }
    }

    pub fn display(&self) -> Option<DisplayMode> {
        self.display
    }

    pub fn stats(&self) -> SimStats {
        self.stats
    }

    /// Register writes in the most recent accepted transfer.
    pub fn last_summary(&self) -> GifSummary {
        self.last_summary
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// VRAM words still free.
    pub fn vram_free(&self) -> u32 {
        VRAM_WORDS - self.vram_next
    }

    fn allocate(&mut self, width: u16, height: u16, bytes_per_pixel: u32) -> Result<u32, SimError> {
        let words = (u32::from(width) * u32::from(height) * bytes_per_pixel).div_ceil(4);
        let address = self.vram_next.next_multiple_of(VRAM_PAGE_WORDS);
        let available = VRAM_WORDS.saturating_sub(address);
        if words > available {
            return Err(SimError::OutOfVram {
                requested: words,
                available,
            });
        }
        self.vram_next = address + words;
        log::debug!("vram: {words} words at 0x{address:05X}, {} free", self.vram_free());
        Ok(address)
    }

    /// Run one transfer through the GIF.
    fn transfer(&mut self, data: &[Qword]) -> Result<(), SimError> {
        if self.busy {
            return Err(SimError::ChannelBusy);
        }
        let summary = walk_gif(data)?;
        self.busy = true;
        if summary.finishes > 0 {
            self.finish_pending = true;
        }
        self.stats.qwords += data.len() as u64;
        self.stats.vertices += u64::from(summary.vertices);
        self.stats.finishes += summary.finishes;
        self.last_summary = summary;
        log::trace!("gif: {summary:?}");
        Ok(())
    }

    fn reject(&mut self, kind: &str, err: SimError) {
        self.stats.rejected += 1;
        log::error!("{kind} transfer rejected: {err}");
    }
}

impl DisplaySurface for SimulatedGs {
    type Error = SimError;

    fn allocate_framebuffer(
        &mut self,
        width: u16,
        height: u16,
        psm: PixelFormat,
    ) -> Result<u32, SimError> {
        self.allocate(width, height, psm.bytes_per_pixel())
    }

    fn allocate_depthbuffer(
        &mut self,
        width: u16,
        height: u16,
        zsm: DepthFormat,
    ) -> Result<u32, SimError> {
        self.allocate(width, height, zsm.bytes_per_pixel())
    }

    fn init_display(&mut self, address: u32, width: u16, height: u16, psm: PixelFormat) {
        self.display = Some(DisplayMode {
            address,
            width,
            height,
            psm,
        });
        log::info!("display: {width}x{height} {psm:?} from 0x{address:05X}");
    }

    fn aspect_ratio(&self) -> f32 {
        // Stretch factor that maps the framebuffer onto a 4:3 picture.
        match self.display {
            Some(mode) if mode.width > 0 && mode.height > 0 => {
                DISPLAY_ASPECT / (f32::from(mode.width) / f32::from(mode.height))
            }
            _ => 1.0,
        }
    }
}

impl DmaChannel for SimulatedGs {
    fn send_chain(&mut self, chain: &[Qword]) {
        let result = validate_chain(chain).and_then(|data| self.transfer(data));
        match result {
            Ok(()) => self.stats.chains += 1,
            Err(e) => self.reject("chain", e),
        }
    }

    fn send_normal(&mut self, data: &[Qword]) {
        match self.transfer(data) {
            Ok(()) => self.stats.normals += 1,
            Err(e) => self.reject("normal", e),
        }
    }

    fn wait_transfer_idle(&mut self) {
        self.busy = false;
    }
}

impl FlowControl for SimulatedGs {
    fn wait_render_finished(&mut self) {
        if !self.finish_pending {
            // Real hardware would hang here.
            log::warn!("waited for FINISH with none outstanding");
        }
        self.finish_pending = false;
    }

    fn wait_vsync(&mut self) {
        self.stats.vsyncs = self.stats.vsyncs.wrapping_add(1);
        if !self.paced {
            return;
        }
        let now = Instant::now();
        if now < self.next_vsync {
            thread::sleep(self.next_vsync - now);
            self.next_vsync += self.frame_period;
        } else {
            // Missed at least one blank; lock on to the next one.
            self.next_vsync = now + self.frame_period;
        }
    }
}
