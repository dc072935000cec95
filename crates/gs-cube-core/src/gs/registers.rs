//! GS register addresses, GIF/DMA tag layouts and bit-field packers.
//!
//! Context-dependent registers are given for context 1; add the context
//! number (0 or 1) to address the second context.

// --- GS registers (A+D addresses) ---

/// Drawing primitive setting; starts a new primitive.
pub const PRIM: u8 = 0x00;
/// Vertex colour and texture Q, latched for the next vertex kick.
pub const RGBAQ: u8 = 0x01;
/// Vertex position; kicks drawing.
pub const XYZ2: u8 = 0x05;
/// Primitive coordinate offset.
pub const XYOFFSET_1: u8 = 0x18;
/// Selects whether PRIM or PRMODE supplies primitive attributes.
pub const PRMODECONT: u8 = 0x1A;
/// Drawing area clip rectangle.
pub const SCISSOR_1: u8 = 0x40;
pub const DTHE: u8 = 0x45;
pub const COLCLAMP: u8 = 0x46;
/// Pixel test control (alpha, destination alpha, depth).
pub const TEST_1: u8 = 0x47;
pub const PABE: u8 = 0x49;
pub const FBA_1: u8 = 0x4A;
/// Framebuffer base, width and format.
pub const FRAME_1: u8 = 0x4C;
/// Depth buffer base and format.
pub const ZBUF_1: u8 = 0x4E;
/// Raises the FINISH event once all preceding drawing completes.
pub const FINISH: u8 = 0x61;

// --- GIF register descriptors (REGS field nibbles) ---

pub const GIF_REG_RGBAQ: u8 = 0x1;
pub const GIF_REG_XYZ2: u8 = 0x5;
/// Address + data: the low doubleword is written to the register named by
/// the high doubleword.
pub const GIF_REG_AD: u8 = 0xE;

/// Register list for (RGBAQ, XYZ2) vertex pairs.
pub const RGBAQ_XYZ2_REGLIST: u64 = (GIF_REG_RGBAQ as u64) | ((GIF_REG_XYZ2 as u64) << 4);

/// Maximum NLOOP value a GIF tag can carry.
pub const GIF_NLOOP_MAX: usize = 0x7FFF;
/// Maximum QWC value a DMA tag can carry.
pub const DMA_QWC_MAX: usize = 0xFFFF;

/// GIF tag data format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum GifFlag {
    Packed = 0,
    Reglist = 1,
    Image = 2,
}

impl GifFlag {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0 => GifFlag::Packed,
            1 => GifFlag::Reglist,
            // 3 behaves as IMAGE on hardware.
            _ => GifFlag::Image,
        }
    }
}

/// Source chain DMA tag ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DmaTagId {
    Refe = 0,
    Cnt = 1,
    Next = 2,
    Ref = 3,
    Refs = 4,
    Call = 5,
    Ret = 6,
    End = 7,
}

impl DmaTagId {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x7 {
            0 => DmaTagId::Refe,
            1 => DmaTagId::Cnt,
            2 => DmaTagId::Next,
            3 => DmaTagId::Ref,
            4 => DmaTagId::Refs,
            5 => DmaTagId::Call,
            6 => DmaTagId::Ret,
            _ => DmaTagId::End,
        }
    }
}

/// Primitive type (PRIM field).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PrimType {
    Point = 0,
    Line = 1,
    LineStrip = 2,
    Triangle = 3,
    TriangleStrip = 4,
    TriangleFan = 5,
    Sprite = 6,
}

/// Shading method (IIP field).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Shading {
    Flat = 0,
    Gouraud = 1,
}

/// Texture coordinate source (FST field).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MappingType {
    St = 0,
    Uv = 1,
}

/// Depth test method (ZTST field).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ZTest {
    Never = 0,
    Always = 1,
    GreaterEqual = 2,
    Greater = 3,
}

/// Alpha test method (ATST field).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AlphaTest {
    Never = 0,
    Always = 1,
    Less = 2,
    LessEqual = 3,
    Equal = 4,
    GreaterEqual = 5,
    Greater = 6,
    NotEqual = 7,
}

/// Processing when the alpha test fails (AFAIL field).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AlphaFail {
    Keep = 0,
    FramebufferOnly = 1,
    ZbufferOnly = 2,
    RgbOnly = 3,
}

/// PRIM register attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Primitive {
    pub kind: PrimType,
    pub shading: Shading,
    pub mapping: bool,
    pub fogging: bool,
    pub blending: bool,
    pub antialiasing: bool,
    pub mapping_type: MappingType,
    pub colorfix: bool,
}

impl Primitive {
    /// Pack into the PRIM register for drawing context `context`.
    pub fn to_bits(&self, context: u8) -> u64 {
        (self.kind as u64)
            | ((self.shading as u64) << 3)
            | ((self.mapping as u64) << 4)
            | ((self.fogging as u64) << 5)
            | ((self.blending as u64) << 6)
            | ((self.antialiasing as u64) << 7)
            | ((self.mapping_type as u64) << 8)
            | (((context & 1) as u64) << 9)
            | ((self.colorfix as u64) << 10)
    }
}

/// TEST register fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelTest {
    pub alpha_enable: bool,
    pub alpha_method: AlphaTest,
    pub alpha_ref: u8,
    pub alpha_fail: AlphaFail,
    pub dest_alpha_enable: bool,
    pub dest_alpha_mode: bool,
    pub z_enable: bool,
    pub z_method: ZTest,
}

impl PixelTest {
    pub fn to_bits(&self) -> u64 {
        (self.alpha_enable as u64)
            | ((self.alpha_method as u64) << 1)
            | ((self.alpha_ref as u64) << 4)
            | ((self.alpha_fail as u64) << 12)
            | ((self.dest_alpha_enable as u64) << 14)
            | ((self.dest_alpha_mode as u64) << 15)
            | ((self.z_enable as u64) << 16)
            | ((self.z_method as u64) << 17)
    }
}

/// Pack a GIF tag.
///
/// `regs` holds up to 16 register descriptors, first descriptor in the low
/// nibble; `nreg` of 16 is encoded as 0.
pub fn gif_tag(nloop: u16, eop: bool, prim: Option<u64>, flag: GifFlag, nreg: u8, regs: u64) -> [u64; 2] {
    let (pre, prim_bits) = match prim {
        Some(bits) => (1u64, bits & 0x7FF),
        None => (0, 0),
    };
    let lo = (nloop as u64 & 0x7FFF)
        | ((eop as u64) << 15)
        | (pre << 46)
        | (prim_bits << 47)
        | ((flag as u64) << 58)
        | (((nreg & 0xF) as u64) << 60);
    [lo, regs]
}

/// Pack a source chain DMA tag. `addr` is a 16-byte aligned byte address.
pub fn dma_tag(qwc: u16, id: DmaTagId, addr: u32) -> [u64; 2] {
    let lo = (qwc as u64) | ((id as u64) << 28) | (((addr & 0x7FFF_FFF0) as u64) << 32);
    [lo, 0]
}

/// Pack RGBAQ. Q is stored as raw IEEE-754 bits.
pub fn rgbaq(r: u8, g: u8, b: u8, a: u8, q: f32) -> u64 {
    (r as u64) | ((g as u64) << 8) | ((b as u64) << 16) | ((a as u64) << 24) | ((q.to_bits() as u64) << 32)
}

/// Pack XYZ2 from 12.4 coordinates and an unsigned depth.
pub fn xyz(x: u16, y: u16, z: u32) -> u64 {
    (x as u64) | ((y as u64) << 16) | ((z as u64) << 32)
}

/// Pack XYOFFSET from 12.4 offsets.
pub fn xyoffset(ofx: u16, ofy: u16) -> u64 {
    (ofx as u64) | ((ofy as u64) << 32)
}

/// Pack SCISSOR from inclusive window pixel bounds.
pub fn scissor(x0: u16, x1: u16, y0: u16, y1: u16) -> u64 {
    ((x0 & 0x7FF) as u64)
        | (((x1 & 0x7FF) as u64) << 16)
        | (((y0 & 0x7FF) as u64) << 32)
        | (((y1 & 0x7FF) as u64) << 48)
}

/// Pack FRAME. `address` is a VRAM word address; `mask` bits are not drawn.
pub fn frame(address: u32, width: u16, psm: u8, mask: u32) -> u64 {
    ((address >> 11) as u64 & 0x1FF)
        | (((width >> 6) as u64 & 0x3F) << 16)
        | (((psm & 0x3F) as u64) << 24)
        | ((mask as u64) << 32)
}

/// Pack ZBUF. `address` is a VRAM word address.
pub fn zbuf(address: u32, zsm: u8, no_update: bool) -> u64 {
    ((address >> 11) as u64 & 0x1FF) | (((zsm & 0xF) as u64) << 24) | ((no_update as u64) << 32)
}
