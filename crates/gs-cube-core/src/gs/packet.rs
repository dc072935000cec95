//! Fixed-capacity command buffers and the append-only packet builder.
//!
//! A chain packet reserves its first quadword for the DMA tag; `finalize`
//! writes an END tag once the real length is known. A normal packet carries
//! no tag and is sent with a normal-mode transfer.

use core::fmt;

use gs_cube_hal::Qword;

use super::registers::{self, DmaTagId};

/// Quadwords per command buffer.
pub const PACKET_CAPACITY: usize = 1024;

/// Errors reported when a packet is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketError {
    /// More quadwords were appended than the buffer holds; the excess was dropped.
    Overflow { capacity: usize },
    /// A primitive was started but never ended.
    UnterminatedPrimitive,
    /// The packet does not fit the DMA tag QWC field.
    TooLong { qwords: usize },
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketError::Overflow { capacity } => {
                write!(f, "command buffer overflow (capacity {capacity} quadwords)")
            }
            PacketError::UnterminatedPrimitive => write!(f, "primitive started but not ended"),
            PacketError::TooLong { qwords } => {
                write!(f, "{qwords} quadwords exceed the DMA tag QWC field")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PacketKind {
    Chain,
    Normal,
}

/// A quadword buffer holding one complete DMA packet.
pub struct CommandBuffer {
    qwords: heapless::Vec<Qword, PACKET_CAPACITY>,
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBuffer {
    pub const fn new() -> Self {
        Self {
            qwords: heapless::Vec::new(),
        }
    }

    /// Discard the previous contents and start a chain packet.
    pub fn chain(&mut self) -> PacketBuilder<'_> {
        PacketBuilder::start(&mut self.qwords, PacketKind::Chain)
    }

    /// Discard the previous contents and start a normal (untagged) packet.
    pub fn normal(&mut self) -> PacketBuilder<'_> {
        PacketBuilder::start(&mut self.qwords, PacketKind::Normal)
    }

    pub fn as_slice(&self) -> &[Qword] {
        &self.qwords
    }

    pub fn len(&self) -> usize {
        self.qwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qwords.is_empty()
    }
}

/// Appends quadwords to a [`CommandBuffer`].
///
/// Appends never fail; running out of space sets a flag reported by
/// [`PacketBuilder::finalize`].
pub struct PacketBuilder<'a> {
    qwords: &'a mut heapless::Vec<Qword, PACKET_CAPACITY>,
    kind: PacketKind,
    open_prim: Option<usize>,
    overflowed: bool,
}

impl<'a> PacketBuilder<'a> {
    fn start(qwords: &'a mut heapless::Vec<Qword, PACKET_CAPACITY>, kind: PacketKind) -> Self {
        qwords.clear();
        let mut builder = Self {
            qwords,
            kind,
            open_prim: None,
            overflowed: false,
        };
        if kind == PacketKind::Chain {
            // Slot 0: DMA tag, written by finalize().
            builder.reserve();
        }
        builder
    }

    /// Append one quadword.
    pub fn push(&mut self, qword: Qword) {
        if self.qwords.push(qword).is_err() {
            self.overflowed = true;
        }
    }

    /// Quadwords emitted so far, including a reserved DMA tag.
    pub fn len(&self) -> usize {
        self.qwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qwords.is_empty()
    }

    /// Append a placeholder and return its index, or `None` if the buffer is full.
    pub(crate) fn reserve(&mut self) -> Option<usize> {
        let index = self.qwords.len();
        self.push(Qword::ZERO);
        (!self.overflowed).then_some(index)
    }

    /// Overwrite a previously reserved slot.
    pub(crate) fn patch(&mut self, index: usize, qword: Qword) {
        if let Some(slot) = self.qwords.get_mut(index) {
            *slot = qword;
        }
    }

    /// Reserve the slot for a primitive's REGLIST tag.
    pub(crate) fn reserve_prim_tag(&mut self) {
        if let Some(index) = self.reserve() {
            self.open_prim = Some(index);
        }
    }

    pub(crate) fn take_prim_tag(&mut self) -> Option<usize> {
        self.open_prim.take()
    }

    /// Close the packet. For chain packets, writes the END tag whose QWC is the
    /// number of quadwords following it.
    ///
    /// Returns the total packet length in quadwords, tag included.
    pub fn finalize(mut self) -> Result<usize, PacketError> {
        if self.overflowed {
            return Err(PacketError::Overflow {
                capacity: PACKET_CAPACITY,
            });
        }
        if self.open_prim.is_some() {
            return Err(PacketError::UnterminatedPrimitive);
        }

        let len = self.qwords.len();
        if self.kind == PacketKind::Chain {
            let qwc = len - 1;
            if qwc > registers::DMA_QWC_MAX {
                return Err(PacketError::TooLong { qwords: len });
            }
            let tag = registers::dma_tag(qwc as u16, DmaTagId::End, 0);
            self.patch(0, Qword(tag));
        }
        Ok(len)
    }
}
