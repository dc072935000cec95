//! Double-buffered DMA chain submission.
//!
//! Two command buffers alternate: while the DMA controller streams one to
//! the GS, the next frame is built into the other. A buffer is handed back to
//! the builder only after the channel reports idle.

use gs_cube_hal::{DmaChannel, FlowControl};

use crate::gs::packet::CommandBuffer;

/// Submission state of one command buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitState {
    /// Owned by the builder.
    #[default]
    Idle,
    /// Handed to the DMA controller; must not be touched.
    Submitted,
}

pub struct FrameScheduler {
    buffers: [CommandBuffer; 2],
    states: [SubmitState; 2],
    active: usize,
    submissions: u32,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub const fn new() -> Self {
        Self {
            buffers: [CommandBuffer::new(), CommandBuffer::new()],
            states: [SubmitState::Idle, SubmitState::Idle],
            active: 0,
            submissions: 0,
        }
    }

    /// Index of the buffer the next frame is built into.
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn state(&self, index: usize) -> SubmitState {
        self.states[index]
    }

    pub fn buffer(&self, index: usize) -> &CommandBuffer {
        &self.buffers[index]
    }

    /// Total chains handed to the DMA controller.
    pub fn submissions(&self) -> u32 {
        self.submissions
    }

    /// Borrow the active buffer for building, first waiting out its previous
    /// transfer if that is still outstanding.
    pub fn acquire<D: DmaChannel>(&mut self, dma: &mut D) -> &mut CommandBuffer {
        if self.states[self.active] == SubmitState::Submitted {
            log::trace!("buffer {} still in flight, waiting", self.active);
            dma.wait_transfer_idle();
            self.retire();
        }
        &mut self.buffers[self.active]
    }

    /// Send the active buffer as a DMA chain and make the other buffer active.
    ///
    /// Waits for the channel to go idle first; this retires the previous
    /// frame's buffer. Returns the index of the submitted buffer.
    pub fn submit<D: DmaChannel>(&mut self, dma: &mut D) -> usize {
        dma.wait_transfer_idle();
        self.retire();

        let index = self.active;
        dma.send_chain(self.buffers[index].as_slice());
        self.states[index] = SubmitState::Submitted;
        self.submissions = self.submissions.wrapping_add(1);
        self.active ^= 1;
        index
    }

    /// Block until the GS has finished the frame and the next vertical blank
    /// begins.
    pub fn end_frame<F: FlowControl>(&mut self, gs: &mut F) {
        gs.wait_render_finished();
        gs.wait_vsync();
    }

    /// The channel is idle: every submitted buffer has been consumed.
    fn retire(&mut self) {
        self.states = [SubmitState::Idle; 2];
    }
}
