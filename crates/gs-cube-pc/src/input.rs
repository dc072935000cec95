//! Scripted controller for the desktop host.
//!
//! Replays a fixed sequence of d-pad taps so the cube can be seen moving
//! without hardware attached. Buttons are reported active-low, the way the
//! pad library returns them.

use gs_cube_core::input::{PAD_DOWN, PAD_LEFT, PAD_RIGHT, PAD_UP};
use gs_cube_hal::InputSource;

use crate::error::PadError;

/// Frames each scripted step lasts.
const HOLD_FRAMES: u32 = 30;

/// One pass of the script: tap a direction, release, repeat.
const SCRIPT: [u16; 8] = [PAD_LEFT, 0, PAD_UP, 0, PAD_RIGHT, 0, PAD_DOWN, 0];

pub struct ScriptedPad {
    port: u8,
    open: bool,
    frame: u32,
}

impl ScriptedPad {
    pub fn new(port: u8) -> Self {
        Self {
            port,
            open: false,
            frame: 0,
        }
    }

    /// Active-high buttons held at the current frame.
    fn held(&self) -> u16 {
        let step = (self.frame / HOLD_FRAMES) as usize % SCRIPT.len();
        SCRIPT[step]
    }
}

impl InputSource for ScriptedPad {
    type Error = PadError;

    fn init(&mut self) -> Result<(), PadError> {
        if self.port > 1 {
            return Err(PadError::NotConnected { port: self.port });
        }
        self.open = true;
        log::info!("scripted pad on port {}", self.port);
        Ok(())
    }

    fn poll_buttons(&mut self) -> Option<u16> {
        if !self.open {
            return None;
        }
        let held = self.held();
        self.frame = self.frame.wrapping_add(1);
        Some(!held)
    }
}
