//! Host-side error types.

use gs_cube_core::gs::PacketError;
use gs_cube_core::render::mesh::MeshError;

/// Errors raised by the simulated GS.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Not enough VRAM left for a buffer.
    #[error("out of VRAM: {requested} words requested, {available} available")]
    OutOfVram { requested: u32, available: u32 },

    /// A chain did not start with an END tag.
    #[error("unsupported DMA tag id {id}")]
    UnsupportedTag { id: u8 },

    /// The END tag's QWC disagrees with the data handed to the channel.
    #[error("DMA tag QWC {qwc} but {actual} quadwords follow it")]
    QwcMismatch { qwc: usize, actual: usize },

    /// A GIF tag claims more data than remains in the transfer.
    #[error("GIF tag at quadword {offset} needs {needed} quadwords, {remaining} remain")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// A transfer was started while the previous one was still running.
    #[error("transfer started while the channel was busy")]
    ChannelBusy,
}

/// Errors raised by the scripted controller.
#[derive(Debug, thiserror::Error)]
pub enum PadError {
    #[error("no controller in port {port}")]
    NotConnected { port: u8 },
}

/// Fatal startup errors.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Framebuffer or depth buffer allocation failed.
    #[error("display setup failed: {0}")]
    ResourceExhaustion(String),

    #[error("drawing environment rejected: {0}")]
    Environment(PacketError),

    #[error("mesh rejected: {0}")]
    Mesh(MeshError),
}
