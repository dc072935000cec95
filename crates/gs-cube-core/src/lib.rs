//! Platform-agnostic rendering core for the gs-cube demo.
//!
//! Transforms a static mesh every frame, packs it into GS register format and
//! builds double-buffered GIF DMA chains. Hardware access goes through the
//! traits in `gs-cube-hal`.

#![no_std]

pub mod assets;
pub mod config;
pub mod gs;
pub mod input;
pub mod math;
pub mod render;
pub mod scene;

pub use config::RenderConfig;
pub use render::Renderer;
