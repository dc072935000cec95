//! Desktop host for gs-cube.
//!
//! Runs the same render loop as the console build against a simulated GS,
//! driven by a scripted controller. Set `RUST_LOG=info` (or `debug`) to see
//! what the frames contain.

mod error;
mod input;
mod transport;

use std::process::ExitCode;

use gs_cube_core::assets::cube;
use gs_cube_core::gs::driver::setup_environment;
use gs_cube_core::gs::DisplayBuffers;
use gs_cube_core::render::Renderer;
use gs_cube_core::RenderConfig;
use gs_cube_hal::{DisplaySurface, InputSource};

use error::HostError;
use input::ScriptedPad;
use transport::SimulatedGs;

fn run() -> Result<(), HostError> {
    let config = RenderConfig::default();
    let mut gs = SimulatedGs::new();

    let buffers = DisplayBuffers::allocate(&mut gs, &config)
        .map_err(|e| HostError::ResourceExhaustion(e.to_string()))?;
    log::debug!("{} VRAM words free", gs.vram_free());

    let mut pad = ScriptedPad::new(0);
    if let Err(e) = pad.init() {
        log::warn!("controller unavailable, running without input: {e}");
    }

    setup_environment(&mut gs, &buffers, &config).map_err(HostError::Environment)?;

    let mesh = cube::mesh().map_err(HostError::Mesh)?;
    let aspect = gs.aspect_ratio();
    let mut renderer = Renderer::new(config, mesh, &buffers, aspect).map_err(HostError::Mesh)?;

    log::info!("gs-cube-pc: entering render loop");
    loop {
        let buttons = pad.poll_buttons();
        renderer.tick(&mut gs, buttons);

        if renderer.frames() % 600 == 0 {
            let stats = gs.stats();
            log::info!(
                "sim: chains={} qwords={} vertices={} rejected={}",
                stats.chains,
                stats.qwords,
                stats.vertices,
                stats.rejected
            );
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("gs-cube-pc starting");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
