//! The per-frame render pipeline.
//!
//! Each [`Renderer::tick`] runs one frame: input edges, matrix composition,
//! vertex transform and packing, packet build, chain submission, then the
//! finish and vsync waits that pace the loop.

pub mod commands;
pub mod mesh;
pub mod scheduler;
pub mod transform;

use glam::{Mat4, Vec4};
use gs_cube_hal::{DmaChannel, FlowControl};

use crate::config::RenderConfig;
use crate::gs::packet::{PacketError, PACKET_CAPACITY};
use crate::gs::vertex::{self, GsVertex, XyzFormat};
use crate::gs::DisplayBuffers;
use crate::input::{PadEdges, PadState};
use crate::scene::FrameContext;
use commands::DrawSetup;
use mesh::{Mesh, MeshError, MAX_VERTICES};
use scheduler::FrameScheduler;

/// Number of frames between statistics log lines.
const STATS_LOG_INTERVAL: u32 = 120;

/// What one tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    /// Buffer the frame was built into.
    pub buffer: usize,
    /// Packet length in quadwords, DMA tag included. Zero if the frame was
    /// dropped.
    pub qwords: usize,
    /// Direction edges applied before the transform.
    pub edges: PadEdges,
}

pub struct Renderer<'m> {
    config: RenderConfig,
    mesh: Mesh<'m>,
    setup: DrawSetup,
    xyz_format: XyzFormat,
    view_screen: Mat4,
    local_screen: Mat4,
    transformed: heapless::Vec<Vec4, MAX_VERTICES>,
    converted: heapless::Vec<GsVertex, MAX_VERTICES>,
    scheduler: FrameScheduler,
    pad: PadState,
    scene: FrameContext,
    frames: u32,
}

impl<'m> Renderer<'m> {
    /// Set up the renderer for `mesh` on the allocated display buffers.
    ///
    /// `aspect` is the display surface's aspect ratio; the projection is built
    /// once here. Fails if one frame of this mesh cannot fit a command buffer.
    pub fn new(
        config: RenderConfig,
        mesh: Mesh<'m>,
        buffers: &DisplayBuffers,
        aspect: f32,
    ) -> Result<Self, MeshError> {
        let required = commands::frame_packet_qwords(config.width, mesh.points().len());
        if required > PACKET_CAPACITY {
            return Err(MeshError::PacketTooLarge {
                required,
                capacity: PACKET_CAPACITY,
            });
        }

        let clip = config.clip;
        let view_screen = transform::create_view_screen(
            aspect,
            clip.left,
            clip.right,
            clip.bottom,
            clip.top,
            clip.near,
            clip.far,
        );

        log::info!(
            "mesh: {} vertices, {} triangles, {} quadwords per frame",
            mesh.vertex_count(),
            mesh.triangle_count(),
            required
        );

        Ok(Self {
            setup: DrawSetup::new(&config, buffers.zbuf),
            xyz_format: XyzFormat {
                center_x: config.origin,
                center_y: config.origin,
                z_bits: config.z_bits,
            },
            view_screen,
            local_screen: Mat4::IDENTITY,
            transformed: heapless::Vec::new(),
            converted: heapless::Vec::new(),
            scheduler: FrameScheduler::new(),
            pad: PadState::new(),
            scene: FrameContext::new(&config),
            frames: 0,
            config,
            mesh,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn scene(&self) -> &FrameContext {
        &self.scene
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn view_screen(&self) -> &Mat4 {
        &self.view_screen
    }

    /// The matrix used for the most recent transform.
    pub fn local_screen(&self) -> &Mat4 {
        &self.local_screen
    }

    /// Perspective-divided vertices from the most recent transform.
    pub fn transformed(&self) -> &[Vec4] {
        &self.transformed
    }

    /// Packed vertices from the most recent transform.
    pub fn converted(&self) -> &[GsVertex] {
        &self.converted
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Apply one pad poll (`None` = disconnected) to the object position.
    pub fn handle_input(&mut self, buttons: Option<u16>) -> PadEdges {
        let edges = self.pad.poll(buttons);
        for direction in edges.directions() {
            self.scene.apply(direction, self.config.step);
            log::debug!("{direction:?}: object at {:?}", self.scene.object_position);
        }
        edges
    }

    /// Compose the frame's matrices, transform every vertex and pack it.
    pub fn prepare(&mut self) {
        let local_world =
            transform::create_local_world(self.scene.object_position, self.scene.object_rotation);
        let world_view =
            transform::create_world_view(self.scene.camera_position, self.scene.camera_rotation);
        self.local_screen =
            transform::create_local_screen(&local_world, &world_view, &self.view_screen);

        transform::calculate_vertices(
            &mut self.transformed,
            self.mesh.positions(),
            &self.local_screen,
        );
        vertex::convert_vertices(
            &mut self.converted,
            &self.xyz_format,
            &self.transformed,
            self.mesh.colors(),
            self.config.alpha,
        );
    }

    /// Build the prepared frame into the active command buffer.
    fn build<D: DmaChannel>(&mut self, dma: &mut D) -> Result<usize, PacketError> {
        let buffer = self.scheduler.acquire(dma);
        commands::build_frame_packet(buffer, &self.setup, &self.converted, self.mesh.points())
    }

    /// Run one frame and block until it has been drawn and the next vertical
    /// blank has started.
    pub fn tick<H: DmaChannel + FlowControl>(&mut self, hw: &mut H, buttons: Option<u16>) -> FrameReport {
        let edges = self.handle_input(buttons);
        self.prepare();

        let buffer = self.scheduler.active_index();
        let qwords = match self.build(hw) {
            Ok(qwords) => {
                self.scheduler.submit(hw);
                qwords
            }
            Err(e) => {
                log::error!("frame {} dropped: {e}", self.frames);
                0
            }
        };
        self.scheduler.end_frame(hw);

        self.frames = self.frames.wrapping_add(1);
        if self.frames % STATS_LOG_INTERVAL == 0 {
            log::info!(
                "frame={} submissions={} qwords/frame={} object={:?}",
                self.frames,
                self.scheduler.submissions(),
                qwords,
                self.scene.object_position
            );
        }

        FrameReport {
            buffer,
            qwords,
            edges,
        }
    }
}
