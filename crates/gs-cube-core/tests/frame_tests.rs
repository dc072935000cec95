//! End-to-end frame tests: pad input through to the submitted chain.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec3, Vec4};
use gs_cube_hal::{DepthFormat, DmaChannel, FlowControl, PixelFormat, Qword};

use gs_cube_core::assets::cube;
use gs_cube_core::gs::{DisplayBuffers, FrameBuffer, ZBuffer, ZTest};
use gs_cube_core::input::{PAD_DOWN, PAD_LEFT, PAD_RIGHT, PAD_UP};
use gs_cube_core::render::commands::frame_packet_qwords;
use gs_cube_core::render::mesh::{Mesh, MeshError, MAX_VERTICES};
use gs_cube_core::render::Renderer;
use gs_cube_core::RenderConfig;

/// Mock hardware that keeps a copy of every chain it is sent.
#[derive(Clone, Default)]
struct MockGs {
    chains: Rc<RefCell<Vec<Vec<Qword>>>>,
    vsyncs: Rc<RefCell<u32>>,
}

impl DmaChannel for MockGs {
    fn send_chain(&mut self, chain: &[Qword]) {
        self.chains.borrow_mut().push(chain.to_vec());
    }

    fn send_normal(&mut self, _data: &[Qword]) {}

    fn wait_transfer_idle(&mut self) {}
}

impl FlowControl for MockGs {
    fn wait_render_finished(&mut self) {}

    fn wait_vsync(&mut self) {
        *self.vsyncs.borrow_mut() += 1;
    }
}

fn buffers(config: &RenderConfig) -> DisplayBuffers {
    DisplayBuffers {
        frame: FrameBuffer {
            width: config.width,
            height: config.height,
            psm: PixelFormat::Psmct32,
            mask: 0,
            address: 0,
        },
        zbuf: ZBuffer {
            enable: true,
            mask: false,
            method: ZTest::GreaterEqual,
            zsm: DepthFormat::Z32,
            address: 327_680,
        },
    }
}

fn cube_renderer() -> Renderer<'static> {
    let config = RenderConfig::default();
    let buffers = buffers(&config);
    Renderer::new(config, cube::mesh().unwrap(), &buffers, 1.0).unwrap()
}

/// Active-low pad word with `buttons` held.
fn held(buttons: u16) -> Option<u16> {
    Some(!buttons)
}

const RELEASED: Option<u16> = Some(0xFFFF);

mod movement {
    use super::*;

    #[test]
    fn left_press_moves_object_one_step() {
        let mut renderer = cube_renderer();
        let mut gs = MockGs::default();
        let camera = renderer.scene().camera_position;

        renderer.tick(&mut gs, held(PAD_LEFT));
        let pos = renderer.scene().object_position;
        assert!((pos.x + 0.2).abs() < 1e-6);
        assert_eq!((pos.y, pos.z), (0.0, 0.0));
        assert_eq!(renderer.scene().camera_position, camera);
    }

    #[test]
    fn holding_does_not_repeat() {
        let mut renderer = cube_renderer();
        let mut gs = MockGs::default();

        for _ in 0..10 {
            renderer.tick(&mut gs, held(PAD_RIGHT));
        }
        assert!((renderer.scene().object_position.x - 0.2).abs() < 1e-6);
    }

    #[test]
    fn up_and_down_cancel() {
        let mut renderer = cube_renderer();
        let mut gs = MockGs::default();

        renderer.tick(&mut gs, held(PAD_UP));
        assert!((renderer.scene().object_position.y - 0.2).abs() < 1e-6);
        renderer.tick(&mut gs, RELEASED);
        renderer.tick(&mut gs, held(PAD_DOWN));
        assert!(renderer.scene().object_position.y.abs() < 1e-6);
    }

    #[test]
    fn disconnected_pad_leaves_scene_alone() {
        let mut renderer = cube_renderer();
        let mut gs = MockGs::default();
        let before = *renderer.scene();

        let report = renderer.tick(&mut gs, None);
        assert!(report.edges.is_empty());
        assert_eq!(*renderer.scene(), before);
        // The frame is still drawn.
        assert_eq!(gs.chains.borrow().len(), 1);
    }

    #[test]
    fn moving_left_shifts_the_projection_left() {
        let mut renderer = cube_renderer();
        let mut gs = MockGs::default();

        renderer.tick(&mut gs, RELEASED);
        let before: Vec<Vec4> = renderer.transformed().to_vec();
        renderer.tick(&mut gs, held(PAD_LEFT));

        for (old, new) in before.iter().zip(renderer.transformed()) {
            assert!(new.x < old.x);
        }
    }
}

mod frames {
    use super::*;

    #[test]
    fn each_tick_submits_one_complete_chain() {
        let mut renderer = cube_renderer();
        let mut gs = MockGs::default();

        let mut used = Vec::new();
        for _ in 0..4 {
            let report = renderer.tick(&mut gs, RELEASED);
            used.push(report.buffer);
            assert_eq!(report.qwords, frame_packet_qwords(640, cube::INDEX_COUNT));
        }
        assert_eq!(used, vec![0, 1, 0, 1]);
        assert_eq!(renderer.frames(), 4);
        assert_eq!(*gs.vsyncs.borrow(), 4);

        for chain in gs.chains.borrow().iter() {
            let qwc = (chain[0].lo() & 0xFFFF) as usize;
            assert_eq!(qwc, chain.len() - 1);
        }
    }

    #[test]
    fn every_cube_vertex_is_converted() {
        let mut renderer = cube_renderer();
        renderer.prepare();
        assert_eq!(renderer.transformed().len(), cube::VERTEX_COUNT);
        assert_eq!(renderer.converted().len(), cube::VERTEX_COUNT);

        // The cube sits in front of the camera: every vertex has positive w
        // and lands inside the depth range.
        for v in renderer.transformed() {
            assert!(v.w > 0.0);
            assert!(v.z > -1.0 && v.z < 1.0, "{v:?}");
        }
    }

    #[test]
    fn identical_scenes_produce_identical_chains() {
        let mut a = cube_renderer();
        let mut b = cube_renderer();
        let mut gs_a = MockGs::default();
        let mut gs_b = MockGs::default();

        a.tick(&mut gs_a, held(PAD_LEFT));
        b.tick(&mut gs_b, held(PAD_LEFT));
        assert_eq!(gs_a.chains.borrow()[0], gs_b.chains.borrow()[0]);
    }
}

mod mesh_validation {
    use super::*;

    const TRI: [Vec4; 3] = [Vec4::ZERO, Vec4::X, Vec4::Y];
    const TRI_COLORS: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];

    #[test]
    fn cube_asset_is_valid() {
        let mesh = cube::mesh().unwrap();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn colour_count_must_match() {
        let err = Mesh::new(&TRI, &TRI_COLORS[..2], &[0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            MeshError::ColorCountMismatch {
                positions: 3,
                colors: 2
            }
        );
    }

    #[test]
    fn indices_must_form_triangles() {
        let err = Mesh::new(&TRI, &TRI_COLORS, &[0, 1]).unwrap_err();
        assert_eq!(err, MeshError::PartialTriangle { index_count: 2 });
    }

    #[test]
    fn indices_must_be_in_range() {
        let err = Mesh::new(&TRI, &TRI_COLORS, &[0, 1, 2, 2, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                position: 5,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn vertex_count_is_bounded() {
        let positions = vec![Vec4::ZERO; MAX_VERTICES + 1];
        let colors = vec![Vec3::ZERO; MAX_VERTICES + 1];
        let err = Mesh::new(&positions, &colors, &[]).unwrap_err();
        assert!(matches!(err, MeshError::TooManyVertices { .. }));
    }

    #[test]
    fn oversized_frame_is_rejected_up_front() {
        let points = vec![0u16; 1200];
        let mesh = Mesh::new(&TRI, &TRI_COLORS, &points).unwrap();
        let config = RenderConfig::default();
        let buffers = buffers(&config);

        let err = Renderer::new(config, mesh, &buffers, 1.0).err();
        assert!(matches!(err, Some(MeshError::PacketTooLarge { .. })));
    }
}
