//! Tests for command packet assembly: DMA tag length, primitive blocks,
//! clears and the drawing environment.

use gs_cube_hal::{DepthFormat, PixelFormat, Qword};

use gs_cube_core::gs::draw::clear_strips;
use gs_cube_core::gs::driver::build_environment;
use gs_cube_core::gs::packet::{CommandBuffer, PacketError, PACKET_CAPACITY};
use gs_cube_core::gs::registers::{self, DmaTagId, GifFlag};
use gs_cube_core::gs::vertex::GsVertex;
use gs_cube_core::gs::{DisplayBuffers, FrameBuffer, ZBuffer, ZTest};
use gs_cube_core::render::commands::{build_frame_packet, frame_packet_qwords, mesh_primitive, DrawSetup};
use gs_cube_core::RenderConfig;

fn display_buffers(config: &RenderConfig) -> DisplayBuffers {
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

fn setup() -> DrawSetup {
    let config = RenderConfig::default();
    DrawSetup::new(&config, display_buffers(&config).zbuf)
}

fn vertex(n: u64) -> GsVertex {
    GsVertex {
        rgbaq: 0x3F80_0000_8000_0000 | n,
        xyz2: n << 4,
    }
}

fn dma_qwc(buffer: &CommandBuffer) -> usize {
    (buffer.as_slice()[0].lo() & 0xFFFF) as usize
}

fn gif_fields(tag: Qword) -> (usize, bool, GifFlag, u64, u64) {
    let lo = tag.lo();
    (
        (lo & 0x7FFF) as usize,
        (lo >> 15) & 1 == 1,
        GifFlag::from_bits(((lo >> 58) & 0x3) as u8),
        lo >> 60,
        tag.hi(),
    )
}

/// Index of the REGLIST tag in a frame packet.
fn reglist_index(width: u16) -> usize {
    // DMA tag, TEST block, clear block, TEST block, PRIM/RGBAQ block.
    1 + 2 + (3 + 2 * clear_strips(width)) + 2 + 3
}

mod frame_packet {
    use super::*;

    #[test]
    fn dma_tag_counts_every_following_quadword() {
        let vertices = [vertex(1), vertex(2), vertex(3), vertex(4)];
        let mut buffer = CommandBuffer::new();

        let cases: [&[u16]; 4] = [&[], &[0, 1, 2], &[0, 1, 2, 1, 2, 3], &[3; 300]];
        for points in cases {
            let len = build_frame_packet(&mut buffer, &setup(), &vertices, points).unwrap();
            assert_eq!(len, buffer.len());
            assert_eq!(len, frame_packet_qwords(640, points.len()));
            assert_eq!(dma_qwc(&buffer), len - 1);

            let tag = buffer.as_slice()[0].lo();
            assert_eq!(DmaTagId::from_bits(((tag >> 28) & 0x7) as u8), DmaTagId::End);
        }
    }

    #[test]
    fn cube_sized_packet_layout() {
        let vertices: Vec<GsVertex> = (0..24).map(vertex).collect();
        let points: Vec<u16> = (0..36).map(|i| (i % 24) as u16).collect();
        let mut buffer = CommandBuffer::new();

        let len = build_frame_packet(&mut buffer, &setup(), &vertices, &points).unwrap();
        assert_eq!(len, 70);

        let qwords = buffer.as_slice();
        let prim_block = reglist_index(640) - 3;
        assert_eq!(qwords[prim_block + 1].hi(), u64::from(registers::PRIM));
        assert_eq!(qwords[prim_block + 1].lo(), mesh_primitive().to_bits(0));
        assert_eq!(qwords[prim_block + 2].hi(), u64::from(registers::RGBAQ));

        let last = qwords[len - 1];
        assert_eq!(last, Qword::new(1, u64::from(registers::FINISH)));
        let (_, eop, _, _, _) = gif_fields(qwords[len - 2]);
        assert!(eop);
    }

    #[test]
    fn reglist_tag_loops_once_per_index() {
        let vertices = [vertex(7), vertex(8), vertex(9)];
        let points = [0, 1, 2, 2, 1, 0];
        let mut buffer = CommandBuffer::new();
        build_frame_packet(&mut buffer, &setup(), &vertices, &points).unwrap();

        let start = reglist_index(640);
        let (nloop, eop, flag, nreg, regs) = gif_fields(buffer.as_slice()[start]);
        assert_eq!(nloop, points.len());
        assert!(eop);
        assert_eq!(flag, GifFlag::Reglist);
        assert_eq!(nreg, 2);
        assert_eq!(regs, registers::RGBAQ_XYZ2_REGLIST);

        // Vertices follow in index order, one quadword each.
        for (i, &index) in points.iter().enumerate() {
            let q = buffer.as_slice()[start + 1 + i];
            assert_eq!(q, Qword::new(vertices[index as usize].rgbaq, vertices[index as usize].xyz2));
        }
    }

    #[test]
    fn rebuilding_replaces_previous_contents() {
        let vertices = [vertex(1), vertex(2), vertex(3)];
        let mut buffer = CommandBuffer::new();
        build_frame_packet(&mut buffer, &setup(), &vertices, &[0, 1, 2, 0, 1, 2]).unwrap();
        let len = build_frame_packet(&mut buffer, &setup(), &vertices, &[0, 1, 2]).unwrap();
        assert_eq!(buffer.len(), len);
        assert_eq!(dma_qwc(&buffer), len - 1);
    }

    #[test]
    fn overflow_is_reported_not_truncated() {
        let vertices = [vertex(1)];
        let points = [0u16; 1200];
        let mut buffer = CommandBuffer::new();

        let err = build_frame_packet(&mut buffer, &setup(), &vertices, &points).unwrap_err();
        assert_eq!(
            err,
            PacketError::Overflow {
                capacity: PACKET_CAPACITY
            }
        );
    }

    #[test]
    fn unterminated_primitive_is_rejected() {
        let mut buffer = CommandBuffer::new();
        let mut packet = buffer.chain();
        packet.prim_start(0, &mesh_primitive(), 0);
        packet.vertex(&vertex(1));
        assert_eq!(packet.finalize(), Err(PacketError::UnterminatedPrimitive));
    }
}

mod clear {
    use super::*;

    #[test]
    fn strips_cover_the_whole_width() {
        assert_eq!(clear_strips(640), 10);
        assert_eq!(clear_strips(600), 10);
        assert_eq!(clear_strips(64), 1);
    }

    #[test]
    fn last_strip_stops_at_the_right_edge() {
        let mut buffer = CommandBuffer::new();
        let mut packet = buffer.normal();
        packet.clear(0, 1728.0, 1792.0, 600, 512, [0, 0, 0]);
        packet.finalize().unwrap();

        let qwords = buffer.as_slice();
        let (nloop, _, flag, _, _) = gif_fields(qwords[0]);
        assert_eq!(flag, GifFlag::Packed);
        assert_eq!(nloop, 2 + 2 * 10);

        let last_xyz = qwords[qwords.len() - 1];
        assert_eq!(last_xyz.hi(), u64::from(registers::XYZ2));
        let right = (1728.0f32 + 600.0) * 16.0;
        let bottom = (1792.0f32 + 512.0) * 16.0;
        assert_eq!(last_xyz.lo() & 0xFFFF, right as u64);
        assert_eq!((last_xyz.lo() >> 16) & 0xFFFF, bottom as u64);
    }
}

mod environment {
    use super::*;

    #[test]
    fn environment_is_an_untagged_ad_stream_ending_in_finish() {
        let config = RenderConfig::default();
        let buffers = display_buffers(&config);
        let mut buffer = CommandBuffer::new();
        let len = build_environment(&mut buffer, &buffers, &config).unwrap();

        let qwords = buffer.as_slice();
        assert_eq!(len, qwords.len());
        // 9 register writes, TEST, FINISH.
        assert_eq!(len, 10 + 2 + 2);

        let (nloop, eop, flag, nreg, regs) = gif_fields(qwords[0]);
        assert_eq!((nloop, eop, flag, nreg), (9, false, GifFlag::Packed, 1));
        assert_eq!(regs, u64::from(registers::GIF_REG_AD));

        assert_eq!(
            qwords[1],
            Qword::new(
                registers::frame(0, 640, PixelFormat::Psmct32 as u8, 0),
                u64::from(registers::FRAME_1)
            )
        );
        assert_eq!(
            qwords[2],
            Qword::new(
                registers::zbuf(327_680, DepthFormat::Z32 as u8, false),
                u64::from(registers::ZBUF_1)
            )
        );
        // Framebuffer centred on primitive coordinate 2048.
        let offset = qwords[3];
        assert_eq!(offset.hi(), u64::from(registers::XYOFFSET_1));
        assert_eq!(offset.lo(), registers::xyoffset(1728 * 16, 1792 * 16));

        assert_eq!(qwords[len - 1], Qword::new(1, u64::from(registers::FINISH)));
    }

    #[test]
    fn environment_enables_the_configured_depth_test() {
        let config = RenderConfig::default();
        let buffers = display_buffers(&config);
        let mut buffer = CommandBuffer::new();
        let len = build_environment(&mut buffer, &buffers, &config).unwrap();

        let test = buffer.as_slice()[len - 3];
        assert_eq!(test.hi(), u64::from(registers::TEST_1));
        // ZTE set, ZTST = GEQUAL.
        assert_eq!((test.lo() >> 16) & 1, 1);
        assert_eq!((test.lo() >> 17) & 0x3, ZTest::GreaterEqual as u64);
    }

    #[test]
    fn context_one_targets_second_register_set() {
        let config = RenderConfig {
            context: 1,
            ..RenderConfig::default()
        };
        let buffers = display_buffers(&config);
        let mut buffer = CommandBuffer::new();
        build_environment(&mut buffer, &buffers, &config).unwrap();
        assert_eq!(buffer.as_slice()[1].hi(), u64::from(registers::FRAME_1 + 1));
    }
}
