//! Cube mesh: 20 units on a side, one colour per face.
//!
//! Each face has its own four vertices laid out as a 2x2 grid, drawn as the
//! triangles (0, 1, 2) and (1, 2, 3).

use glam::{Vec3, Vec4};

use crate::render::mesh::{Mesh, MeshError};

pub const VERTEX_COUNT: usize = 24;
pub const INDEX_COUNT: usize = 36;

pub const VERTICES: [Vec4; VERTEX_COUNT] = [
    // +X
    Vec4::new(10.0, 10.0, 10.0, 1.0),
    Vec4::new(10.0, 10.0, -10.0, 1.0),
    Vec4::new(10.0, -10.0, 10.0, 1.0),
    Vec4::new(10.0, -10.0, -10.0, 1.0),
    // -X
    Vec4::new(-10.0, 10.0, 10.0, 1.0),
    Vec4::new(-10.0, 10.0, -10.0, 1.0),
    Vec4::new(-10.0, -10.0, 10.0, 1.0),
    Vec4::new(-10.0, -10.0, -10.0, 1.0),
    // +Y
    Vec4::new(-10.0, 10.0, 10.0, 1.0),
    Vec4::new(10.0, 10.0, 10.0, 1.0),
    Vec4::new(-10.0, 10.0, -10.0, 1.0),
    Vec4::new(10.0, 10.0, -10.0, 1.0),
    // -Y
    Vec4::new(-10.0, -10.0, 10.0, 1.0),
    Vec4::new(10.0, -10.0, 10.0, 1.0),
    Vec4::new(-10.0, -10.0, -10.0, 1.0),
    Vec4::new(10.0, -10.0, -10.0, 1.0),
    // +Z
    Vec4::new(-10.0, 10.0, 10.0, 1.0),
    Vec4::new(10.0, 10.0, 10.0, 1.0),
    Vec4::new(-10.0, -10.0, 10.0, 1.0),
    Vec4::new(10.0, -10.0, 10.0, 1.0),
    // -Z
    Vec4::new(-10.0, 10.0, -10.0, 1.0),
    Vec4::new(10.0, 10.0, -10.0, 1.0),
    Vec4::new(-10.0, -10.0, -10.0, 1.0),
    Vec4::new(10.0, -10.0, -10.0, 1.0),
];

const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
const YELLOW: Vec3 = Vec3::new(1.0, 1.0, 0.0);
const MAGENTA: Vec3 = Vec3::new(1.0, 0.0, 1.0);
const CYAN: Vec3 = Vec3::new(0.0, 1.0, 1.0);

pub const COLORS: [Vec3; VERTEX_COUNT] = [
    RED, RED, RED, RED,
    GREEN, GREEN, GREEN, GREEN,
    BLUE, BLUE, BLUE, BLUE,
    YELLOW, YELLOW, YELLOW, YELLOW,
    MAGENTA, MAGENTA, MAGENTA, MAGENTA,
    CYAN, CYAN, CYAN, CYAN,
];

pub const POINTS: [u16; INDEX_COUNT] = [
    0, 1, 2, 1, 2, 3,
    4, 5, 6, 5, 6, 7,
    8, 9, 10, 9, 10, 11,
    12, 13, 14, 13, 14, 15,
    16, 17, 18, 17, 18, 19,
    20, 21, 22, 21, 22, 23,
];

/// The cube as a validated mesh.
pub fn mesh() -> Result<Mesh<'static>, MeshError> {
    Mesh::new(&VERTICES, &COLORS, &POINTS)
}
