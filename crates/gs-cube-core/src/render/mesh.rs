//! Static mesh references, validated once at load time.

use core::fmt;

use glam::{Vec3, Vec4};

/// Maximum vertices the per-frame transform and conversion scratch holds.
pub const MAX_VERTICES: usize = 256;

/// Defects in mesh data. These are configuration errors: the mesh is
/// compiled in, so they are reported before the render loop starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    /// Position and colour arrays differ in length.
    ColorCountMismatch { positions: usize, colors: usize },
    /// More vertices than the frame scratch buffers hold.
    TooManyVertices { count: usize, max: usize },
    /// The index list does not describe whole triangles.
    PartialTriangle { index_count: usize },
    /// An index refers past the end of the vertex arrays.
    IndexOutOfRange { position: usize, index: u16, vertex_count: usize },
    /// One frame's packet would not fit a command buffer.
    PacketTooLarge { required: usize, capacity: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::ColorCountMismatch { positions, colors } => {
                write!(f, "{positions} positions but {colors} colours")
            }
            MeshError::TooManyVertices { count, max } => {
                write!(f, "{count} vertices exceed the limit of {max}")
            }
            MeshError::PartialTriangle { index_count } => {
                write!(f, "index count {index_count} is not a multiple of 3")
            }
            MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            } => write!(
                f,
                "index {index} at position {position} is out of range for {vertex_count} vertices"
            ),
            MeshError::PacketTooLarge { required, capacity } => write!(
                f,
                "frame packet needs {required} quadwords, command buffer holds {capacity}"
            ),
        }
    }
}

/// A reference to static mesh data: positions, parallel RGB colours, and a
/// triangle list of vertex indices.
#[derive(Clone, Copy, Debug)]
pub struct Mesh<'a> {
    positions: &'a [Vec4],
    colors: &'a [Vec3],
    points: &'a [u16],
}

impl<'a> Mesh<'a> {
    /// Validate and wrap mesh arrays.
    pub fn new(positions: &'a [Vec4], colors: &'a [Vec3], points: &'a [u16]) -> Result<Self, MeshError> {
        if positions.len() != colors.len() {
            return Err(MeshError::ColorCountMismatch {
                positions: positions.len(),
                colors: colors.len(),
            });
        }
        if positions.len() > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count: positions.len(),
                max: MAX_VERTICES,
            });
        }
        if points.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle {
                index_count: points.len(),
            });
        }
        if let Some((position, &index)) = points
            .iter()
            .enumerate()
            .find(|(_, &index)| usize::from(index) >= positions.len())
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count: positions.len(),
            });
        }

        Ok(Self {
            positions,
            colors,
            points,
        })
    }

    pub fn positions(&self) -> &'a [Vec4] {
        self.positions
    }

    pub fn colors(&self) -> &'a [Vec3] {
        self.colors
    }

    pub fn points(&self) -> &'a [u16] {
        self.points
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.points.len() / 3
    }
}
