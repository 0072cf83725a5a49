use crate::coords::{ColorRgba, Rect};

use super::vertex::{pack_tint, SpriteVertex};

/// Two triangles over the corners of [`SpriteQuad::vertices`]. Pipelines do not cull.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// A tinted, textured quad in logical pixels.
///
/// `uv` selects the texture sub-rect, so atlas regions and flips (negative
/// extent) need no extra state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteQuad {
    pub dst: Rect,
    pub uv: Rect,
    pub depth: f32,
    pub tint: ColorRgba,
}

impl SpriteQuad {
    /// Full texture, untinted, at depth 0.
    pub fn new(dst: Rect) -> Self {
        Self {
            dst,
            uv: Rect::unit(),
            depth: 0.0,
            tint: ColorRgba::white(),
        }
    }

    pub fn with_uv(self, uv: Rect) -> Self {
        Self { uv, ..self }
    }

    pub fn with_tint(self, tint: ColorRgba) -> Self {
        Self { tint, ..self }
    }

    pub fn with_depth(self, depth: f32) -> Self {
        Self { depth, ..self }
    }

    /// Corners in order top-left, top-right, bottom-right, bottom-left.
    pub fn vertices(&self) -> [SpriteVertex; 4] {
        let (p0, p1) = (self.dst.min(), self.dst.max());
        let (t0, t1) = (self.uv.min(), self.uv.max());
        let z = self.depth;
        let color = pack_tint(self.tint);

        [
            SpriteVertex::new([p0.x, p0.y, z], color, [t0.x, t0.y]),
            SpriteVertex::new([p1.x, p0.y, z], color, [t1.x, t0.y]),
            SpriteVertex::new([p1.x, p1.y, z], color, [t1.x, t1.y]),
            SpriteVertex::new([p0.x, p1.y, z], color, [t0.x, t1.y]),
        ]
    }
}
