use bytemuck::{Pod, Zeroable};

use crate::coords::ColorRgba;

/// Per-vertex record consumed by the sprite vertex stage.
///
/// Layout (36 bytes):
///
///  offset  0  position          [f32; 3]   loc 0
///  offset 12  color             [f32; 4]   loc 1
///  offset 28  texture_position  [f32; 2]   loc 2
///
/// `color` is stored in producer order, which is blue-first (see
/// [`pack_tint`]). The vertex stage reverses the first three channels.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub texture_position: [f32; 2],
}

impl SpriteVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4, // color
        2 => Float32x2  // texture_position
    ];

    pub const STRIDE: u64 = std::mem::size_of::<SpriteVertex>() as u64;

    #[inline]
    pub const fn new(position: [f32; 3], color: [f32; 4], texture_position: [f32; 2]) -> Self {
        Self { position, color, texture_position }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Packs a linear RGBA tint into the vertex color channel order.
///
/// The producer side of the pipeline writes `(b, g, r, a)`; the vertex stage
/// swaps it back, so the fragment stage sees `(r, g, b, a)`.
#[inline]
pub const fn pack_tint(color: ColorRgba) -> [f32; 4] {
    let [r, g, b, a] = color.to_array();
    [b, g, r, a]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_and_offsets_match_shader_locations() {
        let layout = SpriteVertex::layout();
        assert_eq!(layout.array_stride, 36);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);

        let attrs: Vec<_> = layout
            .attributes
            .iter()
            .map(|a| (a.shader_location, a.offset, a.format))
            .collect();
        assert_eq!(
            attrs,
            vec![
                (0, 0, wgpu::VertexFormat::Float32x3),
                (1, 12, wgpu::VertexFormat::Float32x4),
                (2, 28, wgpu::VertexFormat::Float32x2),
            ]
        );
    }

    #[test]
    fn pack_tint_is_blue_first() {
        let packed = pack_tint(ColorRgba::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(packed, [0.3, 0.2, 0.1, 0.4]);
    }

    #[test]
    fn vertex_is_plain_bytes() {
        let v = SpriteVertex::new([1.0, 2.0, 3.0], [0.0; 4], [0.5, 0.25]);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[28..32], &0.5f32.to_ne_bytes());
    }
}
