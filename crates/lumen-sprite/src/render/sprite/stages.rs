//! CPU reference of the sprite shader stages.
//!
//! These mirror `shaders/sprite.wgsl` one to one and exist so the transform,
//! channel swap and modulation can be checked without a GPU.

use glam::{Vec2, Vec3, Vec4};

use super::uniform::SpriteParams;
use super::vertex::SpriteVertex;

/// Vertex stage input.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct VertexInput {
    pub position: Vec3,
    pub color: Vec4,
    pub texture_position: Vec2,
}

impl From<SpriteVertex> for VertexInput {
    #[inline]
    fn from(v: SpriteVertex) -> Self {
        Self {
            position: Vec3::from_array(v.position),
            color: Vec4::from_array(v.color),
            texture_position: Vec2::from_array(v.texture_position),
        }
    }
}

/// Vertex stage output / fragment stage input.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SpriteVaryings {
    pub clip_position: Vec4,
    pub color: Vec4,
    pub texture_position: Vec2,
}

/// `(c0, c1, c2, c3)` → `(c2, c1, c0, c3)`.
#[inline]
pub fn swizzle_color(c: Vec4) -> Vec4 {
    Vec4::new(c.z, c.y, c.x, c.w)
}

/// Component-wise product, alpha included.
#[inline]
pub fn modulate(sample: Vec4, color: Vec4) -> Vec4 {
    sample * color
}

/// `vs_main`.
pub fn vertex_main(input: &VertexInput, params: &SpriteParams) -> SpriteVaryings {
    SpriteVaryings {
        clip_position: params.transform() * input.position.extend(1.0),
        color: swizzle_color(input.color),
        texture_position: input.texture_position,
    }
}

/// `fs_main`. `sample` stands in for `textureSample(texture, sampler, uv)`.
pub fn fragment_main<S>(varyings: &SpriteVaryings, sample: S) -> Vec4
where
    S: Fn(Vec2) -> Vec4,
{
    modulate(sample(varyings.texture_position), varyings.color)
}

/// Perspective-correct interpolation of a triangle's varyings.
///
/// `weights` are screen-space barycentrics summing to one. Color and texture
/// position are weighted by `1 / w`; the clip position is interpolated
/// linearly. A vertex with `w == 0` yields non-finite output, as it would be
/// clipped before rasterization.
pub fn interpolate(tri: &[SpriteVaryings; 3], weights: Vec3) -> SpriteVaryings {
    let inv_w = Vec3::new(
        1.0 / tri[0].clip_position.w,
        1.0 / tri[1].clip_position.w,
        1.0 / tri[2].clip_position.w,
    );
    let pw = weights * inv_w;
    let norm = 1.0 / (pw.x + pw.y + pw.z);

    SpriteVaryings {
        clip_position: tri[0].clip_position * weights.x
            + tri[1].clip_position * weights.y
            + tri[2].clip_position * weights.z,
        color: (tri[0].color * pw.x + tri[1].color * pw.y + tri[2].color * pw.z) * norm,
        texture_position: (tri[0].texture_position * pw.x
            + tri[1].texture_position * pw.y
            + tri[2].texture_position * pw.z)
            * norm,
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;

    fn input(position: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> VertexInput {
        SpriteVertex::new(position, color, uv).into()
    }

    // ── vertex stage ──────────────────────────────────────────────────────

    #[test]
    fn identity_transform_places_origin_at_clip_origin() {
        let out = vertex_main(&input([0.0; 3], [1.0; 4], [0.0; 2]), &SpriteParams::default());
        assert_eq!(out.clip_position, Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn clip_position_is_matrix_times_homogeneous_position() {
        let m = Mat4::from_cols_array(&[
            1.5, 0.25, -2.0, 0.0, //
            0.5, -1.0, 3.0, 0.125, //
            -0.75, 2.0, 1.0, 0.5, //
            4.0, -8.0, 16.0, 1.0,
        ]);
        let params = SpriteParams::new(m);

        for p in [[0.0, 0.0, 0.0], [1.0, -2.0, 3.0], [-640.0, 360.0, 0.5], [1e-3, 1e3, -1.0]] {
            let out = vertex_main(&input(p, [0.0; 4], [0.0; 2]), &params);
            let expected = m.x_axis * p[0] + m.y_axis * p[1] + m.z_axis * p[2] + m.w_axis;
            assert!(
                out.clip_position.abs_diff_eq(expected, 1e-3),
                "{p:?}: {} != {expected}",
                out.clip_position
            );
        }
    }

    #[test]
    fn translation_moves_clip_position() {
        let params = SpriteParams::new(Mat4::from_translation(Vec3::new(0.5, -0.25, 0.0)));
        let out = vertex_main(&input([0.25, 0.25, 0.0], [0.0; 4], [0.0; 2]), &params);
        assert_eq!(out.clip_position, Vec4::new(0.75, 0.0, 0.0, 1.0));
    }

    #[test]
    fn color_first_three_channels_are_reversed() {
        let cases = [
            ([0.1, 0.2, 0.3, 0.4], [0.3, 0.2, 0.1, 0.4]),
            ([1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]),
            ([0.0, 0.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0]),
            ([1.0, 1.0, 1.0, 1.0], [1.0, 1.0, 1.0, 1.0]),
            ([0.0, 1.0, 0.0, 0.5], [0.0, 1.0, 0.0, 0.5]),
        ];
        for (color, expected) in cases {
            let out = vertex_main(&input([0.0; 3], color, [0.0; 2]), &SpriteParams::default());
            assert_eq!(out.color, Vec4::from_array(expected), "input {color:?}");
        }
    }

    #[test]
    fn swizzle_is_an_involution() {
        let c = Vec4::new(0.9, 0.6, 0.3, 0.2);
        assert_eq!(swizzle_color(swizzle_color(c)), c);
    }

    #[test]
    fn texture_position_passes_through() {
        let params = SpriteParams::new(Mat4::from_scale(Vec3::splat(3.0)));
        for uv in [[0.0, 0.0], [1.0, 1.0], [0.25, 0.75], [-0.5, 2.5]] {
            let out = vertex_main(&input([1.0, 2.0, 3.0], [1.0; 4], uv), &params);
            assert_eq!(out.texture_position, Vec2::from_array(uv));
        }
    }

    // ── interpolation ─────────────────────────────────────────────────────

    fn triangle(w: [f32; 3]) -> [SpriteVaryings; 3] {
        let v = |i: usize, uv: [f32; 2], color: [f32; 4]| SpriteVaryings {
            clip_position: Vec4::new(i as f32, 0.0, 0.0, 1.0) * w[i],
            color: Vec4::from_array(color),
            texture_position: Vec2::from_array(uv),
        };
        [
            v(0, [0.0, 0.0], [1.0, 0.0, 0.0, 1.0]),
            v(1, [1.0, 0.0], [0.0, 1.0, 0.0, 0.5]),
            v(2, [0.0, 1.0], [0.0, 0.0, 1.0, 0.0]),
        ]
    }

    #[test]
    fn interpolation_at_a_vertex_returns_that_vertex() {
        let tri = triangle([1.0, 1.0, 1.0]);
        for (i, weights) in [Vec3::X, Vec3::Y, Vec3::Z].into_iter().enumerate() {
            let out = interpolate(&tri, weights);
            assert_eq!(out.texture_position, tri[i].texture_position);
            assert_eq!(out.color, tri[i].color);
        }
    }

    #[test]
    fn interpolation_at_a_vertex_with_perspective_is_close() {
        let tri = triangle([1.0, 2.0, 4.0]);
        for (i, weights) in [Vec3::X, Vec3::Y, Vec3::Z].into_iter().enumerate() {
            let out = interpolate(&tri, weights);
            assert!(out.texture_position.abs_diff_eq(tri[i].texture_position, 1e-6));
            assert!(out.color.abs_diff_eq(tri[i].color, 1e-6));
        }
    }

    #[test]
    fn perspective_weights_favor_nearer_vertex() {
        // Vertex 0 is nearer (smaller w), so the midpoint uv leans toward it.
        let tri = triangle([1.0, 3.0, 1.0]);
        let out = interpolate(&tri, Vec3::new(0.5, 0.5, 0.0));
        assert!(out.texture_position.x < 0.5);
        assert!((out.texture_position.x - 0.25).abs() < 1e-6);
    }

    // ── fragment stage ────────────────────────────────────────────────────

    fn varyings(color: [f32; 4], uv: [f32; 2]) -> SpriteVaryings {
        SpriteVaryings {
            clip_position: Vec4::W,
            color: Vec4::from_array(color),
            texture_position: Vec2::from_array(uv),
        }
    }

    #[test]
    fn white_texel_returns_vertex_color() {
        let out = fragment_main(&varyings([0.5; 4], [0.3, 0.3]), |_| Vec4::ONE);
        assert_eq!(out, Vec4::splat(0.5));
    }

    #[test]
    fn transparent_texel_absorbs_any_color() {
        for color in [[1.0; 4], [0.2, 0.4, 0.6, 0.8], [0.0; 4]] {
            let out = fragment_main(&varyings(color, [0.5, 0.5]), |_| Vec4::ZERO);
            assert_eq!(out, Vec4::ZERO);
        }
    }

    #[test]
    fn modulation_is_component_wise_including_alpha() {
        let out = fragment_main(&varyings([0.5, 0.25, 1.0, 0.5], [0.0, 0.0]), |_| {
            Vec4::new(0.5, 1.0, 0.75, 0.5)
        });
        assert_eq!(out, Vec4::new(0.25, 0.25, 0.75, 0.25));
    }

    #[test]
    fn sampler_receives_interpolated_texture_position() {
        let out = fragment_main(&varyings([1.0; 4], [0.125, 0.875]), |uv| {
            uv.extend(0.0).extend(1.0)
        });
        assert_eq!(out, Vec4::new(0.125, 0.875, 0.0, 1.0));
    }

    #[test]
    fn full_pipeline_red_vertex_becomes_blue_tint() {
        let v = vertex_main(
            &input([0.0; 3], [1.0, 0.0, 0.0, 1.0], [0.5, 0.5]),
            &SpriteParams::default(),
        );
        assert_eq!(v.color, Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(fragment_main(&v, |_| Vec4::ONE), Vec4::new(0.0, 0.0, 1.0, 1.0));
    }
}
