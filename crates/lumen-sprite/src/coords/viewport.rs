use glam::Mat4;

/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Orthographic transform from logical pixels to clip space.
    ///
    /// `(0, 0)` maps to the top-left corner `(-1, 1)`, `(width, height)` to
    /// `(1, -1)`. Depth `z ∈ [-1, 1]` maps to `[0, 1]`. Degenerate sizes are
    /// clamped to one pixel.
    pub fn pixel_transform(self) -> Mat4 {
        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        Mat4::orthographic_rh(0.0, w, h, 0.0, -1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;

    fn project(vp: Viewport, x: f32, y: f32, z: f32) -> Vec4 {
        vp.pixel_transform() * Vec3::new(x, y, z).extend(1.0)
    }

    #[test]
    fn corners_map_to_clip_corners() {
        let vp = Viewport::new(800.0, 600.0);
        let tl = project(vp, 0.0, 0.0, 0.0);
        let br = project(vp, 800.0, 600.0, 0.0);
        assert!(tl.abs_diff_eq(Vec4::new(-1.0, 1.0, 0.5, 1.0), 1e-6));
        assert!(br.abs_diff_eq(Vec4::new(1.0, -1.0, 0.5, 1.0), 1e-6));
    }

    #[test]
    fn depth_range_maps_to_zero_one() {
        let vp = Viewport::new(100.0, 100.0);
        assert!((project(vp, 0.0, 0.0, 1.0).z - 0.0).abs() < 1e-6);
        assert!((project(vp, 0.0, 0.0, -1.0).z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_viewport_is_clamped() {
        let m = Viewport::new(0.0, 0.0).pixel_transform();
        assert!(m.is_finite());
        assert!(!Viewport::new(0.0, 10.0).is_valid());
    }
}
