use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Group 0 uniform: one column-major `mat4x4<f32>` (64 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpriteParams {
    pub transform: [[f32; 4]; 4],
}

impl SpriteParams {
    pub const SIZE: u64 = std::mem::size_of::<SpriteParams>() as u64;

    #[inline]
    pub fn new(transform: Mat4) -> Self {
        Self { transform: transform.to_cols_array_2d() }
    }

    #[inline]
    pub fn transform(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.transform)
    }

    /// Minimum binding size for the group 0 uniform buffer.
    pub fn min_binding_size() -> NonZeroU64 {
        NonZeroU64::new(Self::SIZE).expect("SpriteParams has non-zero size by construction")
    }
}

impl Default for SpriteParams {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_64_bytes() {
        assert_eq!(SpriteParams::SIZE, 64);
        assert_eq!(SpriteParams::min_binding_size().get(), 64);
    }

    #[test]
    fn columns_are_stored_in_order() {
        let m = Mat4::from_translation(glam::Vec3::new(3.0, 4.0, 5.0));
        let params = SpriteParams::new(m);
        // Translation lives in the fourth column.
        assert_eq!(params.transform[3], [3.0, 4.0, 5.0, 1.0]);
        assert_eq!(params.transform(), m);
    }
}
