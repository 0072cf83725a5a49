//! Software texture sampling for the CPU reference stages.
//!
//! Nearest filtering only. Address modes reuse `wgpu::AddressMode` so a
//! [`SamplerConfig`](super::SamplerConfig) means the same thing on both sides.

use glam::{Vec2, Vec4};

/// RGBA `f32` texels, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftwareTexture {
    width: u32,
    height: u32,
    texels: Vec<Vec4>,
}

impl SoftwareTexture {
    /// Returns `None` when either dimension is zero or `texels` does not hold
    /// exactly `width * height` entries.
    pub fn from_texels(width: u32, height: u32, texels: Vec<Vec4>) -> Option<Self> {
        if width == 0 || height == 0 || texels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self { width, height, texels })
    }

    /// 1×1 texture.
    pub fn solid(color: Vec4) -> Self {
        Self { width: 1, height: 1, texels: vec![color] }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// # Panics
    /// Panics if `(x, y)` is outside the texture.
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> Vec4 {
        self.texels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Nearest-texel sample at `uv`.
    ///
    /// `ClampToBorder` yields transparent black outside `[0, 1]`.
    pub fn sample(&self, uv: Vec2, mode: wgpu::AddressMode) -> Vec4 {
        let (Some(x), Some(y)) = (
            texel_index(uv.x, self.width, mode),
            texel_index(uv.y, self.height, mode),
        ) else {
            return Vec4::ZERO;
        };
        self.texel(x, y)
    }

    /// Binds an address mode, producing the `uv → color` function the
    /// fragment stage consumes.
    pub fn sampler(&self, mode: wgpu::AddressMode) -> impl Fn(Vec2) -> Vec4 + '_ {
        move |uv| self.sample(uv, mode)
    }
}

fn texel_index(coord: f32, size: u32, mode: wgpu::AddressMode) -> Option<u32> {
    let t = match mode {
        wgpu::AddressMode::ClampToEdge => coord.clamp(0.0, 1.0),
        wgpu::AddressMode::Repeat => coord - coord.floor(),
        wgpu::AddressMode::MirrorRepeat => {
            let t = coord.rem_euclid(2.0);
            if t > 1.0 { 2.0 - t } else { t }
        }
        wgpu::AddressMode::ClampToBorder => {
            if !(0.0..=1.0).contains(&coord) {
                return None;
            }
            coord
        }
    };
    if !t.is_finite() {
        return None;
    }
    let max = size - 1;
    Some(((t * size as f32).floor() as u32).min(max))
}
