/// Sampler configuration for sprite textures.
///
/// The fragment stage never looks at these settings; wrapping and filtering
/// are entirely the sampler's business.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplerConfig {
    /// Applied to u, v and w.
    pub address_mode: wgpu::AddressMode,
    /// Applied to magnification, minification and mip selection.
    pub filter: wgpu::FilterMode,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            address_mode: wgpu::AddressMode::ClampToEdge,
            filter: wgpu::FilterMode::Linear,
        }
    }
}

impl SamplerConfig {
    /// Nearest-neighbour variant, for pixel art.
    pub fn nearest() -> Self {
        Self { filter: wgpu::FilterMode::Nearest, ..Self::default() }
    }

    pub fn descriptor(&self) -> wgpu::SamplerDescriptor<'static> {
        let mipmap_filter = match self.filter {
            wgpu::FilterMode::Nearest => wgpu::MipmapFilterMode::Nearest,
            wgpu::FilterMode::Linear => wgpu::MipmapFilterMode::Linear,
        };

        wgpu::SamplerDescriptor {
            label: Some("lumen sprite sampler"),
            address_mode_u: self.address_mode,
            address_mode_v: self.address_mode,
            address_mode_w: self.address_mode,
            mag_filter: self.filter,
            min_filter: self.filter,
            mipmap_filter,
            lod_min_clamp: 0.0,
            lod_max_clamp: 32.0,
            compare: None,
            anisotropy_clamp: 1,
            border_color: None,
        }
    }

    pub fn create(&self, device: &wgpu::Device) -> wgpu::Sampler {
        log::debug!("creating sprite sampler {self:?}");
        device.create_sampler(&self.descriptor())
    }
}
