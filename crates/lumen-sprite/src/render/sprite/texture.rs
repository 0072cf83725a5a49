/// Group 1 bind group: one texture view plus one sampler.
///
/// The view and sampler stay owned by the caller; wgpu keeps them alive for
/// as long as this bind group exists. Swap textures by swapping this value,
/// the transform group is untouched.
#[derive(Debug, Clone)]
pub struct SpriteTexture {
    bind_group: wgpu::BindGroup,
}

impl SpriteTexture {
    /// `layout` must be the pipeline's texture-group layout
    /// (see [`SpritePipeline::texture_layout`](super::SpritePipeline::texture_layout)).
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lumen sprite texture bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self { bind_group }
    }

    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
