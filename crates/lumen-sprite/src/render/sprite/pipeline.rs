use std::collections::HashMap;

use super::layout::{layout_entries, SPRITE_BINDINGS, TEXTURE_GROUP, TRANSFORM_GROUP};
use super::texture::SpriteTexture;
use super::vertex::SpriteVertex;

/// WGSL source of the sprite stages.
pub const SPRITE_SHADER_SOURCE: &str = include_str!("shaders/sprite.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// How the fragment output is combined with the color target.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum SpriteBlend {
    /// `src + dst * (1 - src.a)`; textures and tints carry premultiplied alpha.
    #[default]
    PremultipliedAlpha,
    /// `src * src.a + dst * (1 - src.a)`.
    StraightAlpha,
    /// Overwrite.
    Opaque,
    /// `src + dst`.
    Additive,
}

impl SpriteBlend {
    pub fn blend_state(self) -> Option<wgpu::BlendState> {
        match self {
            SpriteBlend::PremultipliedAlpha => Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
            SpriteBlend::StraightAlpha => Some(wgpu::BlendState::ALPHA_BLENDING),
            SpriteBlend::Opaque => None,
            SpriteBlend::Additive => {
                let add = wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                };
                Some(wgpu::BlendState { color: add, alpha: add })
            }
        }
    }
}

/// Selects one compiled pipeline out of the cache.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SpritePipelineKey {
    pub format: wgpu::TextureFormat,
    pub blend: SpriteBlend,
}

/// Shader module, bind group layouts and a per-key cache of render pipelines.
///
/// Layouts are derived from [`SPRITE_BINDINGS`], so group 0 is always the
/// transform uniform and group 1 always the texture + sampler pair.
pub struct SpritePipeline {
    shader: wgpu::ShaderModule,
    transform_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<SpritePipelineKey, wgpu::RenderPipeline>,
}

impl SpritePipeline {
    pub fn new(device: &wgpu::Device) -> Self {
        log::debug!("creating sprite shader module and layouts");

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lumen sprite shader"),
            source: wgpu::ShaderSource::Wgsl(SPRITE_SHADER_SOURCE.into()),
        });

        let transform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lumen sprite transform bgl"),
            entries: &layout_entries(&SPRITE_BINDINGS, TRANSFORM_GROUP),
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lumen sprite texture bgl"),
            entries: &layout_entries(&SPRITE_BINDINGS, TEXTURE_GROUP),
        });

        // Index in this slice is the group index.
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lumen sprite pipeline layout"),
            bind_group_layouts: &[&transform_layout, &texture_layout],
            immediate_size: 0,
        });

        Self {
            shader,
            transform_layout,
            texture_layout,
            pipeline_layout,
            pipelines: HashMap::new(),
        }
    }

    /// Layout of group 0.
    pub fn transform_layout(&self) -> &wgpu::BindGroupLayout {
        &self.transform_layout
    }

    /// Layout of group 1.
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    /// Builds the group 1 bind group for a texture view + sampler.
    pub fn create_texture(
        &self,
        device: &wgpu::Device,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> SpriteTexture {
        SpriteTexture::new(device, &self.texture_layout, view, sampler)
    }

    /// Compiles the pipeline for `key` unless it is already cached.
    pub fn prepare(&mut self, device: &wgpu::Device, key: SpritePipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        let pipeline = self.build(device, key);
        self.pipelines.insert(key, pipeline);
    }

    /// Returns the pipeline for `key`, compiling it on first use.
    pub fn get(&mut self, device: &wgpu::Device, key: SpritePipelineKey) -> &wgpu::RenderPipeline {
        self.prepare(device, key);
        &self.pipelines[&key]
    }

    /// Returns the pipeline for `key` if [`prepare`](Self::prepare) has run for it.
    pub fn cached(&self, key: SpritePipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(&key)
    }

    pub fn cached_count(&self) -> usize {
        self.pipelines.len()
    }

    fn build(&self, device: &wgpu::Device, key: SpritePipelineKey) -> wgpu::RenderPipeline {
        log::debug!("compiling sprite pipeline for {key:?}");

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("lumen sprite pipeline {key:?}")),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &self.shader,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[SpriteVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &self.shader,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: key.format,
                    blend: key.blend.blend_state(),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}
