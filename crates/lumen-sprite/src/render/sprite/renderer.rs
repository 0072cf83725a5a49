use glam::Mat4;
use thiserror::Error;

use crate::render::{RenderCtx, RenderTarget};

use super::pipeline::{SpriteBlend, SpritePipeline, SpritePipelineKey};
use super::texture::SpriteTexture;
use super::uniform::SpriteParams;
use super::vertex::SpriteVertex;

/// One draw call: geometry, transform, and the texture group to bind.
#[derive(Debug, Clone, Copy)]
pub struct SpriteDraw<'a> {
    pub vertices: &'a [SpriteVertex],
    /// Triangle-list indices into `vertices`; `None` draws `vertices` as a
    /// plain triangle list.
    pub indices: Option<&'a [u16]>,
    pub transform: Mat4,
    pub texture: &'a SpriteTexture,
    pub blend: SpriteBlend,
}

/// Why [`SpriteRenderer::render`] dropped a draw.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
enum DrawRejection {
    #[error("no vertices")]
    NoVertices,
    #[error("{0} indices do not form a triangle list")]
    NotTriangleList(usize),
    #[error("index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u16, vertex_count: usize },
}

/// Checks one draw's geometry before it is packed into the shared buffers.
///
/// Indices must stay inside the draw's own vertices, since every draw shares
/// one vertex buffer.
fn check_geometry(vertex_count: usize, indices: Option<&[u16]>) -> Result<(), DrawRejection> {
    if vertex_count == 0 {
        return Err(DrawRejection::NoVertices);
    }
    let Some(indices) = indices else {
        return Ok(());
    };
    if indices.is_empty() || indices.len() % 3 != 0 {
        return Err(DrawRejection::NotTriangleList(indices.len()));
    }
    match indices.iter().copied().find(|&i| usize::from(i) >= vertex_count) {
        Some(index) => Err(DrawRejection::IndexOutOfRange { index, vertex_count }),
        None => Ok(()),
    }
}

/// Where one accepted draw landed in the shared buffers.
struct DrawRange<'a> {
    key: SpritePipelineKey,
    texture: &'a SpriteTexture,
    base_vertex: u32,
    vertex_count: u32,
    /// `(first_index, index_count)` for indexed draws.
    indices: Option<(u32, u32)>,
    uniform_offset: u64,
}

/// Records sprite draws into a render target.
///
/// GPU objects are created lazily and rebuilt only when they must grow. All
/// draws passed to one [`render`](Self::render) call share a vertex buffer, an
/// index buffer and a uniform buffer; each draw gets its own group 0 bind
/// group pointing at its transform slot.
#[derive(Default)]
pub struct SpriteRenderer {
    pipeline: Option<SpritePipeline>,

    uniform_ubo: Option<wgpu::Buffer>,
    uniform_capacity: u64,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: u64,

    index_ibo: Option<wgpu::Buffer>,
    index_capacity: u64,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pipeline cache, created on first use.
    pub fn pipeline(&mut self, ctx: &RenderCtx<'_>) -> &mut SpritePipeline {
        self.pipeline.get_or_insert_with(|| SpritePipeline::new(ctx.device))
    }

    /// Builds a group 1 bind group compatible with this renderer's pipelines.
    pub fn create_texture(
        &mut self,
        ctx: &RenderCtx<'_>,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> SpriteTexture {
        self.pipeline(ctx).create_texture(ctx.device, view, sampler)
    }

    /// Renders `draws` in order into `target`, loading existing contents.
    ///
    /// Draws with no vertices, with an index count that is not a multiple of
    /// three, or with an index past their own vertices are skipped with a
    /// warning.
    ///
    /// Buffers are rewritten through the queue on every call, so the encoder
    /// must be submitted before the next `render`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draws: &[SpriteDraw<'_>],
    ) {
        let uniform_stride = uniform_stride(ctx.device);

        // ── pack geometry and transforms ───────────────────────────────────
        let mut vertices: Vec<SpriteVertex> = Vec::new();
        let mut indices: Vec<u16> = Vec::new();
        let mut uniforms: Vec<u8> = Vec::new();
        let mut ranges: Vec<DrawRange<'_>> = Vec::with_capacity(draws.len());

        for (i, draw) in draws.iter().enumerate() {
            if let Err(reason) = check_geometry(draw.vertices.len(), draw.indices) {
                log::warn!("SpriteRenderer: skipping draw {i}: {reason}");
                continue;
            }

            let base_vertex = vertices.len() as u32;
            vertices.extend_from_slice(draw.vertices);

            let index_range = draw.indices.map(|idx| {
                let first = indices.len() as u32;
                indices.extend_from_slice(idx);
                (first, idx.len() as u32)
            });

            let uniform_offset = uniforms.len() as u64;
            uniforms.extend_from_slice(bytemuck::bytes_of(&SpriteParams::new(draw.transform)));
            uniforms.resize((uniform_offset + uniform_stride) as usize, 0);

            ranges.push(DrawRange {
                key: SpritePipelineKey { format: ctx.surface_format, blend: draw.blend },
                texture: draw.texture,
                base_vertex,
                vertex_count: draw.vertices.len() as u32,
                indices: index_range,
                uniform_offset,
            });
        }

        if ranges.is_empty() {
            return;
        }

        // Buffer writes must be a multiple of 4 bytes.
        if indices.len() % 2 != 0 {
            indices.push(0);
        }

        // ── mutable operations before any immutable borrows ────────────────
        let pipeline = self.pipeline.get_or_insert_with(|| SpritePipeline::new(ctx.device));
        for range in &ranges {
            pipeline.prepare(ctx.device, range.key);
        }

        ensure_buffer(
            ctx,
            &mut self.uniform_ubo,
            &mut self.uniform_capacity,
            uniforms.len() as u64,
            wgpu::BufferUsages::UNIFORM,
            "lumen sprite transform ubo",
        );
        ensure_buffer(
            ctx,
            &mut self.vertex_vbo,
            &mut self.vertex_capacity,
            (vertices.len() as u64) * SpriteVertex::STRIDE,
            wgpu::BufferUsages::VERTEX,
            "lumen sprite vbo",
        );
        if !indices.is_empty() {
            ensure_buffer(
                ctx,
                &mut self.index_ibo,
                &mut self.index_capacity,
                (indices.len() * std::mem::size_of::<u16>()) as u64,
                wgpu::BufferUsages::INDEX,
                "lumen sprite ibo",
            );
        }

        // ── immutable borrows ──────────────────────────────────────────────
        let Some(pipeline) = self.pipeline.as_ref() else {
            return;
        };
        let Some(ubo) = self.uniform_ubo.as_ref() else {
            return;
        };
        let Some(vbo) = self.vertex_vbo.as_ref() else {
            return;
        };

        ctx.queue.write_buffer(ubo, 0, &uniforms);
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&vertices));
        let ibo = if indices.is_empty() { None } else { self.index_ibo.as_ref() };
        if let Some(ibo) = ibo {
            ctx.queue.write_buffer(ibo, 0, bytemuck::cast_slice(&indices));
        }

        let transform_groups: Vec<wgpu::BindGroup> = ranges
            .iter()
            .map(|range| {
                ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("lumen sprite transform bind group"),
                    layout: pipeline.transform_layout(),
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                            buffer: ubo,
                            offset: range.uniform_offset,
                            size: Some(SpriteParams::min_binding_size()),
                        }),
                    }],
                })
            })
            .collect();

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("lumen sprite pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_vertex_buffer(0, vbo.slice(..));
        if let Some(ibo) = ibo {
            rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint16);
        }

        for (range, transform_group) in ranges.iter().zip(&transform_groups) {
            let Some(render_pipeline) = pipeline.cached(range.key) else {
                continue;
            };

            rpass.set_pipeline(render_pipeline);
            rpass.set_bind_group(0, transform_group, &[]);
            rpass.set_bind_group(1, range.texture.bind_group(), &[]);

            match range.indices {
                Some((first, count)) => {
                    rpass.draw_indexed(first..first + count, range.base_vertex as i32, 0..1);
                }
                None => {
                    let start = range.base_vertex;
                    rpass.draw(start..start + range.vertex_count, 0..1);
                }
            }
        }
    }
}

/// Size of one transform slot, rounded up to the device's uniform offset
/// alignment.
fn uniform_stride(device: &wgpu::Device) -> u64 {
    let align = u64::from(device.limits().min_uniform_buffer_offset_alignment).max(1);
    SpriteParams::SIZE.div_ceil(align) * align
}

/// Grows `slot` to at least `required` bytes (power-of-two capacity).
fn ensure_buffer(
    ctx: &RenderCtx<'_>,
    slot: &mut Option<wgpu::Buffer>,
    capacity: &mut u64,
    required: u64,
    usage: wgpu::BufferUsages,
    label: &'static str,
) {
    if required <= *capacity && slot.is_some() {
        return;
    }
    let new_cap = required.next_power_of_two().max(256);
    log::debug!("{label}: growing to {new_cap} bytes");
    *slot = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: new_cap,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    }));
    *capacity = new_cap;
}
