//! Textured, tinted sprite pipeline.
//!
//! Two stages per draw call:
//! - vertex: `transform * [position, 1]`, color with its first three channels
//!   reversed, texture position passed through
//! - fragment: `sample(texture, sampler, uv) * color`
//!
//! Resources live in two bind groups: group 0 holds the transform uniform,
//! group 1 holds exactly one texture + sampler pair (see [`layout`]).
//!
//! The WGSL in `shaders/sprite.wgsl` is the GPU side; [`stages`] is a CPU
//! mirror of it for tests and software fallbacks.

pub mod layout;
mod pipeline;
mod quad;
mod renderer;
mod sampler;
pub mod software;
pub mod stages;
mod texture;
mod uniform;
mod vertex;

pub use layout::{
    classify, is_single_texture_group, validate_bindings, BindingLayoutError, BindingSlot,
    PipelineShape, ResourceKind, ShaderStage, SPRITE_BINDINGS, TEXTURE_GROUP, TRANSFORM_GROUP,
};
pub use pipeline::{
    SpriteBlend, SpritePipeline, SpritePipelineKey, FRAGMENT_ENTRY, SPRITE_SHADER_SOURCE,
    VERTEX_ENTRY,
};
pub use quad::{SpriteQuad, QUAD_INDICES};
pub use renderer::{SpriteDraw, SpriteRenderer};
pub use sampler::SamplerConfig;
pub use software::SoftwareTexture;
pub use stages::{
    fragment_main, interpolate, modulate, swizzle_color, vertex_main, SpriteVaryings, VertexInput,
};
pub use texture::SpriteTexture;
pub use uniform::SpriteParams;
pub use vertex::{pack_tint, SpriteVertex};
