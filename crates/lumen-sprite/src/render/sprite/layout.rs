//! Binding contract of the sprite shader.
//!
//! Resources are declared as data ([`BindingSlot`]) rather than by position so
//! that wgpu layouts, validation and pipeline classification all read the same
//! table. Group 0 carries the transform uniform; group 1 carries exactly one
//! texture + sampler pair. New resources go into a new group, never group 1.

use thiserror::Error;

use super::uniform::SpriteParams;

/// Bind group index of the transform uniform.
pub const TRANSFORM_GROUP: u32 = 0;

/// Bind group index of the texture + sampler pair.
pub const TEXTURE_GROUP: u32 = 1;

/// Kind of GPU resource occupying a binding slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    /// Read-only uniform buffer.
    UniformBuffer,
    /// 2D, float-sampled, single-sample texture view.
    Texture2d,
    /// Filtering sampler.
    Sampler,
}

/// Shader stage a binding is visible to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl From<ShaderStage> for wgpu::ShaderStages {
    fn from(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => wgpu::ShaderStages::VERTEX,
            ShaderStage::Fragment => wgpu::ShaderStages::FRAGMENT,
        }
    }
}

/// One `(group, binding)` slot and what lives there.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BindingSlot {
    pub group: u32,
    pub binding: u32,
    pub kind: ResourceKind,
    pub stage: ShaderStage,
}

impl BindingSlot {
    #[inline]
    pub const fn new(group: u32, binding: u32, kind: ResourceKind, stage: ShaderStage) -> Self {
        Self { group, binding, kind, stage }
    }

    /// wgpu layout entry for this slot.
    pub fn layout_entry(&self) -> wgpu::BindGroupLayoutEntry {
        let ty = match self.kind {
            ResourceKind::UniformBuffer => wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: Some(SpriteParams::min_binding_size()),
            },
            ResourceKind::Texture2d => wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            ResourceKind::Sampler => {
                wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering)
            }
        };

        wgpu::BindGroupLayoutEntry {
            binding: self.binding,
            visibility: self.stage.into(),
            ty,
            count: None,
        }
    }
}

/// Every resource the sprite shader declares.
pub const SPRITE_BINDINGS: [BindingSlot; 3] = [
    BindingSlot::new(TRANSFORM_GROUP, 0, ResourceKind::UniformBuffer, ShaderStage::Vertex),
    BindingSlot::new(TEXTURE_GROUP, 0, ResourceKind::Texture2d, ShaderStage::Fragment),
    BindingSlot::new(TEXTURE_GROUP, 1, ResourceKind::Sampler, ShaderStage::Fragment),
];

/// Layout entries for `group`, in binding order.
pub fn layout_entries(slots: &[BindingSlot], group: u32) -> Vec<wgpu::BindGroupLayoutEntry> {
    let mut in_group: Vec<&BindingSlot> = slots.iter().filter(|s| s.group == group).collect();
    in_group.sort_by_key(|s| s.binding);
    in_group.into_iter().map(BindingSlot::layout_entry).collect()
}

/// Rejection reasons for a binding table.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum BindingLayoutError {
    #[error("binding ({group}, {binding}) is declared more than once")]
    DuplicateSlot { group: u32, binding: u32 },

    #[error(
        "texture group holds {found:?} at binding {binding}; \
         only the texture + sampler pair may live there"
    )]
    TextureGroupPolluted { binding: u32, found: ResourceKind },

    #[error("{kind:?} at ({group}, {binding}) must be visible to {expected:?}, not {found:?}")]
    WrongStage {
        group: u32,
        binding: u32,
        kind: ResourceKind,
        expected: ShaderStage,
        found: ShaderStage,
    },

    #[error("missing {kind:?} at ({group}, {binding})")]
    MissingSlot { group: u32, binding: u32, kind: ResourceKind },
}

/// Checks a binding table against the sprite contract.
///
/// Every slot of [`SPRITE_BINDINGS`] must be present with the same kind and
/// stage, group 1 must hold nothing else, and no slot may repeat. Extra
/// resources in other groups are accepted.
pub fn validate_bindings(slots: &[BindingSlot]) -> Result<(), BindingLayoutError> {
    for (i, slot) in slots.iter().enumerate() {
        if slots[..i].iter().any(|s| s.group == slot.group && s.binding == slot.binding) {
            return Err(BindingLayoutError::DuplicateSlot {
                group: slot.group,
                binding: slot.binding,
            });
        }
    }

    for slot in slots.iter().filter(|s| s.group == TEXTURE_GROUP) {
        let expected = SPRITE_BINDINGS
            .iter()
            .find(|e| e.group == TEXTURE_GROUP && e.binding == slot.binding);
        match expected {
            Some(e) if e.kind == slot.kind => {}
            _ => {
                return Err(BindingLayoutError::TextureGroupPolluted {
                    binding: slot.binding,
                    found: slot.kind,
                });
            }
        }
    }

    for expected in &SPRITE_BINDINGS {
        let found = slots.iter().find(|s| {
            s.group == expected.group && s.binding == expected.binding && s.kind == expected.kind
        });
        let Some(found) = found else {
            return Err(BindingLayoutError::MissingSlot {
                group: expected.group,
                binding: expected.binding,
                kind: expected.kind,
            });
        };
        if found.stage != expected.stage {
            return Err(BindingLayoutError::WrongStage {
                group: expected.group,
                binding: expected.binding,
                kind: expected.kind,
                expected: expected.stage,
                found: found.stage,
            });
        }
    }

    Ok(())
}

/// Shape of a pipeline as seen by its resource bindings.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PipelineShape {
    /// Some group holds exactly one texture at binding 0 and one sampler at
    /// binding 1; the payload is that group's index.
    SingleTexture { group: u32 },
    /// No textures or samplers at all.
    Untextured,
    /// Anything else (multiple textures, loose samplers, ...).
    Other,
}

/// True iff `group` contains exactly a texture at binding 0 and a sampler at
/// binding 1.
pub fn is_single_texture_group(slots: &[BindingSlot], group: u32) -> bool {
    let mut in_group = slots.iter().filter(|s| s.group == group);
    let (Some(a), Some(b), None) = (in_group.next(), in_group.next(), in_group.next()) else {
        return false;
    };
    let (tex, smp) = if a.binding == 0 { (a, b) } else { (b, a) };
    tex.binding == 0
        && tex.kind == ResourceKind::Texture2d
        && smp.binding == 1
        && smp.kind == ResourceKind::Sampler
}

/// Classifies a binding table structurally, without looking at names.
pub fn classify(slots: &[BindingSlot]) -> PipelineShape {
    let textured: Vec<&BindingSlot> = slots
        .iter()
        .filter(|s| matches!(s.kind, ResourceKind::Texture2d | ResourceKind::Sampler))
        .collect();

    let Some(first) = textured.first() else {
        return PipelineShape::Untextured;
    };

    let group = first.group;
    if textured.len() == 2
        && textured.iter().all(|s| s.group == group)
        && is_single_texture_group(slots, group)
    {
        PipelineShape::SingleTexture { group }
    } else {
        PipelineShape::Other
    }
}
