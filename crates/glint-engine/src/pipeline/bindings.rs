//! Bind group contract shared by the shader and the host.
//!
//! | group | binding | resource                | rebind cadence |
//! |-------|---------|-------------------------|----------------|
//! | 0     | 0       | projection `mat4x4<f32>`| per frame      |
//! | 1     | 0       | model `mat4x4<f32>`     | per sprite     |
//! | 1     | 1       | `texture_2d<f32>`       | per sprite     |
//! | 1     | 2       | filtering `sampler`     | per sprite     |
//!
//! The projection lives alone in group 0 so a render pass binds the camera once
//! and only swaps group 1 between sprites.

use std::num::NonZeroU64;

use super::uniforms::{ModelUniform, ProjectionUniform};

pub const CAMERA_GROUP: u32 = 0;
pub const PROJECTION_BINDING: u32 = 0;

pub const SPRITE_GROUP: u32 = 1;
pub const MODEL_BINDING: u32 = 0;
pub const TEXTURE_BINDING: u32 = 1;
pub const SAMPLER_BINDING: u32 = 2;

fn matrix_uniform_entry(binding: u32, size: usize) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(size as u64),
        },
        count: None,
    }
}

/// Layout entries for group 0 (camera).
pub fn camera_layout_entries() -> [wgpu::BindGroupLayoutEntry; 1] {
    [matrix_uniform_entry(
        PROJECTION_BINDING,
        std::mem::size_of::<ProjectionUniform>(),
    )]
}

/// Layout entries for group 1 (per-sprite model, texture, sampler).
pub fn sprite_layout_entries() -> [wgpu::BindGroupLayoutEntry; 3] {
    [
        matrix_uniform_entry(MODEL_BINDING, std::mem::size_of::<ModelUniform>()),
        wgpu::BindGroupLayoutEntry {
            binding: TEXTURE_BINDING,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        },
        wgpu::BindGroupLayoutEntry {
            binding: SAMPLER_BINDING,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        },
    ]
}

pub fn create_camera_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("glint camera bgl"),
        entries: &camera_layout_entries(),
    })
}

pub fn create_sprite_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("glint sprite bgl"),
        entries: &sprite_layout_entries(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_group_holds_only_the_projection() {
        let entries = camera_layout_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].binding, PROJECTION_BINDING);
        assert_eq!(entries[0].visibility, wgpu::ShaderStages::VERTEX);
    }

    #[test]
    fn sprite_group_slots() {
        let entries = sprite_layout_entries();
        let slots: Vec<u32> = entries.iter().map(|e| e.binding).collect();
        assert_eq!(slots, vec![MODEL_BINDING, TEXTURE_BINDING, SAMPLER_BINDING]);
        assert_eq!(slots, vec![0, 1, 2]);

        assert_eq!(entries[0].visibility, wgpu::ShaderStages::VERTEX);
        assert_eq!(entries[1].visibility, wgpu::ShaderStages::FRAGMENT);
        assert_eq!(entries[2].visibility, wgpu::ShaderStages::FRAGMENT);

        assert!(matches!(
            entries[2].ty,
            wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering)
        ));
    }

    #[test]
    fn matrix_bindings_are_64_bytes() {
        for entry in camera_layout_entries().iter().chain(&sprite_layout_entries()[..1]) {
            let wgpu::BindingType::Buffer { min_binding_size, .. } = entry.ty else {
                panic!("expected a buffer binding");
            };
            assert_eq!(min_binding_size.map(NonZeroU64::get), Some(64));
        }
    }

    #[test]
    fn groups_are_distinct() {
        assert_eq!(CAMERA_GROUP, 0);
        assert_eq!(SPRITE_GROUP, 1);
    }
}
