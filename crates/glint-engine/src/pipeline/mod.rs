//! The sprite pipeline: a vertex stage and a fragment stage.
//!
//! ```text
//!  SpriteVertex ──vs_main──▶ VertexOutput ──(rasterizer)──▶ FragmentInput ──fs_main──▶ RGBA
//!        ▲                      ▲                                              ▲
//!        │          projection (g0 b0), model (g1 b0)            texture (g1 b1), sampler (g1 b2)
//! ```
//!
//! The GPU implementation is `shaders/sprite.wgsl`. `stage` holds a CPU
//! reference with the same semantics, used to pin down behavior in tests and
//! available to hosts that need to transform or pick geometry on the CPU.
//!
//! Matrix convention: column-major storage, column vectors, no transposition
//! (see `uniforms`).

pub mod bindings;
mod sampler;
mod stage;
mod uniforms;
mod vertex;

pub use sampler::{SamplerDesc, TexelImage};
pub use stage::{
    fragment_stage, homogeneous, interpolate, vertex_stage, vertex_stage_iter, FragmentBindings,
    VertexBindings,
};
pub use uniforms::{ModelUniform, ProjectionUniform};
pub use vertex::{FragmentInput, SpriteVertex, VertexOutput, UNIT_QUAD};

/// WGSL source of both stages.
pub const SPRITE_WGSL: &str = include_str!("shaders/sprite.wgsl");

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

#[cfg(test)]
mod shader_tests {
    use super::*;

    fn module() -> naga::Module {
        naga::front::wgsl::parse_str(SPRITE_WGSL).expect("sprite.wgsl parses")
    }

    fn vec2_f32() -> naga::TypeInner {
        naga::TypeInner::Vector {
            size: naga::VectorSize::Bi,
            scalar: naga::Scalar::F32,
        }
    }

    #[test]
    fn shader_validates() {
        let module = module();
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .expect("sprite.wgsl validates");
    }

    #[test]
    fn entry_points() {
        let module = module();
        let find = |name: &str| {
            module
                .entry_points
                .iter()
                .find(|ep| ep.name == name)
                .map(|ep| ep.stage)
        };
        assert_eq!(find(VERTEX_ENTRY), Some(naga::ShaderStage::Vertex));
        assert_eq!(find(FRAGMENT_ENTRY), Some(naga::ShaderStage::Fragment));
    }

    #[test]
    fn resource_slots_match_bindings() {
        let module = module();
        let slot = |name: &str| {
            module
                .global_variables
                .iter()
                .find(|(_, gv)| gv.name.as_deref() == Some(name))
                .and_then(|(_, gv)| gv.binding.as_ref())
                .map(|b| (b.group, b.binding))
        };

        assert_eq!(
            slot("projection"),
            Some((bindings::CAMERA_GROUP, bindings::PROJECTION_BINDING))
        );
        assert_eq!(slot("model"), Some((bindings::SPRITE_GROUP, bindings::MODEL_BINDING)));
        assert_eq!(
            slot("sprite_texture"),
            Some((bindings::SPRITE_GROUP, bindings::TEXTURE_BINDING))
        );
        assert_eq!(
            slot("sprite_sampler"),
            Some((bindings::SPRITE_GROUP, bindings::SAMPLER_BINDING))
        );
    }

    #[test]
    fn vertex_inputs_are_two_vec2_locations() {
        let module = module();
        let vs = module
            .entry_points
            .iter()
            .find(|ep| ep.name == VERTEX_ENTRY)
            .expect("vertex entry point");

        let arg = &vs.function.arguments[0];
        let naga::TypeInner::Struct { members, .. } = &module.types[arg.ty].inner else {
            panic!("vertex input is not a struct");
        };

        let mut locations: Vec<u32> = Vec::new();
        for m in members {
            let Some(naga::Binding::Location { location, .. }) = &m.binding else {
                panic!("unexpected binding on {:?}", m.name);
            };
            assert_eq!(module.types[m.ty].inner, vec2_f32());
            locations.push(*location);
        }
        assert_eq!(locations, vec![0, 1]);
    }

    #[test]
    fn fragment_writes_attachment_zero() {
        let module = module();
        let fs = module
            .entry_points
            .iter()
            .find(|ep| ep.name == FRAGMENT_ENTRY)
            .expect("fragment entry point");

        let result = fs.function.result.as_ref().expect("fragment result");
        assert!(matches!(
            result.binding,
            Some(naga::Binding::Location { location: 0, .. })
        ));
    }
}
