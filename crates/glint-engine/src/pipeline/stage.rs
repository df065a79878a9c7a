//! CPU reference of the two shader stages.
//!
//! Each stage is a pure function of its per-invocation input and a set of
//! shared, read-only bindings. Nothing here allocates, blocks or keeps state,
//! so invocations may run in any order or in parallel.

use nalgebra_glm as glm;

use crate::coords::ColorRgba;

use super::sampler::{SamplerDesc, TexelImage};
use super::uniforms::{ModelUniform, ProjectionUniform};
use super::vertex::{FragmentInput, SpriteVertex, VertexOutput};

/// Read-only resources visible to the vertex stage.
#[derive(Debug, Copy, Clone)]
pub struct VertexBindings<'a> {
    pub projection: &'a ProjectionUniform,
    pub model: &'a ModelUniform,
}

/// Read-only resources visible to the fragment stage.
#[derive(Debug, Copy, Clone)]
pub struct FragmentBindings<'a> {
    pub texture: &'a TexelImage,
    pub sampler: &'a SamplerDesc,
}

/// Lifts a 2D position onto the Z = 0 plane as an affine point (W = 1).
#[inline]
pub fn homogeneous(position: [f32; 2]) -> glm::Vec4 {
    glm::vec4(position[0], position[1], 0.0, 1.0)
}

/// `clip = projection × (model × point)`; texture coordinates pass through.
pub fn vertex_stage(vertex: &SpriteVertex, bindings: &VertexBindings<'_>) -> VertexOutput {
    let point = homogeneous(vertex.position);
    let world = bindings.model.matrix() * point;
    let clip = bindings.projection.matrix() * world;

    VertexOutput {
        clip_position: clip.into(),
        tex_coords: vertex.tex_coords,
    }
}

/// Runs the vertex stage over a vertex list, one output per input, in order.
pub fn vertex_stage_iter<'a>(
    vertices: &'a [SpriteVertex],
    bindings: VertexBindings<'a>,
) -> impl Iterator<Item = VertexOutput> + 'a {
    vertices.iter().map(move |v| vertex_stage(v, &bindings))
}

/// Returns the sampler's value at the interpolated coordinates, unmodified.
#[inline]
pub fn fragment_stage(input: &FragmentInput, bindings: &FragmentBindings<'_>) -> ColorRgba {
    bindings.sampler.sample(bindings.texture, input.tex_coords)
}

/// Interpolates a triangle's vertex outputs into a fragment input.
///
/// `weights` are the barycentric weights the rasterizer computed for the
/// fragment. They must be non-negative and sum to one, which makes the result
/// a convex combination of the three vertices' texture coordinates.
pub fn interpolate(triangle: [&VertexOutput; 3], weights: [f32; 3]) -> FragmentInput {
    debug_assert!(
        weights.iter().all(|w| *w >= 0.0) && (weights.iter().sum::<f32>() - 1.0).abs() < 1e-4,
        "interpolate: weights {weights:?} are not convex"
    );

    let mut tex_coords = [0.0f32; 2];
    for (vertex, w) in triangle.iter().zip(weights) {
        tex_coords[0] += vertex.tex_coords[0] * w;
        tex_coords[1] += vertex.tex_coords[1] * w;
    }
    FragmentInput { tex_coords }
}
