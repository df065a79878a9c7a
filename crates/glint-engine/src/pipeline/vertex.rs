use bytemuck::{Pod, Zeroable};

/// Per-vertex input: location 0 = position, location 1 = texture coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl SpriteVertex {
    pub const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x2  // tex_coords
    ];

    #[inline]
    pub const fn new(position: [f32; 2], tex_coords: [f32; 2]) -> Self {
        Self { position, tex_coords }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit quad as two triangles, `[0, 1]²` in both position and texture space.
///
/// With a +Y-up camera, `(0, 0)` is the bottom-left corner.
pub const UNIT_QUAD: [SpriteVertex; 6] = [
    SpriteVertex::new([0.0, 1.0], [0.0, 1.0]), // top left
    SpriteVertex::new([1.0, 1.0], [1.0, 1.0]), // top right
    SpriteVertex::new([0.0, 0.0], [0.0, 0.0]), // bottom left
    SpriteVertex::new([0.0, 0.0], [0.0, 0.0]), // bottom left
    SpriteVertex::new([1.0, 0.0], [1.0, 0.0]), // bottom right
    SpriteVertex::new([1.0, 1.0], [1.0, 1.0]), // top right
];

/// Vertex-stage output.
///
/// `clip_position` goes to the rasterizer; `tex_coords` is interpolated and
/// becomes the fragment stage's input.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct VertexOutput {
    pub clip_position: [f32; 4],
    pub tex_coords: [f32; 2],
}

/// Fragment-stage input: interpolated texture coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FragmentInput {
    pub tex_coords: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_binding_contract() {
        let layout = SpriteVertex::layout();
        assert_eq!(layout.array_stride, 16);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);

        let [pos, uv] = SpriteVertex::ATTRS;
        assert_eq!((pos.shader_location, pos.offset), (0, 0));
        assert_eq!((uv.shader_location, uv.offset), (1, 8));
        assert_eq!(pos.format, wgpu::VertexFormat::Float32x2);
        assert_eq!(uv.format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn unit_quad_maps_position_to_tex_coords() {
        for v in UNIT_QUAD {
            assert_eq!(v.position, v.tex_coords);
        }
    }

    #[test]
    fn unit_quad_covers_all_corners() {
        for corner in [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]] {
            assert!(UNIT_QUAD.iter().any(|v| v.position == corner));
        }
    }
}
