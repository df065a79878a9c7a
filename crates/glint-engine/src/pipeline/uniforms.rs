//! Uniform payloads for the two transform bindings.
//!
//! Storage convention: column-major, four `vec4` columns, no transposition.
//! This is the layout of both `nalgebra_glm::Mat4` and WGSL `mat4x4<f32>`, so
//! a matrix uploads byte-for-byte and the shader multiplies `M * v` with `v`
//! as a column vector.
//!
//! `ProjectionUniform` and `ModelUniform` are written at different cadences
//! into different bind groups and are never pre-multiplied on the CPU.

use bytemuck::{Pod, Zeroable};
use nalgebra_glm as glm;

const IDENTITY_COLUMNS: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Camera-to-clip transform (group 0, binding 0).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ProjectionUniform {
    pub columns: [[f32; 4]; 4],
}

/// Object placement (group 1, binding 0).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ModelUniform {
    pub columns: [[f32; 4]; 4],
}

impl ProjectionUniform {
    pub const IDENTITY: Self = Self { columns: IDENTITY_COLUMNS };

    #[inline]
    pub fn from_mat4(m: &glm::Mat4) -> Self {
        Self { columns: (*m).into() }
    }

    #[inline]
    pub fn matrix(&self) -> glm::Mat4 {
        glm::Mat4::from(self.columns)
    }
}

impl ModelUniform {
    pub const IDENTITY: Self = Self { columns: IDENTITY_COLUMNS };

    #[inline]
    pub fn from_mat4(m: &glm::Mat4) -> Self {
        Self { columns: (*m).into() }
    }

    #[inline]
    pub fn matrix(&self) -> glm::Mat4 {
        glm::Mat4::from(self.columns)
    }
}

impl Default for ProjectionUniform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_matches_glm() {
        assert_eq!(ModelUniform::IDENTITY.matrix(), glm::Mat4::identity());
        assert_eq!(ProjectionUniform::IDENTITY.matrix(), glm::Mat4::identity());
    }

    #[test]
    fn translation_lands_in_fourth_column() {
        let m = glm::translation(&glm::vec3(2.0, 3.0, 4.0));
        let u = ModelUniform::from_mat4(&m);
        assert_eq!(u.columns[3], [2.0, 3.0, 4.0, 1.0]);
        assert_eq!(u.columns[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn byte_layout_is_column_major() {
        let m = glm::translation(&glm::vec3(7.0, 8.0, 9.0));
        let u = ProjectionUniform::from_mat4(&m);
        let floats: &[f32] = bytemuck::cast_slice(&u.columns);
        assert_eq!(floats.len(), 16);
        assert_eq!(&floats[12..16], &[7.0, 8.0, 9.0, 1.0]);
        assert_eq!(floats, m.as_slice());
    }
}
