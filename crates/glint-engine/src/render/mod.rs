//! wgpu host for the sprite pipeline.
//!
//! Owns every GPU resource the pipeline binds: the camera uniform (group 0),
//! per-sprite model uniforms, textures and samplers (group 1), the vertex
//! buffers and the render pipeline itself.
//!
//! Convention:
//! - World space is +Y up; `Camera::pixels` puts the origin bottom-left.
//! - Texture `v = 0` is the bottom row of a loaded image.

pub mod camera;
mod ctx;
pub mod renderer;
pub mod sprite;
pub mod texture;

pub use camera::{Camera, CameraBinding, Projection};
pub use ctx::{RenderCtx, RenderTarget};
pub use renderer::{Mesh, SpritePipelineConfig, SpriteRenderer};
pub use sprite::{Sprite, SpriteTransform};
pub use texture::{ColorSpace, Texture};
