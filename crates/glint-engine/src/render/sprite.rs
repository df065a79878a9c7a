use nalgebra_glm as glm;
use wgpu::util::DeviceExt;

use crate::pipeline::bindings::{MODEL_BINDING, SAMPLER_BINDING, TEXTURE_BINDING};
use crate::pipeline::ModelUniform;

use super::texture::Texture;

/// Placement of a sprite: `model = T(position) · R(rotation) · S(size)`.
///
/// The unit quad's `(0, 0)` corner is the pivot for rotation and scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpriteTransform {
    pub position: glm::Vec2,
    pub size: glm::Vec2,
    /// Counter-clockwise, radians.
    pub rotation: f32,
}

impl SpriteTransform {
    pub fn new(position: glm::Vec2, size: glm::Vec2) -> Self {
        Self { position, size, rotation: 0.0 }
    }

    pub fn matrix(&self) -> glm::Mat4 {
        let t = glm::translation(&glm::vec3(self.position.x, self.position.y, 0.0));
        let r = glm::rotation(self.rotation, &glm::Vec3::z());
        let s = glm::scaling(&glm::vec3(self.size.x, self.size.y, 1.0));
        t * r * s
    }

    /// Moves by `delta` in the sprite's own frame (rotated, scaled units).
    ///
    /// Equivalent to post-multiplying the model matrix by `T(delta)`.
    pub fn translate_local(&mut self, delta: glm::Vec2) {
        let scaled = glm::vec2(delta.x * self.size.x, delta.y * self.size.y);
        let rotated = glm::rotate_vec2(&scaled, self.rotation);
        self.position += rotated;
    }
}

/// A textured quad (or mesh) instance: owns its model uniform and the group 1
/// bind group combining model, texture and sampler.
pub struct Sprite {
    transform: SpriteTransform,
    model_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Sprite {
    /// `layout` is the renderer's sprite layout (`SpriteRenderer::sprite_layout`).
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        texture: &Texture,
        sampler: &wgpu::Sampler,
        transform: SpriteTransform,
    ) -> Self {
        let model = ModelUniform::from_mat4(&transform.matrix());

        let model_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint sprite model ubo"),
            contents: bytemuck::bytes_of(&model),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint sprite bind group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: MODEL_BINDING,
                    resource: model_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(texture.view()),
                },
                wgpu::BindGroupEntry {
                    binding: SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Self { transform, model_ubo, bind_group }
    }

    #[inline]
    pub fn transform(&self) -> &SpriteTransform {
        &self.transform
    }

    #[inline]
    pub fn model(&self) -> ModelUniform {
        ModelUniform::from_mat4(&self.transform.matrix())
    }

    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// See [`SpriteTransform::translate_local`].
    pub fn move_by(&mut self, queue: &wgpu::Queue, delta: glm::Vec2) {
        self.transform.translate_local(delta);
        self.upload(queue);
    }

    pub fn set_position(&mut self, queue: &wgpu::Queue, position: glm::Vec2) {
        self.transform.position = position;
        self.upload(queue);
    }

    pub fn set_size(&mut self, queue: &wgpu::Queue, size: glm::Vec2) {
        self.transform.size = size;
        self.upload(queue);
    }

    pub fn set_rotation(&mut self, queue: &wgpu::Queue, radians: f32) {
        self.transform.rotation = radians;
        self.upload(queue);
    }

    fn upload(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.model_ubo, 0, bytemuck::bytes_of(&self.model()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mat_close(a: &glm::Mat4, b: &glm::Mat4) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-4, "\n{a}\n!=\n{b}");
        }
    }

    #[test]
    fn matrix_is_translate_then_scale() {
        let t = SpriteTransform::new(glm::vec2(30.0, 30.0), glm::vec2(13.0, 8.0));
        let expected = glm::scale(
            &glm::translate(&glm::Mat4::identity(), &glm::vec3(30.0, 30.0, 0.0)),
            &glm::vec3(13.0, 8.0, 1.0),
        );
        assert_mat_close(&t.matrix(), &expected);
    }

    #[test]
    fn unit_quad_corners_land_on_sprite_rect() {
        let t = SpriteTransform::new(glm::vec2(30.0, 30.0), glm::vec2(13.0, 8.0));
        let far = t.matrix() * glm::vec4(1.0, 1.0, 0.0, 1.0);
        assert!((far.x - 43.0).abs() < 1e-4 && (far.y - 38.0).abs() < 1e-4, "{far}");
    }

    #[test]
    fn translate_local_matches_post_multiplied_translation() {
        let mut t = SpriteTransform::new(glm::vec2(30.0, 30.0), glm::vec2(13.0, 8.0));
        t.rotation = 0.4;
        let delta = glm::vec2(0.08, -0.5);

        let expected = t.matrix() * glm::translation(&glm::vec3(delta.x, delta.y, 0.0));
        t.translate_local(delta);
        assert_mat_close(&t.matrix(), &expected);
    }

    #[test]
    fn translate_local_scales_by_size() {
        let mut t = SpriteTransform::new(glm::vec2(0.0, 0.0), glm::vec2(10.0, 4.0));
        t.translate_local(glm::vec2(1.0, 1.0));
        assert_eq!(t.position, glm::vec2(10.0, 4.0));
    }

    #[test]
    fn rotation_is_about_the_origin_corner() {
        let mut t = SpriteTransform::new(glm::vec2(5.0, 5.0), glm::vec2(2.0, 2.0));
        t.rotation = std::f32::consts::FRAC_PI_2;
        let origin = t.matrix() * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert!((origin.x - 5.0).abs() < 1e-5 && (origin.y - 5.0).abs() < 1e-5);
        let x_axis = t.matrix() * glm::vec4(1.0, 0.0, 0.0, 1.0);
        assert!((x_axis.x - 5.0).abs() < 1e-5 && (x_axis.y - 7.0).abs() < 1e-5);
    }
}
