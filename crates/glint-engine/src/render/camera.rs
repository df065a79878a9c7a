use nalgebra_glm as glm;
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::pipeline::bindings::PROJECTION_BINDING;
use crate::pipeline::ProjectionUniform;

/// Camera-to-clip mapping.
///
/// Both variants target wgpu's clip volume (`z` in `[0, 1]`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
    /// Looks down −Z at the Z = 0 plane from `eye_distance`.
    Perspective {
        /// Vertical field of view, radians.
        fovy: f32,
        aspect: f32,
        near: f32,
        far: f32,
        eye_distance: f32,
    },
}

/// A 2D camera: a projection plus a pan offset in world units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub projection: Projection,
    pub pan: glm::Vec2,
}

impl Camera {
    /// Orthographic camera over `[0, width] × [0, height]`, origin bottom-left.
    pub fn pixels(width: f32, height: f32) -> Self {
        Self::orthographic(0.0, width, 0.0, height)
    }

    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            projection: Projection::Orthographic {
                left,
                right,
                bottom,
                top,
                near: -1.0,
                far: 1.0,
            },
            pan: glm::Vec2::zeros(),
        }
    }

    pub fn perspective(fovy: f32, aspect: f32, eye_distance: f32) -> Self {
        Self {
            projection: Projection::Perspective {
                fovy,
                aspect,
                near: 0.1,
                far: eye_distance * 2.0 + 1.0,
                eye_distance,
            },
            pan: glm::Vec2::zeros(),
        }
    }

    /// Keeps a perspective camera's aspect ratio in sync with the drawable.
    ///
    /// Orthographic bounds are left untouched.
    pub fn fit_viewport(&mut self, viewport: Viewport) {
        if let Projection::Perspective { aspect, .. } = &mut self.projection {
            *aspect = viewport.aspect();
        }
    }

    pub fn matrix(&self) -> glm::Mat4 {
        match self.projection {
            Projection::Orthographic { left, right, bottom, top, near, far } => {
                glm::ortho_rh_zo(left, right, bottom, top, near, far)
                    * glm::translation(&glm::vec3(-self.pan.x, -self.pan.y, 0.0))
            }
            Projection::Perspective { fovy, aspect, near, far, eye_distance } => {
                glm::perspective_rh_zo(aspect, fovy, near, far)
                    * glm::translation(&glm::vec3(-self.pan.x, -self.pan.y, -eye_distance))
            }
        }
    }

    #[inline]
    pub fn uniform(&self) -> ProjectionUniform {
        ProjectionUniform::from_mat4(&self.matrix())
    }
}

/// GPU side of the camera: the group 0 uniform buffer and bind group.
///
/// The buffer is only rewritten when the projection actually changes.
pub struct CameraBinding {
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    current: ProjectionUniform,
}

impl CameraBinding {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, camera: &Camera) -> Self {
        let current = camera.uniform();

        let ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glint projection ubo"),
            contents: bytemuck::bytes_of(&current),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint camera bind group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: PROJECTION_BINDING,
                resource: ubo.as_entire_binding(),
            }],
        });

        Self { ubo, bind_group, current }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, camera: &Camera) {
        let next = camera.uniform();
        if next == self.current {
            return;
        }
        queue.write_buffer(&self.ubo, 0, bytemuck::bytes_of(&next));
        self.current = next;
    }

    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(camera: &Camera, x: f32, y: f32) -> glm::Vec4 {
        camera.matrix() * glm::vec4(x, y, 0.0, 1.0)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn pixels_maps_corners_to_ndc() {
        let cam = Camera::pixels(229.0, 190.0);

        let bl = project(&cam, 0.0, 0.0);
        assert!(approx(bl.x, -1.0) && approx(bl.y, -1.0) && approx(bl.w, 1.0));

        let tr = project(&cam, 229.0, 190.0);
        assert!(approx(tr.x, 1.0) && approx(tr.y, 1.0));
    }

    #[test]
    fn ortho_depth_of_sprite_plane_is_inside_clip_volume() {
        let z = project(&Camera::pixels(100.0, 100.0), 50.0, 50.0).z;
        assert!((0.0..=1.0).contains(&z), "z = {z}");
    }

    #[test]
    fn pan_shifts_the_view() {
        let mut cam = Camera::pixels(100.0, 100.0);
        cam.pan = glm::vec2(50.0, 0.0);
        let p = project(&cam, 50.0, 0.0);
        assert!(approx(p.x, -1.0));
    }

    #[test]
    fn perspective_centers_the_pan_point() {
        let mut cam = Camera::perspective(std::f32::consts::FRAC_PI_2, 1.0, 10.0);
        cam.pan = glm::vec2(3.0, -2.0);
        let p = project(&cam, 3.0, -2.0);
        assert!(approx(p.x / p.w, 0.0) && approx(p.y / p.w, 0.0));
        assert!(approx(p.w, 10.0));
        let depth = p.z / p.w;
        assert!((0.0..=1.0).contains(&depth), "depth = {depth}");
    }

    #[test]
    fn perspective_edge_of_frustum() {
        // fovy 90°, aspect 1, distance 10 → the plane spans [-10, 10].
        let cam = Camera::perspective(std::f32::consts::FRAC_PI_2, 1.0, 10.0);
        let p = project(&cam, 10.0, 10.0);
        assert!(approx(p.x / p.w, 1.0) && approx(p.y / p.w, 1.0));
    }

    #[test]
    fn fit_viewport_updates_perspective_aspect_only() {
        let mut persp = Camera::perspective(1.0, 1.0, 5.0);
        persp.fit_viewport(Viewport::new(1600.0, 900.0));
        let Projection::Perspective { aspect, .. } = persp.projection else {
            panic!("projection variant changed");
        };
        assert!(approx(aspect, 16.0 / 9.0));

        let mut ortho = Camera::pixels(229.0, 190.0);
        let before = ortho;
        ortho.fit_viewport(Viewport::new(1600.0, 900.0));
        assert_eq!(ortho, before);
    }
}
