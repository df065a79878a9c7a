use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use crate::pipeline::bindings::{self, CAMERA_GROUP, SPRITE_GROUP};
use crate::pipeline::{SpriteVertex, FRAGMENT_ENTRY, SPRITE_WGSL, UNIT_QUAD, VERTEX_ENTRY};
use crate::render::{RenderCtx, RenderTarget};

use super::camera::{Camera, CameraBinding};
use super::sprite::Sprite;

/// Fixed-function state around the two shader stages.
#[derive(Debug, Clone)]
pub struct SpritePipelineConfig {
    /// Output-merger blend for color attachment 0. `None` overwrites.
    pub blend: Option<wgpu::BlendState>,
    pub topology: wgpu::PrimitiveTopology,
    /// Attachment load op. `Load` keeps what `FrameCtx::render` cleared.
    pub load: wgpu::LoadOp<wgpu::Color>,
}

impl Default for SpritePipelineConfig {
    fn default() -> Self {
        Self {
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            topology: wgpu::PrimitiveTopology::TriangleList,
            load: wgpu::LoadOp::Load,
        }
    }
}

/// A vertex buffer of `SpriteVertex`.
pub struct Mesh {
    vbo: wgpu::Buffer,
    vertex_count: u32,
}

impl Mesh {
    /// Fails when the vertex count does not fit a `u32` draw range.
    pub fn new(device: &wgpu::Device, vertices: &[SpriteVertex], label: Option<&str>) -> Result<Self> {
        let vertex_count = draw_count(vertices.len())?;
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label,
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Ok(Self { vbo, vertex_count })
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

/// Draws sprites with the model/projection + sampled-texture pipeline.
///
/// Bind group layouts, the unit quad and the camera binding are created
/// up front; the pipeline itself is (re)built lazily for the surface format.
pub struct SpriteRenderer {
    config: SpritePipelineConfig,

    camera_layout: wgpu::BindGroupLayout,
    sprite_layout: wgpu::BindGroupLayout,
    camera: CameraBinding,
    quad: Mesh,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
}

impl SpriteRenderer {
    pub fn new(device: &wgpu::Device, config: SpritePipelineConfig) -> Result<Self> {
        let camera_layout = bindings::create_camera_layout(device);
        let sprite_layout = bindings::create_sprite_layout(device);
        let camera = CameraBinding::new(device, &camera_layout, &Camera::pixels(1.0, 1.0));
        let quad = Mesh::new(device, &UNIT_QUAD, Some("glint unit quad vbo"))?;

        Ok(Self {
            config,
            camera_layout,
            sprite_layout,
            camera,
            quad,
            pipeline_format: None,
            pipeline: None,
        })
    }

    /// Layout sprites must be created against (group 1).
    #[inline]
    pub fn sprite_layout(&self) -> &wgpu::BindGroupLayout {
        &self.sprite_layout
    }

    /// Draws each sprite as the unit quad.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &Camera,
        sprites: &[&Sprite],
    ) {
        self.prepare(ctx, camera);
        self.draw(target, &self.quad, sprites);
    }

    /// Draws `mesh` once per sprite.
    pub fn render_mesh(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &Camera,
        mesh: &Mesh,
        sprites: &[&Sprite],
    ) {
        self.prepare(ctx, camera);
        self.draw(target, mesh, sprites);
    }

    fn prepare(&mut self, ctx: &RenderCtx<'_>, camera: &Camera) {
        self.ensure_pipeline(ctx);
        self.camera.update(ctx.queue, camera);
    }

    /// Group 0 is bound once per pass; only group 1 changes between sprites.
    fn draw(&self, target: &mut RenderTarget<'_>, mesh: &Mesh, sprites: &[&Sprite]) {
        if sprites.is_empty() || mesh.vertex_count == 0 {
            return;
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glint sprite pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: self.config.load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
        rpass.set_bind_group(CAMERA_GROUP, self.camera.bind_group(), &[]);

        for sprite in sprites {
            rpass.set_bind_group(SPRITE_GROUP, sprite.bind_group(), &[]);
            rpass.draw(0..mesh.vertex_count, 0..1);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glint sprite shader"),
            source: wgpu::ShaderSource::Wgsl(SPRITE_WGSL.into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glint sprite pipeline layout"),
            // Index order is the group number.
            bind_group_layouts: &[&self.camera_layout, &self.sprite_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glint sprite pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[SpriteVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: self.config.blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: self.config.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("sprite pipeline built for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }
}

fn draw_count(len: usize) -> Result<u32> {
    u32::try_from(len).with_context(|| format!("mesh has {len} vertices, more than a draw can address"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_quad_count_fits() {
        assert_eq!(draw_count(UNIT_QUAD.len()).unwrap(), 6);
        assert_eq!(draw_count(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[test]
    fn oversized_mesh_is_rejected() {
        #[cfg(target_pointer_width = "64")]
        assert!(draw_count(u32::MAX as usize + 1).is_err());
    }

    #[test]
    fn default_config_blends_over_cleared_frame() {
        let c = SpritePipelineConfig::default();
        assert_eq!(c.blend, Some(wgpu::BlendState::ALPHA_BLENDING));
        assert_eq!(c.topology, wgpu::PrimitiveTopology::TriangleList);
        assert!(matches!(c.load, wgpu::LoadOp::Load));
    }
}
