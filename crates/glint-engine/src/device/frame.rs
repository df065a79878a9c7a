/// A single acquired surface frame.
///
/// Short-lived: the surface cannot hand out another texture until this one is
/// submitted and dropped.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
