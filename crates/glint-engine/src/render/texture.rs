use std::path::Path;

use anyhow::{ensure, Context, Result};
use wgpu::util::DeviceExt;

use crate::coords::ColorRgba;
use crate::pipeline::TexelImage;

/// How 8-bit texel values are decoded when sampled.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ColorSpace {
    /// `Rgba8UnormSrgb`: the sampler returns linear values.
    #[default]
    Srgb,
    /// `Rgba8Unorm`: the sampler returns the stored values.
    Linear,
}

impl ColorSpace {
    #[inline]
    pub fn format(self) -> wgpu::TextureFormat {
        match self {
            ColorSpace::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            ColorSpace::Linear => wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

/// A sampled 2D texture and its default view.
pub struct Texture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl Texture {
    /// Uploads tightly packed RGBA8 rows, row 0 first (`v = 0`).
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        texels: &[u8],
        space: ColorSpace,
        label: Option<&str>,
    ) -> Result<Self> {
        ensure!(width > 0 && height > 0, "texture has zero size ({width}x{height})");
        let expected = width as usize * height as usize * 4;
        ensure!(
            texels.len() == expected,
            "texture data is {} bytes, expected {expected} for {width}x{height} rgba8",
            texels.len()
        );

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label,
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: space.format(),
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            texels,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        log::debug!("uploaded {width}x{height} texture {label:?} ({space:?})");

        Ok(Self { texture, view, width, height })
    }

    /// Uploads a decoded image, bottom row at `v = 0`.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &image::DynamicImage,
        space: ColorSpace,
        label: Option<&str>,
    ) -> Result<Self> {
        let rgba = bottom_up_rgba8(image);
        Self::from_rgba8(device, queue, rgba.width(), rgba.height(), rgba.as_raw(), space, label)
    }

    /// Decodes an image file (PNG, JPEG, BMP) and uploads it.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        space: ColorSpace,
    ) -> Result<Self> {
        let path = path.as_ref();
        let image = decode_file(path)?;
        let label = path.display().to_string();
        Self::from_image(device, queue, &image, space, Some(&label))
    }

    /// A 1×1 texture of a single color.
    pub fn solid(device: &wgpu::Device, queue: &wgpu::Queue, color: ColorRgba) -> Result<Self> {
        Self::from_rgba8(
            device,
            queue,
            1,
            1,
            &color.to_rgba8(),
            ColorSpace::Linear,
            Some("glint solid texture"),
        )
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn decode_file(path: &Path) -> Result<image::DynamicImage> {
    image::ImageReader::open(path)
        .with_context(|| format!("failed to open image {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("failed to read image {}", path.display()))?
        .decode()
        .with_context(|| format!("failed to decode image {}", path.display()))
}

/// RGBA8 copy of `image` with its rows flipped so the bottom row comes first.
pub fn bottom_up_rgba8(image: &image::DynamicImage) -> image::RgbaImage {
    image.flipv().to_rgba8()
}

/// CPU copy of `image` with the same texel layout `Texture::from_image` uploads.
///
/// Values are the stored 8-bit values (no sRGB decode), as a `ColorSpace::Linear`
/// texture would return them.
pub fn texel_image(image: &image::DynamicImage) -> Result<TexelImage> {
    let rgba = bottom_up_rgba8(image);
    TexelImage::from_rgba8(rgba.width(), rgba.height(), rgba.as_raw())
}
