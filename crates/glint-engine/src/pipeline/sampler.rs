//! Texture + sampler reference.
//!
//! `TexelImage` is a CPU copy of a 2D texture; `SamplerDesc` both describes the
//! GPU sampler (`to_wgpu`) and evaluates it on the CPU (`sample`) with WebGPU's
//! addressing and filtering rules, minus mipmapping and anisotropy.
//!
//! Texel `(x, y)` covers `[x / w, (x + 1) / w) × [y / h, (y + 1) / h)`; row 0 is
//! at `v = 0`.

use anyhow::{ensure, Result};

use crate::coords::ColorRgba;

/// A 2D grid of linear RGBA texels, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TexelImage {
    width: u32,
    height: u32,
    texels: Vec<ColorRgba>,
}

impl TexelImage {
    pub fn new(width: u32, height: u32, texels: Vec<ColorRgba>) -> Result<Self> {
        ensure!(width > 0 && height > 0, "texel image has zero size ({width}x{height})");
        ensure!(
            texels.len() == width as usize * height as usize,
            "texel count {} does not match {width}x{height}",
            texels.len()
        );
        Ok(Self { width, height, texels })
    }

    /// Builds an image from tightly packed `Rgba8Unorm` bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        ensure!(bytes.len() % 4 == 0, "rgba8 data length {} is not a multiple of 4", bytes.len());
        let texels = bytes
            .chunks_exact(4)
            .map(|px| ColorRgba::from_rgba8([px[0], px[1], px[2], px[3]]))
            .collect();
        Self::new(width, height, texels)
    }

    pub fn solid(width: u32, height: u32, color: ColorRgba) -> Result<Self> {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texel at integer coordinates. Panics when out of bounds.
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> ColorRgba {
        assert!(x < self.width && y < self.height, "texel ({x}, {y}) out of bounds");
        self.texels[(y * self.width + x) as usize]
    }
}

/// Sampler configuration.
///
/// A single `filter` drives both magnification and minification; mipmaps are
/// not sampled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplerDesc {
    pub address_mode_u: wgpu::AddressMode,
    pub address_mode_v: wgpu::AddressMode,
    pub filter: wgpu::FilterMode,
    /// Used by `AddressMode::ClampToBorder`; `None` reads transparent black.
    pub border_color: Option<wgpu::SamplerBorderColor>,
}

impl Default for SamplerDesc {
    /// Matches `wgpu::SamplerDescriptor::default()`: clamp to edge, nearest.
    fn default() -> Self {
        Self::nearest()
    }
}

impl SamplerDesc {
    /// Exact-address sampling: clamp to edge, nearest filter.
    pub const fn nearest() -> Self {
        Self {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            filter: wgpu::FilterMode::Nearest,
            border_color: None,
        }
    }

    /// Bilinear filtering, clamp to edge.
    pub const fn linear() -> Self {
        Self {
            filter: wgpu::FilterMode::Linear,
            ..Self::nearest()
        }
    }

    pub const fn with_address_mode(mut self, mode: wgpu::AddressMode) -> Self {
        self.address_mode_u = mode;
        self.address_mode_v = mode;
        self
    }

    pub const fn with_border_color(mut self, color: wgpu::SamplerBorderColor) -> Self {
        self.border_color = Some(color);
        self
    }

    /// GPU descriptor with the same addressing and filtering.
    pub fn to_wgpu<'a>(&self, label: Option<&'a str>) -> wgpu::SamplerDescriptor<'a> {
        wgpu::SamplerDescriptor {
            label,
            address_mode_u: self.address_mode_u,
            address_mode_v: self.address_mode_v,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: self.filter,
            min_filter: self.filter,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            border_color: self.border_color,
            ..Default::default()
        }
    }

    /// Samples `image` at normalized `uv`. Any finite or infinite `uv` is
    /// resolved by the address modes.
    pub fn sample(&self, image: &TexelImage, uv: [f32; 2]) -> ColorRgba {
        let (w, h) = (image.width() as f32, image.height() as f32);
        let [u, v] = uv;

        match self.filter {
            wgpu::FilterMode::Nearest => {
                let x = texel_space(u * w).floor() as i64;
                let y = texel_space(v * h).floor() as i64;
                self.fetch(image, x, y)
            }
            wgpu::FilterMode::Linear => {
                let fx = texel_space(u * w - 0.5);
                let fy = texel_space(v * h - 0.5);
                let x0 = fx.floor();
                let y0 = fy.floor();
                let tx = fx - x0;
                let ty = fy - y0;
                let (x0, y0) = (x0 as i64, y0 as i64);

                let top = self
                    .fetch(image, x0, y0)
                    .lerp(self.fetch(image, x0 + 1, y0), tx);
                let bottom = self
                    .fetch(image, x0, y0 + 1)
                    .lerp(self.fetch(image, x0 + 1, y0 + 1), tx);
                top.lerp(bottom, ty)
            }
        }
    }

    fn fetch(&self, image: &TexelImage, x: i64, y: i64) -> ColorRgba {
        let x = resolve_address(self.address_mode_u, x, image.width());
        let y = resolve_address(self.address_mode_v, y, image.height());
        match (x, y) {
            (Some(x), Some(y)) => image.texel(x, y),
            _ => self.border(),
        }
    }

    fn border(&self) -> ColorRgba {
        match self.border_color {
            Some(wgpu::SamplerBorderColor::OpaqueBlack) => ColorRgba::black(),
            Some(wgpu::SamplerBorderColor::OpaqueWhite) => ColorRgba::white(),
            Some(wgpu::SamplerBorderColor::TransparentBlack)
            | Some(wgpu::SamplerBorderColor::Zero)
            | None => ColorRgba::transparent(),
        }
    }
}

/// Bound on texel-space coordinates before they become integer indices.
///
/// f32 has no fractional bits left at this magnitude, and the neighbor index
/// `+ 1` stays far from `i64::MAX`.
const TEXEL_COORD_LIMIT: f32 = (1u32 << 24) as f32;

#[inline]
fn texel_space(t: f32) -> f32 {
    t.clamp(-TEXEL_COORD_LIMIT, TEXEL_COORD_LIMIT)
}

/// Maps an unbounded texel index into `[0, size)`; `None` means border.
fn resolve_address(mode: wgpu::AddressMode, i: i64, size: u32) -> Option<u32> {
    let n = size as i64;
    let resolved = match mode {
        wgpu::AddressMode::ClampToEdge => i.clamp(0, n - 1),
        wgpu::AddressMode::Repeat => i.rem_euclid(n),
        wgpu::AddressMode::MirrorRepeat => {
            let m = i.rem_euclid(2 * n);
            if m < n { m } else { 2 * n - 1 - m }
        }
        wgpu::AddressMode::ClampToBorder => {
            if !(0..n).contains(&i) {
                return None;
            }
            i
        }
    };
    Some(resolved as u32)
}
