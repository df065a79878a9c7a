/// Linear RGBA color, the value produced by the fragment stage.
///
/// Components are straight (not premultiplied) alpha, in the numeric range the
/// texture format decodes to. For `Rgba8Unorm*` textures that range is `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Decodes an 8-bit unorm texel (`value / 255`).
    #[inline]
    pub fn from_rgba8(texel: [u8; 4]) -> Self {
        let [r, g, b, a] = texel;
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Encodes to 8-bit unorm, rounding to nearest and clamping to `[0, 255]`.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Component-wise `self + (other - self) * t`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl From<ColorRgba> for wgpu::Color {
    fn from(c: ColorRgba) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_endpoints_are_exact() {
        assert_eq!(ColorRgba::from_rgba8([255, 0, 0, 255]), ColorRgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(ColorRgba::from_rgba8([0, 0, 0, 0]), ColorRgba::transparent());
    }

    #[test]
    fn to_rgba8_clamps_out_of_range() {
        assert_eq!(ColorRgba::new(-0.5, 2.0, 0.5, 1.0).to_rgba8(), [0, 255, 128, 255]);
    }

    #[test]
    fn lerp_midpoint() {
        let c = ColorRgba::black().lerp(ColorRgba::white(), 0.5);
        assert_eq!(c, ColorRgba::new(0.5, 0.5, 0.5, 1.0));
    }
}
