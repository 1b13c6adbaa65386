/// Straight-alpha RGBA color, components in `[0, 1]`.
///
/// Layers store straight alpha; premultiplication happens once, in the
/// rasterizer, when a color is blended into a pixmap.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha forced to 1.0.
    #[inline]
    pub const fn opaque(self) -> Self {
        self.with_alpha(1.0)
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps all channels to `[0, 1]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::rgba(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// Premultiplied RGBA with alpha scaled by `coverage`, as floats in `[0, 1]`.
    #[inline]
    pub fn premul(self, coverage: f32) -> [f32; 4] {
        let c = self.clamped();
        let a = c.a * coverage.clamp(0.0, 1.0);
        [c.r * a, c.g * a, c.b * a, a]
    }

    /// Premultiplied RGBA bytes.
    #[inline]
    pub fn to_premul_u8(self) -> [u8; 4] {
        let p = self.premul(1.0);
        [to_u8(p[0]), to_u8(p[1]), to_u8(p[2]), to_u8(p[3])]
    }
}

#[inline]
pub(crate) fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}
