/// Per-corner radii for a rounded rectangle (logical pixels).
///
/// Corners follow CSS convention: top-left, top-right, bottom-right, bottom-left.
/// Negative values are treated as zero.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    #[inline]
    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    /// Uniform radius on all four corners.
    #[inline]
    pub const fn all(r: f32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    /// No rounding.
    #[inline]
    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.top_left <= 0.0
            && self.top_right <= 0.0
            && self.bottom_right <= 0.0
            && self.bottom_left <= 0.0
    }

    #[inline]
    pub fn max(self) -> f32 {
        self.top_left.max(self.top_right).max(self.bottom_right).max(self.bottom_left)
    }

    #[inline]
    pub fn scaled(self, s: f32) -> Self {
        Self::new(self.top_left * s, self.top_right * s, self.bottom_right * s, self.bottom_left * s)
    }

    /// Clamps negatives to zero and non-finite values to zero.
    #[inline]
    pub(crate) fn sanitized(self) -> Self {
        let fix = |r: f32| if r.is_finite() { r.max(0.0) } else { 0.0 };
        Self::new(
            fix(self.top_left),
            fix(self.top_right),
            fix(self.bottom_right),
            fix(self.bottom_left),
        )
    }
}
