use super::{CornerRadii, Rect, Vec2};

/// Rounded rectangle: an axis-aligned rect plus independent corner radii.
///
/// Used both as fill geometry and as a clip boundary. Radii are normalized on
/// construction so adjacent corners never overlap along any edge.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RRect {
    rect: Rect,
    radii: CornerRadii,
}

impl RRect {
    pub fn new(rect: Rect, radii: CornerRadii) -> Self {
        let rect = rect.normalized();
        let radii = fit_radii(rect, radii.sanitized());
        Self { rect, radii }
    }

    /// A rounded rect with square corners.
    #[inline]
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect, CornerRadii::zero())
    }

    #[inline]
    pub fn from_rect_radius(rect: Rect, radius: f32) -> Self {
        Self::new(rect, CornerRadii::all(radius))
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn radii(&self) -> CornerRadii {
        self.radii
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rect.is_empty()
    }

    /// True when the shape is an exact axis-aligned rectangle (no rounding).
    #[inline]
    pub fn is_rect(&self) -> bool {
        !self.is_empty() && self.radii.is_zero()
    }

    /// Signed distance from `p` to the outline; negative inside.
    pub fn signed_distance(&self, p: Vec2) -> f32 {
        let c = self.rect.center();
        let half = Vec2::new(self.rect.size.x * 0.5, self.rect.size.y * 0.5);
        let d = p - c;

        // +Y is down, so positive d.y selects the bottom corners.
        let radius = match (d.x >= 0.0, d.y >= 0.0) {
            (false, false) => self.radii.top_left,
            (true, false) => self.radii.top_right,
            (true, true) => self.radii.bottom_right,
            (false, true) => self.radii.bottom_left,
        };

        let q = d.abs() - half + Vec2::splat(radius);
        q.max(Vec2::zero()).length() + q.max_element().min(0.0) - radius
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        !self.is_empty() && self.signed_distance(p) <= 0.0
    }

    /// Maps the shape through a translate/scale. Radii scale with the axis
    /// scale factors (averaged for non-uniform scale).
    pub fn scale_translate(&self, sx: f32, sy: f32, tx: f32, ty: f32) -> Self {
        let r = self.rect;
        let mapped = Rect::new(r.origin.x * sx + tx, r.origin.y * sy + ty, r.size.x * sx, r.size.y * sy);
        let k = (sx.abs() + sy.abs()) * 0.5;
        Self::new(mapped, self.radii.scaled(k))
    }
}

// Uniformly shrinks radii whose sum along an edge exceeds the edge length.
fn fit_radii(rect: Rect, radii: CornerRadii) -> CornerRadii {
    if rect.is_empty() {
        return CornerRadii::zero();
    }

    let w = rect.size.x;
    let h = rect.size.y;
    let mut scale = 1.0f32;
    for (sum, len) in [
        (radii.top_left + radii.top_right, w),
        (radii.bottom_left + radii.bottom_right, w),
        (radii.top_left + radii.bottom_left, h),
        (radii.top_right + radii.bottom_right, h),
    ] {
        if sum > len {
            scale = scale.min(len / sum);
        }
    }

    if scale < 1.0 { radii.scaled(scale) } else { radii }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── classification ────────────────────────────────────────────────────

    #[test]
    fn square_corners_are_a_rect() {
        let rr = RRect::from_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(rr.is_rect());
    }

    #[test]
    fn any_radius_is_not_a_rect() {
        let rr = RRect::new(Rect::new(0.0, 0.0, 100.0, 100.0), CornerRadii::new(0.0, 0.0, 4.0, 0.0));
        assert!(!rr.is_rect());
    }

    #[test]
    fn empty_is_never_a_rect() {
        assert!(!RRect::from_rect(Rect::EMPTY).is_rect());
    }

    // ── radii fitting ─────────────────────────────────────────────────────

    #[test]
    fn oversized_radii_are_scaled_down() {
        let rr = RRect::from_rect_radius(Rect::new(0.0, 0.0, 20.0, 10.0), 10.0);
        assert_eq!(rr.radii(), CornerRadii::all(5.0));
    }

    #[test]
    fn negative_radii_become_zero() {
        let rr = RRect::from_rect_radius(Rect::new(0.0, 0.0, 20.0, 10.0), -3.0);
        assert!(rr.is_rect());
    }

    // ── distance / containment ────────────────────────────────────────────

    #[test]
    fn center_is_inside_and_corner_is_outside() {
        let rr = RRect::from_rect_radius(Rect::new(0.0, 0.0, 100.0, 100.0), 20.0);
        assert!(rr.contains(Vec2::new(50.0, 50.0)));
        // Inside the bounding box but cut off by the rounded corner.
        assert!(!rr.contains(Vec2::new(1.0, 1.0)));
        assert!(!rr.contains(Vec2::new(99.0, 99.0)));
    }

    #[test]
    fn edge_midpoint_has_zero_distance() {
        let rr = RRect::from_rect_radius(Rect::new(0.0, 0.0, 100.0, 100.0), 20.0);
        assert!(rr.signed_distance(Vec2::new(50.0, 0.0)).abs() < 1e-4);
        assert!((rr.signed_distance(Vec2::new(50.0, -10.0)) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn scale_translate_maps_bounds_and_radii() {
        let rr = RRect::from_rect_radius(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0);
        let m = rr.scale_translate(2.0, 2.0, 5.0, 5.0);
        assert_eq!(m.bounds(), Rect::new(5.0, 5.0, 20.0, 20.0));
        assert_eq!(m.radii(), CornerRadii::all(4.0));
    }
}
