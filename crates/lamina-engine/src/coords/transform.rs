use super::{Rect, Vec2};

/// 2D affine transform.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    #[inline]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: x, f: y }
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self { a: sx, b: 0.0, c: 0.0, d: sy, e: 0.0, f: 0.0 }
    }

    pub fn rotate(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self { a: cos, b: sin, c: -sin, d: cos, e: 0.0, f: 0.0 }
    }

    /// Returns the transform that applies `self` first and `next` second.
    pub fn then(&self, next: &Transform) -> Transform {
        Transform {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// True when the transform keeps rectangles axis-aligned without flipping axes.
    #[inline]
    pub fn is_scale_translate(&self) -> bool {
        self.b == 0.0 && self.c == 0.0 && self.a > 0.0 && self.d > 0.0
    }

    #[inline]
    pub fn map_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(self.a * p.x + self.c * p.y + self.e, self.b * p.x + self.d * p.y + self.f)
    }

    /// Bounding box of the mapped corners.
    pub fn map_rect(&self, r: Rect) -> Rect {
        if r.is_empty() {
            return Rect::EMPTY;
        }
        let corners = [
            self.map_point(Vec2::new(r.left(), r.top())),
            self.map_point(Vec2::new(r.right(), r.top())),
            self.map_point(Vec2::new(r.right(), r.bottom())),
            self.map_point(Vec2::new(r.left(), r.bottom())),
        ];
        let (mut x0, mut y0, mut x1, mut y1) = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
        for p in corners {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Rect::from_ltrb(x0, y0, x1, y1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn then_applies_in_order() {
        let t = Transform::scale(2.0, 2.0).then(&Transform::translate(10.0, 0.0));
        assert_eq!(t.map_point(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 2.0));

        let u = Transform::translate(10.0, 0.0).then(&Transform::scale(2.0, 2.0));
        assert_eq!(u.map_point(Vec2::new(1.0, 1.0)), Vec2::new(22.0, 2.0));
    }

    #[test]
    fn map_rect_of_rotation_is_bounding_box() {
        let t = Transform::rotate(core::f32::consts::FRAC_PI_2);
        let m = t.map_rect(Rect::new(0.0, 0.0, 10.0, 20.0));
        assert!((m.left() + 20.0).abs() < 1e-4);
        assert!((m.width() - 20.0).abs() < 1e-4);
        assert!((m.height() - 10.0).abs() < 1e-4);
        assert!(!t.is_scale_translate());
    }

    #[test]
    fn identity_checks() {
        assert!(Transform::IDENTITY.is_identity());
        assert!(Transform::translate(1.0, 2.0).is_scale_translate());
        assert!(!Transform::scale(-1.0, 1.0).is_scale_translate());
    }
}
