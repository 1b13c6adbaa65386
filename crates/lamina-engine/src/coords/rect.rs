use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
///
/// `Rect::EMPTY` is the canonical empty rectangle: every operation that can
/// produce "nothing" (a failed intersection, a union of empties) returns it, so
/// empty results compare equal regardless of where they came from.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const EMPTY: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Builds a rectangle from its edges. Inverted edges yield a negative size;
    /// call [`normalized`](Self::normalized) if that matters.
    #[inline]
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect::new(left, top, right - left, bottom - top)
    }

    #[inline]
    pub fn left(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        self.origin
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.origin.x
            && p.y >= r.origin.y
            && p.x < (r.origin.x + r.size.x)
            && p.y < (r.origin.y + r.size.y)
    }

    /// Returns true when `other` lies entirely inside `self`.
    #[inline]
    pub fn contains_rect(self, other: Rect) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        b.left() >= a.left() && b.top() >= a.top() && b.right() <= a.right() && b.bottom() <= a.bottom()
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = (a.origin.x + a.size.x).min(b.origin.x + b.size.x);
        let y1 = (a.origin.y + a.size.y).min(b.origin.y + b.size.y);

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }

    /// Like [`intersect`](Self::intersect) but collapses "no overlap" to [`Rect::EMPTY`].
    #[inline]
    pub fn intersect_or_empty(self, other: Rect) -> Rect {
        self.intersect(other).unwrap_or(Rect::EMPTY)
    }

    /// Smallest rectangle containing both. Empty operands do not contribute.
    #[inline]
    pub fn union(self, other: Rect) -> Rect {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Rect::EMPTY,
            (true, false) => other.normalized(),
            (false, true) => self.normalized(),
            (false, false) => {
                let a = self.normalized();
                let b = other.normalized();
                Rect::from_ltrb(
                    a.left().min(b.left()),
                    a.top().min(b.top()),
                    a.right().max(b.right()),
                    a.bottom().max(b.bottom()),
                )
            }
        }
    }

    /// Grows the rectangle by `dx` on the left and right and `dy` on the top and bottom.
    ///
    /// This is a pure edge offset: an empty rectangle anchored at some point
    /// becomes a `2dx` x `2dy` rectangle centred on that anchor.
    #[inline]
    pub fn outset(self, dx: f32, dy: f32) -> Rect {
        let r = self.normalized();
        Rect::from_ltrb(r.left() - dx, r.top() - dy, r.right() + dx, r.bottom() + dy)
    }

    #[inline]
    pub fn translate(self, offset: Vec2) -> Rect {
        Rect::from_origin_size(self.origin + offset, self.size)
    }

    /// Rounds outwards to whole pixels.
    #[inline]
    pub fn round_out(self) -> Rect {
        let r = self.normalized();
        Rect::from_ltrb(r.left().floor(), r.top().floor(), r.right().ceil(), r.bottom().ceil())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_width() {
        let rect = r(10.0, 0.0, -4.0, 5.0);
        let n = rect.normalized();
        assert_eq!(n.origin.x, 6.0);
        assert_eq!(n.size.x, 4.0);
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn contains_rect_nested_and_overhanging() {
        let outer = r(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(r(10.0, 10.0, 20.0, 20.0)));
        assert!(outer.contains_rect(outer));
        assert!(!outer.contains_rect(r(90.0, 90.0, 20.0, 20.0)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(b).unwrap(), r(5.0, 5.0, 5.0, 5.0));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersect(b).is_none());
    }

    #[test]
    fn intersect_or_empty_is_canonical() {
        let a = r(0.0, 0.0, 5.0, 5.0);
        let b = r(20.0, 20.0, 5.0, 5.0);
        assert_eq!(a.intersect_or_empty(b), Rect::EMPTY);
    }

    // ── union ─────────────────────────────────────────────────────────────

    #[test]
    fn union_ignores_empty_operands() {
        let a = r(10.0, 10.0, 5.0, 5.0);
        assert_eq!(a.union(Rect::EMPTY), a);
        assert_eq!(Rect::EMPTY.union(a), a);
        assert_eq!(Rect::EMPTY.union(Rect::EMPTY), Rect::EMPTY);
    }

    #[test]
    fn union_spans_both() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(20.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(b), Rect::from_ltrb(0.0, 0.0, 30.0, 15.0));
    }

    // ── outset ────────────────────────────────────────────────────────────

    #[test]
    fn outset_grows_every_edge() {
        let a = Rect::from_ltrb(0.0, 0.0, 100.0, 100.0);
        assert_eq!(a.outset(50.0, 50.0), Rect::from_ltrb(-50.0, -50.0, 150.0, 150.0));
    }

    #[test]
    fn outset_of_empty_is_anchored() {
        assert_eq!(Rect::EMPTY.outset(2.0, 3.0), Rect::from_ltrb(-2.0, -3.0, 2.0, 3.0));
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, 0.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn round_out_covers_fractional_edges() {
        assert_eq!(r(0.5, 0.2, 9.0, 9.9).round_out(), Rect::from_ltrb(0.0, 0.0, 10.0, 11.0));
    }
}
