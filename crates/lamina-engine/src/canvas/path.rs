use crate::coords::{RRect, Rect, Transform, Vec2};

/// Fill geometry made of rounded-rect contours.
///
/// The union of the contours is filled; overlapping contours do not cancel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    contours: Vec<RRect>,
}

impl Path {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rrect(rrect: RRect) -> Self {
        let mut path = Self::new();
        path.add_rrect(rrect);
        path
    }

    #[inline]
    pub fn from_rect(rect: Rect) -> Self {
        Self::from_rrect(RRect::from_rect(rect))
    }

    /// Appends a contour. Empty rounded rects are dropped.
    pub fn add_rrect(&mut self, rrect: RRect) {
        if !rrect.is_empty() {
            self.contours.push(rrect);
        }
    }

    #[inline]
    pub fn contours(&self) -> &[RRect] {
        &self.contours
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        self.contours
            .iter()
            .fold(Rect::EMPTY, |acc, c| acc.union(c.bounds()))
    }

    /// Signed distance to the nearest contour; `f32::INFINITY` for an empty path.
    pub fn signed_distance(&self, p: Vec2) -> f32 {
        self.contours
            .iter()
            .map(|c| c.signed_distance(p))
            .fold(f32::INFINITY, f32::min)
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.signed_distance(p) <= 0.0
    }

    /// Maps every contour through `m`.
    ///
    /// Rounded rects stay exact under translate/scale. Any other transform maps
    /// each contour's bounding box and keeps its radii, which over-covers
    /// rotated shapes.
    pub fn transformed(&self, m: &Transform) -> Path {
        if m.is_identity() {
            return self.clone();
        }
        let contours = self
            .contours
            .iter()
            .map(|c| map_rrect(c, m))
            .collect();
        Path { contours }
    }
}

pub(crate) fn map_rrect(rrect: &RRect, m: &Transform) -> RRect {
    if m.is_scale_translate() {
        rrect.scale_translate(m.a, m.d, m.e, m.f)
    } else {
        RRect::new(m.map_rect(rrect.bounds()), rrect.radii())
    }
}
