use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// Position of a point light in device space. `z` is the height above the canvas.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl LightPos {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Ambient blur per unit of occluder height.
const AMBIENT_BLUR_PER_Z: f32 = 0.5;

/// Parameters for a material-style shadow cast by an occluder hovering
/// `z_height` above the canvas.
///
/// The shadow has two parts: an ambient shadow centred under the occluder,
/// and a spot shadow projected away from a point light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShadowParams {
    pub z_height: f32,
    pub light_pos: LightPos,
    pub light_radius: f32,
    pub ambient_alpha: f32,
    pub spot_alpha: f32,
    pub color: Color,
}

/// Projected placement of the spot shadow.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpotGeometry {
    /// Scale about the light's xy position.
    pub scale: f32,
    /// Translation of the occluder's centre.
    pub offset: Vec2,
    pub blur: f32,
}

impl ShadowParams {
    /// Blur radius of the ambient shadow. Linear in `z_height`.
    #[inline]
    pub fn ambient_blur(&self) -> f32 {
        self.z_height.max(0.0) * AMBIENT_BLUR_PER_Z
    }

    /// Spot shadow placement for an occluder with the given bounds.
    ///
    /// The light casts a perspective projection: the shadow grows by
    /// `lz / (lz - z)` and its blur is the light radius projected over the gap.
    pub fn spot_geometry(&self, occluder: Rect) -> SpotGeometry {
        let z = self.z_height.max(0.0);
        let denom = (self.light_pos.z - z).max(1.0);
        let scale = self.light_pos.z.max(1.0) / denom;
        let light = Vec2::new(self.light_pos.x, self.light_pos.y);
        let offset = (occluder.center() - light) * (scale - 1.0);
        SpotGeometry {
            scale,
            offset,
            blur: self.light_radius.max(0.0) * z / denom,
        }
    }

    /// Conservative device-space bounds of everything the shadow can touch.
    pub fn bounds(&self, occluder: Rect) -> Rect {
        if occluder.is_empty() {
            return Rect::EMPTY;
        }
        let spot = self.spot_geometry(occluder);
        let light = Vec2::new(self.light_pos.x, self.light_pos.y);
        let min = light + (occluder.min() - light) * spot.scale;
        let max = light + (occluder.max() - light) * spot.scale;
        let spot_rect = Rect::from_ltrb(min.x, min.y, max.x, max.y).outset(spot.blur, spot.blur);
        let ambient = self.ambient_blur();
        occluder.outset(ambient, ambient).union(spot_rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(z: f32) -> ShadowParams {
        ShadowParams {
            z_height: z,
            light_pos: LightPos::new(0.0, -700.0, 2800.0),
            light_radius: 2800.0,
            ambient_alpha: 0.25,
            spot_alpha: 0.25,
            color: Color::BLACK,
        }
    }

    #[test]
    fn blur_grows_with_height() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut last = (0.0, 0.0);
        for z in [4.0, 8.0, 40.0, 100.0] {
            let p = params(z);
            let now = (p.ambient_blur(), p.spot_geometry(r).blur);
            assert!(now.0 > last.0 && now.1 > last.1, "blur must increase with z");
            last = now;
        }
    }

    #[test]
    fn spot_shadow_falls_away_from_light() {
        // Light sits above the occluder (negative y), so the shadow drops downward.
        let g = params(40.0).spot_geometry(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(g.offset.y > 0.0);
        assert!(g.scale > 1.0);
    }

    #[test]
    fn zero_height_has_no_extent() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0);
        let p = params(0.0);
        assert_eq!(p.ambient_blur(), 0.0);
        assert_eq!(p.spot_geometry(r).blur, 0.0);
        assert_eq!(p.bounds(r), r);
    }
}
