use lamina_engine::canvas::{AutoRestore, LightPos, Path, ShadowParams};
use lamina_engine::coords::{RRect, Rect, Transform};
use lamina_engine::paint::Color;

use crate::context::{PaintContext, PrerollContext};
use crate::layer::Layer;

use super::ContainerLayer;

/// Outset applied to paint bounds for the shadow. Shadows are clipped to it.
pub const SHADOW_MARGIN: f32 = 50.0;

/// Shadow height per unit of elevation.
pub const ELEVATION_TO_Z: f32 = 4.0;

pub const LIGHT_POS: LightPos = LightPos::new(0.0, -700.0, 2800.0);
pub const LIGHT_RADIUS: f32 = 2800.0;
pub const AMBIENT_ALPHA: f32 = 0.25;
pub const SPOT_ALPHA: f32 = 0.25;

/// Shadow cast by a physical model at `elevation`.
pub fn shadow_params(elevation: f32) -> ShadowParams {
    ShadowParams {
        z_height: elevation * ELEVATION_TO_Z,
        light_pos: LIGHT_POS,
        light_radius: LIGHT_RADIUS,
        ambient_alpha: AMBIENT_ALPHA,
        spot_alpha: SPOT_ALPHA,
        color: Color::BLACK,
    }
}

/// A sheet of material: a rounded rect filled with a solid color, hovering
/// `elevation` above its parent and casting a shadow, that clips its children
/// to its outline.
pub struct PhysicalModelLayer {
    rrect: RRect,
    color: Color,
    elevation: f32,
    container: ContainerLayer,
    paint_bounds: Rect,
}

impl PhysicalModelLayer {
    /// Negative or non-finite elevations are treated as 0.
    pub fn new(rrect: RRect, color: Color, elevation: f32) -> Self {
        let elevation = if elevation.is_finite() && elevation >= 0.0 {
            elevation
        } else {
            log::warn!("physical model elevation {elevation} clamped to 0");
            0.0
        };
        Self {
            rrect,
            color,
            elevation,
            container: ContainerLayer::new(),
            paint_bounds: Rect::EMPTY,
        }
    }

    pub fn child(mut self, layer: impl Layer) -> Self {
        self.container.add(Box::new(layer));
        self
    }

    pub fn add(&mut self, layer: Box<dyn Layer>) {
        self.container.add(layer);
    }

    #[inline]
    pub fn rrect(&self) -> RRect {
        self.rrect
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    #[inline]
    pub fn children(&self) -> &[Box<dyn Layer>] {
        self.container.children()
    }

    pub fn set_needs_system_composite(&mut self, value: bool) {
        self.container.set_needs_system_composite(value);
    }
}

impl Layer for PhysicalModelLayer {
    fn preroll(&mut self, ctx: &mut PrerollContext, matrix: &Transform) {
        // Children share this node's coordinate space.
        let child_bounds = self.container.preroll_children(ctx, matrix);
        let clip = self.rrect.bounds();

        ctx.child_paint_bounds = child_bounds.intersect_or_empty(clip);

        // The fill covers the whole clip, so it is part of what gets painted.
        self.paint_bounds = match child_bounds.union(clip).intersect(clip) {
            Some(bounds) => bounds.outset(SHADOW_MARGIN, SHADOW_MARGIN),
            None => Rect::EMPTY,
        };
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        debug_assert!(
            !self.needs_system_composite() || ctx.supports_system_composite(),
            "physical model needs system compositing, which this backend cannot do"
        );

        let path = Path::from_rrect(self.rrect);

        if self.elevation != 0.0 {
            // High elevations project past the margin reserved in preroll.
            let mut scope = AutoRestore::new(&mut *ctx);
            scope.canvas().save();
            scope.canvas().clip_rect(self.paint_bounds);
            scope.canvas().draw_shadow(&path, shadow_params(self.elevation));
        }

        // Stored alpha applies to children only; the sheet itself is opaque.
        ctx.canvas().draw_path(&path, self.color.opaque());

        let mut scope = AutoRestore::new(ctx);
        if self.rrect.is_rect() {
            scope.canvas().save();
        } else {
            scope.canvas().save_layer(self.rrect.bounds());
        }
        scope.canvas().clip_rrect(self.rrect, true);

        self.container.paint_children(&mut scope);
    }

    fn paint_bounds(&self) -> Rect {
        self.paint_bounds
    }

    fn needs_system_composite(&self) -> bool {
        self.container.needs_system_composite()
    }
}
