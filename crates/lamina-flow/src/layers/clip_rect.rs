use lamina_engine::canvas::AutoRestore;
use lamina_engine::coords::{Rect, Transform};

use crate::context::{PaintContext, PrerollContext};
use crate::layer::Layer;

use super::ContainerLayer;

/// Hard-edged rectangular clip around its children.
pub struct ClipRectLayer {
    clip: Rect,
    container: ContainerLayer,
    paint_bounds: Rect,
}

impl ClipRectLayer {
    pub fn new(clip: Rect) -> Self {
        Self { clip: clip.normalized(), container: ContainerLayer::new(), paint_bounds: Rect::EMPTY }
    }

    pub fn child(mut self, layer: impl Layer) -> Self {
        self.container.add(Box::new(layer));
        self
    }

    pub fn add(&mut self, layer: Box<dyn Layer>) {
        self.container.add(layer);
    }

    #[inline]
    pub fn clip(&self) -> Rect {
        self.clip
    }
}

impl Layer for ClipRectLayer {
    fn preroll(&mut self, ctx: &mut PrerollContext, matrix: &Transform) {
        let child_bounds = self.container.preroll_children(ctx, matrix);
        self.paint_bounds = child_bounds.intersect_or_empty(self.clip);
        ctx.child_paint_bounds = self.paint_bounds;
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let mut scope = AutoRestore::new(ctx);
        scope.canvas().save();
        scope.canvas().clip_rect(self.clip);
        self.container.paint_children(&mut scope);
    }

    fn paint_bounds(&self) -> Rect {
        self.paint_bounds
    }

    fn needs_system_composite(&self) -> bool {
        self.container.needs_system_composite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::PictureLayer;
    use lamina_engine::canvas::Canvas;
    use lamina_engine::coords::Size;
    use lamina_engine::paint::Color;
    use lamina_engine::raster::rasterize;

    #[test]
    fn bounds_are_clipped() {
        let mut layer = ClipRectLayer::new(Rect::new(0.0, 0.0, 10.0, 10.0))
            .child(PictureLayer::new().rect(Rect::new(5.0, 5.0, 20.0, 20.0), Color::RED));
        layer.preroll(&mut PrerollContext::new(Size::new(50, 50)), &Transform::IDENTITY);
        assert_eq!(layer.paint_bounds(), Rect::new(5.0, 5.0, 5.0, 5.0));
    }

    #[test]
    fn disjoint_child_is_skipped_entirely() {
        let mut layer = ClipRectLayer::new(Rect::new(0.0, 0.0, 10.0, 10.0))
            .child(PictureLayer::new().rect(Rect::new(20.0, 20.0, 5.0, 5.0), Color::RED));
        layer.preroll(&mut PrerollContext::new(Size::new(50, 50)), &Transform::IDENTITY);
        assert_eq!(layer.paint_bounds(), Rect::EMPTY);
        assert!(!layer.needs_painting());
    }

    #[test]
    fn pixels_stay_inside_and_no_layer_is_used() {
        let mut layer = ClipRectLayer::new(Rect::new(10.0, 10.0, 10.0, 10.0))
            .child(PictureLayer::new().rect(Rect::new(0.0, 0.0, 40.0, 40.0), Color::RED));
        layer.preroll(&mut PrerollContext::new(Size::new(40, 40)), &Transform::IDENTITY);

        let mut canvas = Canvas::new(Size::new(40, 40));
        layer.paint(&mut PaintContext::new(&mut canvas, false));
        assert_eq!(canvas.layers_saved(), 0);

        let px = rasterize(canvas.display_list(), Size::new(40, 40));
        assert_eq!(px.pixel(15, 15), Some([255, 0, 0, 255]));
        assert_eq!(px.pixel(9, 15), Some([0, 0, 0, 0]));
        assert_eq!(px.pixel(20, 20), Some([0, 0, 0, 0]));
    }
}
