use lamina_engine::canvas::AutoRestore;
use lamina_engine::coords::{Rect, Transform};

use crate::context::{PaintContext, PrerollContext};
use crate::layer::Layer;

use super::ContainerLayer;

/// Repositions its children by an affine transform.
pub struct TransformLayer {
    transform: Transform,
    container: ContainerLayer,
    paint_bounds: Rect,
}

impl TransformLayer {
    pub fn new(transform: Transform) -> Self {
        Self { transform, container: ContainerLayer::new(), paint_bounds: Rect::EMPTY }
    }

    pub fn child(mut self, layer: impl Layer) -> Self {
        self.container.add(Box::new(layer));
        self
    }

    pub fn add(&mut self, layer: Box<dyn Layer>) {
        self.container.add(layer);
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }
}

impl Layer for TransformLayer {
    fn preroll(&mut self, ctx: &mut PrerollContext, matrix: &Transform) {
        let child_matrix = self.transform.then(matrix);
        let child_bounds = self.container.preroll_children(ctx, &child_matrix);
        self.paint_bounds = self.transform.map_rect(child_bounds);
        ctx.child_paint_bounds = self.paint_bounds;
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let mut scope = AutoRestore::new(ctx);
        scope.canvas().save();
        scope.canvas().concat(&self.transform);
        self.container.paint_children(&mut scope);
    }

    fn paint_bounds(&self) -> Rect {
        self.paint_bounds
    }

    fn needs_system_composite(&self) -> bool {
        self.container.needs_system_composite()
    }
}
