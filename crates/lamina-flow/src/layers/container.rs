use lamina_engine::coords::{Rect, Transform};

use crate::context::{PaintContext, PrerollContext};
use crate::layer::Layer;

/// Ordered list of owned children.
///
/// Used on its own as a grouping node and embedded by every layer kind that
/// has children.
#[derive(Default)]
pub struct ContainerLayer {
    children: Vec<Box<dyn Layer>>,
    paint_bounds: Rect,
    needs_system_composite: bool,
    forces_system_composite: bool,
}

impl ContainerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`add`](Self::add).
    pub fn child(mut self, layer: impl Layer) -> Self {
        self.add(Box::new(layer));
        self
    }

    pub fn add(&mut self, layer: Box<dyn Layer>) {
        self.children.push(layer);
    }

    #[inline]
    pub fn children(&self) -> &[Box<dyn Layer>] {
        &self.children
    }

    /// Marks this node as needing system compositing regardless of its children.
    pub fn set_needs_system_composite(&mut self, value: bool) {
        self.forces_system_composite = value;
        self.needs_system_composite = value;
    }

    /// Prerolls every child in order and returns the union of their paint bounds.
    ///
    /// Each child starts from an empty accumulator. On return the context's
    /// accumulator holds the union.
    pub fn preroll_children(&mut self, ctx: &mut PrerollContext, matrix: &Transform) -> Rect {
        let mut bounds = Rect::EMPTY;
        let mut needs_system_composite = self.forces_system_composite;

        for child in &mut self.children {
            ctx.child_paint_bounds = Rect::EMPTY;
            child.preroll(ctx, matrix);
            bounds = bounds.union(child.paint_bounds());
            needs_system_composite |= child.needs_system_composite();
        }

        self.needs_system_composite = needs_system_composite;
        ctx.child_paint_bounds = bounds;
        bounds
    }

    /// Paints children in order, skipping any with empty bounds.
    pub fn paint_children(&self, ctx: &mut PaintContext<'_>) {
        for child in &self.children {
            if child.needs_painting() {
                child.paint(ctx);
            }
        }
    }
}

impl Layer for ContainerLayer {
    fn preroll(&mut self, ctx: &mut PrerollContext, matrix: &Transform) {
        self.paint_bounds = self.preroll_children(ctx, matrix);
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        self.paint_children(ctx);
    }

    fn paint_bounds(&self) -> Rect {
        self.paint_bounds
    }

    fn needs_system_composite(&self) -> bool {
        self.needs_system_composite
    }
}
