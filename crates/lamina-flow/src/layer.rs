use lamina_engine::coords::{Rect, Transform};

use crate::context::{PaintContext, PrerollContext};

// ── Layer trait ───────────────────────────────────────────────────────────

/// A node of the layer tree.
///
/// Every frame runs two passes over the tree:
///
/// 1. **Preroll** walks the tree once, children first, and records each
///    node's paint bounds. It never draws.
/// 2. **Paint** walks it again and records drawing into the frame's canvas.
///    Nodes with empty paint bounds are skipped.
///
/// Preroll always completes for the whole tree before Paint starts.
pub trait Layer: 'static {
    /// Computes and stores this node's paint bounds.
    ///
    /// `matrix` is the cumulative transform from this node's coordinate space
    /// to the device. Must be idempotent: prerolling twice with the same input
    /// yields the same bounds. May only mutate the node's own bounds and the
    /// context's accumulator.
    fn preroll(&mut self, ctx: &mut PrerollContext, matrix: &Transform);

    /// Records this node and its descendants into `ctx`'s canvas.
    ///
    /// The canvas save count must be the same on return as on entry.
    fn paint(&self, ctx: &mut PaintContext<'_>);

    /// Bounds from the most recent preroll, in the parent's coordinate space.
    fn paint_bounds(&self) -> Rect;

    /// True when this node, or a descendant, needs compositing by the system
    /// compositor instead of the canvas.
    fn needs_system_composite(&self) -> bool {
        false
    }

    #[inline]
    fn needs_painting(&self) -> bool {
        !self.paint_bounds().is_empty()
    }
}

impl Layer for Box<dyn Layer> {
    fn preroll(&mut self, ctx: &mut PrerollContext, matrix: &Transform) {
        (**self).preroll(ctx, matrix)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        (**self).paint(ctx)
    }

    fn paint_bounds(&self) -> Rect {
        (**self).paint_bounds()
    }

    fn needs_system_composite(&self) -> bool {
        (**self).needs_system_composite()
    }
}
