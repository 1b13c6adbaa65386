use lamina_engine::canvas::Canvas;
use lamina_engine::coords::{Rect, Size};

/// Scratch state for one preroll pass.
///
/// Created per frame by the tree and dropped when the pass returns.
#[derive(Debug, Clone)]
pub struct PrerollContext {
    /// Bounds accumulated by the most recently prerolled subtree, in that
    /// subtree's parent coordinate space.
    pub child_paint_bounds: Rect,
    frame_size: Size,
}

impl PrerollContext {
    pub fn new(frame_size: Size) -> Self {
        Self { child_paint_bounds: Rect::EMPTY, frame_size }
    }

    #[inline]
    pub fn frame_size(&self) -> Size {
        self.frame_size
    }
}

/// State threaded through one paint pass.
pub struct PaintContext<'a> {
    canvas: &'a mut Canvas,
    supports_system_composite: bool,
}

impl<'a> PaintContext<'a> {
    pub fn new(canvas: &'a mut Canvas, supports_system_composite: bool) -> Self {
        Self { canvas, supports_system_composite }
    }

    #[inline]
    pub fn canvas(&mut self) -> &mut Canvas {
        self.canvas
    }

    /// Whether the backend can hand layers to a system compositor.
    #[inline]
    pub fn supports_system_composite(&self) -> bool {
        self.supports_system_composite
    }
}

impl AsMut<Canvas> for PaintContext<'_> {
    #[inline]
    fn as_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}
