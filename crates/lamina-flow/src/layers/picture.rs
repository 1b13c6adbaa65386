use lamina_engine::canvas::{AutoRestore, Path};
use lamina_engine::coords::{RRect, Rect, Transform, Vec2};
use lamina_engine::paint::Color;

use crate::context::{PaintContext, PrerollContext};
use crate::layer::Layer;

/// Leaf holding a short recorded list of filled paths, drawn at `offset`.
#[derive(Debug, Clone, Default)]
pub struct PictureLayer {
    offset: Vec2,
    fills: Vec<(Path, Color)>,
    paint_bounds: Rect,
}

impl PictureLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(offset: Vec2) -> Self {
        Self { offset, ..Self::default() }
    }

    pub fn path(mut self, path: Path, color: Color) -> Self {
        self.push(path, color);
        self
    }

    pub fn rrect(self, rrect: RRect, color: Color) -> Self {
        self.path(Path::from_rrect(rrect), color)
    }

    pub fn rect(self, rect: Rect, color: Color) -> Self {
        self.path(Path::from_rect(rect), color)
    }

    pub fn push(&mut self, path: Path, color: Color) {
        self.fills.push((path, color));
    }

    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    // Union of recorded geometry in the parent's space.
    fn content_bounds(&self) -> Rect {
        self.fills
            .iter()
            .fold(Rect::EMPTY, |acc, (path, _)| acc.union(path.bounds()))
            .translate(self.offset)
    }
}

impl Layer for PictureLayer {
    fn preroll(&mut self, ctx: &mut PrerollContext, _matrix: &Transform) {
        let bounds = self.content_bounds();
        self.paint_bounds = if bounds.is_empty() { Rect::EMPTY } else { bounds };
        ctx.child_paint_bounds = self.paint_bounds;
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let mut scope = AutoRestore::new(ctx);
        let canvas = scope.canvas();
        canvas.save();
        canvas.translate(self.offset.x, self.offset.y);
        for (path, color) in &self.fills {
            canvas.draw_path(path, *color);
        }
    }

    fn paint_bounds(&self) -> Rect {
        self.paint_bounds
    }
}
