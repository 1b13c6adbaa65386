use lamina_engine::canvas::Canvas;
use lamina_engine::coords::{Rect, Size, Transform};

use crate::context::{PaintContext, PrerollContext};
use crate::layer::Layer;

/// Root of a frame's layers plus the frame size they are laid out for.
pub struct LayerTree {
    root: Box<dyn Layer>,
    frame_size: Size,
    prerolled: bool,
}

impl LayerTree {
    pub fn new(root: impl Layer, frame_size: Size) -> Self {
        Self { root: Box::new(root), frame_size, prerolled: false }
    }

    #[inline]
    pub fn frame_size(&self) -> Size {
        self.frame_size
    }

    /// Changing the size invalidates the last preroll.
    pub fn set_frame_size(&mut self, frame_size: Size) {
        if frame_size != self.frame_size {
            self.frame_size = frame_size;
            self.prerolled = false;
        }
    }

    #[inline]
    pub fn root(&self) -> &dyn Layer {
        self.root.as_ref()
    }

    /// Swaps in a new root. It must be prerolled before the next paint.
    pub fn set_root(&mut self, root: impl Layer) {
        self.root = Box::new(root);
        self.prerolled = false;
    }

    /// Runs the preroll pass over the whole tree and returns the root's paint bounds.
    pub fn preroll(&mut self) -> Rect {
        let mut ctx = PrerollContext::new(self.frame_size);
        self.root.preroll(&mut ctx, &Transform::IDENTITY);
        self.prerolled = true;
        let bounds = self.root.paint_bounds();
        log::trace!("preroll: root bounds {bounds:?}");
        bounds
    }

    /// Runs the paint pass into `canvas`. Call [`preroll`](Self::preroll) first.
    pub fn paint(&self, canvas: &mut Canvas, supports_system_composite: bool) {
        debug_assert!(self.prerolled, "LayerTree::paint called before preroll");

        if !self.root.needs_painting() {
            log::trace!("paint: root has empty bounds, nothing to draw");
            return;
        }

        let depth = canvas.save_count();
        let mut ctx = PaintContext::new(canvas, supports_system_composite);
        self.root.paint(&mut ctx);
        debug_assert_eq!(canvas.save_count(), depth, "paint left the canvas unbalanced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{ContainerLayer, PhysicalModelLayer, PictureLayer, TransformLayer};
    use lamina_engine::coords::RRect;
    use lamina_engine::paint::Color;

    fn card(x: f32, elevation: f32) -> PhysicalModelLayer {
        PhysicalModelLayer::new(RRect::from_rect_radius(Rect::new(x, 10.0, 40.0, 40.0), 6.0), Color::WHITE, elevation)
            .child(PictureLayer::new().rect(Rect::new(x + 5.0, 15.0, 10.0, 10.0), Color::RED))
    }

    #[test]
    fn preroll_reports_root_bounds() {
        let mut tree = LayerTree::new(ContainerLayer::new().child(card(10.0, 1.0)).child(card(100.0, 2.0)), Size::new(200, 100));
        let bounds = tree.preroll();
        assert_eq!(bounds, Rect::from_ltrb(-40.0, -40.0, 190.0, 100.0));
    }

    #[test]
    fn paint_records_every_card() {
        let mut tree = LayerTree::new(
            TransformLayer::new(Transform::translate(5.0, 0.0)).child(card(10.0, 1.0)).child(card(100.0, 0.0)),
            Size::new(200, 100),
        );
        tree.preroll();
        let mut canvas = Canvas::new(tree.frame_size());
        tree.paint(&mut canvas, false);

        let list = canvas.display_list();
        assert_eq!(list.shadows().count(), 1);
        assert_eq!(list.fills().count(), 4);
        assert_eq!(list.layer_count(), 2);
        assert_eq!(canvas.save_count(), 1);
    }

    #[test]
    fn empty_tree_draws_nothing() {
        let mut tree = LayerTree::new(ContainerLayer::new(), Size::new(10, 10));
        tree.preroll();
        let mut canvas = Canvas::new(tree.frame_size());
        tree.paint(&mut canvas, false);
        assert!(canvas.display_list().is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "before preroll")]
    fn paint_before_preroll_panics() {
        let tree = LayerTree::new(card(0.0, 0.0), Size::new(10, 10));
        let mut canvas = Canvas::new(tree.frame_size());
        tree.paint(&mut canvas, false);
    }

    #[test]
    fn resizing_requires_a_new_preroll() {
        let mut tree = LayerTree::new(card(0.0, 0.0), Size::new(10, 10));
        tree.preroll();
        tree.set_frame_size(Size::new(20, 20));
        assert!(!tree.prerolled);
        tree.set_frame_size(Size::new(20, 20));
        tree.preroll();
        assert!(tree.prerolled);
    }
}
