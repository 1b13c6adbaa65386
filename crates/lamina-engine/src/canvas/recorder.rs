use crate::coords::{RRect, Rect, Size, Transform};
use crate::paint::Color;

use super::list::{Clip, ClipShape, DisplayList, DrawCmd};
use super::path::map_rrect;
use super::{AutoRestore, Path, ShadowParams};

#[derive(Debug, Clone)]
struct State {
    transform: Transform,
    clip: Clip,
}

#[derive(Debug)]
struct SaveRecord {
    state: State,
    layer: bool,
}

/// Recording drawing target for one frame.
///
/// Draw calls resolve the current transform and clip immediately and append a
/// [`DrawItem`](super::DrawItem) to the display list, so the list can be
/// rasterized without replaying any state.
///
/// # Save / restore
///
/// `save` and `save_layer` push the current transform + clip. `restore` pops
/// them. Clips only narrow within a save scope. Prefer [`auto_restore`] so
/// state is restored on every exit path:
///
/// ```
/// # use lamina_engine::canvas::Canvas;
/// # use lamina_engine::coords::{Rect, Size};
/// let mut canvas = Canvas::new(Size::new(100, 100));
/// {
///     let mut scope = canvas.auto_restore();
///     scope.save();
///     scope.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
/// }
/// assert_eq!(canvas.save_count(), 1);
/// ```
///
/// [`auto_restore`]: Self::auto_restore
#[derive(Debug)]
pub struct Canvas {
    size: Size,
    list: DisplayList,
    state: State,
    stack: Vec<SaveRecord>,
    layers_saved: usize,
}

impl Canvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            list: DisplayList::new(),
            state: State {
                transform: Transform::IDENTITY,
                clip: Clip::new(size.to_rect()),
            },
            stack: Vec::new(),
            layers_saved: 0,
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    /// Number of isolated layers allocated since creation.
    #[inline]
    pub fn layers_saved(&self) -> usize {
        self.layers_saved
    }

    // ── save / restore ────────────────────────────────────────────────────

    /// Current save depth; 1 when nothing is saved.
    #[inline]
    pub fn save_count(&self) -> usize {
        self.stack.len() + 1
    }

    /// Pushes transform + clip. Returns the save count before the push.
    pub fn save(&mut self) -> usize {
        let count = self.save_count();
        self.stack.push(SaveRecord { state: self.state.clone(), layer: false });
        count
    }

    /// Like [`save`](Self::save), and also redirects drawing into an isolated
    /// layer bounded by `bounds` (local coordinates) until the matching restore.
    pub fn save_layer(&mut self, bounds: Rect) -> usize {
        let count = self.save_count();
        let device = self.state.transform.map_rect(bounds).intersect_or_empty(self.state.clip.scissor);
        self.list.push(DrawCmd::BeginLayer { bounds: device }, self.state.clip.clone());
        self.stack.push(SaveRecord { state: self.state.clone(), layer: true });
        self.layers_saved += 1;
        log::trace!("save_layer: device bounds {device:?}");
        count
    }

    /// Pops the most recent save. Unbalanced restores are a caller bug.
    pub fn restore(&mut self) {
        debug_assert!(!self.stack.is_empty(), "Canvas::restore called without matching save");
        let Some(record) = self.stack.pop() else { return; };
        if record.layer {
            self.list.push(DrawCmd::EndLayer, record.state.clip.clone());
        }
        self.state = record.state;
    }

    /// Restores until `save_count() == count`. Counts below 1 are treated as 1.
    pub fn restore_to_count(&mut self, count: usize) {
        let count = count.max(1);
        while self.save_count() > count {
            self.restore();
        }
    }

    /// Returns a guard that restores to the current save count when dropped.
    #[inline]
    pub fn auto_restore(&mut self) -> AutoRestore<'_, Self> {
        AutoRestore::new(self)
    }

    // ── transform ─────────────────────────────────────────────────────────

    #[inline]
    pub fn total_transform(&self) -> Transform {
        self.state.transform
    }

    /// Pre-concatenates `m`: it applies to local coordinates before the
    /// current transform.
    pub fn concat(&mut self, m: &Transform) {
        self.state.transform = m.then(&self.state.transform);
    }

    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.concat(&Transform::translate(dx, dy));
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Device-space bounds of the current clip.
    #[inline]
    pub fn device_clip_bounds(&self) -> Rect {
        self.state.clip.scissor
    }

    /// Hard-edged rectangular clip. Never needs an isolated layer.
    pub fn clip_rect(&mut self, rect: Rect) {
        let device = self.state.transform.map_rect(rect);
        self.state.clip.scissor = self.state.clip.scissor.intersect_or_empty(device);
    }

    /// Rounded clip. Exact rectangles take the [`clip_rect`](Self::clip_rect) path.
    pub fn clip_rrect(&mut self, rrect: RRect, anti_alias: bool) {
        if rrect.is_rect() || rrect.is_empty() {
            self.clip_rect(rrect.bounds());
            return;
        }
        if !self.state.transform.is_scale_translate() {
            log::debug!("clip_rrect under a non scale/translate transform; clipping to mapped bounds");
        }
        let device = map_rrect(&rrect, &self.state.transform);
        self.state.clip.scissor = self.state.clip.scissor.intersect_or_empty(device.bounds());
        self.state.clip.shapes.push(ClipShape { rrect: device, anti_alias });
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Replaces everything inside the current clip with `color`.
    pub fn clear(&mut self, color: Color) {
        self.list.push(DrawCmd::Clear(color), self.state.clip.clone());
    }

    pub fn draw_path(&mut self, path: &Path, color: Color) {
        let device = path.transformed(&self.state.transform);
        if self.rejects(device.bounds()) {
            return;
        }
        self.list.push(DrawCmd::FillPath { path: device, color }, self.state.clip.clone());
    }

    #[inline]
    pub fn draw_rrect(&mut self, rrect: RRect, color: Color) {
        self.draw_path(&Path::from_rrect(rrect), color);
    }

    #[inline]
    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.draw_path(&Path::from_rect(rect), color);
    }

    /// Casts a shadow for the occluder `path`. The light position is in device space.
    pub fn draw_shadow(&mut self, path: &Path, params: ShadowParams) {
        let device = path.transformed(&self.state.transform);
        if self.rejects(params.bounds(device.bounds())) {
            return;
        }
        self.list.push(DrawCmd::Shadow { path: device, params }, self.state.clip.clone());
    }

    // Quick reject against the scissor.
    fn rejects(&self, device_bounds: Rect) -> bool {
        device_bounds.is_empty() || device_bounds.intersect(self.state.clip.scissor).is_none()
    }
}

impl AsMut<Canvas> for Canvas {
    #[inline]
    fn as_mut(&mut self) -> &mut Canvas {
        self
    }
}
