use crate::coords::{RRect, Rect, Vec2};
use crate::paint::Color;

use super::{Path, ShadowParams};

/// A rounded clip shape in device space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClipShape {
    pub rrect: RRect,
    pub anti_alias: bool,
}

/// Effective device-space clip attached to every recorded item.
///
/// `scissor` is already intersected with every enclosing clip. `shapes`
/// holds the rounded clips in force; an item is visible at a point only if the
/// point is inside the scissor and inside every shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub scissor: Rect,
    pub shapes: Vec<ClipShape>,
}

impl Clip {
    #[inline]
    pub fn new(scissor: Rect) -> Self {
        Self { scissor, shapes: Vec::new() }
    }

    /// True when nothing can be drawn through this clip.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scissor.is_empty()
    }

    /// Coverage of the clip at `p`, in `[0, 1]`.
    pub fn coverage(&self, p: Vec2) -> f32 {
        if !self.scissor.contains(p) {
            return 0.0;
        }
        let mut cov = 1.0f32;
        for shape in &self.shapes {
            let d = shape.rrect.signed_distance(p);
            cov *= if shape.anti_alias {
                (0.5 - d).clamp(0.0, 1.0)
            } else if d <= 0.0 {
                1.0
            } else {
                0.0
            };
            if cov <= 0.0 {
                break;
            }
        }
        cov
    }
}

/// Recorded canvas operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole clip with a color (replaces, does not blend).
    Clear(Color),
    FillPath { path: Path, color: Color },
    Shadow { path: Path, params: ShadowParams },
    /// Start an isolated layer; items until the matching `EndLayer` render into it.
    BeginLayer { bounds: Rect },
    EndLayer,
}

/// A single recorded item: command + the clip in force when it was recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    pub clip: Clip,
}

/// Recorded draw stream for a frame, in paint order.
///
/// Geometry is stored in device space; transforms are resolved at record time.
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    items: Vec<DrawItem>,
}

impl DisplayList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub(crate) fn push(&mut self, cmd: DrawCmd, clip: Clip) {
        self.items.push(DrawItem { cmd, clip });
    }

    /// Iterates recorded shadows.
    pub fn shadows(&self) -> impl Iterator<Item = (&Path, &ShadowParams)> {
        self.items.iter().filter_map(|item| match &item.cmd {
            DrawCmd::Shadow { path, params } => Some((path, params)),
            _ => None,
        })
    }

    /// Iterates recorded fills with their clips.
    pub fn fills(&self) -> impl Iterator<Item = (&Path, Color, &Clip)> {
        self.items.iter().filter_map(|item| match &item.cmd {
            DrawCmd::FillPath { path, color } => Some((path, *color, &item.clip)),
            _ => None,
        })
    }

    /// Number of isolated layers opened in this list.
    pub fn layer_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item.cmd, DrawCmd::BeginLayer { .. }))
            .count()
    }
}
