//! Recording canvas.
//!
//! Responsibilities:
//! - hold transform + clip state with save/restore semantics
//! - record device-space draw items into a [`DisplayList`]
//! - scope state through [`AutoRestore`]
//!
//! Nothing here touches the GPU. The rasterizer consumes the display list.

mod list;
mod path;
mod recorder;
mod restore;
mod shadow;

pub use list::{Clip, ClipShape, DisplayList, DrawCmd, DrawItem};
pub use path::Path;
pub use recorder::Canvas;
pub use restore::AutoRestore;
pub use shadow::{LightPos, ShadowParams, SpotGeometry};
