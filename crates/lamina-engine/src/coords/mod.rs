//! Coordinate and geometry types shared by the canvas, the rasterizer and the layer tree.
//!
//! Canonical CPU space:
//! - Logical pixels, 1:1 with device pixels unless a transform says otherwise
//! - Origin top-left
//! - +X right, +Y down

mod corner_radii;
mod rect;
mod rrect;
mod size;
mod transform;
mod vec2;

pub use corner_radii::CornerRadii;
pub use rect::Rect;
pub use rrect::RRect;
pub use size::Size;
pub use transform::Transform;
pub use vec2::Vec2;
