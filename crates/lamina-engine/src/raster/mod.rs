//! CPU reference rasterizer.
//!
//! Turns a recorded [`DisplayList`](crate::canvas::DisplayList) into
//! premultiplied RGBA pixels. Presentation backends upload the result into the
//! swapchain image; tests inspect it directly.

mod blend;
mod pixmap;
mod rasterize;

pub use pixmap::Pixmap;
pub use rasterize::rasterize;
