//! Lamina flow crate.
//!
//! A tree of layers drawn in two passes per frame: preroll computes paint
//! bounds, paint records into the frame's canvas. [`FrameDriver`] runs both
//! passes against a [`Surface`](lamina_engine::device::Surface).
//!
//! ```rust,ignore
//! use lamina_flow::prelude::*;
//!
//! let card = PhysicalModelLayer::new(RRect::from_rect_radius(rect, 8.0), Color::WHITE, 2.0)
//!     .child(PictureLayer::new().rect(icon, Color::RED));
//! let mut tree = LayerTree::new(card, Size::new(800, 600));
//!
//! let mut driver = FrameDriver::new(surface, DriverConfig::default());
//! driver.setup()?;
//! driver.draw_frame(&mut tree)?;
//! ```

pub mod context;
pub mod driver;
pub mod layer;
pub mod layers;
pub mod tree;

pub use context::{PaintContext, PrerollContext};
pub use driver::{DriverConfig, FrameDriver, FrameOutcome};
pub use layer::Layer;
pub use tree::LayerTree;

pub mod prelude {
    pub use crate::driver::{DriverConfig, FrameDriver, FrameOutcome};
    pub use crate::layer::Layer;
    pub use crate::layers::{
        ClipRectLayer, ContainerLayer, PhysicalModelLayer, PictureLayer, TransformLayer,
    };
    pub use crate::tree::LayerTree;
    pub use lamina_engine::coords::{CornerRadii, RRect, Rect, Size, Transform, Vec2};
    pub use lamina_engine::paint::Color;
}
