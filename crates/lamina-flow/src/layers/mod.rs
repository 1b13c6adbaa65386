//! Concrete layer kinds.

mod clip_rect;
mod container;
mod physical_model;
mod picture;
mod transform;

pub use clip_rect::ClipRectLayer;
pub use container::ContainerLayer;
pub use physical_model::{
    shadow_params, PhysicalModelLayer, AMBIENT_ALPHA, ELEVATION_TO_Z, LIGHT_POS, LIGHT_RADIUS,
    SHADOW_MARGIN, SPOT_ALPHA,
};
pub use picture::PictureLayer;
pub use transform::TransformLayer;
