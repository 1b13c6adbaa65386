//! Paint model shared between layers and the rasterizer.
//!
//! Scope is deliberately narrow: solid colors only. Geometry lives in `coords`.

pub mod color;

pub use color::Color;
