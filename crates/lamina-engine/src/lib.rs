//! Lamina engine crate.
//!
//! Geometry, the recording canvas, the CPU rasterizer and presentation
//! surfaces. The layer tree in `lamina-flow` draws through this crate and
//! never touches the GPU directly.

pub mod canvas;
pub mod coords;
pub mod device;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod time;
