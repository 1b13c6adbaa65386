//! Presentation surfaces.
//!
//! [`Surface`] is what the frame driver talks to; [`Swapchain`] is the backend
//! seam underneath it. [`VulkanSurface`] combines the two for a native window.

mod epoch;
mod error;
mod frame;
mod init;
mod native;
mod proc_table;
mod surface;
mod swapchain;
mod vulkan_surface;
mod vulkan_window;

pub use epoch::{EpochToken, SurfaceEpoch};
pub use error::{AcquireError, PresentError, SurfaceError};
pub use frame::{SubmitCallback, SurfaceFrame};
pub use init::VulkanInit;
pub use native::NativeSurface;
pub use proc_table::ProcTable;
pub use surface::{Surface, SurfaceState};
pub use swapchain::{CompletionCallback, Swapchain};
pub use vulkan_surface::VulkanSurface;
pub use vulkan_window::{GpuContext, VulkanWindow};
