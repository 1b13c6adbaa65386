use std::sync::Arc;

use raw_window_handle::{HandleError, HasDisplayHandle, HasWindowHandle, RawWindowHandle};

/// Platform window the Vulkan surface presents into.
///
/// Holds any raw-window-handle provider (a winit window, an SDL window, ...)
/// behind an `Arc`, so the surface can outlive the borrow it was created from.
#[derive(Clone)]
pub struct NativeSurface {
    handle: Arc<dyn wgpu::WindowHandle>,
}

impl NativeSurface {
    pub fn new<H>(handle: H) -> Self
    where
        H: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        Self { handle: Arc::new(handle) }
    }

    pub fn from_arc(handle: Arc<dyn wgpu::WindowHandle>) -> Self {
        Self { handle }
    }

    /// Raw platform handle, for diagnostics.
    pub fn raw_window_handle(&self) -> Result<RawWindowHandle, HandleError> {
        self.handle.window_handle().map(|h| h.as_raw())
    }

    pub(crate) fn target(&self) -> wgpu::SurfaceTarget<'static> {
        wgpu::SurfaceTarget::from(Arc::clone(&self.handle))
    }
}

impl std::fmt::Debug for NativeSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeSurface")
            .field("raw", &self.raw_window_handle().ok())
            .finish()
    }
}
