use std::sync::Arc;

/// Shared Vulkan entry points.
///
/// Wraps a Vulkan-only instance. One table is normally created per process
/// and shared by every surface through an `Arc`.
pub struct ProcTable {
    instance: wgpu::Instance,
}

impl ProcTable {
    pub fn new() -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::VULKAN,
            ..Default::default()
        });
        log::debug!("vulkan proc table created");
        Self { instance }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    #[inline]
    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }
}

impl Default for ProcTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProcTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcTable").finish_non_exhaustive()
    }
}
