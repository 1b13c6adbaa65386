/// Initialization parameters for the Vulkan surface.
///
/// Keep this structure small. Add configuration flags only when a concrete
/// platform requirement exists.
#[derive(Debug, Clone)]
pub struct VulkanInit {
    /// Prefer an sRGB-tagged swapchain format when several 8-bit formats are offered.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO is the only mode Vulkan guarantees.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    /// Required device features. Favor an empty set.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the swapchain. A hint.
    pub desired_maximum_frame_latency: u32,
}

impl Default for VulkanInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
