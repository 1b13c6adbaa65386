use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::coords::Size;
use crate::raster::Pixmap;

use super::{
    AcquireError, CompletionCallback, EpochToken, NativeSurface, PresentError, ProcTable, Swapchain,
    SurfaceError, VulkanInit,
};

/// Device and queue of a configured Vulkan surface.
///
/// Handed out so callers can allocate GPU resources (textures, buffers)
/// outside the layer tree.
#[derive(Debug, Clone)]
pub struct GpuContext {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    format: wgpu::TextureFormat,
}

impl GpuContext {
    #[inline]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    #[inline]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Swapchain image format.
    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

/// Vulkan swapchain bound to one native window.
///
/// Nothing touches the GPU until [`configure`](Swapchain::configure). The
/// swapchain images are (re)built lazily on acquire, whenever the requested
/// size changes or the previous acquire found them stale.
pub struct VulkanWindow {
    proc_table: Arc<ProcTable>,
    native: NativeSurface,
    init: VulkanInit,
    gpu: Option<Configured>,
    lost: Arc<AtomicBool>,
}

struct Configured {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    stale: bool,
}

impl VulkanWindow {
    pub fn new(proc_table: Arc<ProcTable>, native: NativeSurface, init: VulkanInit) -> Self {
        Self { proc_table, native, init, gpu: None, lost: Arc::new(AtomicBool::new(false)) }
    }

    #[inline]
    pub fn proc_table(&self) -> &Arc<ProcTable> {
        &self.proc_table
    }

    #[inline]
    pub fn is_configured(&self) -> bool {
        self.gpu.is_some()
    }

    fn build(&self, epoch: EpochToken) -> Result<Configured, SurfaceError> {
        let instance = self.proc_table.instance();

        let surface = instance
            .create_surface(self.native.target())
            .map_err(|err| SurfaceError::IncompatibleSurface(err.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: self.init.power_preference,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|err| SurfaceError::UnsupportedDevice(err.to_string()))?;

        let info = adapter.get_info();
        log::info!("vulkan adapter: {} ({:?})", info.name, info.device_type);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("lamina device"),
            required_features: self.init.required_features,
            required_limits: self.init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }))
        .map_err(|err| SurfaceError::UnsupportedDevice(err.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps, self.init.prefer_srgb).ok_or_else(|| {
            SurfaceError::IncompatibleSurface(format!("no 8-bit surface format in {:?}", caps.formats))
        })?;
        if !caps.usages.contains(wgpu::TextureUsages::COPY_DST) {
            return Err(SurfaceError::IncompatibleSurface(
                "swapchain images cannot be copy targets".to_owned(),
            ));
        }

        let alpha_mode = self
            .init
            .alpha_mode
            .filter(|m| caps.alpha_modes.contains(m))
            .unwrap_or_else(|| caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto));

        let present_mode = if caps.present_modes.contains(&self.init.present_mode) {
            self.init.present_mode
        } else {
            log::warn!("present mode {:?} unsupported; using Fifo", self.init.present_mode);
            wgpu::PresentMode::Fifo
        };

        let lost = Arc::clone(&self.lost);
        device.set_device_lost_callback(move |reason, message| {
            if !epoch.is_live() {
                return;
            }
            lost.store(true, Ordering::Release);
            log::error!("vulkan device lost ({reason:?}): {message}");
        });

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_DST,
            format,
            width: 1,
            height: 1,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: self.init.desired_maximum_frame_latency,
        };

        Ok(Configured {
            surface,
            device: Arc::new(device),
            queue: Arc::new(queue),
            config,
            stale: true,
        })
    }
}

impl Swapchain for VulkanWindow {
    type Image = wgpu::SurfaceTexture;
    type Context = GpuContext;

    fn configure(&mut self, epoch: EpochToken) -> Result<(), SurfaceError> {
        if self.gpu.is_some() {
            return Ok(());
        }
        let gpu = self.build(epoch)?;
        log::debug!("vulkan swapchain format {:?}", gpu.config.format);
        self.gpu = Some(gpu);
        Ok(())
    }

    #[inline]
    fn is_lost(&self) -> bool {
        self.lost.load(Ordering::Acquire)
    }

    fn acquire(&mut self, size: Size) -> Result<wgpu::SurfaceTexture, AcquireError> {
        if self.lost.load(Ordering::Acquire) {
            return Err(AcquireError::DeviceLost);
        }
        let Some(gpu) = self.gpu.as_mut() else {
            return Err(AcquireError::NotReady);
        };

        if gpu.stale || gpu.config.width != size.width || gpu.config.height != size.height {
            gpu.config.width = size.width;
            gpu.config.height = size.height;
            gpu.surface.configure(&gpu.device, &gpu.config);
            gpu.stale = false;
            log::debug!("swapchain rebuilt at {}x{}", size.width, size.height);
        }

        let texture = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.stale = true;
                return Err(AcquireError::OutOfDate);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.lost.store(true, Ordering::Release);
                return Err(AcquireError::DeviceLost);
            }
            Err(wgpu::SurfaceError::Timeout) => return Err(AcquireError::Transient),
            Err(wgpu::SurfaceError::Other) => return Err(AcquireError::Transient),
        };

        // Presenting a suboptimal image works but stretches; rebuild instead.
        if texture.suboptimal {
            gpu.stale = true;
            drop(texture);
            return Err(AcquireError::OutOfDate);
        }

        Ok(texture)
    }

    fn present(
        &mut self,
        image: wgpu::SurfaceTexture,
        pixels: &Pixmap,
        on_complete: CompletionCallback,
    ) -> Result<(), PresentError> {
        let Some(gpu) = self.gpu.as_ref() else {
            return Err(PresentError::Swapchain("swapchain is not configured".to_owned()));
        };

        let extent = image.texture.size();
        if extent.width != pixels.width() || extent.height != pixels.height() {
            return Err(PresentError::Swapchain(format!(
                "frame is {}x{} but swapchain image is {}x{}",
                pixels.width(),
                pixels.height(),
                extent.width,
                extent.height
            )));
        }

        let data: Cow<'_, [u8]> = match gpu.config.format {
            wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => {
                Cow::Owned(pixels.to_bgra())
            }
            _ => Cow::Borrowed(pixels.data()),
        };

        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &image.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(pixels.bytes_per_row()),
                rows_per_image: Some(pixels.height()),
            },
            extent,
        );

        let encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("lamina present encoder"),
        });
        gpu.queue.submit(std::iter::once(encoder.finish()));
        gpu.queue.on_submitted_work_done(on_complete);

        image.present();
        Ok(())
    }

    fn context(&self) -> Option<GpuContext> {
        self.gpu.as_ref().map(|gpu| GpuContext {
            device: Arc::clone(&gpu.device),
            queue: Arc::clone(&gpu.queue),
            format: gpu.config.format,
        })
    }
}

impl Drop for VulkanWindow {
    fn drop(&mut self) {
        if let Some(gpu) = self.gpu.as_ref() {
            // Let in-flight uploads finish before the surface goes away.
            let _ = gpu.device.poll(wgpu::PollType::wait_indefinitely());
        }
    }
}

/// Picks an 8-bit RGBA/BGRA format; the rasterizer only produces those bytes.
fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    use wgpu::TextureFormat as F;

    let srgb = [F::Bgra8UnormSrgb, F::Rgba8UnormSrgb];
    let linear = [F::Bgra8Unorm, F::Rgba8Unorm];
    let order = if prefer_srgb { [srgb, linear] } else { [linear, srgb] };

    order.into_iter().flatten().find(|f| caps.formats.contains(f))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities { formats, ..Default::default() }
    }

    #[test]
    fn srgb_preference_is_honoured() {
        let c = caps(vec![wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Bgra8UnormSrgb]);
        assert_eq!(choose_surface_format(&c, true), Some(wgpu::TextureFormat::Bgra8UnormSrgb));
        assert_eq!(choose_surface_format(&c, false), Some(wgpu::TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn wide_formats_are_rejected() {
        let c = caps(vec![wgpu::TextureFormat::Rgba16Float]);
        assert_eq!(choose_surface_format(&c, true), None);
    }
}
