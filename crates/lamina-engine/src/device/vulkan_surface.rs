use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::canvas::Canvas;
use crate::coords::Size;
use crate::raster::rasterize;

use super::swapchain::FrameSlot;
use super::{
    AcquireError, EpochToken, NativeSurface, PresentError, ProcTable, Surface, SurfaceEpoch,
    SurfaceError, SurfaceFrame, SurfaceState, Swapchain, VulkanInit, VulkanWindow,
};

/// Vulkan-backed presentation surface.
///
/// Frames are rasterized on submit and uploaded into the acquired swapchain
/// image. At most one frame is outstanding at a time. Completion callbacks and
/// outstanding frames refer back to the surface only through an [`EpochToken`],
/// so they turn into no-ops once the surface is dropped.
pub struct VulkanSurface<W: Swapchain = VulkanWindow> {
    window: Arc<Mutex<W>>,
    state: SurfaceState,
    slot: FrameSlot,
    epoch: SurfaceEpoch,
    completed: Arc<AtomicU64>,
    presented: Arc<AtomicU64>,
}

impl VulkanSurface<VulkanWindow> {
    /// Binds a surface to `native`. No GPU work happens until [`Surface::setup`].
    pub fn new(proc_table: Arc<ProcTable>, native: NativeSurface, init: VulkanInit) -> Self {
        Self::with_swapchain(VulkanWindow::new(proc_table, native, init))
    }

    pub fn proc_table(&self) -> Arc<ProcTable> {
        Arc::clone(self.window.lock().proc_table())
    }
}

impl<W: Swapchain> VulkanSurface<W> {
    pub fn with_swapchain(window: W) -> Self {
        let epoch = SurfaceEpoch::new();
        log::debug!("surface {} created", epoch.generation());
        Self {
            window: Arc::new(Mutex::new(window)),
            state: SurfaceState::Uninitialized,
            slot: FrameSlot::default(),
            epoch,
            completed: Arc::new(AtomicU64::new(0)),
            presented: Arc::new(AtomicU64::new(0)),
        }
    }

    #[inline]
    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    /// Frames whose GPU work has finished.
    #[inline]
    pub fn frames_completed(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    /// Frames handed to the swapchain for presentation.
    #[inline]
    pub fn frames_presented(&self) -> u64 {
        self.presented.load(Ordering::Acquire)
    }

    /// True while an acquired frame has not been disposed.
    #[inline]
    pub fn frame_in_flight(&self) -> bool {
        self.slot.is_claimed()
    }

    #[inline]
    pub fn epoch_token(&self) -> EpochToken {
        self.epoch.token()
    }

    /// Runs `f` with the backend locked.
    pub fn with_swapchain_mut<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.window.lock())
    }

    fn invalidate(&mut self, err: SurfaceError) {
        if !matches!(self.state, SurfaceState::Invalid(_)) {
            log::error!("surface {} invalidated: {err}", self.epoch.generation());
            self.state = SurfaceState::Invalid(err);
        }
    }
}

impl<W> Surface for VulkanSurface<W>
where
    W: Swapchain + 'static,
{
    type Context = W::Context;

    fn setup(&mut self) -> Result<(), SurfaceError> {
        match &self.state {
            SurfaceState::Ready => return Ok(()),
            SurfaceState::Invalid(err) => return Err(err.clone()),
            SurfaceState::Uninitialized => {}
        }

        let result = self.window.lock().configure(self.epoch.token());
        match result {
            Ok(()) => {
                log::info!("surface {} ready", self.epoch.generation());
                self.state = SurfaceState::Ready;
                Ok(())
            }
            Err(err) => {
                self.invalidate(err.clone());
                Err(err)
            }
        }
    }

    fn is_valid(&self) -> bool {
        matches!(self.state, SurfaceState::Ready) && !self.window.lock().is_lost()
    }

    fn acquire_frame(&mut self, size: Size) -> Result<SurfaceFrame, AcquireError> {
        match self.state {
            SurfaceState::Ready => {}
            SurfaceState::Uninitialized => return Err(AcquireError::NotReady),
            SurfaceState::Invalid(_) => return Err(AcquireError::Invalid),
        }
        if self.window.lock().is_lost() {
            self.invalidate(SurfaceError::DeviceLost);
            return Err(AcquireError::DeviceLost);
        }
        if size.is_empty() {
            return Err(AcquireError::EmptySize);
        }

        let claim = self.slot.claim().ok_or(AcquireError::FrameInFlight)?;

        let acquired = self.window.lock().acquire(size);
        let image = match acquired {
            Ok(image) => image,
            Err(AcquireError::DeviceLost) => {
                self.invalidate(SurfaceError::DeviceLost);
                return Err(AcquireError::DeviceLost);
            }
            Err(err) => {
                log::debug!("acquire skipped: {err}");
                return Err(err);
            }
        };

        let window = Arc::clone(&self.window);
        let token = self.epoch.token();
        let completed = Arc::clone(&self.completed);
        let presented = Arc::clone(&self.presented);

        let submit = move |canvas: &Canvas| -> Result<(), PresentError> {
            // Held until the image is back with the swapchain.
            let _claim = claim;

            let mut window = window.lock();
            if !token.is_live() {
                window.discard(image);
                return Err(PresentError::Revoked);
            }

            let pixels = rasterize(canvas.display_list(), canvas.size());
            let done = token.clone();
            window.present(
                image,
                &pixels,
                Box::new(move || {
                    if done.is_live() {
                        completed.fetch_add(1, Ordering::AcqRel);
                    }
                }),
            )?;
            presented.fetch_add(1, Ordering::AcqRel);
            Ok(())
        };

        Ok(SurfaceFrame::new(size, Box::new(submit)))
    }

    fn context(&self) -> Option<W::Context> {
        match self.state {
            SurfaceState::Ready => self.window.lock().context(),
            _ => None,
        }
    }
}

impl<W: Swapchain> Drop for VulkanSurface<W> {
    fn drop(&mut self) {
        self.epoch.revoke();
        log::debug!("surface {} destroyed", self.epoch.generation());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;
    use crate::device::CompletionCallback;
    use crate::logging::init_test_logging;
    use crate::raster::Pixmap;

    #[derive(Default)]
    struct FakeSwapchain {
        configures: u32,
        allocations: u32,
        fail_configure: Option<SurfaceError>,
        next_acquire_error: Option<AcquireError>,
        lost: bool,
        presented: Vec<Pixmap>,
        discarded: u32,
        pending: Vec<CompletionCallback>,
    }

    impl FakeSwapchain {
        fn complete_all(&mut self) {
            for done in self.pending.drain(..) {
                done();
            }
        }
    }

    impl Swapchain for FakeSwapchain {
        type Image = Size;
        type Context = u32;

        fn configure(&mut self, _epoch: EpochToken) -> Result<(), SurfaceError> {
            self.configures += 1;
            if let Some(err) = self.fail_configure.clone() {
                return Err(err);
            }
            self.allocations += 1;
            Ok(())
        }

        fn is_lost(&self) -> bool {
            self.lost
        }

        fn acquire(&mut self, size: Size) -> Result<Size, AcquireError> {
            match self.next_acquire_error.take() {
                Some(err) => Err(err),
                None => Ok(size),
            }
        }

        fn present(
            &mut self,
            _image: Size,
            pixels: &Pixmap,
            on_complete: CompletionCallback,
        ) -> Result<(), PresentError> {
            self.presented.push(pixels.clone());
            self.pending.push(on_complete);
            Ok(())
        }

        fn discard(&mut self, _image: Size) {
            self.discarded += 1;
        }

        fn context(&self) -> Option<u32> {
            Some(self.allocations)
        }
    }

    fn surface_with(fake: FakeSwapchain) -> VulkanSurface<FakeSwapchain> {
        init_test_logging();
        VulkanSurface::with_swapchain(fake)
    }

    fn ready() -> VulkanSurface<FakeSwapchain> {
        let mut surface = surface_with(FakeSwapchain::default());
        surface.setup().unwrap();
        surface
    }

    // ── setup ─────────────────────────────────────────────────────────────

    #[test]
    fn setup_is_idempotent() {
        let mut surface = ready();
        surface.setup().unwrap();
        surface.setup().unwrap();
        assert!(surface.is_valid());
        surface.with_swapchain_mut(|w| {
            assert_eq!(w.configures, 1);
            assert_eq!(w.allocations, 1);
        });
    }

    #[test]
    fn failed_setup_is_sticky() {
        let fake = FakeSwapchain {
            fail_configure: Some(SurfaceError::UnsupportedDevice("none".into())),
            ..FakeSwapchain::default()
        };
        let mut surface = surface_with(fake);
        let first = surface.setup().unwrap_err();
        let second = surface.setup().unwrap_err();
        assert_eq!(first, second);
        assert!(!surface.is_valid());
        assert_eq!(surface.acquire_frame(Size::new(4, 4)).unwrap_err(), AcquireError::Invalid);
        surface.with_swapchain_mut(|w| assert_eq!(w.configures, 1));
    }

    #[test]
    fn acquire_before_setup_is_rejected() {
        let mut surface = surface_with(FakeSwapchain::default());
        assert!(!surface.is_valid());
        assert!(surface.context().is_none());
        assert_eq!(surface.acquire_frame(Size::new(4, 4)).unwrap_err(), AcquireError::NotReady);
    }

    #[test]
    fn context_after_setup() {
        let surface = ready();
        assert_eq!(surface.context(), Some(1));
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn second_acquire_fails_while_a_frame_is_outstanding() {
        let mut surface = ready();
        let frame = surface.acquire_frame(Size::new(8, 8)).unwrap();
        assert!(surface.frame_in_flight());
        assert_eq!(surface.acquire_frame(Size::new(8, 8)).unwrap_err(), AcquireError::FrameInFlight);

        frame.submit().unwrap();
        assert!(!surface.frame_in_flight());
        assert!(surface.acquire_frame(Size::new(8, 8)).is_ok());
    }

    #[test]
    fn dropped_frame_is_presented_once() {
        let mut surface = ready();
        {
            let mut frame = surface.acquire_frame(Size::new(4, 4)).unwrap();
            frame.canvas().draw_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::RED);
        }
        assert_eq!(surface.frames_presented(), 1);
        surface.with_swapchain_mut(|w| {
            assert_eq!(w.presented.len(), 1);
            assert_eq!(w.presented[0].pixel(2, 2), Some([255, 0, 0, 255]));
        });
    }

    #[test]
    fn completion_is_counted_while_the_surface_lives() {
        let mut surface = ready();
        surface.acquire_frame(Size::new(4, 4)).unwrap().submit().unwrap();
        assert_eq!(surface.frames_completed(), 0);
        surface.with_swapchain_mut(FakeSwapchain::complete_all);
        assert_eq!(surface.frames_completed(), 1);
    }

    #[test]
    fn frame_outliving_its_surface_is_not_presented() {
        let mut surface = ready();
        let frame = surface.acquire_frame(Size::new(4, 4)).unwrap();
        let window = Arc::clone(&surface.window);
        drop(surface);

        assert_eq!(frame.submit().unwrap_err(), PresentError::Revoked);
        let w = window.lock();
        assert!(w.presented.is_empty());
        assert_eq!(w.discarded, 1);
    }

    #[test]
    fn completion_after_drop_is_ignored() {
        let mut surface = ready();
        surface.acquire_frame(Size::new(4, 4)).unwrap().submit().unwrap();
        let window = Arc::clone(&surface.window);
        let completed = Arc::clone(&surface.completed);
        drop(surface);

        window.lock().complete_all();
        assert_eq!(completed.load(Ordering::Acquire), 0);
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn empty_size_is_rejected_without_claiming() {
        let mut surface = ready();
        assert_eq!(surface.acquire_frame(Size::new(0, 10)).unwrap_err(), AcquireError::EmptySize);
        assert!(!surface.frame_in_flight());
    }

    #[test]
    fn out_of_date_keeps_the_surface_valid() {
        let mut surface = ready();
        surface.with_swapchain_mut(|w| w.next_acquire_error = Some(AcquireError::OutOfDate));
        assert_eq!(surface.acquire_frame(Size::new(4, 4)).unwrap_err(), AcquireError::OutOfDate);
        assert!(surface.is_valid());
        assert!(!surface.frame_in_flight());
        assert!(surface.acquire_frame(Size::new(4, 4)).is_ok());
    }

    #[test]
    fn device_loss_invalidates_permanently() {
        let mut surface = ready();
        surface.with_swapchain_mut(|w| w.next_acquire_error = Some(AcquireError::DeviceLost));
        assert_eq!(surface.acquire_frame(Size::new(4, 4)).unwrap_err(), AcquireError::DeviceLost);
        assert!(!surface.is_valid());
        assert_eq!(surface.state(), &SurfaceState::Invalid(SurfaceError::DeviceLost));
        assert_eq!(surface.setup().unwrap_err(), SurfaceError::DeviceLost);
        assert_eq!(surface.acquire_frame(Size::new(4, 4)).unwrap_err(), AcquireError::Invalid);
    }

    #[test]
    fn lost_flag_is_observed_by_is_valid() {
        let mut surface = ready();
        surface.with_swapchain_mut(|w| w.lost = true);
        assert!(!surface.is_valid());
        assert_eq!(surface.acquire_frame(Size::new(4, 4)).unwrap_err(), AcquireError::DeviceLost);
    }
}
