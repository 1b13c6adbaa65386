use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::coords::Size;
use crate::raster::Pixmap;

use super::{AcquireError, EpochToken, PresentError, SurfaceError};

/// Called once the GPU has finished the work for a presented frame.
/// May run on any thread.
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

/// Backend seam under a presentation surface: the rotating set of
/// presentable images bound to one native surface.
pub trait Swapchain {
    /// One acquired, not yet presented image.
    type Image: 'static;
    /// Opaque graphics context handed out by [`Surface::context`](super::Surface::context).
    type Context: Clone;

    /// Allocates device resources. Must be a no-op once it has succeeded.
    /// `epoch` gates any asynchronous callback the backend registers.
    fn configure(&mut self, epoch: EpochToken) -> Result<(), SurfaceError>;

    /// True once the device behind the swapchain is gone. Never resets.
    fn is_lost(&self) -> bool;

    /// Acquires the next image at `size`, rebuilding the swapchain first if
    /// the size changed or the previous acquire reported it out of date.
    fn acquire(&mut self, size: Size) -> Result<Self::Image, AcquireError>;

    /// Uploads `pixels` into `image`, submits and presents it, and recycles the slot.
    fn present(
        &mut self,
        image: Self::Image,
        pixels: &Pixmap,
        on_complete: CompletionCallback,
    ) -> Result<(), PresentError>;

    /// Hands back an image without presenting it.
    fn discard(&mut self, image: Self::Image) {
        drop(image);
    }

    fn context(&self) -> Option<Self::Context>;
}

/// Tracks the single outstanding frame of a surface.
#[derive(Debug, Clone, Default)]
pub(crate) struct FrameSlot(Arc<AtomicBool>);

impl FrameSlot {
    /// Claims the slot, or `None` if a frame is already outstanding.
    pub(crate) fn claim(&self) -> Option<SlotClaim> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SlotClaim(Arc::clone(&self.0)))
    }

    #[inline]
    pub(crate) fn is_claimed(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Releases the frame slot when dropped.
#[derive(Debug)]
pub(crate) struct SlotClaim(Arc<AtomicBool>);

impl Drop for SlotClaim {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
