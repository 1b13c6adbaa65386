use crate::canvas::Canvas;
use crate::coords::Size;

use super::PresentError;

/// Presents a finished canvas. Invoked at most once.
pub type SubmitCallback = Box<dyn FnOnce(&Canvas) -> Result<(), PresentError>>;

/// A single acquired frame.
///
/// Owns the canvas the paint pass draws into. Disposal presents: either call
/// [`submit`](Self::submit) to observe the result, or drop the frame and let
/// it present with errors logged. Either way the swapchain image is handed
/// back exactly once.
pub struct SurfaceFrame {
    canvas: Canvas,
    submit: Option<SubmitCallback>,
}

impl SurfaceFrame {
    pub fn new(size: Size, submit: SubmitCallback) -> Self {
        Self { canvas: Canvas::new(size), submit: Some(submit) }
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.canvas.size()
    }

    /// Drawing target for the paint pass.
    #[inline]
    pub fn canvas(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Presents the frame and reports the outcome.
    pub fn submit(mut self) -> Result<(), PresentError> {
        self.finish()
    }

    fn finish(&mut self) -> Result<(), PresentError> {
        match self.submit.take() {
            Some(submit) => submit(&self.canvas),
            None => Ok(()),
        }
    }
}

impl Drop for SurfaceFrame {
    fn drop(&mut self) {
        if self.submit.is_none() {
            return;
        }
        match self.finish() {
            Ok(()) => {}
            Err(PresentError::Revoked) => log::debug!("frame dropped after its surface; not presented"),
            Err(err) => log::warn!("presenting dropped frame failed: {err}"),
        }
    }
}

impl std::fmt::Debug for SurfaceFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceFrame")
            .field("size", &self.size())
            .field("submitted", &self.submit.is_none())
            .finish()
    }
}
