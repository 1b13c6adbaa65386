use crate::coords::Size;

use super::{AcquireError, SurfaceError, SurfaceFrame};

/// Lifecycle of a surface.
///
/// `Uninitialized → Ready` on successful setup, `→ Invalid` on any
/// unrecoverable failure. There is no way back to `Ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceState {
    Uninitialized,
    Ready,
    Invalid(SurfaceError),
}

/// Capability set a frame driver needs from a presentation target.
///
/// Driver contract:
/// 1. call [`setup`](Self::setup) once, then check [`is_valid`](Self::is_valid)
/// 2. per frame: [`acquire_frame`](Self::acquire_frame), draw into the frame's
///    canvas, dispose the frame (presents)
/// 3. after any acquire failure, check `is_valid` before requesting more frames
///
/// All calls belong on the execution context that owns the GPU device.
pub trait Surface {
    /// Opaque handle to the graphics context, for resource allocation outside the layer tree.
    type Context;

    /// One-time GPU initialization. Repeated calls after success are no-ops;
    /// after a failure every call returns that same failure.
    fn setup(&mut self) -> Result<(), SurfaceError>;

    /// Whether the surface can currently produce frames. Side-effect free.
    fn is_valid(&self) -> bool;

    /// Acquires a drawable target of `size` pixels. At most one frame may be
    /// outstanding; a second acquire fails with [`AcquireError::FrameInFlight`].
    fn acquire_frame(&mut self, size: Size) -> Result<SurfaceFrame, AcquireError>;

    /// `None` until setup succeeds.
    fn context(&self) -> Option<Self::Context>;
}
