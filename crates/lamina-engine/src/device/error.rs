use thiserror::Error;

/// Expected failure while setting up a surface.
///
/// Every variant leaves the surface permanently invalid; recovery means
/// constructing a new surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("native surface is incompatible: {0}")]
    IncompatibleSurface(String),

    #[error("no suitable device: {0}")]
    UnsupportedDevice(String),

    #[error("device lost")]
    DeviceLost,
}

/// Expected failure while acquiring a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    /// `setup` has not succeeded yet.
    #[error("surface is not set up")]
    NotReady,

    /// The surface is permanently invalid and must be recreated.
    #[error("surface is invalid")]
    Invalid,

    /// A previously acquired frame has not been disposed yet.
    #[error("a frame is already in flight")]
    FrameInFlight,

    #[error("requested frame size is empty")]
    EmptySize,

    /// The swapchain no longer matches the native surface. It is rebuilt on
    /// the next acquire; this frame is skipped.
    #[error("swapchain is out of date")]
    OutOfDate,

    /// Timed out or otherwise failed transiently; skip this frame.
    #[error("transient acquire failure")]
    Transient,

    /// The device was lost; the surface is now invalid.
    #[error("device lost")]
    DeviceLost,
}

impl AcquireError {
    /// True when the surface is still usable and the caller may try again
    /// on a later frame.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::FrameInFlight | Self::EmptySize | Self::OutOfDate | Self::Transient)
    }
}

/// Failure while presenting a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentError {
    /// The surface that produced the frame no longer exists; nothing was presented.
    #[error("surface was destroyed before the frame was presented")]
    Revoked,

    #[error("swapchain rejected the frame: {0}")]
    Swapchain(String),
}
