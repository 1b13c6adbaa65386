use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const REVOKED: u64 = 0;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Liveness marker owned by a surface.
///
/// Asynchronous callbacks (GPU work completion, device loss) and outstanding
/// frames hold an [`EpochToken`] instead of a reference to the surface. Once
/// the epoch is revoked, which happens when the surface is dropped, every
/// token reports dead and the callbacks do nothing.
#[derive(Debug)]
pub struct SurfaceEpoch {
    current: Arc<AtomicU64>,
    generation: u64,
}

impl SurfaceEpoch {
    pub fn new() -> Self {
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        Self { current: Arc::new(AtomicU64::new(generation)), generation }
    }

    /// Unique, non-zero id of this epoch.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn token(&self) -> EpochToken {
        EpochToken { current: Arc::clone(&self.current), generation: self.generation }
    }

    /// Invalidates every token. Idempotent.
    pub fn revoke(&self) {
        self.current.store(REVOKED, Ordering::Release);
    }

    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.generation
    }
}

impl Default for SurfaceEpoch {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SurfaceEpoch {
    fn drop(&mut self) {
        self.revoke();
    }
}

/// Cheap, `Send` handle checked by callbacks before acting.
#[derive(Debug, Clone)]
pub struct EpochToken {
    current: Arc<AtomicU64>,
    generation: u64,
}

impl EpochToken {
    #[inline]
    pub fn is_live(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
