use std::time::{Duration, Instant};

/// Wall-clock cost of the phases of one frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PassTimings {
    pub preroll: Duration,
    pub paint: Duration,
    /// Rasterize, upload and present.
    pub present: Duration,
}

impl PassTimings {
    #[inline]
    pub fn total(&self) -> Duration {
        self.preroll + self.paint + self.present
    }

    pub fn exceeds(&self, budget: Duration) -> bool {
        self.total() > budget
    }
}

/// Runs `f` and returns its result together with the elapsed time.
pub fn timed<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_phases() {
        let t = PassTimings {
            preroll: Duration::from_millis(1),
            paint: Duration::from_millis(2),
            present: Duration::from_millis(3),
        };
        assert_eq!(t.total(), Duration::from_millis(6));
        assert!(t.exceeds(Duration::from_millis(5)));
        assert!(!t.exceeds(Duration::from_millis(6)));
    }

    #[test]
    fn timed_returns_value() {
        let (v, _elapsed) = timed(|| 7);
        assert_eq!(v, 7);
    }
}
