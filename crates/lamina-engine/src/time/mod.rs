//! Frame timing.
//!
//! One `FrameClock` per frame driver; `PassTimings` records what each phase cost.

mod frame_clock;
mod pass_timings;

pub use frame_clock::{FrameClock, FrameTime};
pub use pass_timings::{timed, PassTimings};
