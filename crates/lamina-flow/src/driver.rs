use std::time::Duration;

use anyhow::{bail, Context, Result};
use lamina_engine::device::{AcquireError, Surface};
use lamina_engine::paint::Color;
use lamina_engine::time::{timed, FrameClock, FrameTime, PassTimings};

use crate::tree::LayerTree;

/// Frame driver configuration.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Frames slower than this are logged as warnings.
    pub frame_budget: Duration,

    /// Cleared into the frame before the tree paints. `None` leaves the
    /// acquired image's contents undefined under the tree.
    pub clear_color: Option<Color>,

    /// Whether the backend can hand layers to a system compositor.
    /// Neither bundled backend can.
    pub supports_system_composite: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_budget: Duration::from_micros(16_667),
            clear_color: Some(Color::WHITE),
            supports_system_composite: false,
        }
    }
}

/// Result of one [`FrameDriver::draw_frame`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    Presented { frame_index: u64, timings: PassTimings },
    /// No frame was produced. Check [`FrameDriver::is_valid`] before trying again.
    Skipped(AcquireError),
}

/// Produces frames from a [`LayerTree`] into a [`Surface`].
///
/// Per frame: acquire, preroll the whole tree, paint into the frame canvas,
/// present. Deciding *when* to draw is up to the caller.
pub struct FrameDriver<S: Surface> {
    surface: S,
    config: DriverConfig,
    clock: FrameClock,
    last_frame: Option<FrameTime>,
    last_timings: Option<PassTimings>,
}

impl<S: Surface> FrameDriver<S> {
    pub fn new(surface: S, config: DriverConfig) -> Self {
        Self { surface, config, clock: FrameClock::new(), last_frame: None, last_timings: None }
    }

    /// One-time surface setup. Fails if the surface cannot produce frames.
    pub fn setup(&mut self) -> Result<()> {
        self.surface.setup().context("surface setup failed")?;
        if !self.surface.is_valid() {
            bail!("surface reported invalid right after setup");
        }
        self.clock.reset();
        Ok(())
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.surface.is_valid()
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    #[inline]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn context(&self) -> Option<S::Context> {
        self.surface.context()
    }

    #[inline]
    pub fn last_frame(&self) -> Option<FrameTime> {
        self.last_frame
    }

    #[inline]
    pub fn last_timings(&self) -> Option<PassTimings> {
        self.last_timings
    }

    /// Draws `tree` into the next frame.
    ///
    /// Acquire failures are reported as [`FrameOutcome::Skipped`]. Drawing on
    /// a surface that is already invalid is an integration error.
    pub fn draw_frame(&mut self, tree: &mut LayerTree) -> Result<FrameOutcome> {
        if !self.surface.is_valid() {
            bail!("draw_frame on an invalid surface; it must be recreated");
        }

        let mut frame = match self.surface.acquire_frame(tree.frame_size()) {
            Ok(frame) => frame,
            Err(err) => {
                if err.is_recoverable() {
                    log::debug!("frame skipped: {err}");
                } else {
                    log::warn!("frame skipped: {err}");
                }
                return Ok(FrameOutcome::Skipped(err));
            }
        };

        let time = self.clock.tick();

        let (_, preroll) = timed(|| tree.preroll());

        let (_, paint) = timed(|| {
            let canvas = frame.canvas();
            if let Some(color) = self.config.clear_color {
                canvas.clear(color);
            }
            tree.paint(canvas, self.config.supports_system_composite);
        });

        let (presented, present) = timed(|| frame.submit());
        presented.with_context(|| format!("presenting frame {} failed", time.frame_index))?;

        let timings = PassTimings { preroll, paint, present };
        if timings.exceeds(self.config.frame_budget) {
            log::warn!(
                "frame {} over budget: {:?} (preroll {:?}, paint {:?}, present {:?})",
                time.frame_index,
                timings.total(),
                preroll,
                paint,
                present
            );
        } else {
            log::trace!("frame {} took {:?}", time.frame_index, timings.total());
        }

        self.last_frame = Some(time);
        self.last_timings = Some(timings);
        Ok(FrameOutcome::Presented { frame_index: time.frame_index, timings })
    }
}
