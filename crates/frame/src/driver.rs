use std::ops::ControlFlow;

use viewfit_render::Renderer;
use viewfit_viewport::DisplaySurface;

use crate::context::{FrameContext, FrameOutcome, FrameStats};

/// Drives [`FrameContext::tick`] at a fixed simulated interval, standing in
/// for a platform animation scheduler in headless runs.
///
/// Each tick is requested only after the previous one returns, so ticks never
/// overlap.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    interval_ms: f64,
    next_ms: f64,
}

impl FrameLoop {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_ms: 0.0,
        }
    }

    /// Timestamp the next tick will receive.
    pub fn next_time_ms(&self) -> f64 {
        self.next_ms
    }

    /// Run up to `frames` ticks and return the context's running totals.
    ///
    /// `before_tick` sees the frame index and the context first, which is
    /// where a caller simulates layout or density changes. Each outcome is
    /// handed to `on_frame` as soon as it is produced and then dropped;
    /// returning [`ControlFlow::Break`] ends the loop early.
    pub fn run<S, R, B, F>(
        &mut self,
        ctx: &mut FrameContext<S, R>,
        frames: u64,
        mut before_tick: B,
        mut on_frame: F,
    ) -> FrameStats
    where
        S: DisplaySurface,
        R: Renderer,
        B: FnMut(u64, &mut FrameContext<S, R>),
        F: FnMut(u64, FrameOutcome<R::Output>) -> ControlFlow<()>,
    {
        for frame in 0..frames {
            before_tick(frame, ctx);
            let outcome = ctx.tick(self.next_ms);
            self.next_ms += self.interval_ms;
            if on_frame(frame, outcome).is_break() {
                tracing::debug!(frame, "frame loop stopped early");
                break;
            }
        }
        let stats = ctx.stats();
        tracing::debug!(frames, ?stats, "frame loop finished");
        stats
    }
}
