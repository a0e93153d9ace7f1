use viewfit_assets::PendingLoad;
use viewfit_camera::{FitMultiplier, FramingResult, PerspectiveCamera, frame_bounds};
use viewfit_render::{RenderView, Renderer};
use viewfit_viewport::{DisplaySurface, Viewport, sync_viewport};

use crate::clock::{FrameClock, FrameTime};

/// Running totals across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub resizes: u64,
    pub framings: u64,
    pub failed_loads: u64,
}

/// What happened during one tick.
#[derive(Debug)]
pub struct FrameOutcome<T> {
    pub time: FrameTime,
    /// The backing buffer was resized this tick.
    pub resized: bool,
    /// The camera was reframed around a freshly loaded model.
    pub framed: Option<FramingResult>,
    /// Whatever the renderer produced.
    pub output: T,
}

/// Everything a frame touches: surface, camera, renderer and an optional
/// model load waiting to complete.
pub struct FrameContext<S, R> {
    pub surface: S,
    pub camera: PerspectiveCamera,
    pub renderer: R,
    pending: Option<(PendingLoad, FitMultiplier)>,
    clock: FrameClock,
    stats: FrameStats,
}

impl<S, R> FrameContext<S, R>
where
    S: DisplaySurface,
    R: Renderer,
{
    pub fn new(surface: S, camera: PerspectiveCamera, renderer: R) -> Self {
        Self {
            surface,
            camera,
            renderer,
            pending: None,
            clock: FrameClock::new(),
            stats: FrameStats::default(),
        }
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// True while a model load has not delivered its result.
    pub fn has_pending_load(&self) -> bool {
        self.pending.is_some()
    }

    /// Frame the camera around `load`'s model once it completes. Replaces any
    /// load still in flight; its result is then ignored.
    pub fn load_model(&mut self, load: PendingLoad, fit: FitMultiplier) {
        if let Some((previous, _)) = &self.pending {
            tracing::debug!(model = previous.label(), "dropping unfinished model load");
        }
        self.pending = Some((load, fit));
    }

    /// Run one frame at timestamp `time_ms` (milliseconds, as an animation
    /// callback would receive).
    pub fn tick(&mut self, time_ms: f64) -> FrameOutcome<R::Output> {
        let time = self.clock.tick(time_ms);

        let resized = sync_viewport(&mut self.surface);
        let viewport = Viewport::measure(&self.surface);
        if resized {
            self.stats.resizes += 1;
            match viewport.aspect_ratio() {
                Some(aspect) => {
                    self.camera.set_aspect(aspect);
                    self.camera.update_projection();
                }
                None => tracing::debug!("surface has no area, keeping camera aspect"),
            }
        }

        let framed = self.poll_model();

        let view = RenderView::capture(time.seconds, &self.camera, &viewport);
        let output = self.renderer.render(&view);
        self.stats.frames += 1;

        FrameOutcome {
            time,
            resized,
            framed,
            output,
        }
    }

    fn poll_model(&mut self) -> Option<FramingResult> {
        let (load, fit) = self.pending.as_mut()?;
        let fit = *fit;
        let result = load.poll()?;
        let label = load.label().to_owned();
        self.pending = None;

        match result {
            Ok(bounds) => match frame_bounds(&mut self.camera, &bounds.volume(), fit) {
                Ok(framing) => {
                    self.stats.framings += 1;
                    Some(framing)
                }
                Err(e) => {
                    tracing::warn!(model = %label, error = %e, "cannot frame model");
                    None
                }
            },
            Err(e) => {
                self.stats.failed_loads += 1;
                tracing::warn!(model = %label, error = %e, "model load failed");
                None
            }
        }
    }
}
