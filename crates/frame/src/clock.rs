/// Time of one frame, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Timestamp handed to the tick, converted to seconds.
    pub seconds: f64,
    /// Seconds since the previous tick. Zero on the first tick.
    pub delta: f64,
}

/// Converts the millisecond timestamps of an animation callback into
/// seconds. No fixed timestep: deltas are whatever the scheduler delivers.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, time_ms: f64) -> FrameTime {
        let seconds = time_ms * 0.001;
        // Timestamps that go backwards yield a zero delta rather than a negative one.
        let delta = self.last.map_or(0.0, |last| (seconds - last).max(0.0));
        self.last = Some(seconds);
        FrameTime { seconds, delta }
    }
}
