//! Frame driver: the explicit replacement for a request-and-reschedule
//! animation callback.
//!
//! # Invariants
//! - One tick runs at a time; nothing here is shared across threads.
//! - Each tick syncs the viewport before rendering, and updates the camera
//!   aspect only when the sync resized the backing buffer.
//! - A completed model load frames the camera exactly once; a failed load
//!   leaves the camera as it was.

pub mod clock;
pub mod config;
pub mod context;
pub mod driver;

pub use clock::{FrameClock, FrameTime};
pub use config::{CameraConfig, CanvasConfig, ConfigError, ViewerConfig};
pub use context::{FrameContext, FrameOutcome, FrameStats};
pub use driver::FrameLoop;

pub fn crate_info() -> &'static str {
    "viewfit-frame v0.1.0"
}
