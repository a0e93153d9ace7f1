//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers only read the camera and viewport; they never mutate them.
//! - A [`RenderView`] is a snapshot taken after viewport sync and framing.
//!
//! The actual draw dispatch belongs to whichever graphics library implements
//! [`Renderer`]. The debug and recording renderers here stand in for it in
//! headless runs and tests.

mod renderer;

pub use renderer::{DebugTextRenderer, RecordingRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "viewfit-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
