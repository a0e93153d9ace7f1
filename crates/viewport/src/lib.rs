//! Viewport Synchronizer: backing buffer resolution follows CSS size times
//! device pixel ratio.
//!
//! # Invariants
//! - After a sync the backing size equals `floor(client * device_pixel_ratio)`.
//! - The CSS layout size of the surface is never written.
//! - A second sync with unchanged measurements reports no resize.
//!
//! Callers must update the camera aspect ratio if and only if a sync reports
//! a resize; see [`sync_viewport`].

mod surface;
mod sync;

pub use surface::{CanvasSurface, DisplaySurface};
pub use sync::{Viewport, sync_viewport};

pub fn crate_info() -> &'static str {
    "viewfit-viewport v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("viewport"));
    }
}
