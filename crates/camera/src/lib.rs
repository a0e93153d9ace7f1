//! Camera: perspective projection, frustum extraction, and framing a
//! bounding volume so it fills the view.
//!
//! # Invariants
//! - `0 < near < far` and `aspect > 0` for every camera accepted by
//!   [`PerspectiveCamera::validate`].
//! - The projection matrix only changes on [`PerspectiveCamera::update_projection`].
//! - Framing never produces a non-finite camera position.

mod camera;
mod error;
mod framing;
mod frustum;

pub use camera::PerspectiveCamera;
pub use error::CameraError;
pub use framing::{DEFAULT_DIRECTION, FitMultiplier, FramingResult, compute_framing, frame_bounds};
pub use frustum::Frustum;

pub fn crate_info() -> &'static str {
    "viewfit-camera v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("camera"));
    }
}
