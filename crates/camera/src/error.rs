/// Errors from camera configuration and framing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),
    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspect(f32),
    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    InvalidClipPlanes { near: f32, far: f32 },
    #[error("bounding volume size must be positive and finite, got {0}")]
    InvalidBoxSize(f32),
    #[error("fit multiplier must be finite and at least 1, got {0}")]
    InvalidFitMultiplier(f32),
}
