use glam::Vec3;
use serde::{Deserialize, Serialize};
use viewfit_common::{BoundingVolume, LENGTH_EPSILON};

use crate::camera::{PerspectiveCamera, validate_fov};
use crate::error::CameraError;

/// Direction used when the camera sits exactly on the volume center.
pub const DEFAULT_DIRECTION: Vec3 = Vec3::Z;

/// How much larger than the volume the framed area is. `1.2` leaves 20%
/// margin above and below the volume.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct FitMultiplier(f32);

impl FitMultiplier {
    pub const DEFAULT: Self = Self(1.2);
    pub const EXACT: Self = Self(1.0);

    pub fn new(value: f32) -> Result<Self, CameraError> {
        if value.is_finite() && value >= 1.0 {
            Ok(Self(value))
        } else {
            Err(CameraError::InvalidFitMultiplier(value))
        }
    }

    /// Smallest margin that keeps the whole volume on screen for a camera
    /// with vertical field of view `fov_degrees` and an aspect of at least 1:
    /// `max(1, 1 / cos(fov / 2))`.
    pub fn whole_volume(fov_degrees: f32) -> Result<Self, CameraError> {
        validate_fov(fov_degrees)?;
        let half_fov = fov_degrees.to_radians() * 0.5;
        Self::new((1.0 / half_fov.cos()).max(1.0))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for FitMultiplier {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for FitMultiplier {
    type Error = CameraError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FitMultiplier> for f32 {
    fn from(fit: FitMultiplier) -> f32 {
        fit.0
    }
}

/// Camera configuration that frames a bounding volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FramingResult {
    /// Extent that fills the vertical field of view.
    pub size_to_fit: f32,
    /// Distance from the volume center to the new camera position.
    pub distance: f32,
    /// Unit vector from the volume center toward the camera.
    pub direction: Vec3,
    pub position: Vec3,
    pub target: Vec3,
    pub near: f32,
    pub far: f32,
    /// Set when the camera was on the volume center and
    /// [`DEFAULT_DIRECTION`] was used.
    pub used_fallback: bool,
}

/// Compute where a camera with vertical field of view `fov_degrees`,
/// currently at `camera_position`, must move to frame `volume`.
///
/// The camera keeps its viewing angle relative to the volume and backs off to
/// the distance at which `volume.size * fit` exactly spans the vertical field
/// of view. Clip planes are scaled to the volume so it always lies between
/// them.
pub fn compute_framing(
    volume: &BoundingVolume,
    fit: FitMultiplier,
    camera_position: Vec3,
    fov_degrees: f32,
) -> Result<FramingResult, CameraError> {
    if !(volume.size.is_finite() && volume.size > 0.0) {
        return Err(CameraError::InvalidBoxSize(volume.size));
    }
    validate_fov(fov_degrees)?;

    let size_to_fit = volume.size * fit.get();
    let half_size_to_fit = size_to_fit * 0.5;
    let half_fov = fov_degrees.to_radians() * 0.5;
    let distance = half_size_to_fit / half_fov.tan();

    let offset = camera_position - volume.center;
    let length = offset.length();
    let (direction, used_fallback) = if length.is_finite() && length > LENGTH_EPSILON {
        (offset / length, false)
    } else {
        tracing::warn!(
            ?camera_position,
            center = ?volume.center,
            "camera coincides with volume center, framing along +Z"
        );
        (DEFAULT_DIRECTION, true)
    };

    Ok(FramingResult {
        size_to_fit,
        distance,
        direction,
        position: volume.center + direction * distance,
        target: volume.center,
        near: volume.size / 100.0,
        far: volume.size * 100.0,
        used_fallback,
    })
}

/// Move `camera` so `volume` fills its view with the given margin, update
/// its clip planes and projection, and aim it at the volume center.
///
/// `volume.size * fit` spans the vertical field of view, which keeps every
/// point of the volume on screen only while `fit >= 1 / cos(fov / 2)`, the
/// aspect is at least 1 and the fov stays below roughly 157 degrees (past
/// that the near plane cuts in). With the default 1.2 margin that holds up
/// to a fov of about 67 degrees; wider cameras can clip the corners of the
/// volume. [`FitMultiplier::whole_volume`] gives the margin for a given fov.
///
/// On error the camera is left untouched.
pub fn frame_bounds(
    camera: &mut PerspectiveCamera,
    volume: &BoundingVolume,
    fit: FitMultiplier,
) -> Result<FramingResult, CameraError> {
    let result = compute_framing(volume, fit, camera.position, camera.fov_degrees())?;

    camera.position = result.position;
    camera.set_clip_planes(result.near, result.far);
    camera.update_projection();
    camera.look_at(result.target);

    tracing::info!(
        size = volume.size,
        distance = result.distance,
        near = result.near,
        far = result.far,
        "framed bounding volume"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewfit_common::Aabb;

    fn fit(value: f32) -> FitMultiplier {
        FitMultiplier::new(value).unwrap()
    }

    #[test]
    fn city_model_example() {
        let volume = BoundingVolume::new(Vec3::ZERO, 10.0);
        let r = compute_framing(&volume, fit(1.2), Vec3::new(0.0, 10.0, 20.0), 90.0).unwrap();

        assert!((r.size_to_fit - 12.0).abs() < 1e-5);
        assert!((r.distance - 6.0).abs() < 1e-5);
        assert!(r.direction.abs_diff_eq(Vec3::new(0.0, 0.447_213_6, 0.894_427_2), 1e-5));
        assert!(r.position.abs_diff_eq(Vec3::new(0.0, 2.683_281_6, 5.366_563), 1e-4));
        assert!((r.near - 0.1).abs() < 1e-6);
        assert!((r.far - 1000.0).abs() < 1e-3);
        assert!(!r.used_fallback);
    }

    #[test]
    fn clip_planes_scale_with_size() {
        for size in [0.001_f32, 0.5, 1.0, 37.0, 1.0e4] {
            let volume = BoundingVolume::new(Vec3::ONE, size);
            let r = compute_framing(&volume, fit(1.0), Vec3::new(5.0, 5.0, 5.0), 60.0).unwrap();
            assert!(r.distance > 0.0);
            assert_eq!(r.near, size / 100.0);
            assert_eq!(r.far, size * 100.0);
            assert!(r.near < r.far);
        }
    }

    #[test]
    fn distance_grows_with_fit_multiplier() {
        let volume = BoundingVolume::new(Vec3::ZERO, 4.0);
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let mut last = 0.0;
        for m in [1.0_f32, 1.1, 1.2, 1.5, 2.0, 3.0] {
            let d = compute_framing(&volume, fit(m), eye, 50.0).unwrap().distance;
            assert!(d > last, "distance {d} should exceed {last}");
            last = d;
        }
    }

    #[test]
    fn viewing_direction_is_preserved() {
        let center = Vec3::new(3.0, -2.0, 7.0);
        let volume = BoundingVolume::new(center, 8.0);
        for eye in [
            Vec3::new(0.0, 10.0, 20.0),
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(3.0, 50.0, 7.0),
            Vec3::new(3.0, -2.0, 7.5),
        ] {
            let r = compute_framing(&volume, fit(1.2), eye, 75.0).unwrap();
            let before = (eye - center).normalize();
            let after = (r.position - center).normalize();
            assert!(before.abs_diff_eq(after, 1e-5));
        }
    }

    #[test]
    fn camera_on_center_uses_default_direction() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let volume = BoundingVolume::new(center, 10.0);
        let r = compute_framing(&volume, fit(1.2), center, 90.0).unwrap();

        assert!(r.used_fallback);
        assert_eq!(r.direction, DEFAULT_DIRECTION);
        assert!(r.position.is_finite());
        assert!(r.position.abs_diff_eq(center + Vec3::new(0.0, 0.0, 6.0), 1e-4));
    }

    #[test]
    fn non_finite_camera_position_uses_default_direction() {
        let volume = BoundingVolume::new(Vec3::ZERO, 2.0);
        let r = compute_framing(&volume, fit(1.0), Vec3::splat(f32::NAN), 60.0).unwrap();
        assert!(r.used_fallback);
        assert!(r.position.is_finite());
    }

    #[test]
    fn rejects_invalid_inputs() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        assert_eq!(
            compute_framing(&BoundingVolume::new(Vec3::ZERO, 0.0), fit(1.2), eye, 60.0),
            Err(CameraError::InvalidBoxSize(0.0))
        );
        let volume = BoundingVolume::new(Vec3::ZERO, 1.0);
        assert_eq!(
            compute_framing(&volume, fit(1.2), eye, 180.0),
            Err(CameraError::InvalidFieldOfView(180.0))
        );
        assert_eq!(
            FitMultiplier::new(0.9),
            Err(CameraError::InvalidFitMultiplier(0.9))
        );
        assert!(FitMultiplier::new(f32::NAN).is_err());
    }

    #[test]
    fn frame_bounds_updates_camera() {
        let mut cam = PerspectiveCamera::new(90.0, 2.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 10.0, 20.0);
        let volume = BoundingVolume::new(Vec3::new(0.0, 5.0, 0.0), 50.0);

        let r = frame_bounds(&mut cam, &volume, FitMultiplier::DEFAULT).unwrap();

        assert_eq!(cam.position, r.position);
        assert_eq!(cam.target(), volume.center);
        assert_eq!(cam.near(), 0.5);
        assert_eq!(cam.far(), 5000.0);
        assert!(!cam.projection_dirty());
        assert!(cam.validate().is_ok());
    }

    #[test]
    fn frame_bounds_leaves_camera_on_error() {
        let mut cam = PerspectiveCamera::new(90.0, 2.0, 0.1, 1000.0);
        cam.position = Vec3::new(0.0, 10.0, 20.0);
        let volume = BoundingVolume::new(Vec3::ZERO, 0.0);

        assert!(frame_bounds(&mut cam, &volume, FitMultiplier::DEFAULT).is_err());
        assert_eq!(cam.position, Vec3::new(0.0, 10.0, 20.0));
        assert_eq!(cam.near(), 0.1);
    }

    #[test]
    fn framed_box_is_inside_frustum() {
        let boxes = [
            Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)),
            Aabb::new(Vec3::new(100.0, 0.0, -40.0), Vec3::new(180.0, 12.0, 30.0)),
            Aabb::new(Vec3::new(-0.02, -0.01, 0.0), Vec3::new(0.01, 0.03, 0.005)),
        ];
        let eyes = [
            Vec3::new(0.0, 10.0, 20.0),
            Vec3::new(-30.0, 5.0, 1.0),
            Vec3::new(0.0, 40.0, 0.0),
        ];
        for aabb in &boxes {
            let volume = BoundingVolume::from_aabb(aabb).unwrap();
            for &eye in &eyes {
                for fov in [45.0_f32, 60.0] {
                    let mut cam = PerspectiveCamera::new(fov, 1.5, 0.1, 1000.0);
                    cam.position = eye;
                    frame_bounds(&mut cam, &volume, FitMultiplier::DEFAULT).unwrap();
                    assert!(
                        cam.frustum().contains_aabb(aabb),
                        "box {aabb:?} not visible from {eye:?} at fov {fov}"
                    );
                }
            }
        }
    }

    #[test]
    fn negative_size_is_reported_as_given() {
        let volume = BoundingVolume::new(Vec3::ZERO, -3.0);
        assert_eq!(
            compute_framing(&volume, fit(1.2), Vec3::new(0.0, 0.0, 10.0), 60.0),
            Err(CameraError::InvalidBoxSize(-3.0))
        );
    }

    fn cube_framed_at(fov: f32, fit: FitMultiplier) -> (PerspectiveCamera, Aabb) {
        let aabb = Aabb::new(Vec3::splat(-5.0), Vec3::splat(5.0));
        let mut cam = PerspectiveCamera::new(fov, 1.5, 0.1, 1000.0);
        cam.position = Vec3::new(1.0, 2.0, 0.3);
        frame_bounds(&mut cam, &BoundingVolume::from_aabb(&aabb).unwrap(), fit).unwrap();
        (cam, aabb)
    }

    #[test]
    fn default_margin_clips_corners_at_wide_fov() {
        let (cam, aabb) = cube_framed_at(90.0, FitMultiplier::DEFAULT);
        assert!(!cam.frustum().contains_aabb(&aabb));
    }

    #[test]
    fn whole_volume_margin_keeps_wide_fov_visible() {
        for fov in [90.0_f32, 100.0] {
            let (cam, aabb) = cube_framed_at(fov, FitMultiplier::whole_volume(fov).unwrap());
            assert!(cam.frustum().contains_aabb(&aabb), "cube clipped at fov {fov}");
        }
    }

    #[test]
    fn whole_volume_margin_values() {
        assert!(FitMultiplier::whole_volume(0.5).unwrap().get() >= 1.0);
        assert!((FitMultiplier::whole_volume(90.0).unwrap().get() - 2.0_f32.sqrt()).abs() < 1e-5);
        assert!((FitMultiplier::whole_volume(120.0).unwrap().get() - 2.0).abs() < 1e-5);
        assert!(FitMultiplier::whole_volume(180.0).is_err());
    }

    #[test]
    fn fit_multiplier_deserializes_with_validation() {
        let ok: FitMultiplier = serde_json::from_str("1.5").unwrap();
        assert_eq!(ok.get(), 1.5);
        assert!(serde_json::from_str::<FitMultiplier>("0.5").is_err());
    }
}
