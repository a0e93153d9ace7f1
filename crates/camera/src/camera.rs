use glam::{Mat4, Vec3};

use crate::error::CameraError;
use crate::frustum::Frustum;

/// Perspective camera oriented by a look-at target.
///
/// Changing field of view, aspect or clip planes does not touch the cached
/// projection matrix; call [`update_projection`](Self::update_projection)
/// afterwards, exactly once, before rendering.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    fov_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    pub position: Vec3,
    pub up: Vec3,
    target: Vec3,
    projection: Mat4,
    projection_dirty: bool,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 2.0, 0.1, 5.0)
    }
}

impl PerspectiveCamera {
    /// Camera at the origin looking down -Z, with its projection computed.
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            up: Vec3::Y,
            target: Vec3::NEG_Z,
            projection: Mat4::IDENTITY,
            projection_dirty: true,
        };
        cam.update_projection();
        cam
    }

    /// Vertical field of view in degrees.
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// True when a projection parameter changed since the last
    /// [`update_projection`](Self::update_projection).
    pub fn projection_dirty(&self) -> bool {
        self.projection_dirty
    }

    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov_degrees = fov_degrees;
        self.projection_dirty = true;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.projection_dirty = true;
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.projection_dirty = true;
    }

    /// Point the camera at `target`. The orientation follows the target from
    /// then on, including after the position moves.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Recompute the cached projection from the current parameters.
    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
        self.projection_dirty = false;
    }

    /// Unit vector the camera looks along. Falls back to -Z when the target
    /// coincides with the position.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward();
        // look_at degenerates when up is parallel to the view direction.
        let up = if forward.cross(self.up).length_squared() < 1e-8 {
            if forward.cross(Vec3::Z).length_squared() < 1e-8 {
                Vec3::X
            } else {
                Vec3::Z
            }
        } else {
            self.up
        };
        Mat4::look_at_rh(self.position, self.position + forward, up)
    }

    /// Projection as of the last [`update_projection`](Self::update_projection).
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection())
    }

    /// Check the projection parameters against the camera invariants.
    pub fn validate(&self) -> Result<(), CameraError> {
        validate_fov(self.fov_degrees)?;
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(CameraError::InvalidAspect(self.aspect));
        }
        if !(self.near.is_finite() && self.far.is_finite() && self.near > 0.0 && self.near < self.far)
        {
            return Err(CameraError::InvalidClipPlanes {
                near: self.near,
                far: self.far,
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_fov(fov_degrees: f32) -> Result<(), CameraError> {
    if fov_degrees.is_finite() && fov_degrees > 0.0 && fov_degrees < 180.0 {
        Ok(())
    } else {
        Err(CameraError::InvalidFieldOfView(fov_degrees))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.fov_degrees(), 75.0);
        assert_eq!(cam.aspect(), 2.0);
        assert!(cam.validate().is_ok());
        assert!(!cam.projection_dirty());
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.is_nan());
    }

    #[test]
    fn setters_defer_projection() {
        let mut cam = PerspectiveCamera::new(90.0, 2.0, 0.1, 1000.0);
        let before = cam.projection_matrix();
        cam.set_aspect(1.0);
        assert!(cam.projection_dirty());
        assert_eq!(cam.projection_matrix(), before);

        cam.update_projection();
        assert!(!cam.projection_dirty());
        assert_ne!(cam.projection_matrix(), before);
    }

    #[test]
    fn look_at_sets_forward() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(0.0, 0.0, 10.0);
        cam.look_at(Vec3::ZERO);
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn looking_straight_down_is_finite() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(0.0, 20.0, 0.0);
        cam.look_at(Vec3::ZERO);
        assert!(!cam.view_matrix().is_nan());
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn target_at_position_is_finite() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::ONE;
        cam.look_at(Vec3::ONE);
        assert_eq!(cam.forward(), Vec3::NEG_Z);
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        assert_eq!(
            PerspectiveCamera::new(0.0, 1.0, 0.1, 10.0).validate(),
            Err(CameraError::InvalidFieldOfView(0.0))
        );
        assert_eq!(
            PerspectiveCamera::new(180.0, 1.0, 0.1, 10.0).validate(),
            Err(CameraError::InvalidFieldOfView(180.0))
        );
        assert_eq!(
            PerspectiveCamera::new(60.0, 0.0, 0.1, 10.0).validate(),
            Err(CameraError::InvalidAspect(0.0))
        );
        assert!(matches!(
            PerspectiveCamera::new(60.0, 1.0, 10.0, 10.0).validate(),
            Err(CameraError::InvalidClipPlanes { .. })
        ));
        assert!(matches!(
            PerspectiveCamera::new(60.0, 1.0, 0.0, 10.0).validate(),
            Err(CameraError::InvalidClipPlanes { .. })
        ));
    }
}
