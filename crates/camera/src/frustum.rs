//! Frustum planes extracted from a view-projection matrix.
//!
//! Each plane is a `Vec4` `(A, B, C, D)` with an inward-pointing unit normal
//! `(A, B, C)`. A point `P` is inside when `dot(normal, P) + D >= 0` for all
//! six planes.

use glam::{Mat4, Vec3, Vec4};
use viewfit_common::Aabb;

/// Six clipping planes: left, right, bottom, top, near, far.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Gribb & Hartmann plane extraction for a `[0, 1]` depth range, which is
    /// what `Mat4::perspective_rh` produces.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let r0 = vp.row(0);
        let r1 = vp.row(1);
        let r2 = vp.row(2);
        let r3 = vp.row(3);

        let mut planes = [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r2, r3 - r2];
        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance of `point` from each plane, positive inside.
    fn distances(&self, point: Vec3) -> impl Iterator<Item = f32> + '_ {
        self.planes
            .iter()
            .map(move |plane| plane.truncate().dot(point) + plane.w)
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.distances(point).all(|d| d >= -1e-4)
    }

    /// True when every corner of the box is inside, i.e. the whole box is
    /// visible.
    pub fn contains_aabb(&self, aabb: &Aabb) -> bool {
        !aabb.is_empty() && aabb.corners().iter().all(|&c| self.contains_point(c))
    }
}
