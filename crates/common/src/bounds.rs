use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world space.
///
/// The empty box has `min = +inf` and `max = -inf`, so that including any
/// point or unioning with any non-empty box yields that box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Build a box from two corners, in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box enclosing every point. Empty input gives [`Aabb::EMPTY`].
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        points.into_iter().fold(Self::EMPTY, |mut acc, p| {
            acc.expand_to_include_point(p);
            acc
        })
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    pub fn expand_to_include_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Center point. Zero for an empty box.
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis. Zero for an empty box.
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        self.max - self.min
    }

    /// Length of the min-to-max diagonal.
    pub fn diagonal(&self) -> f32 {
        self.size().length()
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Box enclosing this box after an affine transform.
    ///
    /// Transforms all eight corners, so rotated boxes grow to stay axis-aligned.
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        if self.is_empty() {
            return Aabb::EMPTY;
        }
        Aabb::from_points(self.corners().into_iter().map(|c| matrix.transform_point3(c)))
    }
}

/// An axis-aligned box reduced to what camera framing needs: a center and
/// the length of its diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingVolume {
    pub center: Vec3,
    /// Characteristic size. Always `>= 0` when built from a box;
    /// [`BoundingVolume::new`] does not validate it.
    pub size: f32,
}

impl BoundingVolume {
    pub fn new(center: Vec3, size: f32) -> Self {
        Self { center, size }
    }

    /// Reduce a box to its framing volume. Returns `None` for an empty box.
    pub fn from_aabb(aabb: &Aabb) -> Option<Self> {
        if aabb.is_empty() {
            return None;
        }
        Some(Self::new(aabb.center(), aabb.diagonal()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_properties() {
        let b = Aabb::EMPTY;
        assert!(b.is_empty());
        assert_eq!(b.center(), Vec3::ZERO);
        assert_eq!(b.size(), Vec3::ZERO);
        assert_eq!(b.diagonal(), 0.0);
        assert!(BoundingVolume::from_aabb(&b).is_none());
    }

    #[test]
    fn new_orders_corners() {
        let b = Aabb::new(Vec3::new(1.0, -1.0, 2.0), Vec3::new(-1.0, 1.0, 0.0));
        assert_eq!(b.min, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn from_points_encloses_all() {
        let pts = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, -3.0, 1.0),
            Vec3::new(-1.0, 4.0, 5.0),
        ];
        let b = Aabb::from_points(pts);
        assert_eq!(b.min, Vec3::new(-1.0, -3.0, 0.0));
        assert_eq!(b.max, Vec3::new(2.0, 4.0, 5.0));
        assert_eq!(b.center(), Vec3::new(0.5, 0.5, 2.5));
    }

    #[test]
    fn single_point_is_not_empty() {
        let b = Aabb::from_points([Vec3::ONE]);
        assert!(!b.is_empty());
        assert_eq!(b.diagonal(), 0.0);
    }

    #[test]
    fn union_with_empty_is_identity() {
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(b.union(&Aabb::EMPTY), b);
        assert_eq!(Aabb::EMPTY.union(&b), b);
    }

    #[test]
    fn diagonal_of_unit_cube() {
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!((b.diagonal() - 3.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn transformed_by_translation_and_scale() {
        let b = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let m = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::IDENTITY,
            Vec3::new(10.0, 0.0, 0.0),
        );
        let t = b.transformed(&m);
        assert!(t.min.abs_diff_eq(Vec3::new(8.0, -2.0, -2.0), 1e-5));
        assert!(t.max.abs_diff_eq(Vec3::new(12.0, 2.0, 2.0), 1e-5));
    }

    #[test]
    fn transformed_by_rotation_grows() {
        let b = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let m = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4);
        let t = b.transformed(&m);
        assert!(t.max.x > 1.4 && t.max.x < 1.42);
        assert!((t.max.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn bounding_volume_from_box() {
        let b = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(3.0, 4.0, 0.0));
        let v = BoundingVolume::from_aabb(&b).unwrap();
        assert_eq!(v.center, Vec3::new(1.5, 2.0, 0.0));
        assert!((v.size - 5.0).abs() < 1e-6);
    }

    #[test]
    fn bounding_volume_keeps_given_size() {
        let v = BoundingVolume::new(Vec3::ZERO, -3.0);
        assert_eq!(v.size, -3.0);
    }
}
