//! Shared value types: axis-aligned boxes, bounding volumes, tolerances.
//!
//! # Invariants
//! - Every type here is a plain value, recomputed from inputs on demand.
//! - An empty box never produces a bounding volume.

mod bounds;

pub use bounds::{Aabb, BoundingVolume};

/// Lengths at or below this are treated as zero when normalizing.
pub const LENGTH_EPSILON: f32 = 1e-6;

pub fn crate_info() -> &'static str {
    "viewfit-common v0.1.0"
}
