//! Model bounds: world-space boxes of loaded glTF models, and loads that
//! complete in the background.
//!
//! Only what framing needs is read: the node hierarchy and the `min`/`max`
//! of each mesh's `POSITION` accessor. Vertex buffers are never decoded.
//!
//! # Invariants
//! - A successful load always has a non-empty box.
//! - A [`PendingLoad`] yields its result at most once.

mod error;
mod gltf;
mod loader;

pub use error::AssetError;
pub use gltf::ModelBounds;
pub use loader::PendingLoad;

pub fn crate_info() -> &'static str {
    "viewfit-assets v0.1.0"
}
