use serde::{Deserialize, Serialize};

use crate::surface::DisplaySurface;

/// One measurement of a display surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// CSS layout width.
    pub client_width: f32,
    /// CSS layout height.
    pub client_height: f32,
    pub backing_width: u32,
    pub backing_height: u32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    /// Read the current measurements of a surface.
    pub fn measure<S: DisplaySurface + ?Sized>(surface: &S) -> Self {
        let (client_width, client_height) = surface.client_size();
        let (backing_width, backing_height) = surface.backing_size();
        Self {
            client_width,
            client_height,
            backing_width,
            backing_height,
            device_pixel_ratio: surface.device_pixel_ratio(),
        }
    }

    /// Backing size the surface should have: `floor(client * ratio)` per axis.
    ///
    /// Negative or NaN products saturate to zero.
    pub fn target_backing_size(&self) -> (u32, u32) {
        (
            scaled_floor(self.client_width, self.device_pixel_ratio),
            scaled_floor(self.client_height, self.device_pixel_ratio),
        )
    }

    pub fn needs_resize(&self) -> bool {
        self.target_backing_size() != (self.backing_width, self.backing_height)
    }

    /// `client_width / client_height`, or `None` when the ratio would not be a
    /// positive finite number (collapsed or hidden surface).
    pub fn aspect_ratio(&self) -> Option<f32> {
        let aspect = self.client_width / self.client_height;
        (aspect.is_finite() && aspect > 0.0).then_some(aspect)
    }
}

fn scaled_floor(css: f32, ratio: f32) -> u32 {
    // `as` saturates: negatives and NaN become 0, overflow becomes u32::MAX.
    (css * ratio).floor() as u32
}

/// Resize the surface's backing buffer if it no longer matches its CSS size
/// times the device pixel ratio. Returns `true` if a resize happened.
///
/// When this returns `true` the caller must set the camera aspect to
/// `client_width / client_height` and recompute its projection before the
/// next render. Skipping that step leaves the image stretched.
pub fn sync_viewport<S: DisplaySurface + ?Sized>(surface: &mut S) -> bool {
    let viewport = Viewport::measure(surface);
    if !viewport.needs_resize() {
        return false;
    }

    let (width, height) = viewport.target_backing_size();
    tracing::debug!(
        from_width = viewport.backing_width,
        from_height = viewport.backing_height,
        width,
        height,
        device_pixel_ratio = viewport.device_pixel_ratio,
        "resizing backing buffer"
    );
    surface.resize_backing(width, height);
    true
}
