/// A drawing surface with a CSS layout size and a separately sized pixel
/// buffer, such as an HTML canvas or a window swapchain.
pub trait DisplaySurface {
    /// Layout size in CSS pixels as `(width, height)`.
    fn client_size(&self) -> (f32, f32);

    /// Physical pixels per CSS pixel.
    fn device_pixel_ratio(&self) -> f32;

    /// Current pixel buffer size as `(width, height)`.
    fn backing_size(&self) -> (u32, u32);

    /// Resize the pixel buffer only. Must not change [`client_size`](Self::client_size).
    fn resize_backing(&mut self, width: u32, height: u32);
}

/// In-memory surface for headless runs and tests.
///
/// Defaults match a fresh HTML canvas: 300x150 in both layout and buffer
/// at a pixel ratio of 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSurface {
    pub client_width: f32,
    pub client_height: f32,
    pub device_pixel_ratio: f32,
    backing_width: u32,
    backing_height: u32,
    /// Number of times the backing buffer has been resized.
    resize_count: u64,
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self {
            client_width: 300.0,
            client_height: 150.0,
            device_pixel_ratio: 1.0,
            backing_width: 300,
            backing_height: 150,
            resize_count: 0,
        }
    }
}

impl CanvasSurface {
    pub fn new(client_width: f32, client_height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            client_width,
            client_height,
            device_pixel_ratio,
            ..Default::default()
        }
    }

    /// Set the current backing size directly, as a renderer would at creation.
    pub fn with_backing(mut self, width: u32, height: u32) -> Self {
        self.backing_width = width;
        self.backing_height = height;
        self
    }

    /// Simulate a CSS layout change.
    pub fn set_client_size(&mut self, width: f32, height: f32) {
        self.client_width = width;
        self.client_height = height;
    }

    /// Simulate moving to a display with a different density.
    pub fn set_device_pixel_ratio(&mut self, ratio: f32) {
        self.device_pixel_ratio = ratio;
    }

    pub fn resize_count(&self) -> u64 {
        self.resize_count
    }
}

impl DisplaySurface for CanvasSurface {
    fn client_size(&self) -> (f32, f32) {
        (self.client_width, self.client_height)
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    fn backing_size(&self) -> (u32, u32) {
        (self.backing_width, self.backing_height)
    }

    fn resize_backing(&mut self, width: u32, height: u32) {
        self.backing_width = width;
        self.backing_height = height;
        self.resize_count += 1;
    }
}
