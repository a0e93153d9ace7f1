use glam::{Mat4, Vec3};
use serde::Serialize;
use viewfit_camera::PerspectiveCamera;
use viewfit_viewport::Viewport;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderView {
    /// Seconds since the loop started.
    pub time: f64,
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub backing_width: u32,
    pub backing_height: u32,
    #[serde(skip)]
    pub view_projection: Mat4,
}

impl RenderView {
    pub fn capture(time: f64, camera: &PerspectiveCamera, viewport: &Viewport) -> Self {
        Self {
            time,
            eye: camera.position,
            target: camera.target(),
            fov_degrees: camera.fov_degrees(),
            aspect: camera.aspect(),
            near: camera.near(),
            far: camera.far(),
            backing_width: viewport.backing_width,
            backing_height: viewport.backing_height,
            view_projection: camera.view_projection(),
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given view.
    fn render(&mut self, view: &RenderView) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable line per frame. Useful for CLI output, logging,
/// and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, view: &RenderView) -> String {
        format!(
            "t={:.3}s buffer={}x{} eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) \
             fov={:.0} aspect={:.3} clip=[{}, {}]",
            view.time,
            view.backing_width,
            view.backing_height,
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees,
            view.aspect,
            view.near,
            view.far,
        )
    }
}

/// Keeps every view it is asked to render.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<RenderView>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&RenderView> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    type Output = ();

    fn render(&mut self, view: &RenderView) {
        self.frames.push(*view);
    }
}
