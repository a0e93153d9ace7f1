//! Viewer configuration, read from YAML. Every field has a default, so a
//! partial file (or an empty one) is valid.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use viewfit_camera::{CameraError, FitMultiplier, PerspectiveCamera};
use viewfit_viewport::CanvasSurface;

/// Errors from loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid camera: {0}")]
    Camera(#[from] CameraError),
    #[error("frame interval must be positive and finite, got {0}")]
    InvalidInterval(f64),
}

/// Display surface measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// CSS width.
    pub width: f32,
    /// CSS height.
    pub height: f32,
    pub device_pixel_ratio: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl CanvasConfig {
    /// A surface whose backing buffer still has the fresh-canvas size, so
    /// the first tick resizes it.
    pub fn build(&self) -> CanvasSurface {
        CanvasSurface::new(self.width, self.height, self.device_pixel_ratio)
    }
}

/// Initial perspective camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            aspect: 2.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 10.0, 20.0),
            target: Vec3::new(0.0, 5.0, 0.0),
        }
    }
}

impl CameraConfig {
    pub fn build(&self) -> Result<PerspectiveCamera, ConfigError> {
        let mut camera = PerspectiveCamera::new(self.fov_degrees, self.aspect, self.near, self.far);
        camera.validate()?;
        camera.position = self.position;
        camera.look_at(self.target);
        Ok(camera)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub canvas: CanvasConfig,
    pub camera: CameraConfig,
    pub fit_multiplier: FitMultiplier,
    /// glTF model to load and frame once it finishes loading.
    pub model: Option<PathBuf>,
    /// Frames to run in a headless simulation.
    pub frames: u64,
    /// Simulated time between frames.
    pub frame_interval_ms: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            camera: CameraConfig::default(),
            fit_multiplier: FitMultiplier::DEFAULT,
            model: None,
            frames: 60,
            frame_interval_ms: 1000.0 / 60.0,
        }
    }
}

impl ViewerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_yaml_str(&std::fs::read_to_string(path)?)?;
        tracing::debug!(path = %path.display(), "loaded viewer config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.build()?;
        if !(self.frame_interval_ms.is_finite() && self.frame_interval_ms > 0.0) {
            return Err(ConfigError::InvalidInterval(self.frame_interval_ms));
        }
        Ok(())
    }
}
