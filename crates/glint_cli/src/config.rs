//! JSON render file and command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glint_renderer::{CameraSettings, Integrator, RenderSettings};
use serde::{Deserialize, Serialize};

use crate::cli::Args;

/// Everything needed to render, as read from disk.
///
/// Both sections are optional; missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderFile {
    pub render: RenderSettings,
    pub camera: CameraSettings,
}

impl RenderFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Apply command-line flags on top of the file values.
    pub fn apply_args(&mut self, args: &Args) {
        let render = &mut self.render;
        if let Some(width) = args.width {
            render.image_width = width;
        }
        if let Some(aspect) = args.aspect {
            render.aspect_ratio = aspect;
        }
        if let Some(samples) = args.samples {
            render.samples_per_pixel = samples;
        }
        if let Some(depth) = args.max_depth {
            render.max_depth = depth;
        }
        if let Some(threads) = args.threads {
            render.threads = threads;
        }
        if args.seed.is_some() {
            render.seed = args.seed;
        }
        if args.iterative {
            render.integrator = Integrator::Iterative;
        }
    }

    /// Final settings for the renderer and camera.
    ///
    /// The image aspect ratio wins over the camera's so the viewport always
    /// matches the pixel grid.
    pub fn resolve(self) -> (RenderSettings, CameraSettings) {
        let mut camera = self.camera;
        if camera.aspect_ratio != self.render.aspect_ratio {
            log::debug!(
                "Camera aspect ratio {} replaced by image aspect ratio {}",
                camera.aspect_ratio,
                self.render.aspect_ratio
            );
            camera.aspect_ratio = self.render.aspect_ratio;
        }
        (self.render, camera)
    }
}
