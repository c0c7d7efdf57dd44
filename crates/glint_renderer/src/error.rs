//! Error types for scene construction, configuration, rendering and output.

use thiserror::Error;

/// Invalid primitive or material parameters supplied while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("plane normal must be non-zero and finite")]
    DegenerateNormal,

    #[error("triangle vertices are collinear or non-finite")]
    DegenerateTriangle,

    #[error("refractive index must be positive and finite, got {0}")]
    InvalidRefractiveIndex(f32),

    #[error("emission strength must be non-negative, got {0}")]
    InvalidEmission(f32),

    #[error("texture scale must be positive and finite, got {0}")]
    InvalidTextureScale(f32),
}

/// Invalid render or camera settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("image width must be at least 1")]
    ZeroWidth,

    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("worker thread count must be at least 1")]
    ZeroThreads,

    #[error("vertical field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("aperture must be non-negative, got {0}")]
    InvalidAperture(f32),

    #[error("focus distance must be positive, got {0}")]
    InvalidFocusDistance(f32),

    #[error("camera basis is degenerate: look_from equals look_at or vup is parallel to the view direction")]
    DegenerateBasis,
}

/// Failures of a render call.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render settings: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to allocate a {bytes} byte pixel buffer")]
    Allocation { bytes: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("render cancelled after {rows_done} of {rows_total} rows")]
    Cancelled { rows_done: u32, rows_total: u32 },
}

/// Failures while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported output extension: {0}")]
    UnsupportedFormat(String),
}
