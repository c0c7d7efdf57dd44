//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for physically-based rendering.
//!
//! Scenes are assembled with a [`SceneBuilder`], frozen into an immutable
//! [`Scene`], and rendered by [`render`] across a fixed pool of worker
//! threads into a [`PixelBuffer`].

mod camera;
mod error;
mod hittable;
pub mod integrator;
mod material;
pub mod output;
mod perlin;
mod plane;
pub mod sampling;
mod scene;
pub mod scheduler;
mod sphere;
mod texture;
mod triangle;

pub use camera::{Camera, CameraSettings};
pub use error::{ConfigError, OutputError, RenderError, SceneError};
pub use hittable::{HitRecord, Hittable};
pub use integrator::{radiance, radiance_iterative, Background, Integrator};
pub use material::{reflectance, Material, Scatter};
pub use output::{write_ppm, PixelBuffer};
pub use perlin::{Perlin, DEFAULT_TURBULENCE_DEPTH};
pub use plane::Plane;
pub use scene::{Scene, SceneBuilder, SceneStats};
pub use scheduler::{partition_rows, quantize, render, CancelFlag, RenderSettings};
pub use sphere::Sphere;
pub use texture::Texture;
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Color, Interval, Point3, Ray, Vec3, Vec3Ext};
