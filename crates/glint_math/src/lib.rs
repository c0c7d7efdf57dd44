//! Glint math - vector kernel and ray primitives for the path tracer.
//!
//! Everything is built on `glam::Vec3` (f32). Points, directions and colors
//! share the representation; the aliases below only document intent.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod vector;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{Vec3Ext, NEAR_ZERO};

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color, components nominally in [0, 1].
pub type Color = Vec3;
