//! Radiance estimation along a single camera ray.
//!
//! Both estimators stop after `depth` bounces and return black past that
//! point, so recursion (or iteration) is always bounded.

use crate::{Hittable, Scene};
use glint_math::{Color, Interval, Ray, Vec3Ext};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Ignore hits closer than this to avoid self-intersection ("shadow acne").
pub const T_MIN: f32 = 0.001;

/// What a ray sees when it leaves the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// White-to-blue vertical gradient.
    #[default]
    Sky,
    /// Constant color; black makes emitters the only light.
    Solid(Color),
}

impl Background {
    /// Color for a ray that missed everything.
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Sky => sky_gradient(ray),
            Background::Solid(color) => *color,
        }
    }
}

/// Which radiance estimator the scheduler calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integrator {
    #[default]
    Recursive,
    Iterative,
}

impl Integrator {
    pub fn radiance(
        &self,
        ray: &Ray,
        scene: &Scene,
        background: &Background,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        match self {
            Integrator::Recursive => radiance(ray, scene, background, depth, rng),
            Integrator::Iterative => radiance_iterative(ray, scene, background, depth, rng),
        }
    }
}

/// Compute the color seen by a ray.
///
/// `emitted + attenuation * radiance(scattered, depth - 1)` at each hit,
/// the background on a miss, black once the bounce budget is spent.
pub fn radiance(
    ray: &Ray,
    scene: &Scene,
    background: &Background,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(T_MIN, f32::INFINITY)) else {
        return background.color(ray);
    };

    let emission = rec.material.emitted();
    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            emission
                + scatter.attenuation * radiance(&scatter.ray, scene, background, depth - 1, rng)
        }
        None => emission,
    }
}

/// Loop form of [`radiance`] with an explicit throughput accumulator.
///
/// Draws random numbers in the same order as the recursive form; results
/// differ only by floating-point summation order.
pub fn radiance_iterative(
    ray: &Ray,
    scene: &Scene,
    background: &Background,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut accumulated = Color::ZERO;
    let mut throughput = Color::ONE;
    let mut current = *ray;

    for _ in 0..depth {
        let Some(rec) = scene.hit(&current, Interval::new(T_MIN, f32::INFINITY)) else {
            return accumulated + throughput * background.color(&current);
        };

        accumulated += throughput * rec.material.emitted();
        match rec.material.scatter(&current, &rec, rng) {
            Some(scatter) => {
                throughput *= scatter.attenuation;
                current = scatter.ray;
            }
            None => return accumulated,
        }
    }

    accumulated
}

/// Linear blend from white (looking down) to sky blue (looking up).
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction.unit_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}
