//! Random sampling helpers.
//!
//! Every function draws from an explicit generator so each render worker can
//! own an independently seeded stream. Nothing here touches global state.

use glint_math::{Vec3, Vec3Ext};
use rand::{Rng, RngCore};

/// Attempts before a rejection sampler gives up and uses its fallback.
const MAX_REJECTION_ATTEMPTS: usize = 64;

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform f32 in [min, max).
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Vector with each component uniform in [min, max).
pub fn random_vec3_range(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        gen_range(rng, min, max),
        gen_range(rng, min, max),
        gen_range(rng, min, max),
    )
}

/// Random point strictly inside the unit ball.
///
/// Rejection sampling, bounded. If every attempt lands outside the ball the
/// last candidate is normalized and pulled just inside the unit sphere.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    let mut p = Vec3::ZERO;
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        p = random_vec3_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
    0.999 * p.unit_or_zero()
}

/// Random direction, unit length unless the ball sample degenerated to zero.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    random_in_unit_sphere(rng).unit_or_zero()
}

/// Random point inside the unit disk in the XY plane (z = 0). Used for lens sampling.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let p = Vec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
    Vec3::ZERO
}
