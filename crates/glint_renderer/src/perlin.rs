//! Permutation-table Perlin noise.
//!
//! The table is built once from a caller-supplied generator and is read-only
//! afterwards, so one `Arc<Perlin>` can be shared by every texture and worker.

use glint_math::{Point3, Vec3};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

/// Octaves summed by [`Perlin::turbulence`] when callers have no preference.
pub const DEFAULT_TURBULENCE_DEPTH: u32 = 7;

const TABLE_SIZE: usize = 256;

/// Gradient noise over a shuffled 0..255 permutation, duplicated to 512 entries.
#[derive(Clone)]
pub struct Perlin {
    perm: [u8; 2 * TABLE_SIZE],
}

impl std::fmt::Debug for Perlin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Perlin")
            .field("perm_head", &&self.perm[..8])
            .finish()
    }
}

impl Perlin {
    /// Build a table by shuffling 0..255 with `rng`.
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let mut base: Vec<u8> = (0..=255).collect();
        base.shuffle(rng);

        let mut perm = [0u8; 2 * TABLE_SIZE];
        perm[..TABLE_SIZE].copy_from_slice(&base);
        perm[TABLE_SIZE..].copy_from_slice(&base);
        Self { perm }
    }

    /// Build a reproducible table from a seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(&mut StdRng::seed_from_u64(seed))
    }

    /// Noise value at `p`, roughly in [-1, 1]; exactly zero on lattice points.
    pub fn noise(&self, p: Point3) -> f32 {
        let cell = p.floor();
        let xi = (cell.x as i32 & 255) as usize;
        let yi = (cell.y as i32 & 255) as usize;
        let zi = (cell.z as i32 & 255) as usize;

        let Vec3 { x, y, z } = p - cell;
        let (u, v, w) = (fade(x), fade(y), fade(z));

        let perm = |i: usize| self.perm[i] as usize;
        let a = perm(xi) + yi;
        let aa = perm(a) + zi;
        let ab = perm(a + 1) + zi;
        let b = perm(xi + 1) + yi;
        let ba = perm(b) + zi;
        let bb = perm(b + 1) + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(perm(aa), x, y, z), grad(perm(ba), x - 1.0, y, z)),
                lerp(
                    u,
                    grad(perm(ab), x, y - 1.0, z),
                    grad(perm(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(perm(aa + 1), x, y, z - 1.0),
                    grad(perm(ba + 1), x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(perm(ab + 1), x, y - 1.0, z - 1.0),
                    grad(perm(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }

    /// Sum of `depth` octaves, doubling frequency and halving amplitude; absolute value.
    pub fn turbulence(&self, p: Point3, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

/// Dot product of (x, y, z) with one of 12 edge gradients picked by the hash.
#[inline]
fn grad(hash: usize, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}
