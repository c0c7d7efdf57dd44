//! Surface scattering models.
//!
//! A closed set of materials; each one answers two questions: does an
//! incoming ray scatter (and how), and how much light does the surface emit.

use crate::sampling::{gen_f32, random_in_unit_sphere, random_unit_vector};
use crate::{HitRecord, SceneError, Texture};
use glint_math::{Color, Ray, Vec3Ext};
use rand::RngCore;

/// Outcome of a successful scatter event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Ray leaving the surface
    pub ray: Ray,
    /// Per-channel multiplier applied to light arriving along `ray`
    pub attenuation: Color,
}

/// How light interacts with a surface.
#[derive(Debug, Clone)]
pub enum Material {
    /// Ideal diffuse reflector.
    Lambertian { albedo: Texture },
    /// Mirror with optional roughness; `fuzz` is in [0, 1].
    Metal { albedo: Texture, fuzz: f32 },
    /// Clear refractive material such as glass.
    Dielectric { refractive_index: f32 },
    /// Light source; absorbs everything it is hit by.
    Emissive { color: Color, strength: f32 },
}

impl Material {
    pub fn lambertian(albedo: impl Into<Texture>) -> Self {
        Material::Lambertian {
            albedo: albedo.into(),
        }
    }

    /// Diffuse material with a solid color.
    pub fn lambertian_color(albedo: Color) -> Self {
        Self::lambertian(Texture::Solid(albedo))
    }

    /// Metal material. `fuzz` is clamped to [0, 1] here, never at scatter time.
    ///
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn metal(albedo: impl Into<Texture>, fuzz: f32) -> Self {
        let fuzz = if fuzz.is_nan() { 0.0 } else { fuzz.clamp(0.0, 1.0) };
        Material::Metal {
            albedo: albedo.into(),
            fuzz,
        }
    }

    /// Dielectric material (1.0 = air, 1.5 = glass, 2.4 = diamond).
    pub fn dielectric(refractive_index: f32) -> Result<Self, SceneError> {
        if !(refractive_index.is_finite() && refractive_index > 0.0) {
            return Err(SceneError::InvalidRefractiveIndex(refractive_index));
        }
        Ok(Material::Dielectric { refractive_index })
    }

    /// Emitter radiating `color * strength`.
    pub fn emissive(color: Color, strength: f32) -> Result<Self, SceneError> {
        if !(strength.is_finite() && strength >= 0.0) {
            return Err(SceneError::InvalidEmission(strength));
        }
        Ok(Material::Emissive { color, strength })
    }

    /// Scatter an incoming ray at `rec`, or `None` if it is absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        match self {
            Material::Lambertian { albedo } => {
                let mut direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if direction.near_zero() {
                    direction = rec.normal;
                }

                Some(Scatter {
                    ray: Ray::new(rec.point, direction),
                    attenuation: albedo.value(rec.point),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = ray_in.direction.unit_or_zero().reflect(rec.normal);
                let direction = (reflected + *fuzz * random_in_unit_sphere(rng)).unit_or_zero();

                // Fuzz pushed the ray below the surface: absorbed
                if direction.dot(rec.normal) <= 0.0 {
                    return None;
                }

                Some(Scatter {
                    ray: Ray::new(rec.point, direction),
                    attenuation: albedo.value(rec.point),
                })
            }
            Material::Dielectric { refractive_index } => {
                let ratio = if rec.front_face {
                    1.0 / refractive_index
                } else {
                    *refractive_index
                };

                let unit_direction = ray_in.direction.unit_or_zero();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();

                let cannot_refract = ratio * sin_theta > 1.0;
                let direction =
                    if cannot_refract || gen_f32(rng) < reflectance(cos_theta, ratio) {
                        unit_direction.reflect(rec.normal)
                    } else {
                        unit_direction.refract(rec.normal, ratio)
                    };

                Some(Scatter {
                    ray: Ray::new(rec.point, direction),
                    attenuation: Color::ONE,
                })
            }
            Material::Emissive { .. } => None,
        }
    }

    /// Light emitted by the surface. Black for everything except emitters.
    pub fn emitted(&self) -> Color {
        match self {
            Material::Emissive { color, strength } => *color * *strength,
            _ => Color::ZERO,
        }
    }
}

/// Schlick's approximation for reflectance.
#[inline]
pub fn reflectance(cosine: f32, ratio: f32) -> f32 {
    let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
