//! Procedural textures.
//!
//! Textures are sampled by world-space point only. There is no filtering;
//! checker aliasing is smoothed out by the per-pixel jitter in the scheduler.

use std::sync::Arc;

use crate::perlin::{Perlin, DEFAULT_TURBULENCE_DEPTH};
use crate::SceneError;
use glint_math::{Color, Point3};

/// Procedural color source for materials.
#[derive(Debug, Clone)]
pub enum Texture {
    /// Constant color.
    Solid(Color),
    /// 3D checkerboard from the sign of `sin(sx) sin(sy) sin(sz)`.
    Checker { odd: Color, even: Color, scale: f32 },
    /// Marble pattern blending two colors by turbulent Perlin noise.
    Noise {
        low: Color,
        high: Color,
        scale: f32,
        perlin: Arc<Perlin>,
    },
}

impl Texture {
    pub fn solid(color: Color) -> Self {
        Texture::Solid(color)
    }

    /// `odd` is returned where the sine product is negative, `even` elsewhere.
    pub fn checker(odd: Color, even: Color, scale: f32) -> Result<Self, SceneError> {
        Ok(Texture::Checker {
            odd,
            even,
            scale: validate_scale(scale)?,
        })
    }

    /// Marble noise; `perlin` is shared, never copied per texture.
    pub fn noise(
        perlin: Arc<Perlin>,
        low: Color,
        high: Color,
        scale: f32,
    ) -> Result<Self, SceneError> {
        Ok(Texture::Noise {
            low,
            high,
            scale: validate_scale(scale)?,
            perlin,
        })
    }

    /// Color at world-space point `p`.
    pub fn value(&self, p: Point3) -> Color {
        match self {
            Texture::Solid(color) => *color,
            Texture::Checker { odd, even, scale } => {
                let sines = (scale * p.x).sin() * (scale * p.y).sin() * (scale * p.z).sin();
                if sines < 0.0 {
                    *odd
                } else {
                    *even
                }
            }
            Texture::Noise {
                low,
                high,
                scale,
                perlin,
            } => {
                let turb = perlin.turbulence(*scale * p, DEFAULT_TURBULENCE_DEPTH);
                let t = 0.5 * (1.0 + (scale * p.z + 10.0 * turb).sin());
                low.lerp(*high, t)
            }
        }
    }
}

impl From<Color> for Texture {
    fn from(color: Color) -> Self {
        Texture::Solid(color)
    }
}

fn validate_scale(scale: f32) -> Result<f32, SceneError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(SceneError::InvalidTextureScale(scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Vec3;

    const GREEN: Color = Color::new(0.2, 0.3, 0.1);
    const WHITE: Color = Color::new(0.9, 0.9, 0.9);

    #[test]
    fn test_solid_ignores_point() {
        let tex = Texture::solid(GREEN);
        assert_eq!(tex.value(Vec3::ZERO), GREEN);
        assert_eq!(tex.value(Vec3::new(100.0, -3.0, 7.5)), GREEN);
    }

    #[test]
    fn test_checker_alternates() {
        let tex = Texture::checker(GREEN, WHITE, 1.0).unwrap();
        let half_pi = std::f32::consts::FRAC_PI_2;

        // All three sines positive
        assert_eq!(tex.value(Vec3::splat(half_pi)), WHITE);
        // Flip one axis into the negative lobe
        assert_eq!(tex.value(Vec3::new(-half_pi, half_pi, half_pi)), GREEN);
        // Two negatives multiply back to positive
        assert_eq!(tex.value(Vec3::new(-half_pi, -half_pi, half_pi)), WHITE);
    }

    #[test]
    fn test_checker_scale_changes_period() {
        let tex = Texture::checker(GREEN, WHITE, 10.0).unwrap();
        let half_pi = std::f32::consts::FRAC_PI_2;
        // x = 3pi/20 has sin(10x) = sin(3pi/2) = -1
        let p = Vec3::new(3.0 * half_pi / 10.0, half_pi / 10.0, half_pi / 10.0);
        assert_eq!(tex.value(p), GREEN);
    }

    #[test]
    fn test_noise_blends_between_colors() {
        let perlin = Arc::new(Perlin::with_seed(1));
        let tex = Texture::noise(perlin, Color::ZERO, Color::ONE, 4.0).unwrap();

        for i in 0..100 {
            let p = Vec3::new(i as f32 * 0.31, 0.2, i as f32 * 0.17);
            let c = tex.value(p);
            assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
            // Same blend weight on every channel
            assert!((c.x - c.y).abs() < 1e-6 && (c.y - c.z).abs() < 1e-6);
        }
    }

    #[test]
    fn test_noise_textures_share_table() {
        let perlin = Arc::new(Perlin::with_seed(9));
        let a = Texture::noise(Arc::clone(&perlin), Color::ZERO, Color::ONE, 2.0).unwrap();
        let b = Texture::noise(Arc::clone(&perlin), Color::ZERO, Color::ONE, 2.0).unwrap();

        assert_eq!(Arc::strong_count(&perlin), 3);
        let p = Vec3::new(0.4, 1.7, -2.2);
        assert_eq!(a.value(p), b.value(p));
    }

    #[test]
    fn test_scale_must_be_positive() {
        assert_eq!(
            Texture::checker(GREEN, WHITE, 0.0).unwrap_err(),
            SceneError::InvalidTextureScale(0.0)
        );
        let perlin = Arc::new(Perlin::with_seed(1));
        assert!(Texture::noise(perlin, GREEN, WHITE, -1.0).is_err());
    }
}
