//! Thin-lens camera for ray generation.

use crate::sampling::random_in_unit_disk;
use crate::ConfigError;
use glint_math::{Point3, Ray, Vec3, NEAR_ZERO};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Camera placement and lens parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    #[serde(alias = "vfov_degrees")]
    pub vfov: f32,
    /// Image width over height
    pub aspect_ratio: f32,
    /// Lens diameter; 0 gives a pinhole camera with everything in focus
    pub aperture: f32,
    /// Distance from camera to plane of perfect focus
    pub focus_dist: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            look_from: Vec3::new(13.0, 2.0, 3.0),
            look_at: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 20.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.1,
            focus_dist: 10.0,
        }
    }
}

impl CameraSettings {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Reject parameters that cannot produce a usable camera.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(ConfigError::InvalidFieldOfView(self.vfov));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if !(self.aperture.is_finite() && self.aperture >= 0.0) {
            return Err(ConfigError::InvalidAperture(self.aperture));
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return Err(ConfigError::InvalidFocusDistance(self.focus_dist));
        }

        let view = self.look_from - self.look_at;
        if view.length() < NEAR_ZERO || self.vup.cross(view).length() < NEAR_ZERO {
            return Err(ConfigError::DegenerateBasis);
        }
        Ok(())
    }
}

/// Camera for generating rays into the scene. Immutable once built.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Build the orthonormal basis and focus-plane viewport from `settings`.
    pub fn new(settings: &CameraSettings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = settings.aspect_ratio * viewport_height;

        let w = (settings.look_from - settings.look_at).normalize();
        let u = settings.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = settings.look_from;
        let horizontal = settings.focus_dist * viewport_width * u;
        let vertical = settings.focus_dist * viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - settings.focus_dist * w;

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: settings.aperture / 2.0,
        })
    }

    /// Ray through normalized image coordinates `(s, t)`, both in [0, 1].
    ///
    /// `(0, 0)` is the bottom-left of the image. The origin is jittered across
    /// the lens disk; points on the focus plane stay sharp.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        let from = self.origin + offset;
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(from, target - from)
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Camera basis `(u, v, w)`: right, up, and backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pinhole() -> CameraSettings {
        CameraSettings::default()
            .with_position(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
            .with_aspect_ratio(2.0)
    }

    #[test]
    fn test_camera_basis_is_orthonormal() {
        let camera = Camera::new(&CameraSettings::default()).unwrap();
        let (u, v, w) = camera.basis();

        for axis in [u, v, w] {
            assert!((axis.length() - 1.0).abs() < 1e-5);
        }
        assert!(u.dot(v).abs() < 1e-5);
        assert!(v.dot(w).abs() < 1e-5);
        assert!(u.dot(w).abs() < 1e-5);
        // w points from the target back toward the camera
        assert!(w.dot(Vec3::new(13.0, 2.0, 3.0)) > 0.0);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = Camera::new(&pinhole()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin, Vec3::ZERO);
        assert!(ray.direction.normalize().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_corner_rays_span_viewport() {
        // 90 degree fov at focus distance 1: viewport is 2 tall, 4 wide
        let camera = Camera::new(&pinhole()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let bottom_left = camera.get_ray(0.0, 0.0, &mut rng);
        assert!(bottom_left.direction.abs_diff_eq(Vec3::new(-2.0, -1.0, -1.0), 1e-5));

        let top_right = camera.get_ray(1.0, 1.0, &mut rng);
        assert!(top_right.direction.abs_diff_eq(Vec3::new(2.0, 1.0, -1.0), 1e-5));
    }

    #[test]
    fn test_defocus_keeps_focus_plane_sharp() {
        let settings = pinhole().with_lens(90.0, 2.0, 5.0);
        let camera = Camera::new(&settings).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let mut moved = false;
        for _ in 0..50 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            assert!(ray.origin.length() <= 1.0 + 1e-5);
            assert!(ray.origin.z.abs() < 1e-6);
            moved |= ray.origin.length() > 1e-3;

            // Every lens sample converges on the same focus-plane point
            let t = 5.0 / -ray.direction.z;
            assert!(ray.at(t).abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), 1e-4));
        }
        assert!(moved);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let base = pinhole();

        assert_eq!(
            Camera::new(&base.with_lens(0.0, 0.0, 1.0)).unwrap_err(),
            ConfigError::InvalidFieldOfView(0.0)
        );
        assert_eq!(
            Camera::new(&base.with_lens(90.0, -1.0, 1.0)).unwrap_err(),
            ConfigError::InvalidAperture(-1.0)
        );
        assert_eq!(
            Camera::new(&base.with_lens(90.0, 0.0, 0.0)).unwrap_err(),
            ConfigError::InvalidFocusDistance(0.0)
        );
        assert_eq!(
            Camera::new(&base.with_position(Vec3::ZERO, Vec3::ZERO, Vec3::Y)).unwrap_err(),
            ConfigError::DegenerateBasis
        );
        assert_eq!(
            Camera::new(&base.with_position(Vec3::ZERO, Vec3::Y, Vec3::Y)).unwrap_err(),
            ConfigError::DegenerateBasis
        );
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let json = r#"{ "look_from": [0.0, 1.0, 5.0], "vfov": 45.0 }"#;
        let settings: CameraSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.look_from, Vec3::new(0.0, 1.0, 5.0));
        assert_eq!(settings.vfov, 45.0);
        assert_eq!(settings.focus_dist, 10.0);
    }

    #[test]
    fn test_settings_accept_vfov_degrees() {
        let json = r#"{ "vfov_degrees": 60.0 }"#;
        let settings: CameraSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.vfov, 60.0);
    }
}
