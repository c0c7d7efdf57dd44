//! Scene construction and the frozen, read-only scene used during rendering.
//!
//! [`SceneBuilder`] is the only type with mutating methods. [`SceneBuilder::freeze`]
//! consumes it, so once a [`Scene`] exists nothing can add to it and worker
//! threads may share it by reference without locks.

use crate::{HitRecord, Hittable, Material, Plane, SceneError, Sphere, Triangle};
use glint_math::{Aabb, Interval, Point3, Ray, Vec3};

/// Mutable, single-threaded scene under construction.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    triangles: Vec<Triangle>,
}

impl SceneBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sphere(
        &mut self,
        center: Point3,
        radius: f32,
        material: Material,
    ) -> Result<&mut Self, SceneError> {
        self.spheres.push(Sphere::new(center, radius, material)?);
        Ok(self)
    }

    pub fn add_plane(
        &mut self,
        point: Point3,
        normal: Vec3,
        material: Material,
    ) -> Result<&mut Self, SceneError> {
        self.planes.push(Plane::new(point, normal, material)?);
        Ok(self)
    }

    pub fn add_triangle(
        &mut self,
        v0: Point3,
        v1: Point3,
        v2: Point3,
        material: Material,
    ) -> Result<&mut Self, SceneError> {
        self.triangles.push(Triangle::new(v0, v1, v2, material)?);
        Ok(self)
    }

    /// Total number of primitives added so far.
    pub fn len(&self) -> usize {
        self.spheres.len() + self.planes.len() + self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finish construction. The returned scene is immutable.
    ///
    /// The scene box merges finite primitive boxes only; infinite planes are skipped.
    pub fn freeze(self) -> Scene {
        let bbox = self
            .spheres
            .iter()
            .map(|s| s.bounding_box())
            .chain(self.planes.iter().map(|p| p.bounding_box()))
            .chain(self.triangles.iter().map(|t| t.bounding_box()))
            .filter(Aabb::is_finite)
            .fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, &b));

        log::debug!(
            "Scene frozen: {} spheres, {} planes, {} triangles",
            self.spheres.len(),
            self.planes.len(),
            self.triangles.len()
        );

        Scene {
            spheres: self.spheres.into_boxed_slice(),
            planes: self.planes.into_boxed_slice(),
            triangles: self.triangles.into_boxed_slice(),
            bbox,
        }
    }
}

/// Immutable collection of primitives, safe to share across render workers.
///
/// Traversal is brute force: every primitive is tested for every ray.
#[derive(Debug)]
pub struct Scene {
    spheres: Box<[Sphere]>,
    planes: Box<[Plane]>,
    triangles: Box<[Triangle]>,
    bbox: Aabb,
}

/// Per-kind primitive counts, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStats {
    pub spheres: usize,
    pub planes: usize,
    pub triangles: usize,
}

impl Scene {
    pub fn len(&self) -> usize {
        self.spheres.len() + self.planes.len() + self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            spheres: self.spheres.len(),
            planes: self.planes.len(),
            triangles: self.triangles.len(),
        }
    }
}

impl Hittable for Scene {
    /// Nearest hit across all primitives.
    ///
    /// Spheres, then planes, then triangles, each in insertion order. The upper
    /// bound shrinks to the closest hit so far, so only the nearest `t` survives.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        let objects = self
            .spheres
            .iter()
            .map(|s| s as &dyn Hittable)
            .chain(self.planes.iter().map(|p| p as &dyn Hittable))
            .chain(self.triangles.iter().map(|t| t as &dyn Hittable));

        for object in objects {
            let max = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(max)) {
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glint_math::Color;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_scene_is_shareable() {
        assert_send_sync::<Scene>();
    }

    #[test]
    fn test_nearer_sphere_wins() {
        let near = Material::lambertian_color(Color::new(1.0, 0.0, 0.0));
        let far = Material::lambertian_color(Color::new(0.0, 0.0, 1.0));

        // Insert the far sphere first so insertion order cannot decide the result
        let mut builder = SceneBuilder::new();
        builder
            .add_sphere(Vec3::new(0.0, 0.0, -6.0), 1.5, far)
            .unwrap()
            .add_sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, near)
            .unwrap();
        let scene = builder.freeze();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();

        assert_abs_diff_eq!(rec.t, 2.0, epsilon = 1e-5);
        match rec.material {
            Material::Lambertian { albedo } => {
                assert_eq!(albedo.value(rec.point), Color::new(1.0, 0.0, 0.0))
            }
            other => panic!("unexpected material {other:?}"),
        }
    }

    #[test]
    fn test_nearest_across_kinds() {
        let mut builder = SceneBuilder::new();
        builder
            .add_plane(Vec3::new(0.0, 0.0, -10.0), Vec3::Z, Material::metal(Color::ONE, 0.0))
            .unwrap()
            .add_triangle(
                Vec3::new(-1.0, -1.0, -4.0),
                Vec3::new(1.0, -1.0, -4.0),
                Vec3::new(0.0, 1.0, -4.0),
                Material::dielectric(1.5).unwrap(),
            )
            .unwrap()
            .add_sphere(Vec3::new(0.0, 0.0, -7.0), 1.0, Material::lambertian_color(Color::ONE))
            .unwrap();
        let scene = builder.freeze();

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert_abs_diff_eq!(rec.t, 4.0, epsilon = 1e-5);
        assert!(matches!(rec.material, Material::Dielectric { .. }));

        // Off to the side only the plane remains
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z);
        let rec = scene.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert_abs_diff_eq!(rec.t, 10.0, epsilon = 1e-5);
        assert!(matches!(rec.material, Material::Metal { .. }));
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = SceneBuilder::new().freeze();
        assert!(scene.is_empty());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(scene.hit(&ray, Interval::UNIVERSE).is_none());
        assert_eq!(scene.bounding_box(), Aabb::EMPTY);
    }

    #[test]
    fn test_builder_has_no_capacity_limit() {
        let mut builder = SceneBuilder::new();
        for i in 0..1200 {
            builder
                .add_sphere(
                    Vec3::new(i as f32, 0.0, 0.0),
                    0.25,
                    Material::lambertian_color(Color::ONE),
                )
                .unwrap();
        }
        let scene = builder.freeze();
        assert_eq!(scene.len(), 1200);
        assert_eq!(scene.stats().spheres, 1200);
    }

    #[test]
    fn test_invalid_primitive_is_reported() {
        let mut builder = SceneBuilder::new();
        let err = builder
            .add_sphere(Vec3::ZERO, -2.0, Material::lambertian_color(Color::ONE))
            .unwrap_err();
        assert_eq!(err, SceneError::InvalidRadius(-2.0));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_scene_bounding_box_merges_primitives() {
        let mut builder = SceneBuilder::new();
        builder
            .add_sphere(Vec3::ZERO, 1.0, Material::lambertian_color(Color::ONE))
            .unwrap()
            .add_sphere(Vec3::new(4.0, 0.0, 0.0), 1.0, Material::lambertian_color(Color::ONE))
            .unwrap();
        let scene = builder.freeze();

        let bbox = scene.bounding_box();
        assert_eq!(bbox.min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(bbox.max, Vec3::new(5.0, 1.0, 1.0));
    }

    #[test]
    fn test_planes_do_not_widen_scene_box() {
        let mut builder = SceneBuilder::new();
        builder
            .add_plane(Vec3::ZERO, Vec3::Y, Material::lambertian_color(Color::ONE))
            .unwrap()
            .add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, Material::lambertian_color(Color::ONE))
            .unwrap();
        let scene = builder.freeze();

        let bbox = scene.bounding_box();
        assert!(bbox.is_finite());
        assert_eq!(bbox.min, Vec3::new(-1.0, 0.0, -1.0));
    }
}
