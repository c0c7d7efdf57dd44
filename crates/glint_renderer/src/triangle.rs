//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, SceneError,
};
use glint_math::{Aabb, Interval, Point3, Ray, Vec3, NEAR_ZERO};

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: Point3,
    v1: Point3,
    v2: Point3,
    /// Pre-computed face normal (unit length, right-handed winding)
    normal: Vec3,
    /// Material
    material: Material,
    /// Bounding box
    bbox: Aabb,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The face normal is `(v1 - v0) x (v2 - v0)`, normalized. Collinear or
    /// non-finite vertices are rejected.
    pub fn new(v0: Point3, v1: Point3, v2: Point3, material: Material) -> Result<Self, SceneError> {
        let cross = (v1 - v0).cross(v2 - v0);
        let len = cross.length();
        if !len.is_finite() || len < NEAR_ZERO {
            return Err(SceneError::DegenerateTriangle);
        }

        let bbox = Aabb::from_points(v0.min(v1).min(v2), v0.max(v1).max(v2));

        Ok(Self {
            v0,
            v1,
            v2,
            normal: cross / len,
            material,
            bbox,
        })
    }

    pub fn vertices(&self) -> [Point3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < NEAR_ZERO {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if !ray_t.contains(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, &self.material).with_uv(u, v))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Color;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Material::lambertian_color(Color::splat(0.5)),
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_centroid_hit() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(1.0 / 3.0, 1.0 / 3.0, -1.0), Vec3::Z);

        let rec = tri.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-6);
        assert!(rec.u >= 0.0 && rec.v >= 0.0 && rec.u + rec.v <= 1.0);
        assert!((rec.u - 1.0 / 3.0).abs() < 1e-5);
        assert!((rec.v - 1.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_outside_point_misses() {
        let tri = unit_triangle();
        // (2, 2, 0) lies in the triangle's plane but outside its edges
        let ray = Ray::new(Vec3::new(2.0, 2.0, -1.0), Vec3::Z);
        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn test_triangle_parallel_misses() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.2, 0.2, 0.0), Vec3::X);
        assert!(tri.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_triangle_normal_oriented_at_hit_time() {
        let tri = unit_triangle();
        assert_eq!(tri.normal(), Vec3::Z);

        // From -Z the stored +Z normal faces away from the ray: back face
        let from_below = Ray::new(Vec3::new(0.25, 0.25, -1.0), Vec3::Z);
        let rec = tri.hit(&from_below, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::NEG_Z);

        let from_above = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::NEG_Z);
        let rec = tri.hit(&from_above, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_triangle_respects_interval() {
        let tri = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 0.25, -1.0), Vec3::Z);
        assert!(tri.hit(&ray, Interval::new(0.001, 0.5)).is_none());
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        let result = Triangle::new(
            Vec3::ZERO,
            Vec3::X,
            Vec3::new(2.0, 0.0, 0.0),
            Material::lambertian_color(Color::ONE),
        );
        assert_eq!(result.unwrap_err(), SceneError::DegenerateTriangle);
    }

    #[test]
    fn test_triangle_bounding_box() {
        let tri = unit_triangle();
        let bbox = tri.bounding_box();
        assert_eq!(bbox.axis_interval(0), Interval::new(0.0, 1.0));
        assert_eq!(bbox.axis_interval(1), Interval::new(0.0, 1.0));
        // Flat along z, so padded to a thin slab around the plane
        assert!(bbox.min.z < 0.0 && bbox.max.z > 0.0);
    }

    #[test]
    fn test_flat_triangle_box_admits_its_hits() {
        let tri = unit_triangle();
        let ray_t = Interval::new(0.001, f32::INFINITY);

        for (x, y) in [(0.25, 0.25), (0.1, 0.8), (0.5, 0.4)] {
            let ray = Ray::new(Vec3::new(x, y, -1.0), Vec3::Z);
            assert!(tri.hit(&ray, ray_t).is_some());
            assert!(tri.bounding_box().hit(&ray, ray_t), "box misses ray at ({x}, {y})");
        }
    }
}
