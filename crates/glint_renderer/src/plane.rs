//! Infinite plane primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, SceneError,
};
use glint_math::{Aabb, Interval, Point3, Ray, Vec3, NEAR_ZERO};

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Point3,
    normal: Vec3,
    material: Material,
}

impl Plane {
    /// Create a plane. The normal is normalized here; a zero or non-finite normal is rejected.
    pub fn new(point: Point3, normal: Vec3, material: Material) -> Result<Self, SceneError> {
        let len = normal.length();
        if !len.is_finite() || len < NEAR_ZERO {
            return Err(SceneError::DegenerateNormal);
        }

        Ok(Self {
            point,
            normal: normal / len,
            material,
        })
    }

    pub fn point(&self) -> Point3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = self.normal.dot(ray.direction);

        // Parallel (or nearly): no single intersection
        if denom.abs() < NEAR_ZERO {
            return None;
        }

        let t = (self.point - ray.origin).dot(self.normal) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, &self.material))
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::UNIVERSE
    }
}
