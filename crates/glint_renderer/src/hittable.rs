//! Hittable trait and HitRecord for ray-object intersection.

use crate::Material;
use glint_math::{Aabb, Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Point3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Whether the ray struck the side the outward normal faces
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Surface coordinates (barycentric for triangles, zero elsewhere)
    pub u: f32,
    pub v: f32,
}

impl<'a> HitRecord<'a> {
    /// Build a record, orienting the normal against the ray.
    ///
    /// `outward_normal` must be unit length. It is stored flipped when the ray
    /// arrives from behind, and `front_face` records which case applied.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            t,
            point: ray.at(t),
            normal,
            front_face,
            material,
            u: 0.0,
            v: 0.0,
        }
    }

    /// Attach surface coordinates.
    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.u = u;
        self.v = v;
        self
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with `ray` whose parameter lies in `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}
