use crate::{Interval, Point3, Ray, Vec3};

/// Axis-aligned bounding box stored as its min and max corners.
///
/// Primitives report one so callers can bound a scene, but scene traversal
/// does not consult boxes: every primitive is tested.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    /// Box containing nothing; the identity for [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Smallest extent any axis of a constructed box may have.
    pub const MIN_EXTENT: f32 = 1e-4;

    /// Box containing everything (infinite planes).
    pub const UNIVERSE: Aabb = Aabb {
        min: Vec3::splat(f32::NEG_INFINITY),
        max: Vec3::splat(f32::INFINITY),
    };

    /// Create a box from two opposite corners, in any order.
    ///
    /// Axes thinner than [`Aabb::MIN_EXTENT`] are widened to it so a flat
    /// primitive still has a box the slab test can hit.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        let mut aabb = Self {
            min: a.min(b),
            max: a.max(b),
        };
        aabb.pad_to_minimums();
        aabb
    }

    /// Box around a sphere.
    pub fn from_sphere(center: Point3, radius: f32) -> Self {
        let r = Vec3::splat(radius.abs());
        Self::from_points(center - r, center + r)
    }

    /// Merge two boxes via component-wise min/max.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// Extent along one axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, axis: usize) -> Interval {
        Interval::new(self.min[axis], self.max[axis])
    }

    /// True when all corners are finite (excludes the universe box and anything touching a plane).
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Center point of the box.
    pub fn centroid(&self) -> Point3 {
        0.5 * (self.min + self.max)
    }

    fn pad_to_minimums(&mut self) {
        for axis in 0..3 {
            let extent = self.axis_interval(axis);
            if extent.size() < Self::MIN_EXTENT {
                let padded = extent.expand(Self::MIN_EXTENT);
                self.min[axis] = padded.min;
                self.max[axis] = padded.max;
            }
        }
    }

    /// Slab test: does the ray pass through the box within `ray_t`?
    pub fn hit(&self, ray: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let inv_d = 1.0 / ray.direction[axis];
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }
}
