//! Vector helpers glam does not provide with the semantics the tracer needs.

use crate::Vec3;

/// Lengths and components below this are treated as zero.
pub const NEAR_ZERO: f32 = 1e-8;

/// Extra operations on `Vec3` used by geometry and scattering code.
pub trait Vec3Ext {
    /// Normalize, returning the zero vector when the length is below [`NEAR_ZERO`].
    fn unit_or_zero(self) -> Self;

    /// True when every component is within [`NEAR_ZERO`] of zero.
    fn near_zero(self) -> bool;

    /// Mirror `self` about the unit normal `n`: `v - 2 (v . n) n`.
    fn reflect(self, n: Self) -> Self;

    /// Bend a unit direction through a surface with unit normal `n`.
    ///
    /// `eta_ratio` is the incident over transmitted index. Does not check for
    /// total internal reflection; the caller must do that first.
    fn refract(self, n: Self, eta_ratio: f32) -> Self;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn unit_or_zero(self) -> Self {
        let len = self.length();
        if len < NEAR_ZERO {
            Vec3::ZERO
        } else {
            self / len
        }
    }

    #[inline]
    fn near_zero(self) -> bool {
        self.abs().max_element() < NEAR_ZERO
    }

    #[inline]
    fn reflect(self, n: Self) -> Self {
        self - 2.0 * self.dot(n) * n
    }

    #[inline]
    fn refract(self, n: Self, eta_ratio: f32) -> Self {
        let cos_theta = (-self).dot(n).min(1.0);
        let r_out_perp = eta_ratio * (self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }
}
