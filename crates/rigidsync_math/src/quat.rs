//! Unit quaternion for representing 3D orientations
//!
//! Stored as (x, y, z, w) with `w` the scalar part, matching the layout
//! used by most scene-graph libraries so poses can be copied field by field.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use crate::Vec3;

/// Rotation quaternion
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a quaternion from raw components
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a rotation of `angle` radians about `axis`
    ///
    /// The axis does not need to be normalized. A zero axis yields identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let half = angle * 0.5;
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Squared magnitude
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Magnitude
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Normalize to unit magnitude (identity if degenerate)
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag < 1e-10 {
            return Self::IDENTITY;
        }
        let inv = 1.0 / mag;
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Conjugate (the inverse rotation for unit quaternions)
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// The vector part
    #[inline]
    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Hamilton product: the result applies `other` first, then `self`
    pub fn compose(&self, other: &Self) -> Self {
        let (ax, ay, az, aw) = (self.x, self.y, self.z, self.w);
        let (bx, by, bz, bw) = (other.x, other.y, other.z, other.w);
        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        // v' = v + 2w(q x v) + 2 q x (q x v)
        let q = self.xyz();
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Advance this orientation by angular velocity `omega` over `dt` seconds
    ///
    /// First-order integration followed by renormalization.
    pub fn integrate(&self, omega: Vec3, dt: f32) -> Self {
        let spin = Self::new(omega.x, omega.y, omega.z, 0.0).compose(self);
        let half_dt = 0.5 * dt;
        Self::new(
            self.x + spin.x * half_dt,
            self.y + spin.y * half_dt,
            self.z + spin.z * half_dt,
            self.w + spin.w * half_dt,
        )
        .normalize()
    }

    /// Component-wise comparison within `epsilon`
    ///
    /// `q` and `-q` describe the same rotation but are not considered equal here.
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
            && (self.w - other.w).abs() <= epsilon
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.compose(&other)
    }
}
