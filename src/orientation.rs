// src/orientation.rs

//! # Orientation Conversion
//!
//! Unit quaternion and Euler angle types, and the conversion between them
//! used by the control law to compute attitude errors.
//!
//! Angles are in radians. Roll is rotation around x, pitch around y and yaw
//! around z, all counterclockwise.

use crate::{Number, Real};
use num_traits::NumCast;

/// Squared norm below which a quaternion is treated as degenerate.
pub const DEGENERATE_NORM_SQUARED: f64 = 1e-6;

/// An orientation quaternion `(w, x, y, z)`.
///
/// The quaternion is expected to be of unit length but is never
/// renormalized here.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion<T> {
    /// Scalar part.
    pub w: T,
    /// Vector part, x component.
    pub x: T,
    /// Vector part, y component.
    pub y: T,
    /// Vector part, z component.
    pub z: T,
}

/// Roll, pitch and yaw in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngles<T> {
    /// Rotation around x.
    pub roll: T,
    /// Rotation around y.
    pub pitch: T,
    /// Rotation around z.
    pub yaw: T,
}

impl<T: Number> EulerAngles<T> {
    /// Level attitude, heading zero.
    pub fn zero() -> Self {
        Self {
            roll: T::zero(),
            pitch: T::zero(),
            yaw: T::zero(),
        }
    }
}

impl<T: Number> Quaternion<T> {
    /// Creates a quaternion from its scalar and vector parts.
    pub fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, x, y, z }
    }

    /// The identity rotation `(1, 0, 0, 0)`.
    pub fn identity() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }

    /// Sum of the squared components.
    pub fn norm_squared(&self) -> T {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }
}

impl<T: Number> Default for Quaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> Quaternion<T> {
    /// Returns `true` when every component is finite and the quaternion is
    /// not close to zero length.
    pub fn is_valid(&self) -> bool {
        let finite =
            self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite();
        let threshold = <T as NumCast>::from(DEGENERATE_NORM_SQUARED).unwrap_or_else(T::zero);
        finite && threshold < self.norm_squared()
    }

    /// Converts this quaternion to roll, pitch and yaw.
    pub fn to_euler(&self) -> EulerAngles<T> {
        euler_from_quaternion(*self)
    }
}

/// Converts a quaternion into Euler angles (roll, pitch, yaw).
///
/// The sine of pitch is clamped to `[-1, 1]` before `asin` so that a
/// quaternion drifted slightly off unit length cannot leave the domain.
/// Near pitch = ±90° this saturates at exactly ±π/2.
pub fn euler_from_quaternion<T: Real>(q: Quaternion<T>) -> EulerAngles<T> {
    let Quaternion { w, x, y, z } = q;
    let one = T::one();
    let two = one + one;

    let t0 = two * (w * x + y * z);
    let t1 = one - two * (x * x + y * y);
    let roll = t0.atan2(t1);

    let t2 = <T as Number>::clamp(two * (w * y - z * x), -one, one);
    let pitch = t2.asin();

    let t3 = two * (w * z + x * y);
    let t4 = one - two * (y * y + z * z);
    let yaw = t3.atan2(t4);

    EulerAngles { roll, pitch, yaw }
}
