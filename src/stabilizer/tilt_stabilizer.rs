// src/stabilizer/tilt_stabilizer.rs

//! A module specifying the shared interface for tilt-rotor control laws.
//! This module is designed for embedded systems in no_std environments.
//! It includes the numeric traits used throughout the crate, the PD gain
//! configuration, the five-axis control effort type, and a trait defining
//! the control law.

use crate::state::StateSnapshot;
use num_traits::{Float, SaturatingAdd, SaturatingMul, SaturatingSub};
use piddiy::Number as PiddiyNumber;

/// Custom trait to encapsulate base number requirements.
pub trait Number: PiddiyNumber {
    /// Clamps generic PartialOrd values within a given range.
    fn clamp(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if max < self {
            max
        } else {
            self
        }
    }
}

impl<T: PiddiyNumber> Number for T {}

/// Arithmetic that saturates at the type's range instead of overflowing.
///
/// Floats already saturate to infinity, so their implementation is the
/// plain operator. Fixed-point types map to their saturating operations.
pub trait SaturatingNumber: Number {
    /// `self + rhs`, saturated.
    fn sat_add(self, rhs: Self) -> Self;
    /// `self - rhs`, saturated.
    fn sat_sub(self, rhs: Self) -> Self;
    /// `self * rhs`, saturated.
    fn sat_mul(self, rhs: Self) -> Self;
}

macro_rules! impl_saturating_float {
    ($($float:ty),*) => {$(
        impl SaturatingNumber for $float {
            fn sat_add(self, rhs: Self) -> Self {
                self + rhs
            }
            fn sat_sub(self, rhs: Self) -> Self {
                self - rhs
            }
            fn sat_mul(self, rhs: Self) -> Self {
                self * rhs
            }
        }
    )*};
}

impl_saturating_float!(f32, f64);

macro_rules! impl_saturating_fixed {
    ($($fixed:ident),*) => {$(
        impl<Frac> SaturatingNumber for fixed::$fixed<Frac>
        where
            fixed::$fixed<Frac>: Number + SaturatingAdd + SaturatingSub + SaturatingMul,
        {
            fn sat_add(self, rhs: Self) -> Self {
                SaturatingAdd::saturating_add(&self, &rhs)
            }
            fn sat_sub(self, rhs: Self) -> Self {
                SaturatingSub::saturating_sub(&self, &rhs)
            }
            fn sat_mul(self, rhs: Self) -> Self {
                SaturatingMul::saturating_mul(&self, &rhs)
            }
        }
    )*};
}

impl_saturating_fixed!(FixedI8, FixedI16, FixedI32, FixedI64, FixedI128);

/// Numbers that also support trigonometry and finiteness checks.
///
/// The orientation converter, the state store and the control law need
/// `atan2`, `asin` and `is_finite`, so they require `Real`. The mixer only
/// needs `SaturatingNumber` and also runs on fixed-point types.
pub trait Real: SaturatingNumber + Float {}

impl<T: SaturatingNumber + Float> Real for T {}

/// Proportional, integral and derivative gains for one control axis.
///
/// The integral gain is carried through to the axis controller but the
/// control law never accumulates an integral, so `ki` has no effect on the
/// output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisGains<T> {
    /// Proportional gain.
    pub kp: T,
    /// Integral gain. Declared but unused.
    pub ki: T,
    /// Derivative gain, applied against the measured rate.
    pub kd: T,
}

impl<T: Number> AxisGains<T> {
    /// Creates a gain triple.
    pub fn new(kp: T, ki: T, kd: T) -> Self {
        Self { kp, ki, kd }
    }

    /// Unit proportional gain, no integral or derivative action.
    pub fn proportional() -> Self {
        Self::new(T::one(), T::zero(), T::zero())
    }
}

/// Gains for the five control axes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GainSet<T> {
    /// Horizontal position, x axis.
    pub x: AxisGains<T>,
    /// Horizontal position, y axis. Only used with [`PositionGainMode::PerAxis`].
    pub y: AxisGains<T>,
    /// Roll attitude.
    pub roll: AxisGains<T>,
    /// Pitch attitude.
    pub pitch: AxisGains<T>,
    /// Yaw attitude.
    pub yaw: AxisGains<T>,
}

impl<T: Number> GainSet<T> {
    /// Unit proportional gains on every axis.
    pub fn new() -> Self {
        Self {
            x: AxisGains::proportional(),
            y: AxisGains::proportional(),
            roll: AxisGains::proportional(),
            pitch: AxisGains::proportional(),
            yaw: AxisGains::proportional(),
        }
    }

    /// The gains applied to the y position error for a given mode.
    pub fn y_position(&self, mode: PositionGainMode) -> AxisGains<T> {
        match mode {
            PositionGainMode::SharedX => self.x,
            PositionGainMode::PerAxis => self.y,
        }
    }

    /// Iterates the axes as `(name, gains)` pairs, in x, y, roll, pitch, yaw order.
    pub fn axes(&self) -> [(&'static str, AxisGains<T>); 5] {
        [
            ("x", self.x),
            ("y", self.y),
            ("roll", self.roll),
            ("pitch", self.pitch),
            ("yaw", self.yaw),
        ]
    }
}

impl<T: Number> Default for GainSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Selects which gains act on the y position error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionGainMode {
    /// Both x and y position errors use the x gains.
    #[default]
    SharedX,
    /// The y position error uses its own gains.
    PerAxis,
}

/// The five control efforts produced by one control tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlEfforts<T> {
    /// Position effort along x.
    pub x: T,
    /// Position effort along y.
    pub y: T,
    /// Roll attitude effort.
    pub roll: T,
    /// Pitch attitude effort.
    pub pitch: T,
    /// Yaw attitude effort.
    pub yaw: T,
}

impl<T: Number> ControlEfforts<T> {
    /// All efforts zero.
    pub fn zero() -> Self {
        Self {
            x: T::zero(),
            y: T::zero(),
            roll: T::zero(),
            pitch: T::zero(),
            yaw: T::zero(),
        }
    }

    /// Multiplies every effort by `k`.
    pub fn scaled(self, k: T) -> Self {
        Self {
            x: self.x * k,
            y: self.y * k,
            roll: self.roll * k,
            pitch: self.pitch * k,
            yaw: self.yaw * k,
        }
    }
}

/// A trait for tilt-rotor control laws that turn a state snapshot into
/// position and attitude efforts.
pub trait TiltStabilizer<T: Number> {
    /// Computes the five control efforts for one tick.
    ///
    /// - `state`: A consistent copy of the setpoint and vehicle state.
    ///
    /// Returns unclamped efforts. Saturation is left to the mixer.
    fn compute_efforts(&mut self, state: &StateSnapshot<T>) -> ControlEfforts<T>;
}
