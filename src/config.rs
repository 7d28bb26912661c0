// src/config.rs

//! Configuration for the tilt-rotor controller.
//!
//! All values are loaded once at startup and stay fixed for the lifetime of
//! the controller. With the `serde` feature the whole configuration can be
//! deserialized, e.g. from a RON file.

use crate::actuator::ActuatorLayout;
use crate::mixer::MixerConfig;
use crate::{AxisGains, GainSet, Number, PositionGainMode, Real};
use core::time::Duration;
use num_traits::NumCast;
use thiserror::Error;

/// Reasons a configuration is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A gain is NaN or infinite.
    #[error("gain on axis '{axis}' is not finite")]
    NonFiniteGain {
        /// Axis name: x, y, roll, pitch or yaw.
        axis: &'static str,
    },
    /// A mixer calibration value is NaN or infinite.
    #[error("mixer calibration contains a non-finite value")]
    NonFiniteMixer,
    /// The duty cycle band is empty.
    #[error("minimum duty cycle must be below the maximum")]
    InvalidDutyRange,
    /// The neutral duty cycle lies outside the safe band.
    #[error("center duty cycle lies outside the safe band")]
    CenterOutOfRange,
    /// The control rate is zero.
    #[error("control rate must be greater than zero")]
    ZeroControlRate,
}

/// Configuration for gains, mixing and actuator wiring.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TiltRotorConfig<T> {
    /// PD gains for the five axes.
    pub gains: GainSet<T>,
    /// Which gains act on the y position error.
    pub position_gain_mode: PositionGainMode,
    /// Duty cycle calibration and safe band.
    pub mixer: MixerConfig<T>,
    /// Servo wiring.
    pub layout: ActuatorLayout,
    /// Nominal rate at which the external scheduler ticks the controller.
    pub control_rate_hz: u32,
}

impl<T: Number> TiltRotorConfig<T> {
    /// Creates a new configuration with default values for all parameters.
    /// Unit proportional gains, a unit duty scale centered on zero and a
    /// `[-1, 1]` band. These should be replaced with values tuned for the
    /// hardware, or start from [`TiltRotorConfig::reference`].
    ///
    /// Example Usage
    /// ```
    /// use tilt_rotor_mixer::{AxisGains, PositionGainMode, TiltRotorConfig};
    ///
    /// let mut config = TiltRotorConfig::<f32>::new();
    ///
    /// // Position gains. The y axis follows x unless per-axis mode is chosen.
    /// config.gains.x = AxisGains::new(2.0, 0.0, 0.001);
    /// config.position_gain_mode = PositionGainMode::SharedX;
    ///
    /// // Attitude gains.
    /// config.gains.roll = AxisGains::new(2.0, 0.0, 0.1);
    /// config.gains.pitch = config.gains.roll;
    /// config.gains.yaw = config.gains.roll;
    ///
    /// // Servo duty cycle calibration.
    /// config.mixer.scale = 0.2;
    /// config.mixer.center = 7.0;
    /// config.mixer.min = 5.0;
    /// config.mixer.max = 9.0;
    ///
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            gains: GainSet::new(),
            position_gain_mode: PositionGainMode::default(),
            mixer: MixerConfig::new(T::one(), T::zero(), -T::one(), T::one()),
            layout: ActuatorLayout::default(),
            control_rate_hz: 50,
        }
    }

    /// The nominal tick period, `None` when the control rate is zero.
    pub fn control_period(&self) -> Option<Duration> {
        Duration::from_secs(1).checked_div(self.control_rate_hz)
    }
}

impl<T: Number> Default for TiltRotorConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn lit<T: Real>(value: f64) -> T {
    <T as NumCast>::from(value).unwrap_or_else(T::nan)
}

impl<T: Real> TiltRotorConfig<T> {
    /// The tuned values of the reference airframe.
    ///
    /// Position gains kp 2, kd 0.001; attitude gains kp 2, kd 0.1; all
    /// integral gains zero. Duty cycle `0.2 * tilt + 7` saturated to
    /// `[5, 9]`, servos on pins 11, 13, 15 and 16 at 50 Hz, 50 Hz control.
    pub fn reference() -> Self {
        let position = AxisGains::new(lit(2.0), lit(0.0), lit(0.001));
        let attitude = AxisGains::new(lit(2.0), lit(0.0), lit(0.1));
        Self {
            gains: GainSet {
                x: position,
                y: position,
                roll: attitude,
                pitch: attitude,
                yaw: attitude,
            },
            position_gain_mode: PositionGainMode::SharedX,
            mixer: MixerConfig::new(lit(0.2), lit(7.0), lit(5.0), lit(9.0)),
            layout: ActuatorLayout::REFERENCE,
            control_rate_hz: 50,
        }
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, gains) in self.gains.axes() {
            if !(gains.kp.is_finite() && gains.ki.is_finite() && gains.kd.is_finite()) {
                return Err(ConfigError::NonFiniteGain { axis });
            }
        }

        let MixerConfig {
            scale,
            center,
            min,
            max,
        } = self.mixer;
        if !(scale.is_finite() && center.is_finite() && min.is_finite() && max.is_finite()) {
            return Err(ConfigError::NonFiniteMixer);
        }
        if max <= min {
            return Err(ConfigError::InvalidDutyRange);
        }
        if center < min || max < center {
            return Err(ConfigError::CenterOutOfRange);
        }

        if self.control_rate_hz == 0 {
            return Err(ConfigError::ZeroControlRate);
        }
        Ok(())
    }
}
