// src/mixer.rs

//! # Tilt Servo Mixer
//!
//! Maps the five control efforts onto the four tilt servos of an X-tilt
//! airframe, converts each tilt delta to a servo duty cycle and saturates
//! it to the mechanically safe band.
//!
//! ```text
//! tilt_1 = -u_y - u_yaw + u_pitch
//! tilt_2 = +u_x - u_yaw + u_roll
//! tilt_3 = -u_y + u_yaw + u_pitch
//! tilt_4 = +u_x + u_yaw + u_roll
//!
//! dc_i = clamp(scale * tilt_i + center, min, max)
//! ```
//!
//! The mixer only needs [`SaturatingNumber`] arithmetic, so it also runs on
//! fixed-point types. Every sum and product saturates at the type's range,
//! so large efforts end at a band edge instead of overflowing.

use crate::{ControlEfforts, Number, SaturatingNumber};

/// Number of tilt servos.
pub const ACTUATOR_COUNT: usize = 4;

/// Duty cycle calibration of the tilt servos.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MixerConfig<T> {
    /// Duty cycle units per unit of tilt effort.
    pub scale: T,
    /// Neutral duty cycle, commanded for zero tilt.
    pub center: T,
    /// Lowest safe duty cycle.
    pub min: T,
    /// Highest safe duty cycle.
    pub max: T,
}

impl<T: Number> MixerConfig<T> {
    /// Creates a mixer calibration.
    pub fn new(scale: T, center: T, min: T, max: T) -> Self {
        Self {
            scale,
            center,
            min,
            max,
        }
    }
}

/// Raw tilt deltas before scaling and saturation, one per servo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltDeltas<T>(
    /// Tilt for servos 1 through 4.
    pub [T; ACTUATOR_COUNT],
);

/// Saturated duty cycles, one per servo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorCommand<T> {
    /// Duty cycle for servos 1 through 4.
    pub duty_cycles: [T; ACTUATOR_COUNT],
}

impl<T: Number> ActuatorCommand<T> {
    /// Every servo at the same duty cycle.
    pub fn uniform(duty_cycle: T) -> Self {
        Self {
            duty_cycles: [duty_cycle; ACTUATOR_COUNT],
        }
    }
}

/// Fixed allocation mixer for four tilt servos.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltMixer<T> {
    config: MixerConfig<T>,
}

impl<T: SaturatingNumber> TiltMixer<T> {
    /// Creates a mixer with the given calibration.
    pub fn with_config(config: MixerConfig<T>) -> Self {
        Self { config }
    }

    /// The calibration in use.
    pub fn config(&self) -> &MixerConfig<T> {
        &self.config
    }

    /// Applies the allocation matrix.
    pub fn allocate(&self, efforts: &ControlEfforts<T>) -> TiltDeltas<T> {
        let ControlEfforts {
            x,
            y,
            roll,
            pitch,
            yaw,
        } = *efforts;

        let zero = T::zero();
        TiltDeltas([
            zero.sat_sub(y).sat_sub(yaw).sat_add(pitch),
            x.sat_sub(yaw).sat_add(roll),
            zero.sat_sub(y).sat_add(yaw).sat_add(pitch),
            x.sat_add(yaw).sat_add(roll),
        ])
    }

    /// Converts one tilt delta to a saturated duty cycle.
    ///
    /// A value that does not compare with itself (NaN) yields the center
    /// duty cycle instead.
    pub fn duty_cycle(&self, tilt: T) -> T {
        let MixerConfig {
            scale,
            center,
            min,
            max,
        } = self.config;
        let dc = scale.sat_mul(tilt).sat_add(center);
        if dc.partial_cmp(&dc).is_none() {
            return center;
        }
        Number::clamp(dc, min, max)
    }

    /// Allocates, scales and saturates the efforts into four commands.
    pub fn mix(&self, efforts: &ControlEfforts<T>) -> ActuatorCommand<T> {
        let TiltDeltas(tilts) = self.allocate(efforts);
        ActuatorCommand {
            duty_cycles: tilts.map(|tilt| self.duty_cycle(tilt)),
        }
    }

    /// The command holding every servo at center.
    pub fn neutral(&self) -> ActuatorCommand<T> {
        ActuatorCommand::uniform(self.config.center)
    }
}
