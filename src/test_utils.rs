// src/test_utils.rs

//! This module contains utilities for testing.

use crate::actuator::{ActuatorChannel, ActuatorDriver};

/// A constant defining the tolerance within which floating-point values
/// are considered close enough to be equal.
pub const TEST_TOLERANCE: f64 = 1e-6;

/// Checks if two floating point numbers are close enough to be considered
/// equal.
///
/// # Arguments
/// * `target` - The target value.
/// * `value` - The value to compare against the target.
///
/// # Returns
/// `true` if the absolute difference between `target` and `value` is less than
/// `TEST_TOLERANCE`, otherwise `false`.
pub fn value_close(target: f64, value: f64) -> bool {
    (target - value).abs() < TEST_TOLERANCE
}

/// Checks if each of the components in a vector is close enough to
/// be considered equal.
///
/// # Arguments
/// * `target` - The target vector as a tuple of three `f64` values.
/// * `value` - The vector to compare against the target.
///
/// # Returns
/// `true` if each component of `target` and `value` is close as per `value_close`,
/// otherwise `false`.
pub fn vector_close(target: (f64, f64, f64), value: (f64, f64, f64)) -> bool {
    value_close(target.0, value.0)
        && value_close(target.1, value.1)
        && value_close(target.2, value.2)
}

/// Checks if four duty cycles match their targets.
pub fn duty_close(target: [f64; 4], value: [f64; 4]) -> bool {
    target.iter().zip(value.iter()).all(|(t, v)| value_close(*t, *v))
}

/// Actuator driver that records the last duty cycle written per channel
/// and can be told to fail on one channel.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    /// Last value written to each channel, `None` until written.
    pub duty_cycles: [Option<f64>; 4],
    /// Pin numbers seen per channel.
    pub pins: [Option<u8>; 4],
    /// Number of successful writes.
    pub writes: usize,
    /// Channel index that rejects every write.
    pub failing_channel: Option<usize>,
}

/// Error reported by [`RecordingDriver`].
#[derive(Debug, PartialEq, Eq)]
pub struct ChannelFault(pub usize);

impl ActuatorDriver<f64> for RecordingDriver {
    type Error = ChannelFault;

    fn set_duty_cycle(
        &mut self,
        channel: ActuatorChannel,
        duty_cycle: f64,
    ) -> Result<(), Self::Error> {
        if self.failing_channel == Some(channel.index) {
            return Err(ChannelFault(channel.index));
        }
        self.duty_cycles[channel.index] = Some(duty_cycle);
        self.pins[channel.index] = Some(channel.pin);
        self.writes += 1;
        Ok(())
    }
}
