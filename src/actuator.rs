// src/actuator.rs

//! # Actuator Driver Boundary
//!
//! The crate does not drive hardware. A board support layer implements
//! [`ActuatorDriver`] for its PWM peripheral and receives one duty cycle per
//! tilt servo per tick, addressed by a fixed logical channel.

use crate::mixer::ACTUATOR_COUNT;
use core::fmt::Debug;
use thiserror::Error;

/// Logical channel of one tilt servo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorChannel {
    /// Servo index, 0 through 3, matching the mixer output order.
    pub index: usize,
    /// Board pin carrying the servo's PWM signal.
    pub pin: u8,
}

/// Wiring and PWM frequency of the four tilt servos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActuatorLayout {
    /// Board pins for servos 1 through 4.
    pub pins: [u8; ACTUATOR_COUNT],
    /// PWM carrier frequency.
    pub pwm_frequency_hz: u32,
}

impl ActuatorLayout {
    /// Physical board pins 11, 13, 15 and 16 at 50 Hz.
    pub const REFERENCE: ActuatorLayout = ActuatorLayout {
        pins: [11, 13, 15, 16],
        pwm_frequency_hz: 50,
    };

    /// The four channels in servo order.
    pub fn channels(&self) -> [ActuatorChannel; ACTUATOR_COUNT] {
        let mut index = 0;
        self.pins.map(|pin| {
            let channel = ActuatorChannel { index, pin };
            index += 1;
            channel
        })
    }
}

impl Default for ActuatorLayout {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// A PWM output stage for the tilt servos.
pub trait ActuatorDriver<T> {
    /// Error reported by the hardware layer.
    type Error: Debug;

    /// Sets the duty cycle of one channel. Values are already saturated.
    fn set_duty_cycle(
        &mut self,
        channel: ActuatorChannel,
        duty_cycle: T,
    ) -> Result<(), Self::Error>;
}

/// A driver failure on a specific channel.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("actuator write failed on channel {} (pin {}): {fault:?}", .channel.index, .channel.pin)]
pub struct ActuatorError<E: Debug> {
    /// The channel that failed.
    pub channel: ActuatorChannel,
    /// The driver's error.
    pub fault: E,
}
