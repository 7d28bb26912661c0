// src/lib.rs

//! # Tilt-Rotor Position and Attitude Mixer
//!
//! This crate provides a `no_std`, no-alloc closed-loop control mixer for a
//! tilt-rotor multicopter. Desired position and attitude setpoints and live
//! vehicle feedback are turned into four tilt-servo duty cycles each
//! control tick:
//!
//! 1. quaternion to Euler conversion ([`orientation`]),
//! 2. independent PD control of horizontal position and of roll, pitch and
//!    yaw error ([`stabilizer`]),
//! 3. a fixed allocation of the five efforts onto four servos, scaled to
//!    duty cycle and saturated to the safe band ([`mixer`]).
//!
//! Feedback and setpoints are written to a shared [`StateStore`] from any
//! context. The [`TiltRotorController`] reads a consistent snapshot every
//! tick and writes the result through an [`ActuatorDriver`] supplied by the
//! board layer. Scheduling and telemetry transport stay outside the crate.

#![no_std]
#![deny(missing_docs)]

#[cfg(test)]
extern crate std;

pub mod actuator;
pub mod config;
pub mod controller;
pub mod mixer;
pub mod orientation;
pub mod pid;
pub mod stabilizer;
pub mod state;

#[doc(inline)]
pub use actuator::{ActuatorChannel, ActuatorDriver, ActuatorError, ActuatorLayout};
#[doc(inline)]
pub use config::{ConfigError, TiltRotorConfig};
#[doc(inline)]
pub use controller::TiltRotorController;
#[doc(inline)]
pub use mixer::{ActuatorCommand, MixerConfig, TiltDeltas, TiltMixer};
#[doc(inline)]
pub use orientation::{euler_from_quaternion, EulerAngles, Quaternion};
#[doc(inline)]
pub use stabilizer::*;
#[doc(inline)]
pub use state::{
    BodyRates, LinearVelocity, Position, Setpoint, StateSnapshot, StateStore, VehicleState,
};

#[cfg(test)]
mod test_utils;
