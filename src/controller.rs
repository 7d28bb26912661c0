// src/controller.rs

//! # Tilt-Rotor Controller
//!
//! Ties the state store, the control law and the mixer into one control
//! tick. The crate does not schedule itself: an external timer, RTOS task
//! or async executor calls [`TiltRotorController::tick`] at the configured
//! rate, while feedback and setpoints are written to the shared
//! [`StateStore`] from wherever they arrive.
//!
//! ## Usage
//!
//! 1. Build the controller from a validated [`TiltRotorConfig`].
//! 2. Call [`TiltRotorController::arm`] once to put every servo at center.
//! 3. Call [`TiltRotorController::tick`] every control period.
//!
//! A tick never waits for data. Before any update has arrived it runs on
//! the store defaults, which command the center duty cycle. If a writer
//! holds the store when the tick samples it, the tick reuses the previous
//! snapshot. Driver errors are logged and not retried within the tick; the
//! next tick writes fresh values anyway.

use crate::actuator::{ActuatorDriver, ActuatorError, ActuatorLayout};
use crate::config::{ConfigError, TiltRotorConfig};
use crate::mixer::{ActuatorCommand, TiltMixer};
use crate::state::{StateSnapshot, StateStore};
use crate::{PdTiltStabilizer, Real, TiltStabilizer};
use core::time::Duration;
use log::{debug, info, warn};

/// Control law, mixer and actuator wiring for one airframe.
pub struct TiltRotorController<T: Real, S: TiltStabilizer<T> = PdTiltStabilizer<T>> {
    stabilizer: S,
    mixer: TiltMixer<T>,
    layout: ActuatorLayout,
    control_period: Option<Duration>,
    last_state: StateSnapshot<T>,
    ticks: u64,
}

impl<T: Real> TiltRotorController<T> {
    /// Creates a controller with the PD control law.
    pub fn with_config(config: TiltRotorConfig<T>) -> Result<Self, ConfigError> {
        let stabilizer = PdTiltStabilizer::with_gains(config.gains, config.position_gain_mode);
        Self::with_stabilizer(config, stabilizer)
    }
}

impl<T: Real, S: TiltStabilizer<T>> TiltRotorController<T, S> {
    /// Creates a controller around a custom control law.
    pub fn with_stabilizer(
        config: TiltRotorConfig<T>,
        stabilizer: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            stabilizer,
            mixer: TiltMixer::with_config(config.mixer),
            layout: config.layout,
            control_period: config.control_period(),
            last_state: StateSnapshot::new(),
            ticks: 0,
        })
    }

    /// Writes the center duty cycle to every servo.
    ///
    /// Call once before the first tick. Stops at the first failing channel.
    pub fn arm<D: ActuatorDriver<T>>(
        &mut self,
        driver: &mut D,
    ) -> Result<(), ActuatorError<D::Error>> {
        let center = self.mixer.config().center;
        for channel in self.layout.channels() {
            driver
                .set_duty_cycle(channel, center)
                .map_err(|fault| ActuatorError { channel, fault })?;
        }
        info!(
            "tilt servos armed on pins {:?} at {} Hz",
            self.layout.pins, self.layout.pwm_frequency_hz
        );
        Ok(())
    }

    /// Runs the control law and the mixer on a snapshot. No I/O.
    pub fn compute(&mut self, state: &StateSnapshot<T>) -> ActuatorCommand<T> {
        let efforts = self.stabilizer.compute_efforts(state);
        self.mixer.mix(&efforts)
    }

    /// One control tick: snapshot, compute, write all four servos.
    ///
    /// Returns the command that was sent.
    pub fn tick<D: ActuatorDriver<T>>(
        &mut self,
        store: &StateStore<T>,
        driver: &mut D,
    ) -> ActuatorCommand<T> {
        match store.try_snapshot() {
            Some(state) => self.last_state = state,
            None => debug!("state store busy, reusing previous snapshot"),
        }
        let state = self.last_state;
        let command = self.compute(&state);

        let outputs = self.layout.channels().into_iter().zip(command.duty_cycles);
        for (channel, duty_cycle) in outputs {
            if let Err(fault) = driver.set_duty_cycle(channel, duty_cycle) {
                warn!("{}", ActuatorError { channel, fault });
            }
        }

        self.ticks = self.ticks.wrapping_add(1);
        if log::log_enabled!(log::Level::Debug) {
            let [dc_1, dc_2, dc_3, dc_4] = command.duty_cycles;
            debug!(
                "tick {}: dc_1: {} dc_2: {} dc_3: {} dc_4: {}",
                self.ticks,
                dc_1.to_f64().unwrap_or(f64::NAN),
                dc_2.to_f64().unwrap_or(f64::NAN),
                dc_3.to_f64().unwrap_or(f64::NAN),
                dc_4.to_f64().unwrap_or(f64::NAN)
            );
        }
        command
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// The nominal period the external scheduler should tick at.
    pub fn control_period(&self) -> Option<Duration> {
        self.control_period
    }

    /// The servo wiring.
    pub fn layout(&self) -> &ActuatorLayout {
        &self.layout
    }

    /// The mixer in use.
    pub fn mixer(&self) -> &TiltMixer<T> {
        &self.mixer
    }
}
