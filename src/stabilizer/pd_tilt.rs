// src/stabilizer/pd_tilt.rs

//! # PD Tilt-Rotor Control Law
//!
//! Independent proportional-derivative control of horizontal position and
//! of roll, pitch and yaw attitude error. Each axis is a `piddiy`
//! controller driven by [`compute_pd`], so every effort has the form
//! `kp * error - kd * rate`. Integral gains are stored on the controllers
//! but the integral term is always zero.
//!
//! | Effort  | Error                 | Rate |
//! |---------|-----------------------|------|
//! | `x`     | `x_des - x`           | `vx` |
//! | `y`     | `y_des - y`           | `vy` |
//! | `roll`  | `roll_des - roll`     | `p`  |
//! | `pitch` | `pitch_des - pitch`   | `q`  |
//! | `yaw`   | `yaw_des - yaw`       | `r`  |
//!
//! The y axis uses the x gains unless the config selects
//! [`PositionGainMode::PerAxis`].

use crate::orientation::euler_from_quaternion;
use crate::pid::{compute_pd, PdControlData};
use crate::state::StateSnapshot;
use crate::{AxisGains, ControlEfforts, GainSet, PositionGainMode, Real, TiltStabilizer};
use piddiy::PidController;

/// Struct representing the PD position and attitude control law.
pub struct PdTiltStabilizer<T: Real> {
    x_pid: PidController<T, PdControlData<T>>,
    y_pid: PidController<T, PdControlData<T>>,
    roll_pid: PidController<T, PdControlData<T>>,
    pitch_pid: PidController<T, PdControlData<T>>,
    yaw_pid: PidController<T, PdControlData<T>>,
}

fn axis_pid<T: Real>(gains: AxisGains<T>) -> PidController<T, PdControlData<T>> {
    let mut pid = PidController::new();
    pid.compute_fn(compute_pd)
        .set_point(T::zero())
        .kp(gains.kp)
        .ki(gains.ki)
        .kd(gains.kd);
    pid
}

fn drive<T: Real>(
    pid: &mut PidController<T, PdControlData<T>>,
    set_point: T,
    measurement: T,
    rate: T,
) -> T {
    pid.set_point(set_point);
    pid.compute(PdControlData { measurement, rate })
}

impl<T: Real> PdTiltStabilizer<T> {
    /// Creates a new control law using the provided gains.
    pub fn with_gains(gains: GainSet<T>, mode: PositionGainMode) -> Self {
        PdTiltStabilizer {
            x_pid: axis_pid(gains.x),
            y_pid: axis_pid(gains.y_position(mode)),
            roll_pid: axis_pid(gains.roll),
            pitch_pid: axis_pid(gains.pitch),
            yaw_pid: axis_pid(gains.yaw),
        }
    }

    /// Creates a new control law with unit proportional gains.
    pub fn new() -> Self {
        Self::with_gains(GainSet::new(), PositionGainMode::default())
    }
}

impl<T: Real> Default for PdTiltStabilizer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> TiltStabilizer<T> for PdTiltStabilizer<T> {
    fn compute_efforts(&mut self, state: &StateSnapshot<T>) -> ControlEfforts<T> {
        let setpoint = &state.setpoint;
        let vehicle = &state.vehicle;
        let velocity = vehicle.linear_velocity;
        let rates = vehicle.body_rates;

        // Position
        let x = drive(
            &mut self.x_pid,
            setpoint.position.x,
            vehicle.position.x,
            velocity.vx,
        );
        let y = drive(
            &mut self.y_pid,
            setpoint.position.y,
            vehicle.position.y,
            velocity.vy,
        );

        // Attitude
        let desired = euler_from_quaternion(setpoint.orientation);
        let current = euler_from_quaternion(vehicle.orientation);
        let roll = drive(&mut self.roll_pid, desired.roll, current.roll, rates.p);
        let pitch = drive(&mut self.pitch_pid, desired.pitch, current.pitch, rates.q);
        let yaw = drive(&mut self.yaw_pid, desired.yaw, current.yaw, rates.r);

        ControlEfforts {
            x,
            y,
            roll,
            pitch,
            yaw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::Quaternion;
    use crate::state::{BodyRates, LinearVelocity, Position};
    use crate::test_utils::*;
    use core::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

    fn reference_gains() -> GainSet<f64> {
        GainSet {
            x: AxisGains::new(2.0, 0.0, 0.001),
            y: AxisGains::new(2.0, 0.0, 0.001),
            roll: AxisGains::new(2.0, 0.0, 0.1),
            pitch: AxisGains::new(2.0, 0.0, 0.1),
            yaw: AxisGains::new(2.0, 0.0, 0.1),
        }
    }

    fn reference_stabilizer() -> PdTiltStabilizer<f64> {
        PdTiltStabilizer::with_gains(reference_gains(), PositionGainMode::SharedX)
    }

    /// Test the initialization of the control law with the reference gains.
    #[test]
    fn test_stabilizer_pd_tilt_initialization() {
        let gains = reference_gains();
        let stabilizer = PdTiltStabilizer::with_gains(gains, PositionGainMode::SharedX);

        assert_eq!(stabilizer.x_pid.kp, gains.x.kp);
        assert_eq!(stabilizer.x_pid.kd, gains.x.kd);
        assert_eq!(stabilizer.roll_pid.kd, gains.roll.kd);
        assert_eq!(stabilizer.pitch_pid.kp, gains.pitch.kp);
        assert_eq!(stabilizer.yaw_pid.kd, gains.yaw.kd);
    }

    /// Test the no error condition.
    #[test]
    fn test_stabilizer_pd_tilt_no_error() {
        let mut stabilizer = reference_stabilizer();
        let yaw = Quaternion::new(FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2);
        let mut state = StateSnapshot::new();
        state.setpoint.position = Position::new(1.5, -2.0, 3.0);
        state.vehicle.position = Position::new(1.5, -2.0, 0.0);
        state.setpoint.orientation = yaw;
        state.vehicle.orientation = yaw;

        let efforts = stabilizer.compute_efforts(&state);

        assert_eq!(ControlEfforts::zero(), efforts, "Efforts should be exactly zero.");
    }

    /// Position error acts through the x gains on both horizontal axes.
    #[test]
    fn test_stabilizer_pd_tilt_position_error() {
        let mut stabilizer = reference_stabilizer();
        let mut state = StateSnapshot::new();
        state.setpoint.position = Position::new(1.0, -0.5, 0.0);
        state.vehicle.linear_velocity = LinearVelocity::new(0.2, 0.4, 9.0);

        let efforts = stabilizer.compute_efforts(&state);

        assert!(value_close(2.0 * 1.0 - 0.001 * 0.2, efforts.x));
        assert!(value_close(2.0 * -0.5 - 0.001 * 0.4, efforts.y));
        assert_eq!(0.0, efforts.roll);
        assert_eq!(0.0, efforts.pitch);
        assert_eq!(0.0, efforts.yaw);
    }

    /// The y gains are ignored in shared mode and used in per-axis mode.
    #[test]
    fn test_stabilizer_pd_tilt_position_gain_mode() {
        let mut gains = reference_gains();
        gains.y = AxisGains::new(5.0, 0.0, 1.0);
        let mut state = StateSnapshot::new();
        state.setpoint.position = Position::new(0.0, 1.0, 0.0);
        state.vehicle.linear_velocity = LinearVelocity::new(0.0, 0.5, 0.0);

        let mut shared = PdTiltStabilizer::with_gains(gains, PositionGainMode::SharedX);
        let mut per_axis = PdTiltStabilizer::with_gains(gains, PositionGainMode::PerAxis);

        assert!(value_close(2.0 - 0.001 * 0.5, shared.compute_efforts(&state).y));
        assert!(value_close(5.0 - 1.0 * 0.5, per_axis.compute_efforts(&state).y));
    }

    /// Attitude error and body rates.
    #[test]
    fn test_stabilizer_pd_tilt_attitude_error() {
        let mut stabilizer = reference_stabilizer();
        let mut state = StateSnapshot::new();
        state.setpoint.orientation = Quaternion::new(FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2);
        state.vehicle.body_rates = BodyRates::new(0.5, -0.5, 1.0);

        let efforts = stabilizer.compute_efforts(&state);

        assert!(value_close(-0.1 * 0.5, efforts.roll));
        assert!(value_close(0.1 * 0.5, efforts.pitch));
        assert!(value_close(2.0 * FRAC_PI_2 - 0.1 * 1.0, efforts.yaw));
        assert_eq!(0.0, efforts.x);
        assert_eq!(0.0, efforts.y);
    }

    /// Integral gains change nothing, even across many ticks.
    #[test]
    fn test_stabilizer_pd_tilt_integral_gain_unused() {
        let mut gains_with_ki = reference_gains();
        gains_with_ki.x.ki = 10.0;
        gains_with_ki.roll.ki = 10.0;
        gains_with_ki.yaw.ki = 10.0;
        let mut with_ki = PdTiltStabilizer::with_gains(gains_with_ki, PositionGainMode::SharedX);
        let mut without_ki = reference_stabilizer();

        let mut state = StateSnapshot::new();
        state.setpoint.position = Position::new(1.0, 1.0, 0.0);
        state.setpoint.orientation = Quaternion::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0);

        for _ in 0..20 {
            assert_eq!(
                without_ki.compute_efforts(&state),
                with_ki.compute_efforts(&state)
            );
        }
    }

    /// The output depends only on the snapshot, not on previous ticks.
    #[test]
    fn test_stabilizer_pd_tilt_deterministic() {
        let mut stabilizer = reference_stabilizer();
        let mut state = StateSnapshot::new();
        state.setpoint.position = Position::new(3.0, 0.0, 0.0);
        let first = stabilizer.compute_efforts(&state);

        let mut other = StateSnapshot::new();
        other.vehicle.body_rates = BodyRates::new(4.0, 4.0, 4.0);
        let _ = stabilizer.compute_efforts(&other);

        assert_eq!(first, stabilizer.compute_efforts(&state));
    }
}
