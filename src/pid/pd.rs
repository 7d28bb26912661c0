// src/pid/pd.rs

//! # Proportional-Derivative Control Module
//!
//! This module provides a compute function and control data structure
//! to perform PD (Proportional-Derivative) control calculations where the
//! derivative term is taken from a measured rate rather than differenced
//! error.

use crate::Number;
use piddiy::PidController;

/// Control data for the PD compute callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PdControlData<T> {
    /// The current measured value, e.g. position or attitude angle.
    pub measurement: T,
    /// The current measured rate of change of that value.
    pub rate: T,
}

/// PD compute callback.
///
/// Returns `(error, integral, derivative)` as `piddiy` expects. The
/// integral is always zero so the controller's `ki` contributes nothing,
/// and the derivative is the negated measured rate so that the output
/// becomes `kp * error - kd * rate`.
pub fn compute_pd<T: Number>(
    pid: &mut PidController<T, PdControlData<T>>,
    data: PdControlData<T>,
) -> (T, T, T) {
    let error = pid.set_point - data.measurement;
    let integral = T::zero();
    let derivative = -data.rate;

    (error, integral, derivative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn pd(kp: f64, ki: f64, kd: f64, set_point: f64) -> PidController<f64, PdControlData<f64>> {
        let mut pid = PidController::new();
        pid.compute_fn(compute_pd)
            .set_point(set_point)
            .kp(kp)
            .ki(ki)
            .kd(kd);
        pid
    }

    /// Test PD response with non-zero error and zero rate.
    #[test]
    fn test_pid_pd_proportional_response() {
        let mut pid = pd(2.0, 0.0, 0.001, 1.0);
        let data = PdControlData {
            measurement: 0.0,
            rate: 0.0,
        };

        let (error, integral, derivative) = compute_pd(&mut pid, data);
        let output = pid.compute(data);

        assert!(value_close(1.0, error), "Error should be 1.");
        assert!(value_close(0.0, integral), "Integral should be zero.");
        assert!(value_close(0.0, derivative), "Derivative should be zero.");
        assert!(value_close(2.0, output), "Output should be kp * error.");
    }

    /// Test that the rate term opposes motion.
    #[test]
    fn test_pid_pd_rate_damping() {
        let mut pid = pd(2.0, 0.0, 0.1, 0.0);
        let data = PdControlData {
            measurement: 0.0,
            rate: 3.0,
        };

        let output = pid.compute(data);
        assert!(value_close(-0.3, output), "Output should be -kd * rate.");
    }

    /// Test PD specific response with error and rate together.
    #[test]
    fn test_pid_pd_specific_output() {
        let mut pid = pd(2.0, 0.0, 0.1, 0.5);
        let data = PdControlData {
            measurement: -0.25,
            rate: 1.5,
        };

        let output = pid.compute(data);
        assert!(
            value_close(2.0 * 0.75 - 0.1 * 1.5, output),
            "Output should be kp * error - kd * rate."
        );
    }

    /// The integral gain never changes the output, however many ticks pass.
    #[test]
    fn test_pid_pd_integral_gain_unused() {
        let mut with_ki = pd(2.0, 50.0, 0.1, 1.0);
        let mut without_ki = pd(2.0, 0.0, 0.1, 1.0);
        let data = PdControlData {
            measurement: 0.2,
            rate: -0.4,
        };

        for _ in 0..10 {
            let a = with_ki.compute(data);
            let b = without_ki.compute(data);
            assert_eq!(a, b, "ki should contribute nothing.");
        }
        assert!(value_close(0.0, with_ki.integral), "Integral should never accumulate.");
    }

    /// Test that PD computes zero output for zero error and zero rate.
    #[test]
    fn test_pid_pd_zero_conditions() {
        let mut pid = pd(2.0, 0.0, 0.1, 3.0);
        let data = PdControlData {
            measurement: 3.0,
            rate: 0.0,
        };
        let output = pid.compute(data);

        assert_eq!(0.0, output, "Output should be exactly zero.");
    }
}
