//! PID controller implementation.
//!
//! A parallel-form PID (`Kp*e + Ki*∫e + Kd*de/dt`) with output
//! saturation and a backward-difference derivative.
//!
//! The integral accumulates every step regardless of saturation; there
//! is deliberately no anti-windup here. Sustained saturation therefore
//! winds the integral up and produces excess overshoot once the error
//! reverses, and downstream tests depend on that behavior.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};

/// PID controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidController {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
    /// Minimum output value.
    pub out_min: f64,
    /// Maximum output value.
    pub out_max: f64,
}

impl PidController {
    /// Create a new PID controller.
    ///
    /// # Errors
    ///
    /// Returns an error if any gain is non-finite or if
    /// `out_min >= out_max`.
    pub fn new(kp: f64, ki: f64, kd: f64, out_min: f64, out_max: f64) -> ControlResult<Self> {
        if !(kp.is_finite() && ki.is_finite() && kd.is_finite()) {
            return Err(ControlError::InvalidArg {
                what: "PID gains must be finite",
            });
        }
        if out_min >= out_max {
            return Err(ControlError::InvalidArg {
                what: "out_min must be less than out_max",
            });
        }
        Ok(Self {
            kp,
            ki,
            kd,
            out_min,
            out_max,
        })
    }

    /// Compute controller output given process variable and setpoint.
    ///
    /// # Arguments
    ///
    /// * `state` - Controller state (integral, previous error)
    /// * `pv` - Process variable (measured speed)
    /// * `sp` - Setpoint (reference speed)
    /// * `dt` - Time since last update (seconds)
    ///
    /// # Returns
    ///
    /// Updated state and the saturated command together with the raw
    /// tracking error that produced it.
    pub fn update(&self, state: &PidState, pv: f64, sp: f64, dt: f64) -> (PidState, PidOutput) {
        // Error: e = sp - pv (positive error means PV is below setpoint)
        let error = sp - pv;

        let p_term = self.kp * error;

        // Integral accumulates unconditionally, saturated or not.
        let integral = state.integral + error * dt;
        let i_term = self.ki * integral;

        // Backward finite difference
        let derivative = (error - state.prev_error) / dt;
        let d_term = self.kd * derivative;

        let raw = p_term + i_term + d_term;
        let command = raw.clamp(self.out_min, self.out_max);

        let new_state = PidState {
            integral,
            prev_error: error,
        };

        (new_state, PidOutput { command, error })
    }
}

/// PID controller state, carried across steps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PidState {
    /// Integral accumulator (∫ error dt).
    pub integral: f64,
    /// Previous error, for the backward-difference derivative.
    pub prev_error: f64,
}

impl PidState {
    /// State at simulation start: zero integral, previous error seeded
    /// with the initial error so the first derivative term is zero.
    pub fn for_initial_error(error: f64) -> Self {
        Self {
            integral: 0.0,
            prev_error: error,
        }
    }
}

/// One controller update's outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidOutput {
    /// Saturated command, within `[out_min, out_max]`.
    pub command: f64,
    /// Tracking error `sp - pv` before any gain is applied.
    pub error: f64,
}
