//! Engine (actuator) dynamics.
//!
//! First-order lag between throttle command and delivered force:
//! `dF/dt = (Kv*cmd - F) / tau`. The command is held constant across
//! one integration step (zero-order hold).

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::integrator::IntegratorKind;

/// Engine force state (N).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    /// Current engine force output.
    pub force_n: f64,
}

impl EngineState {
    /// State consistent with holding `throttle` at steady state.
    pub fn steady_for_throttle(engine: &EngineDynamics, throttle: f64) -> Self {
        Self {
            force_n: engine.gain_n * throttle,
        }
    }
}

/// First-order engine lag.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineDynamics {
    /// Gain: force (N) per unit throttle at steady state.
    pub gain_n: f64,
    /// Time constant (seconds), must be positive.
    pub tau_s: f64,
}

impl EngineDynamics {
    pub fn new(gain_n: f64, tau_s: f64) -> SimResult<Self> {
        if tau_s <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "engine tau must be positive",
            });
        }
        Ok(Self { gain_n, tau_s })
    }

    /// Force derivative given current force and throttle command.
    pub fn dfdt(&self, force_n: f64, command: f64) -> f64 {
        (self.gain_n * command - force_n) / self.tau_s
    }

    /// Advance the force state by one step under a held command.
    pub fn step(
        &self,
        state: &EngineState,
        t: f64,
        dt: f64,
        command: f64,
        integrator: IntegratorKind,
    ) -> EngineState {
        let force_n = integrator.advance(t, state.force_n, dt, |_, f| self.dfdt(f, command));
        EngineState { force_n }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_tau_rejected() {
        assert!(EngineDynamics::new(500.0, 0.0).is_err());
        assert!(EngineDynamics::new(500.0, -0.5).is_err());
    }

    #[test]
    fn euler_single_step_value() {
        let engine = EngineDynamics::new(500.0, 0.5).unwrap();
        let state = EngineState { force_n: 0.0 };
        // dF = (500*1 - 0)/0.5 * 0.01 = 10 N
        let next = engine.step(&state, 0.0, 0.01, 1.0, IntegratorKind::ForwardEuler);
        assert!((next.force_n - 10.0).abs() < 1e-12);
    }

    #[test]
    fn converges_to_gain_times_command() {
        let engine = EngineDynamics::new(500.0, 0.5).unwrap();
        let mut state = EngineState::default();
        let dt = 0.01;
        let mut t = 0.0;
        // 10 s is 20 time constants
        for _ in 0..1000 {
            state = engine.step(&state, t, dt, 0.8, IntegratorKind::Rk4);
            t += dt;
        }
        assert!((state.force_n - 400.0).abs() < 1e-2);
    }

    #[test]
    fn steady_initialization_matches_throttle() {
        let engine = EngineDynamics::new(500.0, 0.5).unwrap();
        let state = EngineState::steady_for_throttle(&engine, 0.3);
        assert!((state.force_n - 150.0).abs() < 1e-12);
        // Holding the same command leaves the state unchanged.
        let next = engine.step(&state, 0.0, 0.01, 0.3, IntegratorKind::Rk4);
        assert!((next.force_n - 150.0).abs() < 1e-9);
    }
}
