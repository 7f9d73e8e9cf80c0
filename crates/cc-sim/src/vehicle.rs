//! Vehicle (plant) dynamics.
//!
//! Longitudinal speed with viscous drag: `dv/dt = (F_net - b*v) / m`,
//! where `F_net` is engine force plus disturbance force, held constant
//! across one integration step.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::integrator::IntegratorKind;

/// Vehicle speed state (m/s). The sole externally observed plant output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub speed_m_s: f64,
}

/// First-order longitudinal plant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleDynamics {
    /// Vehicle mass (kg), must be positive.
    pub mass_kg: f64,
    /// Viscous drag coefficient (N*s/m), must be non-negative.
    pub drag_n_s_per_m: f64,
}

impl VehicleDynamics {
    pub fn new(mass_kg: f64, drag_n_s_per_m: f64) -> SimResult<Self> {
        if mass_kg <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "vehicle mass must be positive",
            });
        }
        if drag_n_s_per_m < 0.0 {
            return Err(SimError::InvalidArg {
                what: "drag coefficient must be non-negative",
            });
        }
        Ok(Self {
            mass_kg,
            drag_n_s_per_m,
        })
    }

    /// Speed derivative given current speed and net applied force.
    pub fn dvdt(&self, speed_m_s: f64, net_force_n: f64) -> f64 {
        (net_force_n - self.drag_n_s_per_m * speed_m_s) / self.mass_kg
    }

    /// Advance the speed state by one step under a held net force.
    pub fn step(
        &self,
        state: &VehicleState,
        t: f64,
        dt: f64,
        net_force_n: f64,
        integrator: IntegratorKind,
    ) -> VehicleState {
        let speed_m_s =
            integrator.advance(t, state.speed_m_s, dt, |_, v| self.dvdt(v, net_force_n));
        VehicleState { speed_m_s }
    }
}
