//! External disturbance forces: road grade and wind.
//!
//! Stateless and idempotent: `force_at(t)` is a pure function of the
//! configuration and time, so any sample can be replayed without
//! re-running the simulation.

use cc_config::CruiseConfig;
use cc_core::GRAVITY_M_S2;
use serde::{Deserialize, Serialize};

/// Lumped `0.5 * rho * Cd * A` for the wind drag term.
const WIND_DRAG_COEFF: f64 = 0.6;

/// Time-varying external force model (grade step + constant wind).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisturbanceModel {
    mass_kg: f64,
    t_grade_s: f64,
    grade_deg: f64,
    wind_speed_m_s: f64,
}

impl DisturbanceModel {
    pub fn from_config(config: &CruiseConfig) -> Self {
        Self {
            mass_kg: config.mass_kg,
            t_grade_s: config.t_grade_s,
            grade_deg: config.grade_deg,
            wind_speed_m_s: config.wind_speed_m_s,
        }
    }

    /// Total disturbance force (N) at time `t`.
    ///
    /// Grade contributes nothing before `t_grade_s`; from then on it is
    /// `-m*g*sin(grade)`, negative for an uphill grade. The wind term is
    /// constant for the whole run and always opposes motion regardless
    /// of the sign of the configured wind speed (known model
    /// limitation, kept as-is).
    pub fn force_at(&self, t: f64) -> f64 {
        let grade_n = if t >= self.t_grade_s {
            -self.mass_kg * GRAVITY_M_S2 * self.grade_deg.to_radians().sin()
        } else {
            0.0
        };
        let wind_n = -WIND_DRAG_COEFF * self.wind_speed_m_s * self.wind_speed_m_s;
        grade_n + wind_n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(grade_deg: f64, wind_m_s: f64) -> DisturbanceModel {
        DisturbanceModel::from_config(&CruiseConfig {
            grade_deg,
            wind_speed_m_s: wind_m_s,
            t_grade_s: 50.0,
            ..CruiseConfig::default()
        })
    }

    #[test]
    fn no_grade_force_before_change_time() {
        let d = model(5.0, 0.0);
        assert_eq!(d.force_at(0.0), 0.0);
        assert_eq!(d.force_at(49.99), 0.0);
    }

    #[test]
    fn grade_force_from_change_time_on() {
        let d = model(5.0, 0.0);
        let expected = -1000.0 * GRAVITY_M_S2 * (5.0_f64.to_radians()).sin();
        assert!((d.force_at(50.0) - expected).abs() < 1e-9);
        assert!((d.force_at(100.0) - expected).abs() < 1e-9);
        // ~-855 N for a 5 degree grade on 1000 kg
        assert!(d.force_at(50.0) < -800.0);
    }

    #[test]
    fn wind_always_opposes_motion() {
        let headwind = model(0.0, 10.0);
        let tailwind = model(0.0, -10.0);
        assert_eq!(headwind.force_at(0.0), -60.0);
        // Sign limitation preserved: direction of wind does not matter.
        assert_eq!(tailwind.force_at(0.0), -60.0);
    }

    #[test]
    fn downhill_grade_aids_motion() {
        let d = model(-5.0, 0.0);
        assert!(d.force_at(60.0) > 800.0);
    }
}
