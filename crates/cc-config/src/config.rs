//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Reference (setpoint) schedule for a run.
///
/// Evaluated purely from time; `Constant` holds the configured target
/// for the whole run, `Step` switches from one target to another at a
/// fixed time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ReferenceDef {
    Constant,
    Step {
        initial_m_s: f64,
        final_m_s: f64,
        t_step_s: f64,
    },
}

impl Default for ReferenceDef {
    fn default() -> Self {
        Self::Constant
    }
}

/// Integration scheme selection.
///
/// The same scheme drives both the engine and vehicle states within a
/// run so their accuracies match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum IntegratorDef {
    /// 4th-order Runge-Kutta (default, 4 rhs calls per step).
    #[default]
    Rk4,
    /// Forward Euler (1st-order, matches the reference behavior).
    ForwardEuler,
}

/// Complete parameter set for one cruise-control simulation run.
///
/// Field names carry SI units. The struct is flat on purpose: its
/// serialized form is the simple key/value parameter save file shared
/// with external tooling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CruiseConfig {
    /// Vehicle mass (kg), must be positive.
    pub mass_kg: f64,
    /// Viscous drag coefficient (N*s/m), must be non-negative.
    pub drag_n_s_per_m: f64,
    /// Engine gain (N per unit throttle).
    pub engine_gain_n: f64,
    /// Engine first-order time constant (s), must be positive.
    pub engine_tau_s: f64,
    /// Target speed (m/s).
    pub v_desired_m_s: f64,
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
    /// Lower throttle saturation bound.
    pub throttle_min: f64,
    /// Upper throttle saturation bound.
    pub throttle_max: f64,
    /// Total simulated time (s), must be positive.
    pub t_sim_s: f64,
    /// Fixed integration step (s), must be positive.
    pub dt_s: f64,
    /// Initial vehicle speed (m/s).
    pub v_initial_m_s: f64,
    /// Initial throttle position, within the saturation bounds.
    pub throttle_initial: f64,
    /// Time at which the road grade changes (s).
    pub t_grade_s: f64,
    /// Road grade after the change (degrees).
    pub grade_deg: f64,
    /// Wind speed (m/s). The wind force always opposes motion
    /// regardless of this value's sign; see the disturbance model.
    pub wind_speed_m_s: f64,
    /// Reference schedule (defaults to constant `v_desired_m_s`).
    #[serde(default)]
    pub reference: ReferenceDef,
    /// Integration scheme (defaults to RK4).
    #[serde(default)]
    pub integrator: IntegratorDef,
}

impl Default for CruiseConfig {
    /// Baseline passenger-car scenario: step to 29 m/s (~65 mph),
    /// no grade, no wind.
    fn default() -> Self {
        Self {
            mass_kg: 1000.0,
            drag_n_s_per_m: 50.0,
            engine_gain_n: 500.0,
            engine_tau_s: 0.5,
            v_desired_m_s: 29.0,
            kp: 800.0,
            ki: 40.0,
            kd: 40.0,
            throttle_min: 0.0,
            throttle_max: 1.0,
            t_sim_s: 100.0,
            dt_s: 0.01,
            v_initial_m_s: 0.0,
            throttle_initial: 0.0,
            t_grade_s: 50.0,
            grade_deg: 0.0,
            wind_speed_m_s: 0.0,
            reference: ReferenceDef::Constant,
            integrator: IntegratorDef::Rk4,
        }
    }
}

/// Safety factor for the advisory step-size check: `dt` should stay
/// below the fastest time constant divided by this.
const DT_SAFETY_FACTOR: f64 = 10.0;

impl CruiseConfig {
    /// Validate every construction-time invariant.
    ///
    /// Hard failures are invalid or non-finite parameters. An over-large
    /// `dt` relative to the fastest time constant only degrades accuracy,
    /// so it logs a warning instead of failing.
    pub fn validate(&self) -> ConfigResult<()> {
        self.check_finite()?;

        if self.mass_kg <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                what: "mass_kg must be positive",
            });
        }
        if self.drag_n_s_per_m < 0.0 {
            return Err(ConfigError::InvalidParameter {
                what: "drag_n_s_per_m must be non-negative",
            });
        }
        if self.engine_tau_s <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                what: "engine_tau_s must be positive",
            });
        }
        if self.dt_s <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                what: "dt_s must be positive",
            });
        }
        if self.t_sim_s <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                what: "t_sim_s must be positive",
            });
        }
        if self.throttle_min >= self.throttle_max {
            return Err(ConfigError::InvalidParameter {
                what: "throttle_min must be less than throttle_max",
            });
        }
        if self.throttle_initial < self.throttle_min || self.throttle_initial > self.throttle_max {
            return Err(ConfigError::InvalidParameter {
                what: "throttle_initial must lie within the throttle bounds",
            });
        }
        if let ReferenceDef::Step { t_step_s, .. } = self.reference {
            if t_step_s < 0.0 {
                return Err(ConfigError::InvalidParameter {
                    what: "reference t_step_s must be non-negative",
                });
            }
        }

        let dt_limit = self.fastest_time_constant() / DT_SAFETY_FACTOR;
        if self.dt_s > dt_limit {
            tracing::warn!(
                dt_s = self.dt_s,
                recommended_max_s = dt_limit,
                "dt exceeds the recommended fraction of the fastest time constant; \
                 integration accuracy will degrade"
            );
        }

        Ok(())
    }

    /// Validate and return the config by value, for builder-style use.
    pub fn validated(self) -> ConfigResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// The smaller of the engine and vehicle time constants.
    ///
    /// With zero drag the vehicle is a pure integrator (infinite time
    /// constant) and the engine lag dominates.
    pub fn fastest_time_constant(&self) -> f64 {
        let vehicle_tau = if self.drag_n_s_per_m > 0.0 {
            self.mass_kg / self.drag_n_s_per_m
        } else {
            f64::INFINITY
        };
        self.engine_tau_s.min(vehicle_tau)
    }

    /// Number of fixed steps in one run: the smallest `n` with
    /// `n * dt >= t_sim`.
    pub fn step_count(&self) -> usize {
        (self.t_sim_s / self.dt_s).ceil() as usize
    }

    fn check_finite(&self) -> ConfigResult<()> {
        let fields: [(&'static str, f64); 17] = [
            ("mass_kg", self.mass_kg),
            ("drag_n_s_per_m", self.drag_n_s_per_m),
            ("engine_gain_n", self.engine_gain_n),
            ("engine_tau_s", self.engine_tau_s),
            ("v_desired_m_s", self.v_desired_m_s),
            ("kp", self.kp),
            ("ki", self.ki),
            ("kd", self.kd),
            ("throttle_min", self.throttle_min),
            ("throttle_max", self.throttle_max),
            ("t_sim_s", self.t_sim_s),
            ("dt_s", self.dt_s),
            ("v_initial_m_s", self.v_initial_m_s),
            ("throttle_initial", self.throttle_initial),
            ("t_grade_s", self.t_grade_s),
            ("grade_deg", self.grade_deg),
            ("wind_speed_m_s", self.wind_speed_m_s),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(CruiseConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_mass() {
        let cfg = CruiseConfig {
            mass_kg: 0.0,
            ..CruiseConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = CruiseConfig {
            mass_kg: -10.0,
            ..CruiseConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_time_constants() {
        let cfg = CruiseConfig {
            engine_tau_s: 0.0,
            ..CruiseConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = CruiseConfig {
            dt_s: -0.01,
            ..CruiseConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = CruiseConfig {
            t_sim_s: 0.0,
            ..CruiseConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_throttle_bounds() {
        let cfg = CruiseConfig {
            throttle_min: 1.0,
            throttle_max: 0.0,
            ..CruiseConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_initial_throttle_outside_bounds() {
        let cfg = CruiseConfig {
            throttle_initial: 1.5,
            ..CruiseConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_fields() {
        let cfg = CruiseConfig {
            kp: f64::NAN,
            ..CruiseConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(format!("{err}").contains("kp"));
    }

    #[test]
    fn fastest_time_constant_with_and_without_drag() {
        let cfg = CruiseConfig::default();
        // Engine tau 0.5 s vs vehicle m/b = 20 s
        assert_eq!(cfg.fastest_time_constant(), 0.5);

        let cfg = CruiseConfig {
            drag_n_s_per_m: 0.0,
            ..CruiseConfig::default()
        };
        assert_eq!(cfg.fastest_time_constant(), 0.5);
    }

    #[test]
    fn step_count_covers_horizon() {
        let cfg = CruiseConfig::default();
        assert_eq!(cfg.step_count(), 10_000);

        let cfg = CruiseConfig {
            t_sim_s: 1.0,
            dt_s: 0.3,
            ..CruiseConfig::default()
        };
        // 4 steps of 0.3 s reach t = 1.2 >= 1.0
        assert_eq!(cfg.step_count(), 4);
    }
}
