//! Reference (setpoint) schedules.

use serde::{Deserialize, Serialize};

/// Time-varying reference signal, evaluated purely from time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReferenceSignal {
    /// Fixed setpoint for the whole run.
    Constant(f64),
    /// Setpoint steps from `initial` to `end` at `t_step_s`.
    Step {
        initial: f64,
        end: f64,
        t_step_s: f64,
    },
}

impl ReferenceSignal {
    /// Setpoint at time `t` (seconds).
    pub fn at(&self, t: f64) -> f64 {
        match *self {
            Self::Constant(v) => v,
            Self::Step {
                initial,
                end,
                t_step_s,
            } => {
                if t >= t_step_s {
                    end
                } else {
                    initial
                }
            }
        }
    }
}
