//! Fixed-step time integrators for scalar first-order states.
//!
//! Every dynamic state in this system is a single `f64` governed by
//! `x' = f(t, x)`, so the integrators work directly on scalars instead
//! of a generic state vector.

use cc_config::IntegratorDef;

/// Integrator selection for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorKind {
    /// Classical RK4 (default, 4 rhs calls per step).
    #[default]
    Rk4,
    /// Forward Euler (1st order, 1 rhs call per step).
    ForwardEuler,
}

impl IntegratorKind {
    /// Advance `x` by one step of `dt` under `x' = rhs(t, x)`.
    pub fn advance(self, t: f64, x: f64, dt: f64, rhs: impl Fn(f64, f64) -> f64) -> f64 {
        match self {
            Self::ForwardEuler => x + dt * rhs(t, x),
            Self::Rk4 => {
                let k1 = rhs(t, x);
                let k2 = rhs(t + 0.5 * dt, x + 0.5 * dt * k1);
                let k3 = rhs(t + 0.5 * dt, x + 0.5 * dt * k2);
                let k4 = rhs(t + dt, x + dt * k3);
                x + dt / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
            }
        }
    }
}

impl From<IntegratorDef> for IntegratorKind {
    fn from(def: IntegratorDef) -> Self {
        match def {
            IntegratorDef::Rk4 => Self::Rk4,
            IntegratorDef::ForwardEuler => Self::ForwardEuler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Exponential decay x' = -x from x(0) = 1 has solution e^{-t}.
    fn decay(_t: f64, x: f64) -> f64 {
        -x
    }

    #[test]
    fn euler_single_step_matches_hand_calc() {
        let x = IntegratorKind::ForwardEuler.advance(0.0, 1.0, 0.1, decay);
        assert!((x - 0.9).abs() < 1e-15);
    }

    #[test]
    fn rk4_is_far_more_accurate_than_euler() {
        let dt = 0.1;
        let mut euler = 1.0;
        let mut rk4 = 1.0;
        let mut t = 0.0;
        for _ in 0..10 {
            euler = IntegratorKind::ForwardEuler.advance(t, euler, dt, decay);
            rk4 = IntegratorKind::Rk4.advance(t, rk4, dt, decay);
            t += dt;
        }
        let exact = (-1.0_f64).exp();
        // RK4's accumulated error here is ~3e-7; Euler's is ~2e-3.
        assert!((rk4 - exact).abs() < 1e-6);
        assert!((euler - exact).abs() > 1e-3);
    }

    #[test]
    fn halving_dt_converges() {
        let run = |dt: f64| {
            let steps = (1.0 / dt).round() as usize;
            let mut x = 1.0;
            let mut t = 0.0;
            for _ in 0..steps {
                x = IntegratorKind::ForwardEuler.advance(t, x, dt, decay);
                t += dt;
            }
            x
        };
        let exact = (-1.0_f64).exp();
        let coarse = run(0.01);
        let fine = run(0.005);
        // First-order scheme: halving dt roughly halves the error.
        assert!((fine - exact).abs() < (coarse - exact).abs());
    }
}
