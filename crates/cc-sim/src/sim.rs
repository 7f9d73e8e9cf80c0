//! Closed-loop simulation driver.

use cc_config::{CruiseConfig, ReferenceDef};
use cc_controls::{PidController, PidState, ReferenceSignal};
use cc_core::ensure_finite;

use crate::disturbance::DisturbanceModel;
use crate::engine::{EngineDynamics, EngineState};
use crate::error::{SimError, SimResult};
use crate::integrator::IntegratorKind;
use crate::trace::{SimulationTrace, TraceSample};
use crate::vehicle::{VehicleDynamics, VehicleState};

/// Driver lifecycle. A fatal numerical error goes straight to `Failed`;
/// there is no retry or rollback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Initialized,
    Running,
    Completed,
    Failed,
}

/// One closed-loop run: controller, engine, vehicle, and disturbance
/// built from a single validated configuration.
pub struct Simulation {
    config: CruiseConfig,
    controller: PidController,
    reference: ReferenceSignal,
    disturbance: DisturbanceModel,
    engine: EngineDynamics,
    vehicle: VehicleDynamics,
    integrator: IntegratorKind,
    state: RunState,
}

impl Simulation {
    /// Build all components from a configuration, validating it first.
    pub fn new(config: &CruiseConfig) -> SimResult<Self> {
        config.validate()?;

        let controller = PidController::new(
            config.kp,
            config.ki,
            config.kd,
            config.throttle_min,
            config.throttle_max,
        )?;
        let reference = match config.reference {
            ReferenceDef::Constant => ReferenceSignal::Constant(config.v_desired_m_s),
            ReferenceDef::Step {
                initial_m_s,
                final_m_s,
                t_step_s,
            } => ReferenceSignal::Step {
                initial: initial_m_s,
                end: final_m_s,
                t_step_s,
            },
        };
        let engine = EngineDynamics::new(config.engine_gain_n, config.engine_tau_s)?;
        let vehicle = VehicleDynamics::new(config.mass_kg, config.drag_n_s_per_m)?;

        Ok(Self {
            controller,
            reference,
            disturbance: DisturbanceModel::from_config(config),
            engine,
            vehicle,
            integrator: config.integrator.into(),
            state: RunState::Initialized,
            config: config.clone(),
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Execute the stepping loop to completion.
    ///
    /// Per step k at t = k*dt: read speed, controller update, engine
    /// step, disturbance sample, vehicle step, record. Any non-finite
    /// produced value aborts with [`SimError::NumericalInstability`]
    /// and the partial trace is discarded.
    pub fn run(&mut self) -> SimResult<SimulationTrace> {
        if self.state != RunState::Initialized {
            return Err(SimError::InvalidArg {
                what: "simulation has already been run",
            });
        }
        self.state = RunState::Running;

        let dt = self.config.dt_s;
        let steps = self.config.step_count();
        tracing::debug!(steps, dt_s = dt, "starting closed-loop run");

        let mut vehicle_state = VehicleState {
            speed_m_s: self.config.v_initial_m_s,
        };
        let mut engine_state =
            EngineState::steady_for_throttle(&self.engine, self.config.throttle_initial);
        let initial_error = self.reference.at(0.0) - vehicle_state.speed_m_s;
        let mut controller_state = PidState::for_initial_error(initial_error);

        let mut trace = SimulationTrace::with_capacity(steps);

        for step in 0..steps {
            let t = step as f64 * dt;

            let setpoint = self.reference.at(t);
            let measured = vehicle_state.speed_m_s;

            let (next_controller_state, out) =
                self.controller.update(&controller_state, measured, setpoint, dt);
            controller_state = next_controller_state;

            engine_state = self
                .engine
                .step(&engine_state, t, dt, out.command, self.integrator);
            let disturbance_n = self.disturbance.force_at(t);
            let net_force_n = engine_state.force_n + disturbance_n;

            vehicle_state = self
                .vehicle
                .step(&vehicle_state, t, dt, net_force_n, self.integrator);

            if let Err(e) = self.check_finite(step, t, out.command, &engine_state, &vehicle_state) {
                self.state = RunState::Failed;
                tracing::warn!(step, time_s = t, "run aborted: {e}");
                return Err(e);
            }

            trace.push(TraceSample {
                time_s: t,
                speed_m_s: vehicle_state.speed_m_s,
                throttle: out.command,
                error_m_s: out.error,
                engine_force_n: engine_state.force_n,
                disturbance_force_n: disturbance_n,
            });
        }

        self.state = RunState::Completed;
        tracing::debug!(
            final_speed_m_s = vehicle_state.speed_m_s,
            "closed-loop run completed"
        );
        Ok(trace)
    }

    fn check_finite(
        &self,
        step: usize,
        time_s: f64,
        command: f64,
        engine: &EngineState,
        vehicle: &VehicleState,
    ) -> SimResult<()> {
        for (value, what) in [
            (command, "throttle command"),
            (engine.force_n, "engine force"),
            (vehicle.speed_m_s, "vehicle speed"),
        ] {
            if ensure_finite(value, what).is_err() {
                return Err(SimError::NumericalInstability { step, time_s, what });
            }
        }
        Ok(())
    }
}

/// Run one simulation from a configuration. Entry point for external
/// reporting and plotting callers.
pub fn run_simulation(config: &CruiseConfig) -> SimResult<SimulationTrace> {
    Simulation::new(config)?.run()
}
