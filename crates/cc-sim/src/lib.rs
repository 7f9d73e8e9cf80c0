//! cc-sim: closed-loop cruise-control simulation core.
//!
//! Assembles the loop Controller → Engine → (+Disturbance) → Vehicle,
//! advanced in lock-step over a fixed time grid. Data flows strictly
//! forward within a step; the vehicle speed of step `k` feeds the
//! controller error of step `k+1`.
//!
//! The run is single-threaded and deterministic. Independent runs share
//! nothing mutable, so parameter sweeps fan out across threads (see
//! [`sweep`]).

pub mod disturbance;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod sim;
pub mod sweep;
pub mod trace;
pub mod vehicle;

pub use disturbance::DisturbanceModel;
pub use engine::{EngineDynamics, EngineState};
pub use error::{SimError, SimResult};
pub use integrator::IntegratorKind;
pub use sim::{run_simulation, RunState, Simulation};
pub use sweep::run_sweep;
pub use trace::{SimulationTrace, TraceSample};
pub use vehicle::{VehicleDynamics, VehicleState};
