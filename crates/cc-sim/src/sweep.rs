//! Parallel execution of independent runs.
//!
//! Runs share no mutable state: each owns its configuration, component
//! states, and trace, so a sweep is a plain parallel map.

use cc_config::CruiseConfig;
use rayon::prelude::*;

use crate::error::SimResult;
use crate::sim::run_simulation;
use crate::trace::SimulationTrace;

/// Run every configuration, in parallel, preserving input order.
///
/// Failures are per-run: one unstable parameter set does not affect the
/// others.
pub fn run_sweep(configs: &[CruiseConfig]) -> Vec<SimResult<SimulationTrace>> {
    configs.par_iter().map(run_simulation).collect()
}
