//! cc-metrics: step-response performance metrics.
//!
//! Pure reductions over a completed [`SimulationTrace`]: rise time,
//! settling time, overshoot, and steady-state error against the
//! configured target speed. Metrics that cannot be computed (target
//! never reached, empty trace) come back as `None` sentinels, never as
//! errors.

pub mod metrics;

pub use metrics::{compute_metrics, ResponseMetrics};
