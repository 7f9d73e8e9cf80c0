//! Metric computations over a completed trace.

use cc_config::CruiseConfig;
use cc_sim::SimulationTrace;
use serde::{Deserialize, Serialize};

/// Fraction of the target counted as "risen".
const RISE_FRACTION: f64 = 0.9;
/// Half-width of the settling band, relative to the target.
const SETTLING_BAND: f64 = 0.02;
/// Fraction of the trace (by time, from the end) averaged for the
/// steady-state error.
const STEADY_STATE_WINDOW: f64 = 0.1;

/// Standard step-response metrics for one run.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ResponseMetrics {
    /// First time the speed reaches 90% of the target (seconds).
    /// `None` if the target is never approached within the horizon.
    pub rise_time_s: Option<f64>,
    /// Earliest time after which the speed stays within ±2% of the
    /// target for the remainder of the run. `None` if it never settles.
    pub settling_time_s: Option<f64>,
    /// Peak speed above target, as a percentage of the target.
    /// Zero when there is no overshoot.
    pub overshoot_pct: f64,
    /// Target minus the mean speed over the last 10% of the trace by
    /// time (m/s).
    pub steady_state_error_m_s: f64,
}

/// Reduce a completed trace to its response metrics.
///
/// Deterministic and side-effect free; an empty trace yields the
/// all-sentinel default.
pub fn compute_metrics(trace: &SimulationTrace, config: &CruiseConfig) -> ResponseMetrics {
    if trace.is_empty() {
        return ResponseMetrics::default();
    }

    let target = config.v_desired_m_s;

    ResponseMetrics {
        rise_time_s: rise_time(trace, target),
        settling_time_s: settling_time(trace, target),
        overshoot_pct: overshoot_pct(trace, target),
        steady_state_error_m_s: steady_state_error(trace, target),
    }
}

fn rise_time(trace: &SimulationTrace, target: f64) -> Option<f64> {
    let threshold = RISE_FRACTION * target;
    trace
        .samples()
        .iter()
        .find(|s| {
            if target >= 0.0 {
                s.speed_m_s >= threshold
            } else {
                s.speed_m_s <= threshold
            }
        })
        .map(|s| s.time_s)
}

/// Backward scan: walk in from the end until a sample leaves the band;
/// the settling time is the next sample's time. Ties break toward the
/// earliest qualifying time.
fn settling_time(trace: &SimulationTrace, target: f64) -> Option<f64> {
    let band = SETTLING_BAND * target.abs();
    let samples = trace.samples();

    let mut first_settled = None;
    for sample in samples.iter().rev() {
        if (sample.speed_m_s - target).abs() <= band {
            first_settled = Some(sample.time_s);
        } else {
            break;
        }
    }
    first_settled
}

fn overshoot_pct(trace: &SimulationTrace, target: f64) -> f64 {
    if target == 0.0 {
        return 0.0;
    }
    let peak = trace.speeds().fold(f64::NEG_INFINITY, f64::max);
    let overshoot = peak - target;
    if overshoot > 0.0 {
        overshoot / target.abs() * 100.0
    } else {
        0.0
    }
}

fn steady_state_error(trace: &SimulationTrace, target: f64) -> f64 {
    let t_start = trace.duration_s() * (1.0 - STEADY_STATE_WINDOW);
    let tail: Vec<f64> = trace
        .samples()
        .iter()
        .filter(|s| s.time_s >= t_start)
        .map(|s| s.speed_m_s)
        .collect();
    if tail.is_empty() {
        return 0.0;
    }
    let mean = tail.iter().sum::<f64>() / tail.len() as f64;
    target - mean
}
