//! Per-step result recording.

use serde::{Deserialize, Serialize};

/// One step's worth of recorded signals.
///
/// `speed_m_s` and `engine_force_n` are the post-step states; the
/// command and error are the controller outputs that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceSample {
    pub time_s: f64,
    pub speed_m_s: f64,
    pub throttle: f64,
    pub error_m_s: f64,
    pub engine_force_n: f64,
    pub disturbance_force_n: f64,
}

/// Append-only record of a completed run, one sample per step.
///
/// Owned by the driver while running; afterwards read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationTrace {
    samples: Vec<TraceSample>,
}

impl SimulationTrace {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            samples: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, sample: TraceSample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&TraceSample> {
        self.samples.last()
    }

    /// Final recorded speed, if any steps were taken.
    pub fn final_speed_m_s(&self) -> Option<f64> {
        self.last().map(|s| s.speed_m_s)
    }

    /// Total simulated time covered by the trace.
    pub fn duration_s(&self) -> f64 {
        self.last().map(|s| s.time_s).unwrap_or(0.0)
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.time_s)
    }

    pub fn speeds(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.speed_m_s)
    }

    pub fn throttles(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.throttle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time_s: f64, speed_m_s: f64) -> TraceSample {
        TraceSample {
            time_s,
            speed_m_s,
            throttle: 0.5,
            error_m_s: 0.0,
            engine_force_n: 0.0,
            disturbance_force_n: 0.0,
        }
    }

    #[test]
    fn accessors_on_empty_trace() {
        let trace = SimulationTrace::default();
        assert!(trace.is_empty());
        assert_eq!(trace.final_speed_m_s(), None);
        assert_eq!(trace.duration_s(), 0.0);
    }

    #[test]
    fn push_and_read_back() {
        let mut trace = SimulationTrace::with_capacity(2);
        trace.push(sample(0.0, 1.0));
        trace.push(sample(0.01, 2.0));
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.final_speed_m_s(), Some(2.0));
        assert_eq!(trace.duration_s(), 0.01);
        let speeds: Vec<f64> = trace.speeds().collect();
        assert_eq!(speeds, vec![1.0, 2.0]);
    }
}
