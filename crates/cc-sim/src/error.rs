//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while building or running a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A produced state value went non-finite. The run is discarded;
    /// no partial trace is returned.
    #[error("Numerical instability at step {step} (t = {time_s} s): {what} is non-finite")]
    NumericalInstability {
        step: usize,
        time_s: f64,
        what: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] cc_config::ConfigError),

    #[error("Control error: {0}")]
    Control(#[from] cc_controls::ControlError),
}

pub type SimResult<T> = Result<T, SimError>;
