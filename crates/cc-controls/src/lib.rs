//! Feedback control primitives for cruiseflow.
//!
//! This crate provides the regulator side of the closed loop: a PID
//! controller operating on scalar `f64` signals, plus the reference
//! schedule that feeds its setpoint.
//!
//! # Design Principles
//!
//! - Signals are scalar `f64` values
//! - Controller state flows state-in/state-out: `update` consumes the
//!   previous state and returns the next, never mutating in place
//! - Saturation is part of the controller contract: the emitted command
//!   is always within the configured output bounds
//! - The integral accumulates unconditionally, including while the
//!   output is saturated. This windup exposure is a required behavior
//!   of the system being modeled, not an oversight; tests pin it.

pub mod controller;
pub mod error;
pub mod reference;

pub use controller::{PidController, PidOutput, PidState};
pub use error::{ControlError, ControlResult};
pub use reference::ReferenceSignal;
