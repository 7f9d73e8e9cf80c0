//! cc-core: stable foundation for cruiseflow.
//!
//! Contains:
//! - numeric (tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CcError, CcResult};
pub use numeric::*;
