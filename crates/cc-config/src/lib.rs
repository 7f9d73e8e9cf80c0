//! cc-config: simulation parameter schema and persistence.
//!
//! A [`CruiseConfig`] is an immutable record of every physical,
//! controller, and simulation constant for one run. It is validated once
//! at construction and then shared read-only by every component; no
//! other crate mutates or re-checks it.
//!
//! Persistence is a flat key/value JSON record (the parameter save
//! file). This crate serializes to and from strings only; file I/O is
//! the caller's responsibility.

pub mod config;
pub mod persist;

pub use config::{CruiseConfig, IntegratorDef, ReferenceDef};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: &'static str },

    #[error("Non-finite parameter: {field}")]
    NonFinite { field: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
