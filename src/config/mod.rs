//! Configuration module.
//!
//! Handles loading and validating the shim's configuration from TOML files.

mod settings;

pub use settings::*;
