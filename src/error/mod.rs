//! Error types for the code audit shim.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
