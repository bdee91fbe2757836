//! Command executor module.
//!
//! Handles spawning the external processes that launch commands hand to
//! the terminal.

mod subprocess;

pub use subprocess::SubprocessBuilder;
