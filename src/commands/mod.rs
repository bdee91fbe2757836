//! Command table and registry.
//!
//! Commands are rows of a table (`CommandSpec`) resolved into `Action`
//! descriptions and bound by identifier in the `CommandRegistry`.
//!
//! ## Adding a New Command
//!
//! 1. Add a row to `default_commands()` (or to `[[commands]]` in the config file)
//! 2. Pick `launch` for a terminal command line or `notify` for a status message

mod registry;
mod types;

pub use registry::{CommandRegistry, DisposeReport};
pub use types::{
    default_commands, Action, ActionKind, CommandBinding, CommandSpec, Disposable,
    DEFAULT_ANALYSIS_COMMAND, DEFAULT_TERMINAL_NAME,
};
