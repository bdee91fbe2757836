//! Host surfaces.
//!
//! The shim only talks to its host through the [`Workbench`] and
//! [`Terminal`] traits. Two implementations are provided:
//!
//! - [`ProcessWorkbench`]: runs terminal lines as shell subprocesses
//! - [`RecordingWorkbench`]: records calls for tests and dry runs

mod process;
mod recording;
mod traits;

pub use process::ProcessWorkbench;
pub use recording::{HostEvent, RecordingWorkbench};
pub use traits::{Terminal, Workbench};
