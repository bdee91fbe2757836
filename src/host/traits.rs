//! Host UI traits.
//!
//! Defines the surfaces the shim drives: terminals and informational
//! messages.

use crate::error::ExtensionResult;

/// The host's UI surface.
///
/// Implementations decide what a terminal and a notification look like.
/// The binary uses [`super::ProcessWorkbench`]; tests use
/// [`super::RecordingWorkbench`].
///
/// # Example
///
/// ```ignore
/// pub struct QuietWorkbench;
///
/// impl Workbench for QuietWorkbench {
///     fn create_terminal(&self, name: &str) -> ExtensionResult<Box<dyn Terminal>> {
///         Err(ExtensionError::host_unavailable("terminal", name))
///     }
///
///     fn show_information_message(&self, _text: &str) -> ExtensionResult<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Workbench: Send + Sync {
    /// Create a new terminal surface called `name`.
    ///
    /// Fails with `HostErrorKind::Unavailable` if the host cannot provide one.
    fn create_terminal(&self, name: &str) -> ExtensionResult<Box<dyn Terminal>>;

    /// Display a short informational message.
    fn show_information_message(&self, text: &str) -> ExtensionResult<()>;
}

/// A terminal surface created by a [`Workbench`].
pub trait Terminal: Send {
    /// Name the terminal was created with.
    fn name(&self) -> &str;

    /// Bring the terminal into view.
    fn show(&self) -> ExtensionResult<()>;

    /// Send one line of text to the terminal, as if typed and submitted.
    ///
    /// Returns once the text is handed over; the outcome of whatever it runs
    /// is not observed.
    fn send_text(&self, line: &str) -> ExtensionResult<()>;
}
