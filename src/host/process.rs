//! Process-backed workbench used by the `code-audit` binary.
//!
//! Terminals print a banner when shown and run each line sent to them
//! through the configured shell as a detached child process. Notifications
//! are printed to stdout.

use std::path::PathBuf;
use std::process::Child;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::config::TerminalConfig;
use crate::error::{ExtensionError, ExtensionResult};
use crate::executor::SubprocessBuilder;

use super::traits::{Terminal, Workbench};

type ChildList = Arc<Mutex<Vec<(String, Child)>>>;

/// Workbench that maps terminals onto shell subprocesses.
pub struct ProcessWorkbench {
    shell: String,
    working_dir: Option<PathBuf>,
    children: ChildList,
}

impl ProcessWorkbench {
    /// Create a workbench using the shell and working directory from `config`.
    pub fn new(config: &TerminalConfig) -> Self {
        Self {
            shell: config.shell.clone(),
            working_dir: config.working_dir.clone(),
            children: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of launched processes not yet reaped by [`join`](Self::join).
    pub fn pending(&self) -> usize {
        self.children
            .lock()
            .map(|children| children.len())
            .unwrap_or(0)
    }

    /// Wait for every launched process to exit.
    ///
    /// This is host housekeeping for the binary, run after the session has
    /// ended. Returns the number of processes that exited unsuccessfully.
    pub fn join(&self) -> ExtensionResult<usize> {
        let children: Vec<(String, Child)> = {
            let mut guard = self.children.lock().map_err(|e| {
                ExtensionError::host_unavailable("terminal", format!("Process list poisoned: {}", e))
            })?;
            guard.drain(..).collect()
        };

        let mut failed = 0;
        for (terminal, mut child) in children {
            let pid = child.id();
            let status = child.wait()?;
            if status.success() {
                debug!(terminal = %terminal, pid, "Launched process exited");
            } else {
                warn!(terminal = %terminal, pid, code = ?status.code(), "Launched process failed");
                failed += 1;
            }
        }

        Ok(failed)
    }
}

impl Workbench for ProcessWorkbench {
    fn create_terminal(&self, name: &str) -> ExtensionResult<Box<dyn Terminal>> {
        debug!(terminal = name, shell = %self.shell, "Creating terminal");
        Ok(Box::new(ShellTerminal {
            name: name.to_string(),
            shell: self.shell.clone(),
            working_dir: self.working_dir.clone(),
            children: Arc::clone(&self.children),
        }))
    }

    fn show_information_message(&self, text: &str) -> ExtensionResult<()> {
        info!(message = text, "Information message");
        println!("{}", text);
        Ok(())
    }
}

/// Terminal that runs each submitted line with `<shell> -c <line>`.
struct ShellTerminal {
    name: String,
    shell: String,
    working_dir: Option<PathBuf>,
    children: ChildList,
}

impl Terminal for ShellTerminal {
    fn name(&self) -> &str {
        &self.name
    }

    fn show(&self) -> ExtensionResult<()> {
        println!("=== {} ===", self.name);
        Ok(())
    }

    fn send_text(&self, line: &str) -> ExtensionResult<()> {
        let mut builder = SubprocessBuilder::new(&self.shell).args(["-c", line]);
        if let Some(dir) = &self.working_dir {
            builder = builder.current_dir(dir);
        }

        let child = builder.spawn()?;
        info!(terminal = %self.name, pid = child.id(), "Command line sent to terminal");

        self.children
            .lock()
            .map_err(|e| {
                ExtensionError::host_unavailable("terminal", format!("Process list poisoned: {}", e))
            })?
            .push((self.name.clone(), child));

        Ok(())
    }
}
