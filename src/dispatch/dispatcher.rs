//! Action dispatcher: interprets bound actions against the workbench.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::commands::Action;
use crate::error::ExtensionResult;
use crate::host::{Terminal, Workbench};

/// Runs [`Action`]s on a [`Workbench`].
///
/// Launch actions show their terminal and send it the command line, once
/// each per invocation. With terminal reuse enabled, a terminal created by
/// an earlier invocation is used again instead of creating another.
pub struct ActionDispatcher {
    workbench: Arc<dyn Workbench>,
    reuse_terminals: bool,
    terminals: HashMap<String, Box<dyn Terminal>>,
}

impl ActionDispatcher {
    pub fn new(workbench: Arc<dyn Workbench>, reuse_terminals: bool) -> Self {
        Self {
            workbench,
            reuse_terminals,
            terminals: HashMap::new(),
        }
    }

    /// Run one action to completion.
    pub fn dispatch(&mut self, action: &Action) -> ExtensionResult<()> {
        match action {
            Action::LaunchProcess {
                terminal,
                command_line,
            } => self.launch(terminal, command_line),
            Action::Notify { message } => {
                debug!(message = %message, "Showing information message");
                self.workbench.show_information_message(message)
            }
        }
    }

    fn launch(&mut self, name: &str, command_line: &str) -> ExtensionResult<()> {
        if !self.reuse_terminals {
            let terminal = self.workbench.create_terminal(name)?;
            return send(terminal.as_ref(), command_line);
        }

        let terminal = match self.terminals.entry(name.to_string()) {
            Entry::Occupied(entry) => {
                debug!(terminal = name, "Reusing terminal");
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(self.workbench.create_terminal(name)?),
        };

        send(&**terminal, command_line)
    }

    /// Number of terminals held for reuse.
    pub fn open_terminals(&self) -> usize {
        self.terminals.len()
    }

    /// Drop every terminal held for reuse.
    pub fn close_terminals(&mut self) {
        self.terminals.clear();
    }
}

fn send(terminal: &dyn Terminal, command_line: &str) -> ExtensionResult<()> {
    terminal.show()?;
    terminal.send_text(command_line)?;
    info!(terminal = terminal.name(), command_line, "Launched in terminal");
    Ok(())
}
