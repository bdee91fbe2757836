//! Recording workbench.
//!
//! Captures every host call in order instead of touching a real UI, so
//! handler behaviour can be checked without a live host.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{ExtensionError, ExtensionResult};

use super::traits::{Terminal, Workbench};

/// A host call observed by [`RecordingWorkbench`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    TerminalCreated { name: String },
    TerminalShown { name: String },
    TextSent { terminal: String, text: String },
    InformationMessage { text: String },
}

/// Workbench that records calls. Clones share the same event log.
#[derive(Debug, Clone, Default)]
pub struct RecordingWorkbench {
    events: Arc<Mutex<Vec<HostEvent>>>,
    unavailable: bool,
}

impl RecordingWorkbench {
    pub fn new() -> Self {
        Self::default()
    }

    /// A workbench whose surfaces all fail with `HostErrorKind::Unavailable`.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Snapshot of the recorded events.
    pub fn events(&self) -> Vec<HostEvent> {
        lock(&self.events).clone()
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&HostEvent) -> bool) -> usize {
        lock(&self.events).iter().filter(|e| predicate(*e)).count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        lock(&self.events).clear();
    }

    fn check(&self, surface: &str) -> ExtensionResult<()> {
        if self.unavailable {
            return Err(ExtensionError::host_unavailable(
                surface,
                "recording workbench is unavailable",
            ));
        }
        Ok(())
    }
}

fn lock(events: &Mutex<Vec<HostEvent>>) -> MutexGuard<'_, Vec<HostEvent>> {
    events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Workbench for RecordingWorkbench {
    fn create_terminal(&self, name: &str) -> ExtensionResult<Box<dyn Terminal>> {
        self.check("terminal")?;
        lock(&self.events).push(HostEvent::TerminalCreated {
            name: name.to_string(),
        });
        Ok(Box::new(RecordingTerminal {
            name: name.to_string(),
            events: Arc::clone(&self.events),
        }))
    }

    fn show_information_message(&self, text: &str) -> ExtensionResult<()> {
        self.check("notification")?;
        lock(&self.events).push(HostEvent::InformationMessage {
            text: text.to_string(),
        });
        Ok(())
    }
}

struct RecordingTerminal {
    name: String,
    events: Arc<Mutex<Vec<HostEvent>>>,
}

impl Terminal for RecordingTerminal {
    fn name(&self) -> &str {
        &self.name
    }

    fn show(&self) -> ExtensionResult<()> {
        lock(&self.events).push(HostEvent::TerminalShown {
            name: self.name.clone(),
        });
        Ok(())
    }

    fn send_text(&self, line: &str) -> ExtensionResult<()> {
        lock(&self.events).push(HostEvent::TextSent {
            terminal: self.name.clone(),
            text: line.to_string(),
        });
        Ok(())
    }
}
