//! Extension lifecycle: activation, deactivation and the session state machine.

use std::fmt;

use tracing::{debug, info, warn};

use crate::commands::{default_commands, CommandSpec, DisposeReport, DEFAULT_TERMINAL_NAME};
use crate::config::Settings;
use crate::error::{ExtensionError, ExtensionResult, LifecycleErrorKind};

use super::context::SessionContext;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Inactive,
    Activating,
    Active,
    Deactivating,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Inactive => "inactive",
            SessionState::Activating => "activating",
            SessionState::Active => "active",
            SessionState::Deactivating => "deactivating",
        };
        f.write_str(name)
    }
}

/// The shim's entry points.
///
/// Holds the command table registered on every activation.
#[derive(Debug, Clone)]
pub struct Extension {
    commands: Vec<CommandSpec>,
    terminal_name: String,
    state: SessionState,
}

impl Extension {
    /// Create an extension that registers `commands`, launching into `terminal_name`.
    pub fn new(commands: Vec<CommandSpec>, terminal_name: &str) -> Self {
        Self {
            commands,
            terminal_name: terminal_name.to_string(),
            state: SessionState::Inactive,
        }
    }

    /// Create an extension from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.commands.clone(), &settings.terminal.name)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The command table, in registration order.
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Register every command in the table.
    ///
    /// All or nothing: if any registration fails, the bindings made by this
    /// call are released, the session returns to `Inactive` and the error is
    /// returned. Bindings already in the context are left alone. Returns the
    /// number of bindings registered.
    pub fn activate(&mut self, ctx: &mut SessionContext) -> ExtensionResult<usize> {
        if self.state != SessionState::Inactive {
            return Err(ExtensionError::Lifecycle {
                kind: LifecycleErrorKind::AlreadyActive {
                    state: self.state.to_string(),
                },
            });
        }

        self.state = SessionState::Activating;
        debug!(session_id = %ctx.id(), commands = self.commands.len(), "Activating");

        let mut registered: Vec<String> = Vec::with_capacity(self.commands.len());
        for spec in &self.commands {
            let action = spec.to_action(&self.terminal_name);
            let result = ctx
                .registry_mut()
                .register(&spec.identifier, action)
                .map(|_| ());
            if let Err(e) = result {
                let released = ctx.registry_mut().release(&registered);
                debug!(released, "Rolled back partial activation");
                self.state = SessionState::Inactive;
                return Err(e);
            }
            registered.push(spec.identifier.clone());
        }

        self.state = SessionState::Active;
        let count = registered.len();
        info!(session_id = %ctx.id(), count, "Extension activated");
        Ok(count)
    }

    /// Release every binding and return to `Inactive`.
    ///
    /// Calling this while `Inactive` does nothing. Disposal problems are
    /// logged and reported, never fatal.
    pub fn deactivate(&mut self, ctx: &mut SessionContext) -> DisposeReport {
        if self.state == SessionState::Inactive {
            debug!(session_id = %ctx.id(), "Deactivate called while inactive");
            return DisposeReport::default();
        }

        self.state = SessionState::Deactivating;
        let report = ctx.registry_mut().dispose_all();
        ctx.dispatcher_mut().close_terminals();

        if !report.is_clean() {
            warn!(
                session_id = %ctx.id(),
                missing = ?report.missing,
                "Some bindings were already released"
            );
        }

        self.state = SessionState::Inactive;
        info!(session_id = %ctx.id(), released = report.released, "Extension deactivated");
        report
    }
}

impl Default for Extension {
    fn default() -> Self {
        Self::new(default_commands(), DEFAULT_TERMINAL_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    use crate::commands::{ActionKind, DEFAULT_ANALYSIS_COMMAND};
    use crate::error::RegistrationErrorKind;
    use crate::host::{HostEvent, RecordingWorkbench};

    fn context() -> (RecordingWorkbench, SessionContext) {
        let workbench = RecordingWorkbench::new();
        let ctx = SessionContext::new(Arc::new(workbench.clone()), true);
        (workbench, ctx)
    }

    #[test]
    fn test_activate_registers_every_command_once() {
        let (_, mut ctx) = context();
        let mut extension = Extension::default();

        let count = extension.activate(&mut ctx).unwrap();
        assert_eq!(count, extension.commands().len());
        assert_eq!(extension.state(), SessionState::Active);

        let ids: HashSet<&str> = ctx.subscriptions().iter().map(|d| d.identifier()).collect();
        assert_eq!(ids.len(), count);
        assert_eq!(
            ctx.registry().list_commands(),
            vec![
                "codeAudit.runAnalysis",
                "codeAudit.runFullAudit",
                "codeAudit.runLinter",
                "codeAudit.checkSecurityIssues",
            ]
        );
    }

    #[test]
    fn test_activate_twice_fails() {
        let (_, mut ctx) = context();
        let mut extension = Extension::default();
        extension.activate(&mut ctx).unwrap();

        let result = extension.activate(&mut ctx);
        assert!(matches!(
            result,
            Err(ExtensionError::Lifecycle {
                kind: LifecycleErrorKind::AlreadyActive { .. }
            })
        ));
        assert_eq!(extension.state(), SessionState::Active);
        assert_eq!(ctx.subscriptions().len(), 4);
    }

    #[test]
    fn test_duplicate_identifier_rolls_back() {
        let (_, mut ctx) = context();
        let mut extension = Extension::new(
            vec![
                CommandSpec::new("a.one", ActionKind::Notify, "1"),
                CommandSpec::new("a.two", ActionKind::Notify, "2"),
                CommandSpec::new("a.one", ActionKind::Notify, "again"),
            ],
            "T",
        );

        let result = extension.activate(&mut ctx);
        assert!(matches!(
            result,
            Err(ExtensionError::Registration {
                kind: RegistrationErrorKind::DuplicateIdentifier { .. }
            })
        ));
        assert_eq!(extension.state(), SessionState::Inactive);
        assert!(ctx.subscriptions().is_empty());
        assert!(ctx.registry().is_empty());
    }

    #[test]
    fn test_failed_activation_keeps_existing_bindings() {
        let (_, mut ctx) = context();
        let mut first = Extension::default();
        first.activate(&mut ctx).unwrap();

        let mut second = Extension::new(
            vec![
                CommandSpec::new("other.x", ActionKind::Notify, "x"),
                CommandSpec::new("codeAudit.runLinter", ActionKind::Notify, "clash"),
            ],
            "T",
        );
        assert!(matches!(
            second.activate(&mut ctx),
            Err(ExtensionError::Registration {
                kind: RegistrationErrorKind::DuplicateIdentifier { .. }
            })
        ));

        assert_eq!(second.state(), SessionState::Inactive);
        assert_eq!(first.state(), SessionState::Active);
        assert!(!ctx.registry().contains("other.x"));
        assert_eq!(ctx.registry().len(), 4);
        assert_eq!(ctx.subscriptions().len(), 4);
        assert_eq!(
            ctx.registry().resolve("codeAudit.runLinter").unwrap(),
            crate::commands::Action::Notify {
                message: "Running linter...".to_string()
            }
        );
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let (_, mut ctx) = context();
        let mut extension = Extension::default();
        extension.activate(&mut ctx).unwrap();

        let report = extension.deactivate(&mut ctx);
        assert_eq!(report.released, 4);
        assert!(ctx.registry().is_empty());
        assert!(ctx.subscriptions().is_empty());
        assert_eq!(extension.state(), SessionState::Inactive);

        let again = extension.deactivate(&mut ctx);
        assert_eq!(again, DisposeReport::default());
        assert_eq!(extension.state(), SessionState::Inactive);
    }

    #[test]
    fn test_deactivate_without_activate() {
        let (_, mut ctx) = context();
        let mut extension = Extension::default();
        assert_eq!(extension.deactivate(&mut ctx), DisposeReport::default());
    }

    #[test]
    fn test_deactivate_after_partial_release() {
        let (_, mut ctx) = context();
        let mut extension = Extension::default();
        extension.activate(&mut ctx).unwrap();
        ctx.registry_mut().unregister("codeAudit.runLinter");

        let report = extension.deactivate(&mut ctx);
        assert_eq!(report.released, 3);
        assert_eq!(report.missing, vec!["codeAudit.runLinter".to_string()]);
        assert_eq!(extension.state(), SessionState::Inactive);
        assert!(ctx.subscriptions().is_empty());
    }

    #[test]
    fn test_reactivate_after_deactivate() {
        let (workbench, mut ctx) = context();
        let mut extension = Extension::default();
        extension.activate(&mut ctx).unwrap();
        extension.deactivate(&mut ctx);
        extension.activate(&mut ctx).unwrap();

        ctx.execute_command("codeAudit.runAnalysis").unwrap();
        assert_eq!(
            workbench.count(|e| matches!(
                e,
                HostEvent::TextSent { text, .. } if text == DEFAULT_ANALYSIS_COMMAND
            )),
            1
        );
    }

    #[test]
    fn test_commands_unbound_after_deactivate() {
        let (workbench, mut ctx) = context();
        let mut extension = Extension::default();
        extension.activate(&mut ctx).unwrap();
        extension.deactivate(&mut ctx);

        assert!(ctx.execute_command("codeAudit.runFullAudit").is_err());
        assert!(workbench.events().is_empty());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Deactivating.to_string(), "deactivating");
    }
}
