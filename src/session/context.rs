//! Session context: the host state an activation runs against.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::commands::{CommandRegistry, Disposable};
use crate::dispatch::ActionDispatcher;
use crate::error::ExtensionResult;
use crate::host::Workbench;

/// Everything the host hands to `activate` and `deactivate`.
///
/// Owns the session's command table (with its disposal set) and the
/// dispatcher that runs bound actions on the host workbench.
pub struct SessionContext {
    id: Uuid,
    registry: CommandRegistry,
    dispatcher: ActionDispatcher,
}

impl SessionContext {
    /// Create a context for a new session.
    pub fn new(workbench: Arc<dyn Workbench>, reuse_terminals: bool) -> Self {
        let id = Uuid::new_v4();
        debug!(session_id = %id, reuse_terminals, "Session context created");
        Self {
            id,
            registry: CommandRegistry::new(),
            dispatcher: ActionDispatcher::new(workbench, reuse_terminals),
        }
    }

    /// Unique identifier of this session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// Tokens awaiting disposal at deactivation.
    pub fn subscriptions(&self) -> &[Disposable] {
        self.registry.subscriptions()
    }

    /// Invoke the command bound to `identifier`.
    ///
    /// This is the host's invocation path. Fails with `UnknownCommand` if
    /// nothing is bound, or with whatever the host surface reports.
    pub fn execute_command(&mut self, identifier: &str) -> ExtensionResult<()> {
        let action = self.registry.resolve(identifier)?;
        debug!(session_id = %self.id, command = identifier, kind = ?action.kind(), "Executing command");
        self.dispatcher.dispatch(&action)
    }

    pub(crate) fn dispatcher_mut(&mut self) -> &mut ActionDispatcher {
        &mut self.dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Action;
    use crate::error::ExtensionError;
    use crate::host::{HostEvent, RecordingWorkbench};

    #[test]
    fn test_execute_bound_command() {
        let workbench = RecordingWorkbench::new();
        let mut ctx = SessionContext::new(Arc::new(workbench.clone()), true);
        ctx.registry_mut()
            .register(
                "codeAudit.runFullAudit",
                Action::Notify {
                    message: "Running full code audit...".to_string(),
                },
            )
            .unwrap();

        ctx.execute_command("codeAudit.runFullAudit").unwrap();
        assert_eq!(
            workbench.events(),
            vec![HostEvent::InformationMessage {
                text: "Running full code audit...".to_string()
            }]
        );
    }

    #[test]
    fn test_execute_unbound_command() {
        let workbench = RecordingWorkbench::new();
        let mut ctx = SessionContext::new(Arc::new(workbench.clone()), true);

        assert!(matches!(
            ctx.execute_command("codeAudit.runLinter"),
            Err(ExtensionError::Command { .. })
        ));
        assert!(workbench.events().is_empty());
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let a = SessionContext::new(Arc::new(RecordingWorkbench::new()), true);
        let b = SessionContext::new(Arc::new(RecordingWorkbench::new()), true);
        assert_ne!(a.id(), b.id());
    }
}
