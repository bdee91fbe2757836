//! Command registry: the session's command table and its disposal set.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{ExtensionError, ExtensionResult, RegistrationErrorKind};

use super::types::{Action, CommandBinding, Disposable};

/// Outcome of draining the disposal set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DisposeReport {
    /// Bindings that were live and are now released.
    pub released: usize,
    /// Tokens whose binding was already gone.
    pub missing: Vec<String>,
}

impl DisposeReport {
    /// Whether every token released a live binding.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Registry of the commands bound in one session.
///
/// Bindings are looked up by identifier. Every registration also appends a
/// [`Disposable`] to an ordered disposal set, which `dispose_all` drains.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    bindings: HashMap<String, CommandBinding>,
    disposal: Vec<Disposable>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `identifier` to `action`.
    ///
    /// Fails with `DuplicateIdentifier` if the identifier already has a live
    /// binding. On failure the registry is left unchanged.
    pub fn register(
        &mut self,
        identifier: &str,
        action: Action,
    ) -> ExtensionResult<&CommandBinding> {
        if self.bindings.contains_key(identifier) {
            return Err(ExtensionError::Registration {
                kind: RegistrationErrorKind::DuplicateIdentifier {
                    identifier: identifier.to_string(),
                },
            });
        }

        debug!(command = identifier, kind = ?action.kind(), "Registering command");
        // A token left behind by `unregister` moves to the end.
        self.disposal.retain(|token| token.identifier() != identifier);
        self.disposal.push(Disposable::new(identifier));
        let binding = self
            .bindings
            .entry(identifier.to_string())
            .or_insert(CommandBinding {
                identifier: identifier.to_string(),
                action,
            });
        Ok(binding)
    }

    /// Release a single binding ahead of `dispose_all`.
    ///
    /// Its token stays in the disposal set until the identifier is registered again.
    pub fn unregister(&mut self, identifier: &str) -> Option<CommandBinding> {
        let removed = self.bindings.remove(identifier);
        if removed.is_some() {
            debug!(command = identifier, "Command unregistered");
        }
        removed
    }

    /// Undo the registration of `identifiers`, dropping their tokens and
    /// bindings. Returns the number of bindings removed.
    pub fn release(&mut self, identifiers: &[String]) -> usize {
        self.disposal
            .retain(|token| !identifiers.iter().any(|id| id == token.identifier()));

        let released = identifiers
            .iter()
            .filter(|id| self.bindings.remove(id.as_str()).is_some())
            .count();
        if released > 0 {
            debug!(released, "Bindings released");
        }
        released
    }

    /// Release every binding created since the last call.
    ///
    /// Best-effort: a token with no live binding is recorded in the report
    /// and skipped. Calling this on an empty disposal set does nothing.
    pub fn dispose_all(&mut self) -> DisposeReport {
        let mut report = DisposeReport::default();

        for token in self.disposal.drain(..) {
            if self.bindings.remove(token.identifier()).is_some() {
                report.released += 1;
            } else {
                warn!(command = token.identifier(), "Binding already released");
                report.missing.push(token.identifier().to_string());
            }
        }

        debug_assert!(self.bindings.is_empty(), "binding without a disposal token");

        if report.released > 0 || !report.missing.is_empty() {
            debug!(
                released = report.released,
                missing = report.missing.len(),
                "Disposal set drained"
            );
        }

        report
    }

    /// Get a binding by identifier.
    pub fn get(&self, identifier: &str) -> Option<&CommandBinding> {
        self.bindings.get(identifier)
    }

    /// Whether `identifier` has a live binding.
    pub fn contains(&self, identifier: &str) -> bool {
        self.bindings.contains_key(identifier)
    }

    /// Look up the action bound to `identifier`.
    pub fn resolve(&self, identifier: &str) -> ExtensionResult<Action> {
        self.bindings
            .get(identifier)
            .map(|binding| binding.action.clone())
            .ok_or_else(|| ExtensionError::unknown_command(identifier))
    }

    /// Live command identifiers, in registration order.
    pub fn list_commands(&self) -> Vec<&str> {
        self.disposal
            .iter()
            .map(Disposable::identifier)
            .filter(|id| self.bindings.contains_key(*id))
            .collect()
    }

    /// Tokens awaiting disposal, in registration order.
    pub fn subscriptions(&self) -> &[Disposable] {
        &self.disposal
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notify(message: &str) -> Action {
        Action::Notify {
            message: message.to_string(),
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = CommandRegistry::new();
        registry.register("codeAudit.runLinter", notify("lint")).unwrap();

        assert!(registry.contains("codeAudit.runLinter"));
        assert_eq!(registry.resolve("codeAudit.runLinter").unwrap(), notify("lint"));
        assert_eq!(registry.subscriptions().len(), 1);
    }

    #[test]
    fn test_register_duplicate_fails_without_side_effects() {
        let mut registry = CommandRegistry::new();
        registry.register("a.b", notify("first")).unwrap();

        let result = registry.register("a.b", notify("second"));
        assert!(matches!(
            result,
            Err(ExtensionError::Registration {
                kind: RegistrationErrorKind::DuplicateIdentifier { .. }
            })
        ));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.subscriptions().len(), 1);
        assert_eq!(registry.resolve("a.b").unwrap(), notify("first"));
    }

    #[test]
    fn test_resolve_unknown_command() {
        let registry = CommandRegistry::new();
        assert!(matches!(
            registry.resolve("nope"),
            Err(ExtensionError::Command { .. })
        ));
    }

    #[test]
    fn test_list_commands_in_registration_order() {
        let mut registry = CommandRegistry::new();
        for id in ["z.last", "a.first", "m.middle"] {
            registry.register(id, notify(id)).unwrap();
        }
        assert_eq!(registry.list_commands(), vec!["z.last", "a.first", "m.middle"]);
    }

    #[test]
    fn test_dispose_all_is_idempotent() {
        let mut registry = CommandRegistry::new();
        registry.register("a.one", notify("1")).unwrap();
        registry.register("a.two", notify("2")).unwrap();

        let report = registry.dispose_all();
        assert_eq!(report.released, 2);
        assert!(report.is_clean());
        assert!(registry.is_empty());
        assert!(registry.subscriptions().is_empty());

        let again = registry.dispose_all();
        assert_eq!(again, DisposeReport::default());
    }

    #[test]
    fn test_dispose_all_reports_released_binding() {
        let mut registry = CommandRegistry::new();
        registry.register("a.one", notify("1")).unwrap();
        registry.register("a.two", notify("2")).unwrap();
        assert!(registry.unregister("a.one").is_some());
        assert_eq!(registry.list_commands(), vec!["a.two"]);

        let report = registry.dispose_all();
        assert_eq!(report.released, 1);
        assert_eq!(report.missing, vec!["a.one".to_string()]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_after_unregister() {
        let mut registry = CommandRegistry::new();
        registry.register("a.one", notify("1")).unwrap();
        registry.register("a.two", notify("2")).unwrap();
        registry.unregister("a.one");
        registry.register("a.one", notify("again")).unwrap();

        assert_eq!(registry.resolve("a.one").unwrap(), notify("again"));
        assert_eq!(registry.list_commands(), vec!["a.two", "a.one"]);
        assert_eq!(registry.subscriptions().len(), 2);

        let report = registry.dispose_all();
        assert_eq!(report.released, 2);
        assert!(report.is_clean());
    }

    #[test]
    fn test_release_only_named_bindings() {
        let mut registry = CommandRegistry::new();
        registry.register("a.one", notify("1")).unwrap();
        registry.register("b.one", notify("2")).unwrap();
        registry.register("b.two", notify("3")).unwrap();

        let released = registry.release(&["b.one".to_string(), "b.two".to_string()]);
        assert_eq!(released, 2);
        assert_eq!(registry.list_commands(), vec!["a.one"]);
        assert_eq!(registry.subscriptions().len(), 1);
        assert!(registry.contains("a.one"));
    }
}
