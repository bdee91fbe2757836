//! Command types: table rows, resolved actions, bindings and disposal tokens.

use serde::{Deserialize, Serialize};

/// Name of the terminal the launch commands run in.
pub const DEFAULT_TERMINAL_NAME: &str = "Code Analysis";

/// Command line sent to the terminal by `codeAudit.runAnalysis`.
pub const DEFAULT_ANALYSIS_COMMAND: &str =
    "python3 /workspaces/CodeAnalysisAgent/project/main.py";

/// Which handler variant a command is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Open the analysis terminal and send the payload as a command line.
    Launch,
    /// Show the payload as an informational message.
    Notify,
}

/// One row of the command table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Host-namespaced identifier, e.g. `codeAudit.runAnalysis`.
    pub identifier: String,
    /// Handler variant.
    pub action: ActionKind,
    /// Command line for `launch`, message text for `notify`.
    pub payload: String,
}

impl CommandSpec {
    pub fn new(identifier: &str, action: ActionKind, payload: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            action,
            payload: payload.to_string(),
        }
    }

    /// Resolve this row into the action it is bound to.
    ///
    /// Launch rows run in the terminal named `terminal`.
    pub fn to_action(&self, terminal: &str) -> Action {
        match self.action {
            ActionKind::Launch => Action::LaunchProcess {
                terminal: terminal.to_string(),
                command_line: self.payload.clone(),
            },
            ActionKind::Notify => Action::Notify {
                message: self.payload.clone(),
            },
        }
    }
}

/// The built-in command table.
pub fn default_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new(
            "codeAudit.runAnalysis",
            ActionKind::Launch,
            DEFAULT_ANALYSIS_COMMAND,
        ),
        CommandSpec::new(
            "codeAudit.runFullAudit",
            ActionKind::Notify,
            "Running full code audit...",
        ),
        CommandSpec::new(
            "codeAudit.runLinter",
            ActionKind::Notify,
            "Running linter...",
        ),
        CommandSpec::new(
            "codeAudit.checkSecurityIssues",
            ActionKind::Notify,
            "Checking for security issues...",
        ),
    ]
}

/// A handler, described as data and interpreted by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Show the named terminal and send it one command line.
    LaunchProcess {
        terminal: String,
        command_line: String,
    },
    /// Show one informational message.
    Notify { message: String },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::LaunchProcess { .. } => ActionKind::Launch,
            Action::Notify { .. } => ActionKind::Notify,
        }
    }
}

/// Association between a command identifier and its action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandBinding {
    pub identifier: String,
    pub action: Action,
}

/// Token that releases one binding when drained from the disposal set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disposable {
    identifier: String,
}

impl Disposable {
    pub(crate) fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
        }
    }

    /// Identifier of the binding this token releases.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}
