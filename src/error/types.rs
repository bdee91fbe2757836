//! Error types for the code audit shim.

use thiserror::Error;

/// Main error type for the shim.
#[derive(Error, Debug)]
pub enum ExtensionError {
    /// Configuration-related errors.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Command registration errors.
    #[error("Registration error: {kind}")]
    Registration { kind: RegistrationErrorKind },

    /// Host surface errors (terminal, notifications).
    #[error("Host error: {kind}")]
    Host { kind: HostErrorKind },

    /// Command invocation errors.
    #[error("Command error: {kind}")]
    Command { kind: CommandErrorKind },

    /// Session lifecycle errors.
    #[error("Lifecycle error: {kind}")]
    Lifecycle { kind: LifecycleErrorKind },

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ExtensionError {
    /// Shorthand for a host surface that cannot be created or used.
    pub fn host_unavailable(surface: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Host {
            kind: HostErrorKind::Unavailable {
                surface: surface.into(),
                message: message.into(),
            },
        }
    }

    /// Shorthand for an identifier with no live binding.
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::Command {
            kind: CommandErrorKind::UnknownCommand { name: name.into() },
        }
    }
}

/// Registration error kinds.
#[derive(Error, Debug)]
pub enum RegistrationErrorKind {
    #[error("Command identifier already registered: {identifier}")]
    DuplicateIdentifier { identifier: String },
}

/// Host surface error kinds.
#[derive(Error, Debug)]
pub enum HostErrorKind {
    #[error("{surface} surface unavailable: {message}")]
    Unavailable { surface: String, message: String },
}

/// Command error kinds.
#[derive(Error, Debug)]
pub enum CommandErrorKind {
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },
}

/// Lifecycle error kinds.
#[derive(Error, Debug)]
pub enum LifecycleErrorKind {
    #[error("Session is already active ({state})")]
    AlreadyActive { state: String },
}

/// Result type alias for shim operations.
pub type ExtensionResult<T> = Result<T, ExtensionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_identifier_message() {
        let err = ExtensionError::Registration {
            kind: RegistrationErrorKind::DuplicateIdentifier {
                identifier: "codeAudit.runLinter".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Registration error: Command identifier already registered: codeAudit.runLinter"
        );
    }

    #[test]
    fn test_host_unavailable_message() {
        let err = ExtensionError::host_unavailable("terminal", "no shell");
        assert_eq!(
            err.to_string(),
            "Host error: terminal surface unavailable: no shell"
        );
    }
}
