//! Detached subprocess spawning.
//!
//! Provides a builder for launching external commands with:
//! - No shell interpretation (direct exec; pass a shell explicitly if needed)
//! - Inherited stdio, so the process talks to the user's terminal
//! - Environment and working directory control
//!
//! The spawned child is returned without waiting on it.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use tracing::debug;

use crate::error::{ExtensionError, ExtensionResult};

/// Builder for subprocess spawning.
#[derive(Debug, Clone)]
pub struct SubprocessBuilder {
    program: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    current_dir: Option<PathBuf>,
}

impl SubprocessBuilder {
    /// Create a new subprocess builder.
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            env: HashMap::new(),
            current_dir: None,
        }
    }

    /// Add arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args.extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: &str) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// Set an environment variable.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Run the command in `dir` instead of the current directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Spawn the command and return immediately.
    pub fn spawn(self) -> ExtensionResult<Child> {
        debug!(
            program = %self.program,
            args = ?self.args,
            cwd = ?self.current_dir,
            "Spawning subprocess"
        );

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        let child = cmd.spawn().map_err(|e| {
            ExtensionError::host_unavailable(
                "terminal",
                format!("Failed to spawn {}: {}", self.program, e),
            )
        })?;

        debug!(pid = child.id(), "Subprocess spawned");
        Ok(child)
    }
}
