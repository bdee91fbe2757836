//! Configuration settings for the code audit shim.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::commands::{default_commands, CommandSpec, DEFAULT_TERMINAL_NAME};
use crate::error::ExtensionError;

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
    /// Command table, registered in order at activation.
    #[serde(default = "default_commands")]
    pub commands: Vec<CommandSpec>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("pretty" or "json").
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Terminal surface configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TerminalConfig {
    /// Name of the terminal launch commands run in.
    #[serde(default = "default_terminal_name")]
    pub name: String,
    /// Shell that interprets the command line sent to the terminal.
    #[serde(default = "default_shell")]
    pub shell: String,
    /// Reuse an already-created terminal instead of creating a new one.
    #[serde(default = "default_reuse")]
    pub reuse: bool,
    /// Working directory for launched processes.
    pub working_dir: Option<PathBuf>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_terminal_name() -> String {
    DEFAULT_TERMINAL_NAME.to_string()
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_reuse() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            name: default_terminal_name(),
            shell: default_shell(),
            reuse: default_reuse(),
            working_dir: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            terminal: TerminalConfig::default(),
            commands: default_commands(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ExtensionError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ExtensionError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        let settings = Self::from_toml(&content).map_err(|e| match e {
            ExtensionError::Config { message } => ExtensionError::Config {
                message: format!("{} ({})", message, path.display()),
            },
            other => other,
        })?;

        Ok(settings)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ExtensionError> {
        let settings: Settings = toml::from_str(content).map_err(|e| ExtensionError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate the settings.
    ///
    /// Duplicate identifiers are not rejected here; registration reports them.
    fn validate(&self) -> Result<(), ExtensionError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ExtensionError::Config {
                message: format!(
                    "Invalid log level '{}'. Valid levels: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        let valid_formats = ["pretty", "json"];
        if !valid_formats.contains(&self.logging.format.to_lowercase().as_str()) {
            return Err(ExtensionError::Config {
                message: format!(
                    "Invalid log format '{}'. Valid formats: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        if self.terminal.name.trim().is_empty() {
            return Err(ExtensionError::Config {
                message: "Terminal name must not be empty".to_string(),
            });
        }

        if self.terminal.shell.trim().is_empty() {
            return Err(ExtensionError::Config {
                message: "Terminal shell must not be empty".to_string(),
            });
        }

        for command in &self.commands {
            if command.identifier.trim().is_empty() {
                return Err(ExtensionError::Config {
                    message: "Command identifier must not be empty".to_string(),
                });
            }
            if command.payload.trim().is_empty() {
                return Err(ExtensionError::Config {
                    message: format!("Command '{}' has an empty payload", command.identifier),
                });
            }
        }

        Ok(())
    }
}
