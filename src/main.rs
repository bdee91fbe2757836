//! Code Audit - stand-alone host for the code audit command shim.
//!
//! Activates one session against a process-backed workbench, triggers the
//! command identifiers given on the command line, then deactivates.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use code_audit::commands::CommandBinding;
use code_audit::config::Settings;
use code_audit::error::ExtensionError;
use code_audit::host::ProcessWorkbench;
use code_audit::session::{Extension, SessionContext};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

/// Parsed command line.
#[derive(Debug, Default)]
struct Options {
    config_path: Option<String>,
    list: bool,
    json: bool,
    commands: Vec<String>,
}

fn main() -> ExitCode {
    // Parse command line arguments (simple std::env approach)
    let args: Vec<String> = env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return ExitCode::SUCCESS;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{} {}", NAME, VERSION);
        return ExitCode::SUCCESS;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Run '{} --help' for usage.", NAME);
            return ExitCode::FAILURE;
        }
    };

    // Load configuration, falling back to the built-in command table
    let settings = match &options.config_path {
        Some(path) => match Settings::load(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading configuration: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    init_logging(&settings);

    info!("Starting {} v{}", NAME, VERSION);
    if let Some(path) = &options.config_path {
        info!("Configuration loaded from: {}", path);
    }

    match run(&settings, &options) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "Session failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run one session. Returns whether every requested command succeeded.
fn run(settings: &Settings, options: &Options) -> Result<bool, ExtensionError> {
    let workbench = Arc::new(ProcessWorkbench::new(&settings.terminal));
    let mut ctx = SessionContext::new(workbench.clone(), settings.terminal.reuse);
    let mut extension = Extension::from_settings(settings);

    extension.activate(&mut ctx)?;

    let mut ok = true;

    if options.list || options.commands.is_empty() {
        if let Err(e) = print_commands(&ctx, options.json) {
            error!(error = %e, "Failed to list commands");
            ok = false;
        }
    }

    for identifier in &options.commands {
        if let Err(e) = ctx.execute_command(identifier) {
            error!(command = %identifier, error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ok = false;
        }
    }

    extension.deactivate(&mut ctx);

    // Host housekeeping: wait for launched processes before exiting.
    let failed = workbench.join()?;
    if failed > 0 {
        warn!(failed, "Launched processes exited unsuccessfully");
    }

    Ok(ok)
}

/// Print the registered commands in registration order.
fn print_commands(ctx: &SessionContext, json: bool) -> Result<(), ExtensionError> {
    let registry = ctx.registry();
    let bindings: Vec<&CommandBinding> = registry
        .list_commands()
        .into_iter()
        .filter_map(|id| registry.get(id))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&bindings)?);
        return Ok(());
    }

    for binding in bindings {
        println!("{:<32} {:?}", binding.identifier, binding.action.kind());
    }
    Ok(())
}

/// Parse arguments after the program name.
fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a path", arg))?;
                options.config_path = Some(path.clone());
            }
            "--list" | "-l" => options.list = true,
            "--json" => options.json = true,
            other => {
                if let Some(path) = other.strip_prefix("--config=") {
                    options.config_path = Some(path.to_string());
                } else if other.starts_with('-') {
                    return Err(format!("Unknown option '{}'", other));
                } else {
                    options.commands.push(other.to_string());
                }
            }
        }
    }

    Ok(options)
}

/// Print help message.
fn print_help() {
    println!(
        r#"{} {}
Runs code audit editor commands outside the editor.

USAGE:
    {} [OPTIONS] [COMMAND_ID...]

ARGS:
    <COMMAND_ID>...        Command identifiers to trigger, in order
                           (e.g. codeAudit.runAnalysis)

OPTIONS:
    -c, --config <PATH>    Path to configuration file
    -l, --list             List registered commands
        --json             Print the command list as JSON
    -h, --help             Print help information
    -V, --version          Print version information
"#,
        NAME, VERSION, NAME
    );
}

/// Initialize logging based on settings.
///
/// Logs go to stderr so notifications on stdout stay readable.
fn init_logging(settings: &Settings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    match settings.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
