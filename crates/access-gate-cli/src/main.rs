// crates/access-gate-cli/src/main.rs
// ============================================================================
// Module: Access Gate CLI Entry Point
// Description: Command dispatcher for config checks, evaluation, and sessions.
// Purpose: Provide a terminal host for Access Gate configurations.
// Dependencies: access-gate-cli, access-gate-config, access-gate-core, clap, thiserror
// ============================================================================

//! ## Overview
//! The `access-gate` binary validates host configuration files, evaluates a
//! gate's policy for a given actor, and runs an interactive terminal session
//! around a configured gate. All output goes through explicit stdout and
//! stderr writers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use access_gate_cli::report::EvaluationReport;
use access_gate_cli::session::Clock;
use access_gate_cli::session::ManualClock;
use access_gate_cli::session::MonotonicClock;
use access_gate_cli::session::Session;
use access_gate_cli::terminal::TerminalWidgetFactory;
use access_gate_config::AccessGateConfig;
use access_gate_config::config_toml_example;
use access_gate_core::OverlayAdapter;
use access_gate_core::UserId;
use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "access-gate", disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Print the derived visual state and applicable rules as JSON.
    Evaluate(EvaluateCommand),
    /// Run an interactive terminal session around the configured gate.
    Run(RunCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate an Access Gate configuration file.
    Validate(ConfigValidateCommand),
    /// Print a canonical example configuration.
    Example,
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to access-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for `evaluate`.
#[derive(Args, Debug)]
struct EvaluateCommand {
    /// Optional config file path (defaults to access-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Actor identity; omitted means no actor.
    #[arg(long, value_name = "ID")]
    user: Option<String>,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Optional config file path (defaults to access-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Initial actor identity.
    #[arg(long, value_name = "ID")]
    user: Option<String>,
    /// Advance time only on `wait` instead of following the wall clock.
    #[arg(long, action = ArgAction::SetTrue)]
    manual_clock: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    if cli.show_version {
        write_stdout_line(&format!("access-gate {}", env!("CARGO_PKG_VERSION")))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    let Some(command) = cli.command else {
        write_stderr_line("no command given; see --help")
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        return Ok(ExitCode::FAILURE);
    };
    match command {
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Evaluate(command) => command_evaluate(command),
        Commands::Run(command) => command_run(command),
    }
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
        ConfigCommand::Example => {
            write_stdout_line(config_toml_example().trim_end())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = load_config(command.config.as_deref())?;
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Gate Commands
// ============================================================================

/// Executes the evaluate command.
fn command_evaluate(command: EvaluateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let report = EvaluationReport::evaluate(&config.gate, command.user.map(UserId::new));
    let payload = serde_json::to_string_pretty(&report)
        .map_err(|err| CliError::new(format!("failed to render report: {err}")))?;
    write_stdout_line(&payload).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the interactive session command.
fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let user = command.user.map(UserId::new);
    if command.manual_clock {
        run_session(config, user, ManualClock::default())
    } else {
        run_session(config, user, MonotonicClock::start())
    }
}

/// Builds the adapter and runs a session on stdin/stdout.
fn run_session<C: Clock>(
    config: AccessGateConfig,
    user: Option<UserId>,
    clock: C,
) -> CliResult<ExitCode> {
    let timings = config.gate_timings().map_err(|err| CliError::new(err.to_string()))?;
    let audit = config.build_audit_sink().map_err(|err| CliError::new(err.to_string()))?;
    let mut adapter = OverlayAdapter::new(TerminalWidgetFactory, audit, timings);
    adapter
        .set_config(config.gate, clock.now())
        .map_err(|err| CliError::new(format!("failed to apply gate config: {err}")))?;
    adapter.set_actor(user);
    let stdin = std::io::stdin();
    let mut session = Session::new(adapter, stdin.lock(), std::io::stdout(), clock);
    session.run().map_err(|err| CliError::new(err.to_string()))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads and validates host configuration.
fn load_config(path: Option<&std::path::Path>) -> CliResult<AccessGateConfig> {
    AccessGateConfig::load(path)
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
