//! Argument parsing, command dispatch, and outcome telemetry.
//!
//! # Design
//! - Configuration and logging are settled before any command runs; a bad
//!   configuration exits with the validation code without touching the session.
//! - Navigation is synchronous. The runtime exists only to carry the detached
//!   telemetry post, which gets a short grace period before the process exits.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::anyhow;
use ascend_config::{AppConfig, ConfigLoader, ConfirmPolicy, LogFormatSetting};
use ascend_nav::{AutoApprove, ConfirmGate, DirectoryLister, NavigationSession, WalkdirLister};
use ascend_tasks::{TaskDispatcher, TaskFault, Work};
use ascend_telemetry::{GlobalContextGuard, LogFormat, LoggingConfig, init_logging, record_outcome};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;

use crate::client::{CliError, CliResult, TelemetryEmitter, TelemetryEvent, timestamp_now_ms};
use crate::commands::up::handle_up;
use crate::prompt::TerminalPrompt;

const TELEMETRY_GRACE: Duration = Duration::from_millis(500);
const BUILD_SHA: &str = match option_env!("ASCEND_BUILD_SHA") {
    Some(sha) => sha,
    None => "dev",
};

#[derive(Parser)]
#[command(
    name = "ascend",
    version,
    about = "Move up one directory, asking before the location changes"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "ASCEND_CWD",
        help = "Starting location; defaults to the process working directory"
    )]
    cwd: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "ASCEND_CONFIG",
        help = "JSON configuration file"
    )]
    config: Option<PathBuf>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Move to the parent directory.
    #[command(alias = "..")]
    Up(UpArgs),
}

#[derive(Args)]
struct UpArgs {
    /// Skip the confirmation prompt.
    #[arg(long, short = 'f')]
    force: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Parses CLI arguments, executes the requested command, and emits outcome
/// telemetry. Returns the process exit code.
#[must_use]
pub fn run() -> i32 {
    let cli = Cli::parse();
    let command_name = command_label(&cli.command);
    let trace_id = Uuid::new_v4().to_string();

    let config = match load_config(cli.config.clone()) {
        Ok(config) => config,
        Err(err) => return report_error(&err),
    };
    if let Err(err) = install_logging(&config) {
        return report_error(&err);
    }
    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(err) => return report_error(&err),
    };
    let _context = GlobalContextGuard::new(command_name);

    let result = execute(&cli, &config);
    let (exit_code, message, outcome) = match result {
        Ok(outcome) => (0, None, outcome),
        Err(err) => {
            let exit_code = report_error(&err);
            (exit_code, Some(err.display_message()), "error")
        }
    };
    record_outcome(outcome);

    if let Some(emitter) = TelemetryEmitter::from_endpoint(config.telemetry_endpoint.clone()) {
        let event = TelemetryEvent {
            command: command_name,
            outcome,
            trace_id,
            exit_code,
            message,
            timestamp_ms: timestamp_now_ms(),
        };
        let dispatcher = TaskDispatcher::new(runtime.handle().clone());
        if let Some(flushed) = emit_detached(&dispatcher, emitter, event) {
            runtime.block_on(async {
                let _ = tokio::time::timeout(TELEMETRY_GRACE, flushed).await;
            });
        }
    }

    exit_code
}

fn report_error(err: &CliError) -> i32 {
    eprintln!("error: {}", err.display_message());
    err.exit_code()
}

fn execute(cli: &Cli, config: &AppConfig) -> CliResult<&'static str> {
    match &cli.command {
        Command::Up(args) => {
            let mut session = open_session(cli.cwd.as_deref())?;
            let gate = select_gate(args.force, config.confirm);
            let lister = WalkdirLister::new().show_hidden(config.listing.show_hidden);
            let lister = config
                .listing
                .enabled
                .then_some(&lister as &dyn DirectoryLister);
            let mut stdout = io::stdout().lock();
            let outcome = handle_up(&mut session, gate.as_ref(), lister, cli.output, &mut stdout)?;
            Ok(outcome.as_str())
        }
    }
}

fn load_config(file: Option<PathBuf>) -> CliResult<AppConfig> {
    ConfigLoader::new()
        .file(file)
        .load()
        .map_err(|err| CliError::validation(format!("invalid configuration: {}", err.describe())))
}

fn install_logging(config: &AppConfig) -> CliResult<()> {
    init_logging(&LoggingConfig {
        level: &config.logging.level,
        format: log_format(config.logging.format),
        build_sha: BUILD_SHA,
    })
    .map_err(CliError::failure)
}

fn build_runtime() -> CliResult<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| CliError::failure(anyhow!("failed to start async runtime: {err}")))
}

const fn log_format(setting: LogFormatSetting) -> LogFormat {
    match setting {
        LogFormatSetting::Auto => LogFormat::infer(),
        LogFormatSetting::Pretty => LogFormat::Pretty,
        LogFormatSetting::Json => LogFormat::Json,
    }
}

fn open_session(cwd: Option<&Path>) -> CliResult<NavigationSession> {
    match cwd {
        Some(path) => NavigationSession::new(path).map_err(|err| {
            CliError::validation(format!(
                "invalid --cwd '{}': {:#}",
                path.display(),
                anyhow::Error::new(err)
            ))
        }),
        None => NavigationSession::from_process().map_err(CliError::failure),
    }
}

fn select_gate(force: bool, policy: ConfirmPolicy) -> Box<dyn ConfirmGate> {
    if force || policy == ConfirmPolicy::AssumeYes {
        Box::new(AutoApprove)
    } else {
        Box::new(TerminalPrompt)
    }
}

/// Post `event` without waiting for it.
///
/// The returned receiver resolves once the post finishes either way, so the
/// caller can grant a grace period before exit. Failures are logged at debug.
fn emit_detached(
    dispatcher: &TaskDispatcher,
    emitter: TelemetryEmitter,
    event: TelemetryEvent,
) -> Option<oneshot::Receiver<()>> {
    let (flushed_tx, flushed_rx) = oneshot::channel::<()>();
    let work = Work::new(move || async move {
        let _flushed = flushed_tx;
        emitter.send(&event).await
    })
    .named("telemetry");
    let on_error = Box::new(|fault: TaskFault| {
        debug!(error = %fault, "telemetry emit failed");
    });

    match dispatcher.run_detached(Some(work), Some(on_error)) {
        Ok(()) => Some(flushed_rx),
        Err(err) => {
            debug!(error = %err, "telemetry dispatch failed");
            None
        }
    }
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Up(_) => "up",
    }
}
