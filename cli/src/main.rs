//! CLI entrypoint for tier-cascade
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use cascade_application::{
    AttemptLogger, CascadeParams, CascadeProgressNotifier, HandleTaskUseCase, NoAttemptLogger,
    NoProgress, RunCascadeInput, RunCascadeUseCase,
};
use cascade_domain::{CascadeTask, TierMap};
use cascade_infrastructure::{
    ConfigError, ConfigLoader, FileConfig, JsonlAttemptLogger, StaticTokenAuthorizer, TierInvoker,
    TokioSleeper,
};
use cascade_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use clap::{CommandFactory, Parser};
use std::io::IsTerminal;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines reach the file
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(ConfigError::from)?
    };
    for issue in config.ensure_valid()? {
        warn!("Config: {}", issue);
    }
    let tier_map = Arc::new(config.tier_map()?);

    match command {
        Command::Tiers => {
            print!("{}", ConsoleFormatter::format_tier_map(&tier_map));
            Ok(ExitCode::SUCCESS)
        }
        Command::Run {
            tier,
            system,
            output,
            prompt,
        } => {
            let use_case = build_cascade(&cli, &config, tier_map)?;

            let mut task = CascadeTask::new(prompt.clone());
            if let Some(system) = system {
                task = task.with_system(system.clone());
            }

            let progress: Box<dyn CascadeProgressNotifier> = if cli.quiet {
                Box::new(NoProgress)
            } else if std::io::stderr().is_terminal() {
                Box::new(ProgressReporter::new())
            } else {
                Box::new(SimpleProgress)
            };
            let result = use_case
                .execute_with_progress(RunCascadeInput::new(*tier, task), progress.as_ref())
                .await;

            match output {
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&result)),
                OutputFormat::Text => match &result {
                    Ok(report) => print!("{}", ConsoleFormatter::format_report(report)),
                    Err(error) => eprint!("{}", ConsoleFormatter::format_error(error)),
                },
            }

            Ok(if result.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Serve { bind } => {
            let addr: SocketAddr = match bind {
                Some(bind) => bind
                    .parse()
                    .with_context(|| format!("'{}' is not a socket address", bind))?,
                None => config
                    .server
                    .parse_bind()
                    .0
                    .context("server.bind is not a socket address")?,
            };

            let Some(token) = config.server.resolve_auth_token() else {
                bail!(
                    "No auth token configured: set [server] auth_token or the {} environment variable",
                    config.server.auth_token_env
                );
            };

            let use_case = build_cascade(&cli, &config, tier_map)?;
            let handler = Arc::new(HandleTaskUseCase::new(
                Arc::new(StaticTokenAuthorizer::new(&token)),
                use_case,
            ));

            info!("Starting tier-cascade server");
            cascade_presentation::serve(addr, cascade_presentation::router(handler))
                .await
                .with_context(|| format!("server on {} failed", addr))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Initialize logging from `RUST_LOG`, falling back to the verbosity level.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            builder.with_ansi(false).with_writer(writer).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

// === Dependency Injection ===
fn build_cascade(cli: &Cli, config: &FileConfig, tier_map: Arc<TierMap>) -> Result<RunCascadeUseCase> {
    let mut policy = config.policy()?;
    if let Some(strategy) = cli.strategy {
        policy.strategy = strategy;
    }
    if let Some(max) = cli.max_attempts {
        policy.max_attempts = Some(max as usize);
    }
    let params = CascadeParams::default().with_policy(policy);
    params.validate()?;

    let attempt_logger: Arc<dyn AttemptLogger> = match &cli.attempt_log {
        Some(path) => Arc::new(
            JsonlAttemptLogger::new(path)
                .with_context(|| format!("cannot open attempt log {}", path.display()))?,
        ),
        None => Arc::new(NoAttemptLogger),
    };

    let invoker = Arc::new(TierInvoker::from_config(config, tier_map.clone())?);
    info!(
        "Cascade ready: {} strategy, {} providers",
        params.policy.strategy,
        tier_map.providers().len()
    );

    Ok(RunCascadeUseCase::new(tier_map, invoker, Arc::new(TokioSleeper))
        .with_params(params)
        .with_attempt_logger(attempt_logger))
}
