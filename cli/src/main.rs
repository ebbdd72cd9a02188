//! CLI entrypoint for realtalk
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use colored::Colorize;
use realtalk_application::{
    NoTts, RunRealtimePhaseUseCase, RunSessionInput, RunSessionUseCase, SessionProgressNotifier,
};
use realtalk_domain::OutputFormat;
use realtalk_infrastructure::{
    ChannelViewerBroadcaster, ConfigLoader, FileConfig, FileGameLogger, accept_agents,
    record_viewer_events,
};
use realtalk_presentation::{
    Cli, Command, ConsoleFormatter, ProgressReporter, ServeArgs, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_FILE_PREFIX: &str = "realtalk.log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?
    };

    let log_dir = cli.log_dir.as_deref().or(config.logging.log_dir.as_deref());
    let _guard = init_logging(cli.verbose, log_dir);

    if !config.output.color {
        colored::control::set_override(false);
    }

    match cli.command.clone() {
        Some(Command::Serve(args)) => serve(&cli, config, args).await,
        None => {
            Cli::command().print_help()?;
            println!();
            bail!("No command given. Use `realtalk serve` to start a game.");
        }
    }
}

/// Initialize logging based on verbosity level.
///
/// With a log directory, records also go to a daily-rolling file; the
/// returned guard must live until exit so buffered lines are flushed.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let directive = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_env("REALTALK_LOG").unwrap_or_else(|_| EnvFilter::new(directive));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init();

    guard
}

async fn serve(cli: &Cli, mut config: FileConfig, args: ServeArgs) -> Result<()> {
    // CLI overrides win over every config layer
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(agents) = args.agents {
        config.server.agents = agents;
    }
    if let Some(days) = args.days {
        config.server.days = days;
    }
    if let Some(game_id) = args.game_id {
        config.server.game_id = Some(game_id);
    }

    let (session, warnings) = match config.validated() {
        Ok(validated) => validated,
        Err(e) => {
            for issue in &e.issues {
                eprintln!("{}", issue.to_string().red());
            }
            bail!("configuration has {} error(s)", e.issues.len());
        }
    };
    for issue in &warnings {
        eprintln!("{}", issue.to_string().yellow());
    }

    let game_id = config
        .server
        .game_id
        .clone()
        .unwrap_or_else(|| chrono::Local::now().format("%Y%m%d%H%M%S").to_string());

    // === Dependency Injection ===
    let mut phase = RunRealtimePhaseUseCase::new().with_tts(Arc::new(NoTts));
    let mut viewer_recorder = None;
    if let Some(path) = args.viewer_log {
        let viewer = ChannelViewerBroadcaster::default();
        let rx = viewer.subscribe();
        info!(path = %path.display(), "Recording viewer feed");
        viewer_recorder = Some(tokio::spawn(async move {
            match record_viewer_events(rx, &path).await {
                Ok(count) => info!(count, path = %path.display(), "Viewer feed recorded"),
                Err(e) => warn!(error = %e, path = %path.display(), "Viewer feed recording failed"),
            }
        }));
        phase = phase.with_viewer(Arc::new(viewer));
    }
    if let Some(dir) = &config.logging.game_log_dir {
        match FileGameLogger::new(dir) {
            Some(logger) => phase = phase.with_game_logger(Arc::new(logger)),
            None => warn!(dir = %dir.display(), "Transcript directory unavailable, not logging"),
        }
    }

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!(bind = %config.server.bind, game_id = %game_id, "Listening for agents");
    if !cli.quiet {
        println!(
            "{} Waiting for {} agents on {}",
            "->".cyan(),
            config.server.agents,
            config.server.bind.bold()
        );
    }

    let agents = accept_agents(&listener, config.server.agents)
        .await
        .context("failed to accept agents")?;

    let use_case = RunSessionUseCase::new(phase);
    let input = RunSessionInput::new(game_id, agents, session);

    // Execute with or without progress reporting
    let outcome = if cli.quiet {
        use_case.execute(input).await?
    } else {
        // Spinners need a terminal
        let progress: Box<dyn SessionProgressNotifier> = if std::io::stdout().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };
        use_case.execute_with_progress(input, progress.as_ref()).await?
    };

    // Dropping the last sender closes the feed so the recorder finishes
    drop(use_case);
    if let Some(recorder) = viewer_recorder {
        recorder.await.context("viewer recorder panicked")?;
    }

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(&outcome),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };

    println!("{}", output);

    Ok(())
}
