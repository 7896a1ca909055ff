//! # caseline Main Entry Point

use anyhow::{Context, Result};
use caseline::{
    cmd_args::CommandLineArgs,
    config::{self, ConsoleProfile},
    AppController, BuiltinExecutor, ConsoleServices, StaticHistorySource, TerminalEventStream,
    TerminalRenderStream, TranscriptLog, TranscriptLogHistorySource, Vocabulary,
};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();

    if !atty::is(atty::Stream::Stdin) || !atty::is(atty::Stream::Stdout) {
        anyhow::bail!("caseline needs an interactive terminal");
    }

    let profile_path = config::expand_path(&config::get_profile_path());
    let profile = ConsoleProfile::load(&profile_path, cmd_args.profile())?;

    init_tracing_subscriber(profile.log_file(), cmd_args.verbose())?;
    tracing::info!(
        "Starting caseline with profile '{}' from '{}'",
        profile.name(),
        profile_path.display()
    );

    let transcript_log = TranscriptLog::new(profile.transcript_log());
    let vocabulary = Vocabulary::default();
    let operator = std::env::var("USER").unwrap_or_else(|_| "operator".to_string());

    let services = ConsoleServices::new(Arc::new(BuiltinExecutor::new(
        vocabulary.clone(),
        operator,
    )))
    .with_vocabulary(vocabulary)
    .with_transcript_log(transcript_log.clone());

    let services = if cmd_args.no_history() {
        services.with_history_source(StaticHistorySource::empty())
    } else {
        services.with_history_source(TranscriptLogHistorySource::new(
            transcript_log,
            profile.history_limit(),
        ))
    };

    let mut app = AppController::with_io_streams(
        services,
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;
    app.run().await?;

    tracing::info!("caseline exited");
    Ok(())
}

/// Send tracing output to the log file; stdout belongs to the raw-mode console
fn init_tracing_subscriber(log_file: &Path, verbose: bool) -> Result<()> {
    if let Some(dir) = log_file.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory '{}'", dir.display()))?;
    }
    let writer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file '{}'", log_file.display()))?;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_env(config::LOG_LEVEL_ENV_VAR)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter.add_directive("tokio=warn".parse()?))
        .with_writer(std::sync::Mutex::new(writer))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
    Ok(())
}
