//! CLI entrypoint for parley
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use parley_application::{
    ConversationLogger, DisabledEvidence, EvidenceProvider, NoConversationLogger,
    OfflineTemplateStore, RespondError, RespondInput, RespondOutput, RespondUseCase,
};
use parley_domain::{ContractEngine, CouncilRoster, SeededPicker, Utterance};
use parley_infrastructure::{
    AnthropicTextClient, ConfigLoader, DuckDuckGoEvidenceProvider, FileConfig,
    JsonlTranscriptLogger, StaticTemplateStore,
};
use parley_presentation::{Cli, ConsoleFormatter, OutputFormatter, ProgressReporter};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;

    let Some(utterance) = cli.utterance() else {
        bail!("Request text is required. Try: parley \"Can you explain compound interest?\"");
    };

    info!("Starting parley");

    // === Dependency Injection ===
    let roster = config.council.to_roster()?;
    let mode = cli.mode.unwrap_or(config.council.mode);
    let params = config.to_council_params(mode);

    let engine = match config.behavior.phrase_seed {
        Some(seed) => ContractEngine::new(Arc::new(SeededPicker::new(seed))),
        None => ContractEngine::default(),
    };

    let client = Arc::new(AnthropicTextClient::from_config(&config.provider));
    let templates: Arc<dyn OfflineTemplateStore> = Arc::new(StaticTemplateStore::new());
    let logger = transcript_logger(&config);

    let cancellation = CancellationToken::new();
    let on_interrupt = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    let request = Request {
        utterance,
        council: cli.council,
        quiet: cli.quiet,
        roster,
        engine,
        templates,
        logger,
        cancellation,
    };

    let result = if config.evidence.enabled && config.behavior.fetch_evidence {
        let evidence = Arc::new(DuckDuckGoEvidenceProvider::from_config(&config.evidence));
        respond(client, evidence, params, request).await
    } else {
        respond(client, Arc::new(DisabledEvidence), params, request).await
    };

    let output = match result {
        Ok(output) => output,
        Err(e) if e.is_cancelled() => {
            eprintln!("Cancelled.");
            drop(log_guard);
            std::process::exit(EXIT_CANCELLED);
        }
        Err(e) => return Err(e.into()),
    };

    ConsoleFormatter::set_color(config.output.color);
    let format = cli.output.or(config.output.format).unwrap_or_default();
    println!("{}", ConsoleFormatter.render(&output, format));

    Ok(())
}

/// Per-run inputs that do not depend on the evidence backend.
struct Request {
    utterance: Utterance,
    council: bool,
    quiet: bool,
    roster: CouncilRoster,
    engine: ContractEngine,
    templates: Arc<dyn OfflineTemplateStore>,
    logger: Arc<dyn ConversationLogger>,
    cancellation: CancellationToken,
}

async fn respond<E>(
    client: Arc<AnthropicTextClient>,
    evidence: Arc<E>,
    params: parley_application::CouncilParams,
    request: Request,
) -> Result<RespondOutput, RespondError>
where
    E: EvidenceProvider + 'static,
{
    let use_case = RespondUseCase::new(client, evidence, request.templates, request.roster, params)
        .with_engine(request.engine)
        .with_conversation_logger(request.logger)
        .with_cancellation(request.cancellation);

    let input = RespondInput::new(request.utterance).with_council(request.council);

    if request.quiet {
        use_case.execute(input).await
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await
    }
}

fn transcript_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    let Some(path) = &config.logging.transcript_log else {
        return Arc::new(NoConversationLogger);
    };
    match JsonlTranscriptLogger::open(path) {
        Ok(logger) => {
            info!("Transcript log: {}", logger.path().display());
            Arc::new(logger)
        }
        Err(e) => {
            warn!("Could not open transcript log {}: {}", path.display(), e);
            Arc::new(NoConversationLogger)
        }
    }
}

/// Stderr logging from `-v`, plus daily files when a log directory is given.
///
/// `RUST_LOG` overrides the verbosity flag. The returned guard must live
/// until exit so buffered file lines are flushed.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter());

    let Some(dir) = log_dir else {
        tracing_subscriber::registry().with(stderr_layer).init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "parley.log"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter());

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(Some(guard))
}
