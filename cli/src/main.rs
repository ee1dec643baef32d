//! CLI entrypoint for Support Triage
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};
use triage_application::{
    ClassifyUseCase, EvaluateUseCase, GeneralResponder, LlmGateway, ResponderRegistry,
    RunParams, RunQueryError, RunQueryInput, RunQueryUseCase, ToolAugmentedResponder,
};
use triage_domain::Domain;
use triage_infrastructure::{
    ConfigLoader, FileConfig, FileOutputFormat, build_domain_invoker, build_gateway,
    build_web_search,
};
use triage_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    // === Load Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };

    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;

    // Validate after logging is up so warnings are visible
    let config = ConfigLoader::check(config)?;

    info!("Starting Support Triage");

    if !config.output.color {
        colored::control::set_override(false);
    }

    let mut params = config.to_run_params();
    if let Some(max_retries) = cli.max_retries {
        params = params.with_max_retries(max_retries);
    }

    // === Dependency Injection ===
    let gateway = build_gateway(&config.llm)
        .await
        .context("Failed to initialize model gateway")?;
    info!("Using model {}", gateway.model());

    let use_case = Arc::new(build_use_case(&config, gateway, params)?);

    // Server mode
    if cli.serve {
        let mut server = config.server.clone();
        if let Some(port) = cli.port {
            server.port = port;
        }
        let addr = server.bind_address();
        triage_presentation::serve(use_case, &addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Single query mode - query is required
    let query = match cli.query {
        Some(q) => q,
        None => bail!("A question is required. Use --serve to run the HTTP API."),
    };

    let format = cli.output.unwrap_or(match config.output.format {
        FileOutputFormat::Text => OutputFormat::Text,
        FileOutputFormat::Json => OutputFormat::Json,
    });

    let cancellation = CancellationToken::new();
    let ctrl_c_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    let input = RunQueryInput::new(query).with_cancellation(cancellation);

    let result = if cli.quiet {
        use_case.execute(input).await
    } else {
        let progress = ProgressReporter::new();
        let result = use_case.execute_with_progress(input, &progress).await;
        progress.finish();
        result
    };

    match result {
        Ok(outcome) => {
            let output = match format {
                OutputFormat::Text => ConsoleFormatter::format(&outcome),
                OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
            };
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", report_failure(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Render a failed run for the terminal.
///
/// Only the generic user message is shown; the full error chain goes to
/// the debug log.
fn report_failure(error: &RunQueryError) -> String {
    debug!("Query failed: {}", error);
    ConsoleFormatter::format_error(&error.user_message())
}

/// Initialize logging based on verbosity level, optionally teeing to a file.
fn init_logging(verbose: u8, file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    let (file_layer, guard) = match file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            if let Some(dir) = dir {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            }
            let appender =
                tracing_appender::rolling::never(dir.unwrap_or_else(|| Path::new(".")), name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Wire the three responders and the classify / evaluate stages.
///
/// `params` bounds both the orchestrator and the tool-augmented responders.
fn build_use_case(
    config: &FileConfig,
    gateway: Arc<dyn LlmGateway>,
    params: RunParams,
) -> Result<RunQueryUseCase> {
    let web_search = build_web_search(config);

    let mut registry = ResponderRegistry::new(Arc::new(GeneralResponder::new(gateway.clone())));
    for domain in [Domain::It, Domain::Finance] {
        let invoker =
            build_domain_invoker(domain, config, &params.timeouts, web_search.clone())
                .with_context(|| format!("Failed to prepare tools for {}", domain))?;
        let responder = ToolAugmentedResponder::new(domain, gateway.clone(), Arc::new(invoker))
            .with_max_tool_turns(params.max_tool_turns);
        registry = registry.with_responder(Arc::new(responder));
    }

    Ok(RunQueryUseCase::new(
        ClassifyUseCase::new(gateway.clone()),
        registry,
        EvaluateUseCase::new(gateway),
    )
    .with_params(params))
}
