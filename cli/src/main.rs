//! CLI entrypoint for esg-analyzer
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use esg_application::{
    AnalysisOrchestrator, AnalysisProgressNotifier, AuditSink, ComplianceChecker,
    InsightClassifier, NoAudit, NoProgress, OrchestratorError, OrchestratorParams,
    ReferenceSource, RunAnalysisUseCase, ValidateRecordUseCase,
};
use esg_domain::{EsgRecord, TaskKind, TaskOutput, TaskPriority, TaskStatus, ValidationEngine};
#[cfg(feature = "http-classifier")]
use esg_infrastructure::HttpInsightClassifier;
use esg_infrastructure::{
    ClassifierBackend, ConfigLoader, FileConfig, JsonlAuditSink, LocalInsightClassifier,
    RuleTableComplianceChecker, TomlReferenceSource,
};
use esg_presentation::{Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Configuration error: {e}"))?
    };

    match &cli.command {
        Command::Config => {
            run_config(&cli, &config);
            Ok(())
        }
        Command::Validate { input, output } => run_validate(&config, input, *output).await,
        Command::Analyze {
            input,
            output,
            priority,
        } => run_analyze(&cli, &config, input, *output, TaskPriority::from(*priority)).await,
    }
}

/// Initialize logging based on verbosity level
///
/// The returned guard keeps the non-blocking file writer alive; drop it
/// only when the process exits.
fn init_logging(cli: &Cli) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match &cli.log_file {
        Some(path) => {
            let directory = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let file_name = path.file_name().context("--log-file must name a file")?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(
                    directory, file_name,
                ));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            // reports go to stdout, logs stay on stderr
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

/// Log every configuration issue; abort on the fatal ones
fn surface_config_issues(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    let mut fatal = false;
    for issue in &issues {
        if issue.is_error() {
            error!("{issue}");
            fatal = true;
        } else {
            warn!("{issue}");
        }
    }
    if fatal {
        bail!("Configuration has errors; fix them or run with --no-config");
    }
    Ok(())
}

fn read_record(path: &Path) -> Result<EsgRecord> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let record: EsgRecord = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {} as an ESG record", path.display()))?;
    Ok(record)
}

fn run_config(cli: &Cli, config: &FileConfig) {
    ConfigLoader::print_config_sources();
    if let Some(path) = &cli.config {
        let marker = if path.exists() { "[FOUND]" } else { "[     ]" };
        println!("  {} Explicit: {}", marker, path.display());
    }
    println!();

    let issues = config.validate();
    if issues.is_empty() {
        println!("Merged configuration is clean.");
    } else {
        println!("Merged configuration has {} issue(s):", issues.len());
        for issue in &issues {
            println!("  {issue}");
        }
    }

    let params = config.to_orchestrator_params();
    println!();
    println!("Effective settings:");
    println!("  queue capacity:     {}", params.queue_capacity);
    println!("  concurrent tasks:   {}", params.max_concurrent_tasks);
    println!("  classifier backend: {}", config.classifier.backend);
    println!(
        "  classifier timeout: {}s",
        params.classifier_timeout.as_secs()
    );
    println!(
        "  frameworks:         {}",
        config.compliance.frameworks.join(", ")
    );
    println!(
        "  audit trail:        {}",
        if config.audit.enabled {
            config.audit.path.display().to_string()
        } else {
            "disabled".to_string()
        }
    );
}

async fn run_validate(config: &FileConfig, input: &Path, output: OutputFormat) -> Result<()> {
    surface_config_issues(config)?;
    let record = read_record(input)?;

    let engine = build_validation_engine(config).await?;
    let use_case = ValidateRecordUseCase::new(engine, build_audit_sink(config));
    let result = use_case.execute(&record)?;

    let text = match output {
        OutputFormat::Full => ConsoleFormatter::format_validation(&result),
        OutputFormat::Summary => ConsoleFormatter::format_validation_summary(&result),
        OutputFormat::Json => ConsoleFormatter::format_validation_json(&result),
    };
    print!("{text}");
    Ok(())
}

async fn run_analyze(
    cli: &Cli,
    config: &FileConfig,
    input: &Path,
    output: OutputFormat,
    priority: TaskPriority,
) -> Result<()> {
    surface_config_issues(config)?;
    let record = read_record(input)?;

    // === Dependency Injection ===
    let (rules, _) = config.compliance.resolve_rules();
    let checker: Arc<dyn ComplianceChecker> =
        Arc::new(RuleTableComplianceChecker::with_tables(rules)?);
    let engine = build_validation_engine(config).await?;
    let audit = build_audit_sink(config);
    let progress: Arc<dyn AnalysisProgressNotifier> = if cli.quiet {
        Arc::new(NoProgress)
    } else {
        Arc::new(ProgressReporter::new())
    };
    let params = config.to_orchestrator_params();

    let (backend, _) = config.classifier.parse_backend();
    let orchestrator = match backend {
        ClassifierBackend::Local => start_orchestrator(
            LocalInsightClassifier::with_schema(engine.schema().clone()),
            checker,
            engine,
            audit,
            progress,
            &params,
        )?,
        #[cfg(feature = "http-classifier")]
        ClassifierBackend::Http => start_orchestrator(
            HttpInsightClassifier::new(
                config.classifier.endpoint.clone(),
                config.classifier.timeout(),
            )?,
            checker,
            engine,
            audit,
            progress,
            &params,
        )?,
        #[cfg(not(feature = "http-classifier"))]
        ClassifierBackend::Http => {
            warn!("Built without the http-classifier feature, using the local classifier");
            start_orchestrator(
                LocalInsightClassifier::with_schema(engine.schema().clone()),
                checker,
                engine,
                audit,
                progress,
                &params,
            )?
        }
    };

    let task_id = orchestrator.submit_with_priority(record, TaskKind::DataAnalysis, priority)?;
    info!(%task_id, "Analysis submitted");

    let task = orchestrator
        .wait_for(&task_id)
        .await
        .context("Task disappeared from the registry")?;
    orchestrator.shutdown().await;

    match task.status {
        TaskStatus::Completed => {
            let report = task
                .result
                .as_ref()
                .and_then(TaskOutput::as_analysis)
                .context("Completed task has no analysis report")?;
            let text = match output {
                OutputFormat::Full => ConsoleFormatter::format(report),
                OutputFormat::Summary => ConsoleFormatter::format_summary(report),
                OutputFormat::Json => ConsoleFormatter::format_json(report),
            };
            print!("{text}");
            Ok(())
        }
        _ => bail!(
            "Analysis failed: {}",
            task.error.as_deref().unwrap_or("unknown error")
        ),
    }
}

fn start_orchestrator<C: InsightClassifier + 'static>(
    classifier: C,
    checker: Arc<dyn ComplianceChecker>,
    engine: Arc<ValidationEngine>,
    audit: Arc<dyn AuditSink>,
    progress: Arc<dyn AnalysisProgressNotifier>,
    params: &OrchestratorParams,
) -> Result<AnalysisOrchestrator, OrchestratorError> {
    let use_case = RunAnalysisUseCase::new(
        Arc::new(classifier),
        checker,
        engine,
        Arc::clone(&audit),
        params.clone(),
    );
    AnalysisOrchestrator::start(use_case, progress, audit, params)
}

/// Build the validation engine, with reference baselines when configured
///
/// A missing or unreadable baseline file never aborts the run; outlier
/// detection just falls back to its distribution-free checks.
async fn build_validation_engine(config: &FileConfig) -> Result<Arc<ValidationEngine>> {
    let mut engine = ValidationEngine::new(config.validation.to_validation_config())?;

    if let Some(path) = &config.reference.path {
        let source = TomlReferenceSource::new(path);
        match source.load().await {
            Ok(Some(table)) => {
                info!(entries = table.len(), "Loaded reference baselines");
                engine = engine.with_reference(Arc::new(table));
            }
            Ok(None) => info!(
                "No reference baselines at {}, using distribution-free checks",
                path.display()
            ),
            Err(e) => warn!("Reference baselines unavailable ({e}), using distribution-free checks"),
        }
    }

    Ok(Arc::new(engine))
}

fn build_audit_sink(config: &FileConfig) -> Arc<dyn AuditSink> {
    if config.audit.enabled {
        match JsonlAuditSink::new(&config.audit.path) {
            Some(sink) => {
                info!("Audit trail: {}", sink.path().display());
                return Arc::new(sink);
            }
            None => warn!("Audit trail could not be opened, continuing without"),
        }
    }
    Arc::new(NoAudit)
}
