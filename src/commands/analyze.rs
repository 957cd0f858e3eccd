use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use crate::analyzers;
use crate::cli;
use crate::config::{self, MetricWeights, PoisonmapConfig, RiskThresholds};
use crate::io::output::{self, OutputFormat};
use crate::io::walker;
use crate::parsers::{self, JavaParser, ParsedFile};
use crate::risk::MetricAggregator;

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub top: Option<usize>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub gamma: Option<f64>,
    pub delta: Option<f64>,
    pub threshold_medium: Option<f64>,
    pub threshold_high: Option<f64>,
    pub ignore: Vec<String>,
    pub parallel: bool,
    pub jobs: usize,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let file_config = config::load_config();

    let weights = apply_weight_overrides(&file_config, &config);
    weights
        .validate()
        .map_err(|message| anyhow!("invalid weights: {message}"))?;
    let thresholds = apply_threshold_overrides(&file_config, &config);
    thresholds
        .validate()
        .map_err(|message| anyhow!("invalid thresholds: {message}"))?;

    configure_thread_pool(config.jobs);

    let mut ignore_patterns = file_config.ignore.patterns.clone();
    ignore_patterns.extend(config.ignore.iter().cloned());

    let files = walker::find_java_files(&config.path, ignore_patterns)
        .with_context(|| format!("failed to scan {}", config.path.display()))?;
    if files.is_empty() {
        anyhow::bail!("no Java sources found under {}", config.path.display());
    }
    log::info!("discovered {} Java files", files.len());

    let parsed = parse_files(&files)?;
    let model = parsers::build_model(&parsed)?;
    log::info!(
        "model built: {} classes, {} interfaces, {} references",
        model.total_classes(),
        model.total_interfaces(),
        model.references().len()
    );

    let aggregator = MetricAggregator::new(weights, thresholds);
    let report = analyzers::analyze_model(&model, &aggregator, config.parallel)?;

    let mut writer = output::create_writer(
        convert_output_format(config.format),
        config.output.as_deref(),
        config.top,
    )?;
    writer.write_report(&report)?;
    Ok(())
}

/// Parse every discovered file; files tree-sitter cannot handle are
/// skipped with a warning rather than aborting the run.
fn parse_files(files: &[PathBuf]) -> Result<Vec<ParsedFile>> {
    let mut parser = JavaParser::new()?;
    let mut parsed = Vec::with_capacity(files.len());
    for path in files {
        match parser.parse_file(path) {
            Ok(file) => parsed.push(file),
            Err(error) => log::warn!("skipping {}: {}", path.display(), error),
        }
    }
    Ok(parsed)
}

fn apply_weight_overrides(file_config: &PoisonmapConfig, config: &AnalyzeConfig) -> MetricWeights {
    MetricWeights {
        alpha: config.alpha.unwrap_or(file_config.weights.alpha),
        beta: config.beta.unwrap_or(file_config.weights.beta),
        gamma: config.gamma.unwrap_or(file_config.weights.gamma),
        delta: config.delta.unwrap_or(file_config.weights.delta),
    }
}

fn apply_threshold_overrides(
    file_config: &PoisonmapConfig,
    config: &AnalyzeConfig,
) -> RiskThresholds {
    RiskThresholds {
        medium: config
            .threshold_medium
            .unwrap_or(file_config.thresholds.medium),
        high: config.threshold_high.unwrap_or(file_config.thresholds.high),
    }
}

fn configure_thread_pool(jobs: usize) {
    if jobs == 0 {
        return;
    }
    if let Err(error) = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_global()
    {
        log::debug!("thread pool already configured: {}", error);
    }
}

fn convert_output_format(format: cli::OutputFormat) -> OutputFormat {
    match format {
        cli::OutputFormat::Terminal => OutputFormat::Terminal,
        cli::OutputFormat::Json => OutputFormat::Json,
        cli::OutputFormat::Markdown => OutputFormat::Markdown,
    }
}
