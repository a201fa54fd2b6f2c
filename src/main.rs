use anyhow::{Context, Result};
use capaz::cli::{parse_metric_pair, Cli, OutputFormat};
use capaz::config::SpcConfig;
use capaz::json_output::{JsonCorrelation, JsonOutput};
use capaz::report::analyze_metrics;
use capaz::series::{correlate, paired_points, MetricSet};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Load configuration and apply command-line overrides
fn load_config(args: &Cli) -> Result<SpcConfig> {
    let mut config = match &args.config {
        Some(path) => SpcConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SpcConfig::default(),
    };

    if let Some(bins) = args.bins {
        config.histogram_bins = Some(bins);
    }
    if let Some(min_samples) = args.min_samples {
        config.capability_min_sample_size = min_samples;
    }

    config.validate().context("Invalid command-line override")?;
    Ok(config)
}

/// Resolve every `--correlate X,Y` against the metric document
fn build_correlations(set: &MetricSet, pairs: &[String]) -> Result<Vec<JsonCorrelation>> {
    pairs
        .iter()
        .map(|pair| -> Result<JsonCorrelation> {
            let (x, y) = parse_metric_pair(pair).with_context(|| {
                format!("Invalid --correlate value '{}' (expected X,Y)", pair)
            })?;
            let x_series = set.require(x)?;
            let y_series = set.require(y)?;
            Ok(JsonCorrelation {
                x_metric: x.to_string(),
                y_metric: y.to_string(),
                paired_points: paired_points(x_series, y_series).len(),
                r_squared: correlate(x_series, y_series),
            })
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;

    let set = MetricSet::from_file(&args.input)
        .with_context(|| format!("Failed to load metrics {}", args.input.display()))?;
    tracing::debug!(metrics = set.metrics.len(), "metric document loaded");

    let correlations = build_correlations(&set, &args.correlate)?;
    let reports = analyze_metrics(&set.metrics, &config);

    match args.format {
        OutputFormat::Text => {
            if reports.is_empty() {
                println!("No metrics to analyze.");
            }
            for report in &reports {
                println!("{}", report.to_report_string());
            }
            if !correlations.is_empty() {
                println!("=== Correlations ===");
                for c in &correlations {
                    println!(
                        "  {} vs {}: R²={:.3} ({} paired points)",
                        c.x_metric, c.y_metric, c.r_squared, c.paired_points
                    );
                }
            }
        }
        OutputFormat::Json => {
            let mut output = JsonOutput::new(reports);
            for c in correlations {
                output.add_correlation(c);
            }
            println!("{}", output.to_json()?);
        }
    }

    Ok(())
}
