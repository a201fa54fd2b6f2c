//! CLI argument parsing for capaz

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for SPC reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "capaz")]
#[command(version)]
#[command(about = "Statistical process control for contact-center quality metrics", long_about = None)]
pub struct Cli {
    /// Metric document (JSON) to analyze
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// SPC threshold configuration (TOML)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Fixed histogram bin count (default: Square-Root Rule)
    #[arg(long = "bins", value_name = "N")]
    pub bins: Option<usize>,

    /// Minimum observations before the capability rule is applied
    #[arg(long = "min-samples", value_name = "N")]
    pub min_samples: Option<usize>,

    /// Correlate two metrics over shared dates (e.g. --correlate csat,aht)
    #[arg(long = "correlate", value_name = "X,Y")]
    pub correlate: Vec<String>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

/// Split a `--correlate` value into its two metric names
pub fn parse_metric_pair(pair: &str) -> Option<(&str, &str)> {
    let (x, y) = pair.split_once(',')?;
    let (x, y) = (x.trim(), y.trim());
    if x.is_empty() || y.is_empty() || y.contains(',') {
        return None;
    }
    Some((x, y))
}
