//! JSON output format for SPC reports
//!
//! `--format json` emits a single versioned document so that dashboard
//! widgets can consume the same indicators the text report shows.

use crate::report::MetricReport;
use serde::{Deserialize, Serialize};

/// Identifier of the JSON document layout
pub const JSON_FORMAT: &str = "capaz-json-v1";

/// Date-paired correlation between two metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCorrelation {
    /// Metric on the x axis
    pub x_metric: String,
    /// Metric on the y axis
    pub y_metric: String,
    /// Number of dates both metrics share
    pub paired_points: usize,
    /// Coefficient of determination (0 to 1)
    pub r_squared: f64,
}

/// Complete JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    pub version: String,
    pub format: String,
    pub metrics: Vec<MetricReport>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub correlations: Vec<JsonCorrelation>,
}

impl JsonOutput {
    pub fn new(metrics: Vec<MetricReport>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: JSON_FORMAT.to_string(),
            metrics,
            correlations: Vec::new(),
        }
    }

    pub fn add_correlation(&mut self, correlation: JsonCorrelation) {
        self.correlations.push(correlation);
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
