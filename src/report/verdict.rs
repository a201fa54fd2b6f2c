// Metric report assembly and rendering

use crate::capability::{analyze_capability_for, CapabilityAnalysis, CapabilityResult};
use crate::config::SpcConfig;
use crate::descriptive::{
    calculate_quartiles, coefficient_of_variation, mean, standard_deviation, Quartiles,
};
use crate::histogram::{calculate_histogram, HistogramBin};
use crate::linear_fit::r_squared_from_series;
use crate::series::{MetricSeries, Target};
use crate::trend::{identify_trend_with, TrendResult};
use crate::vsf::vsf;
use serde::{Deserialize, Serialize};

/// Capability outcome for a metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CapabilityVerdict {
    /// The 50/75 rule was applied
    Assessed(CapabilityAnalysis),

    /// Too few observations for a meaningful classification
    InsufficientData { required: usize, actual: usize },
}

impl CapabilityVerdict {
    /// Classification, if one was made
    pub fn result(&self) -> Option<CapabilityResult> {
        match self {
            Self::Assessed(analysis) => Some(analysis.result),
            Self::InsufficientData { .. } => None,
        }
    }
}

/// Every indicator computed for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub name: String,
    pub target: Target,
    pub sample_size: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub coefficient_of_variation: f64,
    pub quartiles: Quartiles,
    /// Interquartile range (q3 - q1)
    pub iqr: f64,
    pub histogram: Vec<HistogramBin>,
    pub r_squared: f64,
    pub trend: TrendResult,
    pub vsf: f64,
    /// VSF above the configured alert threshold
    pub high_variation: bool,
    pub capability: CapabilityVerdict,
}

impl MetricReport {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        let polarity = if self.target.higher_is_better {
            "higher is better"
        } else {
            "lower is better"
        };
        report.push_str(&format!(
            "=== {} (target {:.2}, {}) ===\n",
            self.name, self.target.value, polarity
        ));
        report.push_str(&format!("Observations: {}\n", self.sample_size));

        // Capability header
        match &self.capability {
            CapabilityVerdict::Assessed(analysis) => {
                let marker = match analysis.result {
                    CapabilityResult::Capable => "✅",
                    CapabilityResult::Inconsistent => "⚠️ ",
                    CapabilityResult::Incapable => "❌",
                };
                report.push_str(&format!("{} {}", marker, analysis.result));
                if analysis.result == CapabilityResult::Incapable {
                    report.push_str(&format!(" (gap {:.2})", analysis.gap));
                }
                report.push('\n');
            }
            CapabilityVerdict::InsufficientData { required, actual } => {
                report.push_str(&format!(
                    "⚠️  INSUFFICIENT DATA (need {} observations, got {})\n",
                    required, actual
                ));
            }
        }

        report.push_str(&format!("  Mean:         {:.2}\n", self.mean));
        report.push_str(&format!("  Std Dev:      {:.2}\n", self.std_dev));
        report.push_str(&format!(
            "  CV:           {:.2}%\n",
            self.coefficient_of_variation * 100.0
        ));
        report.push_str(&format!("  Min:          {:.2}\n", self.quartiles.min));
        report.push_str(&format!("  Q1:           {:.2}\n", self.quartiles.q1));
        report.push_str(&format!("  Median:       {:.2}\n", self.quartiles.median));
        report.push_str(&format!("  Q3:           {:.2}\n", self.quartiles.q3));
        report.push_str(&format!("  Max:          {:.2}\n", self.quartiles.max));
        report.push_str(&format!("  IQR:          {:.2}\n", self.iqr));
        report.push_str(&format!(
            "  Trend:        {} {} (R²={:.3})\n",
            self.trend.symbol(),
            self.trend,
            self.r_squared
        ));
        report.push_str(&format!("  VSF:          {:.3}\n", self.vsf));
        if self.high_variation {
            report.push_str("  📈 HIGH VARIATION: process too variable to reliably meet target\n");
        }

        if !self.histogram.is_empty() {
            report.push_str("\n📊 Histogram:\n");
            for bin in &self.histogram {
                report.push_str(&format!("  {:>20} | {}\n", bin.label, "#".repeat(bin.count)));
            }
        }

        report
    }
}

/// Compute every indicator for a single metric
///
/// # Example
/// ```
/// use capaz::config::SpcConfig;
/// use capaz::report::{analyze_metric, CapabilityVerdict};
/// use capaz::series::{MetricSeries, Target};
///
/// let series = MetricSeries::new("csat", Target { value: 90.0, higher_is_better: true })
///     .with_observation("2024-03-01", 91.0)
///     .with_observation("2024-03-02", 92.0);
///
/// let report = analyze_metric(&series, &SpcConfig::default());
/// assert!(matches!(report.capability, CapabilityVerdict::InsufficientData { .. }));
/// ```
pub fn analyze_metric(series: &MetricSeries, config: &SpcConfig) -> MetricReport {
    let values = series.values();
    let sample_size = values.len();

    let capability = if sample_size >= config.capability_min_sample_size {
        CapabilityVerdict::Assessed(analyze_capability_for(&values, &series.target))
    } else {
        tracing::warn!(
            metric = %series.name,
            required = config.capability_min_sample_size,
            actual = sample_size,
            "too few observations for capability analysis"
        );
        CapabilityVerdict::InsufficientData {
            required: config.capability_min_sample_size,
            actual: sample_size,
        }
    };

    let variation = vsf(&values);
    let quartiles = calculate_quartiles(&values);

    MetricReport {
        name: series.name.clone(),
        target: series.target,
        sample_size,
        mean: mean(&values),
        std_dev: standard_deviation(&values),
        coefficient_of_variation: coefficient_of_variation(&values),
        quartiles,
        iqr: quartiles.iqr(),
        histogram: calculate_histogram(&values, config.histogram_bins),
        r_squared: r_squared_from_series(&values),
        trend: identify_trend_with(&values, &config.trend),
        vsf: variation,
        high_variation: variation > config.vsf_alert_threshold,
        capability,
    }
}

/// Reports for several metrics, in input order
pub fn analyze_metrics(metrics: &[MetricSeries], config: &SpcConfig) -> Vec<MetricReport> {
    metrics
        .iter()
        .map(|series| analyze_metric(series, config))
        .collect()
}
