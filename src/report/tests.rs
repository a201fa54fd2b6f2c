// Scenario tests for metric reports
//
// Realistic contact-center series: scores where higher is better, handle
// times where lower is better, and short or noisy series that must still
// render without failing.

use super::*;
use crate::capability::CapabilityResult;
use crate::config::{SpcConfig, TrendConfig};
use crate::series::{MetricSeries, MetricSet, Target};
use crate::trend::TrendResult;

fn daily(name: &str, target: f64, higher_is_better: bool, values: &[f64]) -> MetricSeries {
    let mut series = MetricSeries::new(
        name,
        Target {
            value: target,
            higher_is_better,
        },
    );
    for (i, &value) in values.iter().enumerate() {
        series = series.with_observation(format!("2024-04-{:02}", i + 1), value);
    }
    series
}

/// Quality score improving week over week
///
/// Expected: upward trend, median above target, bottom quartile still short
#[test]
fn test_improving_quality_score() {
    let series = daily(
        "quality_score",
        90.0,
        true,
        &[84.0, 86.0, 85.0, 89.0, 91.0, 93.0, 92.0, 95.0, 96.0],
    );

    let report = analyze_metric(&series, &SpcConfig::default());

    assert_eq!(report.trend, TrendResult::Up);
    assert_eq!(
        report.capability.result(),
        Some(CapabilityResult::Inconsistent)
    );
    assert_eq!(report.quartiles.median, 91.0);
}

/// Average handle time drifting above target
///
/// Expected: INCAPABLE with the gap measured from the median
#[test]
fn test_handle_time_over_target() {
    let series = daily(
        "aht_seconds",
        480.0,
        false,
        &[470.0, 490.0, 505.0, 500.0, 515.0, 520.0, 530.0],
    );

    let report = analyze_metric(&series, &SpcConfig::default());

    match report.capability {
        CapabilityVerdict::Assessed(analysis) => {
            assert_eq!(analysis.result, CapabilityResult::Incapable);
            assert_eq!(analysis.median, 505.0);
            assert_eq!(analysis.gap, 25.0);
        }
        _ => panic!("Expected assessed capability"),
    }
    assert_eq!(report.trend, TrendResult::Up);
}

/// Erratic transfer rate
///
/// Expected: no trend, high variation flagged
#[test]
fn test_erratic_transfer_rate() {
    let series = daily("transfer_rate", 8.0, false, &[2.0, 20.0, 3.0, 18.0, 2.0, 21.0]);

    let report = analyze_metric(&series, &SpcConfig::default());

    assert_eq!(report.trend, TrendResult::None);
    assert!(report.high_variation);
    assert!(report.to_report_string().contains("HIGH VARIATION"));
}

/// Caller policy: a lower minimum sample size lets short series be classified
#[test]
fn test_min_sample_size_is_caller_policy() {
    let series = daily("fcr", 0.7, true, &[0.72, 0.75, 0.71]);

    let default_report = analyze_metric(&series, &SpcConfig::default());
    assert!(matches!(
        default_report.capability,
        CapabilityVerdict::InsufficientData {
            required: 5,
            actual: 3
        }
    ));

    let lenient = SpcConfig {
        capability_min_sample_size: 1,
        ..SpcConfig::default()
    };
    let lenient_report = analyze_metric(&series, &lenient);
    assert_eq!(
        lenient_report.capability.result(),
        Some(CapabilityResult::Capable)
    );
}

/// Trend thresholds come from configuration
#[test]
fn test_trend_config_flows_through() {
    let series = daily(
        "csat",
        90.0,
        true,
        &[91.0, 91.1, 91.2, 91.3, 91.4, 91.5, 91.6],
    );

    // slope 0.1 -> UP with defaults, FLAT when the flat threshold is raised
    let default_report = analyze_metric(&series, &SpcConfig::default());
    assert_eq!(default_report.trend, TrendResult::Up);

    let config = SpcConfig {
        trend: TrendConfig {
            flat_slope_threshold: 0.5,
            ..TrendConfig::default()
        },
        ..SpcConfig::default()
    };
    assert_eq!(analyze_metric(&series, &config).trend, TrendResult::Flat);
}

/// Several metrics keep their input order
#[test]
fn test_analyze_metrics_preserves_order() {
    let set = MetricSet::new(vec![
        daily("aht", 500.0, false, &[450.0, 460.0, 470.0, 480.0, 490.0]),
        daily("csat", 90.0, true, &[80.0, 82.0, 85.0, 87.0, 88.0]),
    ]);

    let reports = analyze_metrics(&set.metrics, &SpcConfig::default());

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].name, "aht");
    assert_eq!(reports[0].capability.result(), Some(CapabilityResult::Capable));
    assert_eq!(reports[1].name, "csat");
    assert_eq!(
        reports[1].capability.result(),
        Some(CapabilityResult::Incapable)
    );
}

/// Histogram always accounts for every observation
#[test]
fn test_histogram_conserves_observations() {
    let values: Vec<f64> = (0..23).map(|i| 60.0 + (i * 7 % 13) as f64).collect();
    let series = daily("occupancy", 75.0, true, &values);

    let report = analyze_metric(&series, &SpcConfig::default());

    // ceil(sqrt(23)) = 5
    assert_eq!(report.histogram.len(), 5);
    let total: usize = report.histogram.iter().map(|b| b.count).sum();
    assert_eq!(total, 23);
}
