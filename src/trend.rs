//! Trend detection for short metric time series
//!
//! Two rules, checked in order:
//! 1. Regression: when R² of a straight-line fit exceeds the threshold, the
//!    slope decides (FLAT if negligible, otherwise UP/DOWN).
//! 2. Run rule: when the fit is weak, a strictly monotonic run over the
//!    last `run_length` points (Nelson-style) still counts as a trend.
//!
//! The regression rule always wins when both could apply.

use crate::config::TrendConfig;
use crate::linear_fit::{linear_fit_series, r_squared_from_series};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a metric over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendResult {
    Up,
    Down,
    Flat,
    /// Not enough data, or no signal
    None,
}

impl TrendResult {
    /// Arrow used in text reports
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Flat => "→",
            Self::None => "·",
        }
    }
}

impl fmt::Display for TrendResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
            Self::Flat => write!(f, "FLAT"),
            Self::None => write!(f, "NONE"),
        }
    }
}

/// Classify a series with the default thresholds
///
/// # Example
/// ```
/// use capaz::trend::{identify_trend, TrendResult};
///
/// assert_eq!(identify_trend(&[10.0, 12.0, 11.0, 14.0, 15.0, 18.0, 20.0]), TrendResult::Up);
/// assert_eq!(identify_trend(&[10.0, 50.0, 10.0, 50.0, 10.0, 50.0]), TrendResult::None);
/// ```
pub fn identify_trend(sample: &[f64]) -> TrendResult {
    identify_trend_with(sample, &TrendConfig::default())
}

/// Classify a series with explicit thresholds
pub fn identify_trend_with(sample: &[f64], config: &TrendConfig) -> TrendResult {
    if sample.len() < config.min_points {
        return TrendResult::None;
    }

    let r_squared = r_squared_from_series(sample);
    if r_squared > config.r_squared_threshold {
        let slope = linear_fit_series(sample).slope;
        let trend = if slope.abs() < config.flat_slope_threshold {
            TrendResult::Flat
        } else if slope > 0.0 {
            TrendResult::Up
        } else {
            TrendResult::Down
        };
        tracing::debug!(r_squared, slope, %trend, "trend from regression");
        return trend;
    }

    if let Some(trend) = run_rule(sample, config.run_length) {
        tracing::debug!(r_squared, run_length = config.run_length, %trend, "trend from run rule");
        return trend;
    }

    TrendResult::None
}

/// Strictly monotonic run over the last `run_length` values
fn run_rule(sample: &[f64], run_length: usize) -> Option<TrendResult> {
    if run_length < 2 || sample.len() < run_length {
        return None;
    }

    let tail = &sample[sample.len() - run_length..];
    if tail.windows(2).all(|w| w[1] > w[0]) {
        Some(TrendResult::Up)
    } else if tail.windows(2).all(|w| w[1] < w[0]) {
        Some(TrendResult::Down)
    } else {
        None
    }
}
