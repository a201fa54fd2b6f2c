// Configuration for SPC analysis
//
// Thresholds for the trend detector and the report layer. The statistics
// functions never read configuration on their own; callers pass it in.

use crate::error::{Result, SpcError};
use crate::histogram::MAX_HISTOGRAM_BINS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Thresholds used by the trend detector
///
/// # Example
/// ```
/// use capaz::config::TrendConfig;
///
/// let config = TrendConfig::default();
/// assert_eq!(config.r_squared_threshold, 0.6);
/// assert_eq!(config.run_length, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Minimum number of points before any trend is reported
    pub min_points: usize,

    /// R² above which the linear fit is treated as significant
    pub r_squared_threshold: f64,

    /// Slope magnitude below which a significant fit is reported as flat
    pub flat_slope_threshold: f64,

    /// Length of the strictly monotonic run checked when the fit is weak
    ///
    /// Default: 7 points (Nelson-style run rule)
    pub run_length: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            min_points: 3,
            r_squared_threshold: 0.6,
            flat_slope_threshold: 0.05,
            run_length: 7,
        }
    }
}

/// Configuration for a full SPC analysis of one or more metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpcConfig {
    pub trend: TrendConfig,

    /// Minimum observations before the 50/75 capability rule is applied
    ///
    /// Below this the report carries `InsufficientData` instead of a
    /// classification. The classifier itself accepts any sample size.
    ///
    /// Default: 5
    pub capability_min_sample_size: usize,

    /// VSF above which a metric is flagged as too variable
    ///
    /// Default: 1.0
    pub vsf_alert_threshold: f64,

    /// Fixed histogram bin count; `None` uses the Square-Root Rule
    pub histogram_bins: Option<usize>,
}

impl Default for SpcConfig {
    fn default() -> Self {
        Self {
            trend: TrendConfig::default(),
            capability_min_sample_size: 5,
            vsf_alert_threshold: 1.0,
            histogram_bins: None,
        }
    }
}

impl SpcConfig {
    /// Parse a TOML configuration and validate it
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: SpcConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let trend = &self.trend;

        if !(0.0..=1.0).contains(&trend.r_squared_threshold) {
            return Err(SpcError::InvalidConfig(format!(
                "trend.r_squared_threshold must be in [0, 1], got {}",
                trend.r_squared_threshold
            )));
        }

        if !(trend.flat_slope_threshold >= 0.0 && trend.flat_slope_threshold.is_finite()) {
            return Err(SpcError::InvalidConfig(format!(
                "trend.flat_slope_threshold must be a non-negative number, got {}",
                trend.flat_slope_threshold
            )));
        }

        if trend.min_points < 2 {
            return Err(SpcError::InvalidConfig(format!(
                "trend.min_points must be >= 2, got {}",
                trend.min_points
            )));
        }

        if trend.run_length < 2 {
            return Err(SpcError::InvalidConfig(format!(
                "trend.run_length must be >= 2, got {}",
                trend.run_length
            )));
        }

        if self.capability_min_sample_size < 1 {
            return Err(SpcError::InvalidConfig(
                "capability_min_sample_size must be >= 1".to_string(),
            ));
        }

        if !(self.vsf_alert_threshold >= 0.0 && self.vsf_alert_threshold.is_finite()) {
            return Err(SpcError::InvalidConfig(format!(
                "vsf_alert_threshold must be a non-negative number, got {}",
                self.vsf_alert_threshold
            )));
        }

        if let Some(bins) = self.histogram_bins {
            if !(1..=MAX_HISTOGRAM_BINS).contains(&bins) {
                return Err(SpcError::InvalidConfig(format!(
                    "histogram_bins must be between 1 and {} when set, got {}",
                    MAX_HISTOGRAM_BINS, bins
                )));
            }
        }

        Ok(())
    }
}
