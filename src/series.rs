// Metric series input model
//
// A metric document carries one or more metrics, each with a target and an
// ordered list of dated observations. Non-finite values are rejected here,
// at the boundary, so the statistics functions only ever see real numbers.

use crate::error::{Result, SpcError};
use crate::linear_fit::{r_squared_from_points, Point2D};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Metric document version (currently only v1 supported)
pub const SUPPORTED_VERSION: u32 = 1;

/// Target value and polarity for a metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub value: f64,
    /// `true` for scores, `false` for durations such as handle time
    pub higher_is_better: bool,
}

/// A single dated measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date, e.g. "2024-03-01"
    pub date: String,
    pub value: f64,
}

/// One metric's observations in time order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub name: String,
    pub target: Target,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

impl MetricSeries {
    pub fn new(name: impl Into<String>, target: Target) -> Self {
        Self {
            name: name.into(),
            target,
            observations: Vec::new(),
        }
    }

    /// Append an observation (builder style)
    pub fn with_observation(mut self, date: impl Into<String>, value: f64) -> Self {
        self.observations.push(Observation {
            date: date.into(),
            value,
        });
        self
    }

    /// Observation values in order
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Reject a non-finite target or observation value
    pub fn validate(&self) -> Result<()> {
        if !self.target.value.is_finite() {
            return Err(SpcError::InvalidInput {
                metric: self.name.clone(),
                reason: format!("target {} is not a finite number", self.target.value),
            });
        }

        if let Some((index, obs)) = self
            .observations
            .iter()
            .enumerate()
            .find(|(_, o)| !o.value.is_finite())
        {
            return Err(SpcError::InvalidInput {
                metric: self.name.clone(),
                reason: format!(
                    "observation {} ({}) is not a finite number: {}",
                    index, obs.date, obs.value
                ),
            });
        }

        Ok(())
    }
}

/// Complete metric document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub version: u32,
    pub metrics: Vec<MetricSeries>,
}

impl MetricSet {
    pub fn new(metrics: Vec<MetricSeries>) -> Self {
        Self {
            version: SUPPORTED_VERSION,
            metrics,
        }
    }

    /// Parse a JSON metric document and validate it
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let set: MetricSet = serde_json::from_str(contents)?;
        set.validate()?;
        Ok(set)
    }

    /// Load a JSON metric document from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Check version, metric name uniqueness and every series' values
    pub fn validate(&self) -> Result<()> {
        if self.version != SUPPORTED_VERSION {
            return Err(SpcError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                found: self.version,
            });
        }

        let mut seen = HashSet::new();
        for metric in &self.metrics {
            if !seen.insert(metric.name.as_str()) {
                return Err(SpcError::DuplicateMetric(metric.name.clone()));
            }
            metric.validate()?;
        }

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MetricSeries> {
        self.metrics.iter().find(|m| m.name == name)
    }

    /// Look up a metric, failing with `UnknownMetric`
    pub fn require(&self, name: &str) -> Result<&MetricSeries> {
        self.get(name)
            .ok_or_else(|| SpcError::UnknownMetric(name.to_string()))
    }
}

/// Pair two metrics' observations on matching dates
///
/// Points follow `x_series` order; `x` comes from `x_series` and `y` from
/// the first observation in `y_series` with the same date.
pub fn paired_points(x_series: &MetricSeries, y_series: &MetricSeries) -> Vec<Point2D> {
    let mut by_date: HashMap<&str, f64> = HashMap::new();
    for obs in &y_series.observations {
        by_date.entry(obs.date.as_str()).or_insert(obs.value);
    }

    x_series
        .observations
        .iter()
        .filter_map(|obs| {
            by_date
                .get(obs.date.as_str())
                .map(|&y| Point2D::new(obs.value, y))
        })
        .collect()
}

/// R² between two metrics over their shared dates
pub fn correlate(x_series: &MetricSeries, y_series: &MetricSeries) -> f64 {
    r_squared_from_points(&paired_points(x_series, y_series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csat() -> MetricSeries {
        MetricSeries::new(
            "csat",
            Target {
                value: 90.0,
                higher_is_better: true,
            },
        )
        .with_observation("2024-03-01", 88.0)
        .with_observation("2024-03-02", 91.0)
        .with_observation("2024-03-03", 93.0)
    }

    #[test]
    fn test_values_in_order() {
        assert_eq!(csat().values(), vec![88.0, 91.0, 93.0]);
        assert_eq!(csat().len(), 3);
        assert!(!csat().is_empty());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let series = csat().with_observation("2024-03-04", f64::NAN);
        let err = series.validate().unwrap_err();
        match err {
            SpcError::InvalidInput { metric, reason } => {
                assert_eq!(metric, "csat");
                assert!(reason.contains("observation 3"));
                assert!(reason.contains("2024-03-04"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_infinite_target() {
        let mut series = csat();
        series.target.value = f64::INFINITY;
        assert!(series.validate().is_err());
    }

    #[test]
    fn test_parse_valid_document() {
        let json = r#"{
            "version": 1,
            "metrics": [
                {
                    "name": "aht",
                    "target": { "value": 500.0, "higher_is_better": false },
                    "observations": [
                        { "date": "2024-03-01", "value": 480.0 },
                        { "date": "2024-03-02", "value": 510.5 }
                    ]
                }
            ]
        }"#;

        let set = MetricSet::from_json_str(json).unwrap();
        assert_eq!(set.metrics.len(), 1);
        let aht = set.get("aht").unwrap();
        assert!(!aht.target.higher_is_better);
        assert_eq!(aht.values(), vec![480.0, 510.5]);
    }

    #[test]
    fn test_observations_default_to_empty() {
        let json = r#"{"version":1,"metrics":[{"name":"fcr","target":{"value":0.7,"higher_is_better":true}}]}"#;
        let set = MetricSet::from_json_str(json).unwrap();
        assert!(set.metrics[0].is_empty());
    }

    #[test]
    fn test_unsupported_version() {
        let err = MetricSet::from_json_str(r#"{"version":2,"metrics":[]}"#).unwrap_err();
        assert!(matches!(
            err,
            SpcError::UnsupportedVersion {
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_duplicate_metric() {
        let set = MetricSet::new(vec![csat(), csat()]);
        assert!(matches!(
            set.validate().unwrap_err(),
            SpcError::DuplicateMetric(name) if name == "csat"
        ));
    }

    #[test]
    fn test_invalid_json() {
        let err = MetricSet::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SpcError::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let set = MetricSet::new(vec![csat()]);
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&set).unwrap().as_bytes())
            .unwrap();
        file.flush().unwrap();

        let loaded = MetricSet::from_file(file.path()).unwrap();
        assert_eq!(loaded, set);
    }

    #[test]
    fn test_require_unknown_metric() {
        let set = MetricSet::new(vec![csat()]);
        assert!(set.require("csat").is_ok());
        assert!(matches!(
            set.require("nps").unwrap_err(),
            SpcError::UnknownMetric(_)
        ));
    }

    #[test]
    fn test_paired_points_matches_dates() {
        let aht = MetricSeries::new(
            "aht",
            Target {
                value: 500.0,
                higher_is_better: false,
            },
        )
        .with_observation("2024-03-03", 450.0)
        .with_observation("2024-03-01", 540.0)
        .with_observation("2024-03-09", 400.0);

        let points = paired_points(&csat(), &aht);
        assert_eq!(
            points,
            vec![Point2D::new(88.0, 540.0), Point2D::new(93.0, 450.0)]
        );
    }

    #[test]
    fn test_correlate_without_overlap_is_zero() {
        let other = MetricSeries::new(
            "nps",
            Target {
                value: 40.0,
                higher_is_better: true,
            },
        )
        .with_observation("2023-01-01", 35.0);
        assert_eq!(correlate(&csat(), &other), 0.0);
    }

    #[test]
    fn test_correlate_with_itself_is_one() {
        let r2 = correlate(&csat(), &csat());
        assert!((r2 - 1.0).abs() < 1e-9);
    }
}
