//! Descriptive statistics over metric samples
//!
//! Every function here is total: an empty sample yields 0.0 rather than an
//! error, so dashboard widgets always have something to render.
//!
//! Standard deviation is the POPULATION form (divide by n), applied
//! consistently by `vsf` and the coefficient of variation.
//!
//! A NaN anywhere in the sample propagates: order statistics (min, max,
//! quantiles, quartiles) come back NaN instead of being computed over a
//! partially ordered sort.

use serde::{Deserialize, Serialize};

/// Five-number summary of a sample
///
/// For any non-empty sample `min <= q1 <= median <= q3 <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quartiles {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Quartiles {
    /// Interquartile range (q3 - q1)
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Arithmetic mean (0.0 for an empty sample)
pub fn mean(sample: &[f64]) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }
    sample.iter().sum::<f64>() / sample.len() as f64
}

/// Population standard deviation
///
/// Returns 0.0 for samples with fewer than 2 points.
pub fn standard_deviation(sample: &[f64]) -> f64 {
    if sample.len() < 2 {
        return 0.0;
    }
    let m = mean(sample);
    let variance = sample.iter().map(|v| (v - m).powi(2)).sum::<f64>() / sample.len() as f64;
    variance.sqrt()
}

fn contains_nan(sample: &[f64]) -> bool {
    sample.iter().any(|v| v.is_nan())
}

/// Smallest value (0.0 for an empty sample, NaN if any value is NaN)
pub fn min(sample: &[f64]) -> f64 {
    if contains_nan(sample) {
        return f64::NAN;
    }
    sample.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Largest value (0.0 for an empty sample, NaN if any value is NaN)
pub fn max(sample: &[f64]) -> f64 {
    if contains_nan(sample) {
        return f64::NAN;
    }
    sample.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Median, i.e. the 0.5 quantile
pub fn median(sample: &[f64]) -> f64 {
    quantile(sample, 0.5)
}

/// Coefficient of variation (std / |mean|)
///
/// Returns 0.0 for fewer than 2 points or a zero mean.
pub fn coefficient_of_variation(sample: &[f64]) -> f64 {
    if sample.len() < 2 {
        return 0.0;
    }
    let m = mean(sample);
    if m == 0.0 {
        return 0.0;
    }
    standard_deviation(sample) / m.abs()
}

/// Sorted copy of a sample in IEEE total order
pub(crate) fn sorted(sample: &[f64]) -> Vec<f64> {
    let mut data = sample.to_vec();
    data.sort_by(f64::total_cmp);
    data
}

/// p-th quantile using R-7 linear interpolation between order statistics
///
/// `p` is clamped into [0, 1]. `quantile(s, 0.25)` is Q1, `0.5` the median,
/// `0.75` Q3. NaN if the sample contains NaN.
pub fn quantile(sample: &[f64], p: f64) -> f64 {
    if contains_nan(sample) {
        return f64::NAN;
    }
    quantile_sorted(&sorted(sample), p)
}

/// R-7 quantile of data that is already sorted ascending
pub fn quantile_sorted(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let p = p.clamp(0.0, 1.0);
    let index = p * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let (lo, hi) = (sorted_data[lower], sorted_data[upper]);
        let weight = index - lower as f64;
        // Rounding must not push the estimate outside its order statistics
        (lo + weight * (hi - lo)).max(lo).min(hi)
    }
}

/// Five-number summary (all zeros for an empty sample, all NaN if any
/// value is NaN)
pub fn calculate_quartiles(sample: &[f64]) -> Quartiles {
    if sample.is_empty() {
        return Quartiles::default();
    }
    if contains_nan(sample) {
        return Quartiles {
            min: f64::NAN,
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
            max: f64::NAN,
        };
    }

    let data = sorted(sample);
    Quartiles {
        min: data[0],
        q1: quantile_sorted(&data, 0.25),
        median: quantile_sorted(&data, 0.5),
        q3: quantile_sorted(&data, 0.75),
        max: data[data.len() - 1],
    }
}
