//! Histogram binning for metric distributions
//!
//! Bins are contiguous and left-inclusive `[lower, upper)`, except the last
//! bin which is closed `[lower, upper]` so the maximum is always counted.
//! The sum of bin counts always equals the sample size.

use crate::descriptive::{max, min};
use serde::{Deserialize, Serialize};

/// A single histogram bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub count: usize,
    /// Display label, e.g. "80.0 - 85.0"
    pub label: String,
}

/// Largest bin count `calculate_histogram` will produce
pub const MAX_HISTOGRAM_BINS: usize = 1_000;

/// Default bin count from the Square-Root Rule: `ceil(sqrt(n))`
pub fn square_root_bins(n: usize) -> usize {
    ((n as f64).sqrt().ceil() as usize).max(1)
}

/// Bin a sample into a histogram
///
/// * `bin_count` - number of bins; `None` uses the Square-Root Rule,
///   `Some(0)` is treated as a single bin and anything above
///   [`MAX_HISTOGRAM_BINS`] is capped there
///
/// An empty sample yields no bins. A sample whose values are all equal
/// collapses into one bin spanning that value.
///
/// # Example
/// ```
/// use capaz::histogram::calculate_histogram;
///
/// let bins = calculate_histogram(&[5.0, 5.0, 5.0], None);
/// assert_eq!(bins.len(), 1);
/// assert_eq!(bins[0].count, 3);
/// ```
pub fn calculate_histogram(sample: &[f64], bin_count: Option<usize>) -> Vec<HistogramBin> {
    if sample.is_empty() {
        return Vec::new();
    }

    let lo = min(sample);
    let hi = max(sample);

    if lo == hi {
        return vec![HistogramBin {
            lower_bound: lo,
            upper_bound: hi,
            count: sample.len(),
            label: format!("{:.1}", lo),
        }];
    }

    let bins = bin_count
        .unwrap_or_else(|| square_root_bins(sample.len()))
        .clamp(1, MAX_HISTOGRAM_BINS);
    let width = (hi - lo) / bins as f64;

    // Shared by counting and by the reported bounds so the two never disagree
    let edges: Vec<f64> = (0..=bins)
        .map(|i| match i {
            0 => lo,
            i if i == bins => hi,
            i => (lo + i as f64 * width).min(hi),
        })
        .collect();

    let mut counts = vec![0usize; bins];
    for &value in sample {
        // The maximum lands in the closed last bin
        let index = edges
            .partition_point(|edge| *edge <= value)
            .saturating_sub(1)
            .min(bins - 1);
        counts[index] += 1;
    }

    tracing::trace!(bins, width, samples = sample.len(), "histogram binned");

    counts
        .into_iter()
        .zip(edges.windows(2))
        .map(|(count, edge)| HistogramBin {
            lower_bound: edge[0],
            upper_bound: edge[1],
            count,
            label: format!("{:.1} - {:.1}", edge[0], edge[1]),
        })
        .collect()
}
