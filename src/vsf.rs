//! Variation Safety Factor
//!
//! `VSF = 6σ / |mean|`. A VSF above 1.0 marks a process whose spread is too
//! wide relative to its centre to reliably hit a target. The threshold is
//! applied by callers (see `SpcConfig::vsf_alert_threshold`).

use crate::descriptive::{mean, standard_deviation};

/// Variation Safety Factor of a sample
///
/// Returns 0.0 for fewer than 2 points or when the mean is exactly zero.
///
/// # Example
/// ```
/// use capaz::vsf::vsf;
///
/// assert_eq!(vsf(&[1.0]), 0.0);
/// assert_eq!(vsf(&[-5.0, 5.0]), 0.0);
/// assert!(vsf(&[90.0, 92.0, 88.0, 91.0]) < 1.0);
/// ```
pub fn vsf(sample: &[f64]) -> f64 {
    if sample.len() < 2 {
        return 0.0;
    }
    let m = mean(sample);
    if m == 0.0 {
        return 0.0;
    }
    6.0 * standard_deviation(sample) / m.abs()
}
