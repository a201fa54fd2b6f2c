//! Capability classification with the 50/75 rule
//!
//! Stage one compares the median against the target: if the typical
//! performance misses, the process is INCAPABLE. Stage two checks the
//! worst quartile: if it misses while the median is fine, the defect is
//! variance rather than a shifted centre, so the process is INCONSISTENT.
//!
//! The worst quartile depends on polarity. When higher is better it is Q1
//! (the bottom 25%); when lower is better (handle time, for instance) it
//! is Q3 (the slowest 25%).

use crate::descriptive::calculate_quartiles;
use crate::series::Target;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of the 50/75 rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapabilityResult {
    Capable,
    Inconsistent,
    Incapable,
}

impl fmt::Display for CapabilityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capable => write!(f, "CAPABLE"),
            Self::Inconsistent => write!(f, "INCONSISTENT"),
            Self::Incapable => write!(f, "INCAPABLE"),
        }
    }
}

/// Classification together with the quartile context used to derive it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapabilityAnalysis {
    pub result: CapabilityResult,
    pub median: f64,
    pub target: f64,
    /// Distance from median to target when INCAPABLE, otherwise 0
    pub gap: f64,
    pub q1: f64,
    pub q3: f64,
}

/// Classify a sample against a target
///
/// Works on any sample size; deciding whether a sample is large enough to
/// be meaningful is left to the caller. An empty sample is classified
/// against all-zero quartiles.
///
/// # Example
/// ```
/// use capaz::capability::{analyze_capability, CapabilityResult};
///
/// let analysis = analyze_capability(&[85.0, 86.0, 92.0, 95.0, 96.0], 90.0, true);
/// assert_eq!(analysis.result, CapabilityResult::Inconsistent);
/// assert_eq!(analysis.gap, 0.0);
/// ```
pub fn analyze_capability(sample: &[f64], target: f64, higher_is_better: bool) -> CapabilityAnalysis {
    let quartiles = calculate_quartiles(sample);
    let median = quartiles.median;

    let (result, gap) = if higher_is_better {
        if median < target {
            (CapabilityResult::Incapable, target - median)
        } else if quartiles.q1 < target {
            (CapabilityResult::Inconsistent, 0.0)
        } else {
            (CapabilityResult::Capable, 0.0)
        }
    } else if median > target {
        (CapabilityResult::Incapable, median - target)
    } else if quartiles.q3 > target {
        (CapabilityResult::Inconsistent, 0.0)
    } else {
        (CapabilityResult::Capable, 0.0)
    };

    tracing::debug!(
        %result,
        median,
        q1 = quartiles.q1,
        q3 = quartiles.q3,
        target,
        higher_is_better,
        "capability classified"
    );

    CapabilityAnalysis {
        result,
        median,
        target,
        gap,
        q1: quartiles.q1,
        q3: quartiles.q3,
    }
}

/// Classify a sample against a metric's `Target`
pub fn analyze_capability_for(sample: &[f64], target: &Target) -> CapabilityAnalysis {
    analyze_capability(sample, target.value, target.higher_is_better)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_is_better_incapable() {
        let a = analyze_capability(&[80.0, 82.0, 85.0, 87.0, 88.0], 90.0, true);
        assert_eq!(a.result, CapabilityResult::Incapable);
        assert_eq!(a.median, 85.0);
        assert_eq!(a.gap, 5.0);
    }

    #[test]
    fn test_higher_is_better_inconsistent() {
        let a = analyze_capability(&[85.0, 86.0, 92.0, 95.0, 96.0], 90.0, true);
        assert_eq!(a.result, CapabilityResult::Inconsistent);
        assert_eq!(a.median, 92.0);
        assert_eq!(a.q1, 86.0);
        assert_eq!(a.gap, 0.0);
    }

    #[test]
    fn test_higher_is_better_capable() {
        let a = analyze_capability(&[91.0, 92.0, 93.0, 94.0, 95.0], 90.0, true);
        assert_eq!(a.result, CapabilityResult::Capable);
        assert_eq!(a.gap, 0.0);
    }

    #[test]
    fn test_lower_is_better_incapable() {
        let a = analyze_capability(&[520.0, 540.0, 550.0, 560.0, 580.0], 500.0, false);
        assert_eq!(a.result, CapabilityResult::Incapable);
        assert_eq!(a.gap, 50.0);
    }

    #[test]
    fn test_lower_is_better_inconsistent() {
        let a = analyze_capability(&[400.0, 450.0, 480.0, 520.0, 530.0], 500.0, false);
        assert_eq!(a.result, CapabilityResult::Inconsistent);
        assert_eq!(a.median, 480.0);
        assert_eq!(a.q3, 520.0);
        assert_eq!(a.gap, 0.0);
    }

    #[test]
    fn test_lower_is_better_capable() {
        let a = analyze_capability(&[450.0, 460.0, 470.0, 480.0, 490.0], 500.0, false);
        assert_eq!(a.result, CapabilityResult::Capable);
    }

    #[test]
    fn test_worst_quartile_depends_on_polarity() {
        // Q1 = 86 misses a 90 target from below, Q3 = 95 stays under 96
        let sample = [85.0, 86.0, 92.0, 95.0, 96.0];
        assert_eq!(
            analyze_capability(&sample, 90.0, true).result,
            CapabilityResult::Inconsistent
        );
        assert_eq!(
            analyze_capability(&sample, 96.0, false).result,
            CapabilityResult::Capable
        );
    }

    #[test]
    fn test_median_on_target_is_not_incapable() {
        let a = analyze_capability(&[80.0, 90.0, 100.0], 90.0, true);
        assert_eq!(a.result, CapabilityResult::Inconsistent);
        let b = analyze_capability(&[80.0, 90.0, 100.0], 90.0, false);
        assert_eq!(b.result, CapabilityResult::Inconsistent);
    }

    #[test]
    fn test_single_observation() {
        let a = analyze_capability(&[95.0], 90.0, true);
        assert_eq!(a.result, CapabilityResult::Capable);
        assert_eq!(a.q1, 95.0);
        assert_eq!(a.q3, 95.0);
    }

    #[test]
    fn test_target_struct_variant() {
        let target = Target {
            value: 500.0,
            higher_is_better: false,
        };
        let a = analyze_capability_for(&[520.0, 540.0, 550.0, 560.0, 580.0], &target);
        assert_eq!(a.result, CapabilityResult::Incapable);
        assert_eq!(a.target, 500.0);
    }

    #[test]
    fn test_result_serializes_uppercase() {
        let json = serde_json::to_string(&CapabilityResult::Inconsistent).unwrap();
        assert_eq!(json, "\"INCONSISTENT\"");
        assert_eq!(CapabilityResult::Capable.to_string(), "CAPABLE");
    }
}
