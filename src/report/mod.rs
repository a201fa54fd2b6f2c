// Per-metric SPC reports
//
// Bundles every indicator the dashboard shows for a metric: summary
// statistics, quartiles, histogram, trend, VSF and the 50/75 capability
// verdict. The minimum sample size for the capability rule is applied
// here, as caller policy, rather than inside the classifier.

mod verdict;

pub use verdict::{analyze_metric, analyze_metrics, CapabilityVerdict, MetricReport};

#[cfg(test)]
mod tests;
