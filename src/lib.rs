//! Capaz - Statistical process control for contact-center quality metrics
//!
//! This library turns raw performance-metric time series into actionable
//! classifications: descriptive statistics and quartiles, histograms,
//! least-squares fits and R², the Variation Safety Factor, trend detection
//! and the 50/75 capability rule.
//!
//! The statistics functions are pure and total. Empty, singleton and
//! zero-variance samples produce documented floor values instead of errors.

pub mod capability;
pub mod cli;
pub mod config;
pub mod descriptive;
pub mod error;
pub mod histogram;
pub mod json_output;
pub mod linear_fit;
pub mod report;
pub mod series;
pub mod trend;
pub mod vsf;

pub use capability::{analyze_capability, CapabilityAnalysis, CapabilityResult};
pub use descriptive::{calculate_quartiles, Quartiles};
pub use error::{Result, SpcError};
pub use histogram::{calculate_histogram, HistogramBin};
pub use linear_fit::{r_squared_from_points, r_squared_from_series, Point2D};
pub use trend::{identify_trend, TrendResult};
pub use vsf::vsf;
