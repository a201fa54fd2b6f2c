//! Ordinary least-squares fitting and coefficient of determination
//!
//! Two flavours of R² are provided:
//! - `r_squared_from_series`: values are treated as equally spaced in time
//!   (x = 0, 1, 2, ...)
//! - `r_squared_from_points`: arbitrary (x, y) pairs, e.g. one KPI plotted
//!   against another
//!
//! Both return 0.0 instead of dividing by a zero variance.

use serde::{Deserialize, Serialize};

/// A point on an arbitrary two-axis plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Least-squares fit over (x, y) pairs
///
/// An empty input yields slope 0 and intercept 0. When every x is the same
/// the slope is 0 and the intercept is the mean of y.
pub fn linear_fit(points: &[Point2D]) -> LinearFit {
    if points.is_empty() {
        return LinearFit::default();
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for p in points {
        let dx = p.x - mean_x;
        sxx += dx * dx;
        sxy += dx * (p.y - mean_y);
    }

    if sxx == 0.0 {
        return LinearFit {
            slope: 0.0,
            intercept: mean_y,
        };
    }

    let slope = sxy / sxx;
    LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    }
}

fn series_points(sample: &[f64]) -> Vec<Point2D> {
    sample
        .iter()
        .enumerate()
        .map(|(i, &y)| Point2D::new(i as f64, y))
        .collect()
}

/// Least-squares fit with `x = index` for each value
pub fn linear_fit_series(sample: &[f64]) -> LinearFit {
    linear_fit(&series_points(sample))
}

/// `1 - SSres / SStot` for a fitted line, clamped into [0, 1]
///
/// Callers must have excluded a zero SStot.
fn coefficient_of_determination(points: &[Point2D], fit: &LinearFit) -> f64 {
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / points.len() as f64;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for p in points {
        ss_res += (p.y - fit.predict(p.x)).powi(2);
        ss_tot += (p.y - mean_y).powi(2);
    }

    if ss_tot == 0.0 {
        return 0.0;
    }
    (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
}

/// R² of a straight-line fit through a time-ordered series
///
/// Returns 0.0 for fewer than 2 values, and for a constant series where
/// the total variance is zero.
///
/// # Example
/// ```
/// use capaz::linear_fit::r_squared_from_series;
///
/// let r2 = r_squared_from_series(&[10.0, 20.0, 30.0, 40.0, 50.0]);
/// assert!((r2 - 1.0).abs() < 1e-4);
/// assert_eq!(r_squared_from_series(&[10.0]), 0.0);
/// ```
pub fn r_squared_from_series(sample: &[f64]) -> f64 {
    if sample.len() < 2 {
        return 0.0;
    }
    let points = series_points(sample);
    let fit = linear_fit(&points);
    coefficient_of_determination(&points, &fit)
}

/// R² between two arbitrary axes
///
/// Returns 0.0 for fewer than 2 points, or when either axis has zero
/// variance (all x equal or all y equal).
pub fn r_squared_from_points(points: &[Point2D]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let first = points[0];
    let constant_x = points.iter().all(|p| p.x == first.x);
    let constant_y = points.iter().all(|p| p.y == first.y);
    if constant_x || constant_y {
        return 0.0;
    }

    let fit = linear_fit(points);
    coefficient_of_determination(points, &fit)
}
