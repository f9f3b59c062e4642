//! Power-law evaluation.
//!
//! Plots, exports, and residual reporting all need two primitive operations:
//! - predict `y(x)` from a fitted trend
//! - sample a fitted curve over an x-range

use crate::domain::TrendFit;

/// Predict `y(x) = exp(intercept) · x^slope` for the given trend.
///
/// Evaluated as `exp(intercept + slope · ln x)` to stay in the same space the
/// fit was computed in. Non-positive `x` yields `NaN`; callers that can see
/// unfiltered data must check `is_finite` on the result.
pub fn predict(trend: &TrendFit, x: f64) -> f64 {
    if x <= 0.0 {
        return f64::NAN;
    }
    (trend.intercept + trend.slope * x.ln()).exp()
}

/// Sample the fitted curve at `n` evenly spaced points over `[x0, x1]`.
pub fn sample_curve(trend: &TrendFit, x0: f64, x1: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x0 + u * (x1 - x0);
        out.push((x, predict(trend, x)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_recovers_power_law() {
        // y = 10 · x^2
        let trend = TrendFit {
            slope: 2.0,
            intercept: 10.0_f64.ln(),
        };
        assert!((predict(&trend, 1.0) - 10.0).abs() < 1e-9);
        assert!((predict(&trend, 4.0) - 160.0).abs() < 1e-9);
    }

    #[test]
    fn predict_nan_outside_domain() {
        let trend = TrendFit {
            slope: 1.0,
            intercept: 0.0,
        };
        assert!(predict(&trend, 0.0).is_nan());
        assert!(predict(&trend, -2.0).is_nan());
    }

    #[test]
    fn sample_curve_covers_range() {
        let trend = TrendFit {
            slope: 1.0,
            intercept: 0.0,
        };
        let pts = sample_curve(&trend, 1.0, 5.0, 5);
        assert_eq!(pts.len(), 5);
        assert!((pts[0].0 - 1.0).abs() < 1e-12);
        assert!((pts[4].0 - 5.0).abs() < 1e-12);
    }
}
