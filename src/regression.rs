//! Log-log least-squares regression.
//!
//! The constant-elasticity demand model `quantity = C * price^beta` becomes
//! linear after a log transform: `ln(quantity) = beta * ln(price) + alpha`.
//! The OLS slope over bucket aggregates is the elasticity estimate; R2 and
//! the residual mean squared error describe fit quality.
//!
//! Degenerate inputs (non-positive values, fewer than 3 points, zero
//! variance on either axis) yield `None`, never an error - the caller skips
//! that product/method and continues.

use crate::segmentation::PriceSegment;

/// One fitted log-log regression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLogFit {
    /// OLS slope of ln(quantity) on ln(price) - the elasticity.
    pub slope: f64,
    /// Intercept of the fit, in log space.
    pub intercept: f64,
    /// Coefficient of determination, in [0, 1] for OLS with intercept.
    pub r_squared: f64,
    /// Mean squared error of the residuals, in log space.
    pub mse: f64,
    /// Number of (price, quantity) points used.
    pub points: usize,
}

/// Fit ln(quantity) = slope * ln(price) + intercept over bucket aggregates.
///
/// Requirements checked here, in order: >= 3 segments, all prices and
/// quantities strictly positive and finite, non-zero variance in both log
/// series. Any violation returns `None`.
pub fn fit_log_log(segments: &[PriceSegment]) -> Option<LogLogFit> {
    if segments.len() < 3 {
        return None;
    }

    let mut log_price = Vec::with_capacity(segments.len());
    let mut log_qty = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.price_mean <= 0.0 || segment.quantity_total <= 0.0 {
            return None;
        }
        let lp = segment.price_mean.ln();
        let lq = segment.quantity_total.ln();
        if !lp.is_finite() || !lq.is_finite() {
            return None;
        }
        log_price.push(lp);
        log_qty.push(lq);
    }

    let n = log_price.len() as f64;
    let mean_x = log_price.iter().sum::<f64>() / n;
    let mean_y = log_qty.iter().sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for (x, y) in log_price.iter().zip(&log_qty) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
        ss_xy += dx * dy;
    }

    // Zero variance on either axis makes the slope or R2 undefined.
    if ss_xx == 0.0 || ss_yy == 0.0 {
        return None;
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;

    let mut ss_res = 0.0;
    for (x, y) in log_price.iter().zip(&log_qty) {
        let predicted = slope * x + intercept;
        let residual = y - predicted;
        ss_res += residual * residual;
    }

    Some(LogLogFit {
        slope,
        intercept,
        r_squared: 1.0 - ss_res / ss_yy,
        mse: ss_res / n,
        points: log_price.len(),
    })
}
