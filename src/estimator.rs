//! Per-product elasticity estimation.
//!
//! For one candidate product, every segmentation method is tried in a fixed
//! order and the fit with the highest R2 wins. Max-R2 selection biases
//! toward whichever bucketing happens to fit this sample well - a known
//! limitation this module keeps for compatibility rather than corrects. All
//! per-method outcomes are kept on the result so callers can apply a
//! different selection policy without re-running the segmentation.
//!
//! Estimation failures are per-product and silent (`None`): not enough
//! segments under any method, degenerate log inputs, zero variance. The
//! pipeline simply moves on to the next candidate.

use serde::Serialize;

use crate::classify::ElasticityCategory;
use crate::record::TransactionRecord;
use crate::regression::fit_log_log;
use crate::segmentation::{segment_records, SegmentationMethod};

/// Outcome of one segmentation method for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MethodOutcome {
    pub method: SegmentationMethod,
    pub elasticity: f64,
    pub r_squared: f64,
    pub mse: f64,
    /// Buckets that survived aggregation under this method.
    pub segments: usize,
}

/// One product's elasticity estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElasticityEstimate {
    pub product_id: String,
    /// Regression slope: the price elasticity of demand.
    pub elasticity: f64,
    pub r_squared: f64,
    /// Residual mean squared error of the winning fit, in log space.
    pub mse: f64,
    /// Segmentation method that produced the winning fit.
    pub method: SegmentationMethod,
    /// Segments used by the winning fit.
    pub segments: usize,
    /// Valid transactions behind the estimate.
    pub transactions: usize,
    pub price_mean: f64,
    pub price_min: f64,
    pub price_max: f64,
    pub quantity_total: f64,
    pub revenue_total: f64,
    /// Set by the result filter for accepted estimates; `None` until then.
    pub category: Option<ElasticityCategory>,
    /// Every method that produced a fit, winning one included.
    pub method_outcomes: Vec<MethodOutcome>,
}

/// Estimate elasticity for one product from its valid records.
///
/// Returns `None` when no segmentation method yields a fittable series.
pub fn estimate_product(
    product_id: &str,
    records: &[&TransactionRecord],
    min_bucket_transactions: usize,
) -> Option<ElasticityEstimate> {
    let mut outcomes: Vec<MethodOutcome> = Vec::new();

    for method in SegmentationMethod::ALL {
        let Some(segments) = segment_records(records, method, min_bucket_transactions) else {
            log::debug!("product {product_id}: method {method} produced no usable segments");
            continue;
        };
        let Some(fit) = fit_log_log(&segments) else {
            log::debug!("product {product_id}: method {method} fit was degenerate");
            continue;
        };
        outcomes.push(MethodOutcome {
            method,
            elasticity: fit.slope,
            r_squared: fit.r_squared,
            mse: fit.mse,
            segments: segments.len(),
        });
    }

    // Strictly-greater comparison: on an R2 tie the earlier method wins.
    let best = *outcomes.iter().reduce(|best, candidate| {
        if candidate.r_squared > best.r_squared {
            candidate
        } else {
            best
        }
    })?;

    let prices: Vec<f64> = records.iter().map(|r| r.price.unwrap_or(f64::NAN)).collect();
    let price_mean = prices.iter().sum::<f64>() / prices.len() as f64;

    log::debug!(
        "product {product_id}: elasticity {:.3} (R2 {:.3}, method {})",
        best.elasticity,
        best.r_squared,
        best.method
    );

    Some(ElasticityEstimate {
        product_id: product_id.to_string(),
        elasticity: best.elasticity,
        r_squared: best.r_squared,
        mse: best.mse,
        method: best.method,
        segments: best.segments,
        transactions: records.len(),
        price_mean,
        price_min: prices.iter().cloned().fold(f64::INFINITY, f64::min),
        price_max: prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        quantity_total: records.iter().map(|r| r.quantity.unwrap_or(0.0)).sum(),
        revenue_total: records.iter().map(|r| r.revenue.unwrap_or(0.0)).sum(),
        category: None,
        method_outcomes: outcomes,
    })
}
