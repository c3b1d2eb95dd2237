//! Delimited export of the result table.
//!
//! One CSV row per accepted product, in the output's ranking order
//! (most elastic first). Columns match the external interface contract:
//! product id, elasticity, R2, category, method, segment count, transaction
//! count, mean price, total quantity, total revenue.

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::error::{ElasticityError, Result};
use crate::estimator::ElasticityEstimate;

/// Flat CSV row for one accepted estimate.
#[derive(Debug, Clone, Serialize)]
struct ResultRow<'a> {
    product_id: &'a str,
    elasticity: f64,
    r_squared: f64,
    category: String,
    method: String,
    segments: usize,
    transactions: usize,
    price_mean: f64,
    quantity_total: f64,
    revenue_total: f64,
}

impl<'a> ResultRow<'a> {
    fn from_estimate(estimate: &'a ElasticityEstimate) -> Self {
        Self {
            product_id: &estimate.product_id,
            elasticity: estimate.elasticity,
            r_squared: estimate.r_squared,
            category: estimate
                .category
                .map(|c| c.to_string())
                .unwrap_or_default(),
            method: estimate.method.to_string(),
            segments: estimate.segments,
            transactions: estimate.transactions,
            price_mean: estimate.price_mean,
            quantity_total: estimate.quantity_total,
            revenue_total: estimate.revenue_total,
        }
    }
}

/// Write estimates as CSV (with header) to `writer`.
pub fn write_results<W: Write>(estimates: &[ElasticityEstimate], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for estimate in estimates {
        csv_writer
            .serialize(ResultRow::from_estimate(estimate))
            .map_err(|e| ElasticityError::Export(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| ElasticityError::Export(e.to_string()))?;
    Ok(())
}

/// Render estimates as a CSV string.
pub fn results_to_csv_string(estimates: &[ElasticityEstimate]) -> Result<String> {
    let mut buffer = Vec::new();
    write_results(estimates, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ElasticityError::Export(e.to_string()))
}

/// Write estimates to a CSV file at `path`.
pub fn save_results<P: AsRef<Path>>(estimates: &[ElasticityEstimate], path: P) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_results(estimates, file)?;
    log::info!(
        "export: {} rows written to {}",
        estimates.len(),
        path.as_ref().display()
    );
    Ok(())
}
