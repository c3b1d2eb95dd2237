//! Per-product price variability scoring.
//!
//! Elasticity can only be estimated for products whose price actually moved.
//! This stage groups valid records by product id and computes the price
//! statistics candidate selection filters on: transaction count, mean,
//! sample standard deviation, min/max, distinct-price count, coefficient of
//! variation and price range percentage.
//!
//! A product with a single transaction has an undefined sample std (NaN);
//! the NaN propagates into CV and fails every threshold comparison, so such
//! products can never become candidates. Products absent from the valid
//! record set produce no profile at all - nothing is zero-filled.

use ahash::AHashMap;

use crate::record::TransactionRecord;

/// Price variability statistics for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductVariabilityProfile {
    /// Product identifier.
    pub product_id: String,
    /// Number of valid transactions.
    pub transactions: usize,
    /// Mean unit price.
    pub price_mean: f64,
    /// Sample standard deviation of the unit price (n-1 denominator).
    /// NaN for a single-transaction product.
    pub price_std: f64,
    /// Lowest observed price.
    pub price_min: f64,
    /// Highest observed price.
    pub price_max: f64,
    /// Count of distinct price points.
    pub unique_prices: usize,
    /// Coefficient of variation: std / mean. NaN propagates from std.
    pub cv: f64,
    /// Price range as a percentage of the mean: (max - min) / mean * 100.
    pub range_pct: f64,
    /// Distinct prices per transaction: unique_prices / transactions.
    pub price_density: f64,
    /// Total quantity delivered across the product's valid transactions.
    pub quantity_total: f64,
    /// Total revenue across the product's valid transactions.
    pub revenue_total: f64,
}

/// Compute one profile per distinct product id in `records`.
///
/// `records` must already be validated: every price/quantity/revenue is
/// present and positive. Output is sorted by product id so the scorer is
/// deterministic regardless of hash iteration order.
pub fn score_products(records: &[TransactionRecord]) -> Vec<ProductVariabilityProfile> {
    let mut groups: AHashMap<&str, Vec<&TransactionRecord>> = AHashMap::new();
    for record in records {
        groups.entry(&record.product_id).or_default().push(record);
    }

    let mut profiles: Vec<ProductVariabilityProfile> = groups
        .into_iter()
        .map(|(product_id, rows)| profile_for(product_id, &rows))
        .collect();
    profiles.sort_by(|a, b| a.product_id.cmp(&b.product_id));
    profiles
}

fn profile_for(product_id: &str, rows: &[&TransactionRecord]) -> ProductVariabilityProfile {
    let prices: Vec<f64> = rows.iter().map(|r| r.price.unwrap_or(f64::NAN)).collect();
    let n = prices.len();

    let mean = prices.iter().sum::<f64>() / n as f64;
    let std = sample_std(&prices, mean);
    let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let mut distinct: Vec<u64> = prices.iter().map(|p| p.to_bits()).collect();
    distinct.sort_unstable();
    distinct.dedup();

    let quantity_total = rows.iter().map(|r| r.quantity.unwrap_or(0.0)).sum();
    let revenue_total = rows.iter().map(|r| r.revenue.unwrap_or(0.0)).sum();

    ProductVariabilityProfile {
        product_id: product_id.to_string(),
        transactions: n,
        price_mean: mean,
        price_std: std,
        price_min: min,
        price_max: max,
        unique_prices: distinct.len(),
        cv: std / mean,
        range_pct: (max - min) / mean * 100.0,
        price_density: distinct.len() as f64 / n as f64,
        quantity_total,
        revenue_total,
    }
}

/// Sample standard deviation (n-1 denominator). NaN for n < 2.
pub(crate) fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (ss / (n - 1) as f64).sqrt()
}
