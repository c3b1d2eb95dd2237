//! Adaptive quantile segmentation.
//!
//! The bucket count adapts to how many distinct price points the product
//! actually has: 5-quantile bins for rich price histories, 4-quantile for
//! moderate ones, terciles as the floor. Fewer than 3 distinct prices makes
//! quantile segmentation infeasible and the strategy declines.
//!
//! Quantile edges that land on the same value (heavily repeated prices)
//! collapse adjacent bins rather than erroring.

use super::{assign_by_edges, dedup_edges, percentile_sorted, BucketAssignment, SegmentationStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct QuantileStrategy;

impl QuantileStrategy {
    /// Quantile count for a given distinct-price cardinality.
    fn quantile_count(unique_prices: usize) -> Option<usize> {
        match unique_prices {
            n if n >= 8 => Some(5),
            n if n >= 5 => Some(4),
            n if n >= 3 => Some(3),
            _ => None,
        }
    }
}

impl SegmentationStrategy for QuantileStrategy {
    fn assign(&self, prices: &[f64]) -> Option<BucketAssignment> {
        let mut sorted = prices.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut distinct = sorted.clone();
        distinct.dedup();
        let q = Self::quantile_count(distinct.len())?;

        let edges: Vec<f64> = (0..=q)
            .map(|i| percentile_sorted(&sorted, i as f64 / q as f64 * 100.0))
            .collect();
        assign_by_edges(prices, &dedup_edges(edges))
    }
}
