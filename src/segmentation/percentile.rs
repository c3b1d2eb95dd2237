//! Fixed percentile-edge segmentation.
//!
//! Cut points at the 0/25/50/75/100th percentiles of the product's own price
//! distribution - quartile bins. Duplicate percentile values (repeated
//! prices) collapse adjacent bins.

use super::{assign_by_edges, dedup_edges, percentile_sorted, BucketAssignment, SegmentationStrategy};

/// Percentile cut points, in percent.
const CUTS: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];

#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileEdgesStrategy;

impl SegmentationStrategy for PercentileEdgesStrategy {
    fn assign(&self, prices: &[f64]) -> Option<BucketAssignment> {
        if prices.is_empty() {
            return None;
        }
        let mut sorted = prices.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let edges: Vec<f64> = CUTS.iter().map(|&p| percentile_sorted(&sorted, p)).collect();
        assign_by_edges(prices, &dedup_edges(edges))
    }
}
