//! Standard-deviation-based segmentation.
//!
//! Cut points at {min, mean-std, mean, mean+std, max}, sorted and
//! deduplicated. When the price spread is small the candidate edges
//! coincide or fall outside [min, max] in a way that collapses bins; fewer
//! than 3 distinct edges means the partition is unusable and the strategy
//! declines.

use super::{assign_by_edges, dedup_edges, BucketAssignment, SegmentationStrategy};
use crate::variability::sample_std;

#[derive(Debug, Clone, Copy, Default)]
pub struct StdBasedStrategy;

impl SegmentationStrategy for StdBasedStrategy {
    fn assign(&self, prices: &[f64]) -> Option<BucketAssignment> {
        if prices.len() < 2 {
            return None;
        }
        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = prices.iter().sum::<f64>() / prices.len() as f64;
        let std = sample_std(prices, mean);
        if !std.is_finite() {
            return None;
        }

        let edges = dedup_edges(vec![min, mean - std, mean, mean + std, max]);
        if edges.len() < 3 {
            return None;
        }
        assign_by_edges(prices, &edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_prices_get_multiple_buckets() {
        let prices = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0];
        let assignment = StdBasedStrategy.assign(&prices).unwrap();
        let max_bucket = assignment.iter().flatten().max().copied().unwrap();
        assert!(max_bucket >= 2);
        // Observations below mean-std sit in the first bucket.
        assert_eq!(assignment[0], Some(0));
    }

    #[test]
    fn zero_variance_collapses_to_decline() {
        assert!(StdBasedStrategy.assign(&[10.0, 10.0, 10.0]).is_none());
    }

    #[test]
    fn too_few_observations_decline() {
        assert!(StdBasedStrategy.assign(&[10.0]).is_none());
    }

    #[test]
    fn edges_outside_range_still_cover_all_observations() {
        // mean-std below min and mean+std above max: edges sort to
        // [mean-std, min, mean, max, mean+std] and every price is covered.
        let prices = [10.0, 20.0];
        if let Some(assignment) = StdBasedStrategy.assign(&prices) {
            assert!(assignment.iter().all(|b| b.is_some()));
        }
    }
}
