//! Equal-width segmentation.
//!
//! Divides the observed price range into a fixed number of equal-width bins.
//! Bin membership is computed directly from the offset into the range, so
//! the maximum price lands in the last bin and the minimum in the first.

use super::{BucketAssignment, SegmentationStrategy};

/// Number of equal-width bins.
const BINS: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct EqualWidthStrategy;

impl SegmentationStrategy for EqualWidthStrategy {
    fn assign(&self, prices: &[f64]) -> Option<BucketAssignment> {
        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() || max <= min {
            return None;
        }
        let width = (max - min) / BINS as f64;
        let assignment = prices
            .iter()
            .map(|&p| {
                if !p.is_finite() {
                    return None;
                }
                let bin = ((p - min) / width) as usize;
                Some(bin.min(BINS - 1))
            })
            .collect();
        Some(assignment)
    }
}
