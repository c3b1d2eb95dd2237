//! Price segmentation strategies.
//!
//! Transaction-level price/quantity pairs are too noisy for a direct
//! regression, so each product's observations are bucketed by price and
//! aggregated per bucket. Four interchangeable strategies are provided, all
//! conforming to the same narrow interface (prices in, optional bucket
//! assignment out):
//!
//! - **Quantile**: bucket count adapts to distinct-price cardinality
//!   (5-quantile if >= 8 distinct prices, 4 if >= 5, terciles if >= 3)
//! - **PercentileEdges**: fixed cuts at the 0/25/50/75/100th percentiles
//! - **EqualWidth**: 5 equal-width bins across the observed range
//! - **StdBased**: cuts at {min, mean-std, mean, mean+std, max}
//!
//! Degenerate or duplicate bin edges collapse adjacent buckets instead of
//! erroring; a strategy that cannot produce a usable partition returns
//! `None` and the estimator moves on to the next one.
//!
//! # Example
//!
//! ```
//! use elasticity_analyzer::segmentation::SegmentationMethod;
//!
//! let prices = vec![10.0, 10.0, 12.0, 12.0, 15.0, 15.0, 18.0, 18.0];
//! let assignment = SegmentationMethod::Quantile.assign(&prices).unwrap();
//! assert_eq!(assignment.len(), prices.len());
//! ```

pub mod equal_width;
pub mod percentile;
pub mod quantile;
pub mod std_based;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::TransactionRecord;
use crate::variability::sample_std;

pub use equal_width::EqualWidthStrategy;
pub use percentile::PercentileEdgesStrategy;
pub use quantile::QuantileStrategy;
pub use std_based::StdBasedStrategy;

/// Per-observation bucket assignment. `None` marks an observation no bucket
/// claimed (possible only with pathological edge sets).
pub type BucketAssignment = Vec<Option<usize>>;

/// One price bucket after aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSegment {
    /// Ordinal bucket index. Not necessarily contiguous after small-bucket
    /// dropping.
    pub bucket: usize,
    /// Mean unit price inside the bucket.
    pub price_mean: f64,
    /// Summed quantity inside the bucket.
    pub quantity_total: f64,
    /// Summed revenue inside the bucket.
    pub revenue_total: f64,
    /// Underlying transaction count.
    pub transactions: usize,
}

/// Segmentation strategy identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentationMethod {
    Quantile,
    PercentileEdges,
    EqualWidth,
    StdBased,
}

impl SegmentationMethod {
    /// All methods in the order the estimator tries them.
    pub const ALL: [SegmentationMethod; 4] = [
        SegmentationMethod::Quantile,
        SegmentationMethod::PercentileEdges,
        SegmentationMethod::EqualWidth,
        SegmentationMethod::StdBased,
    ];

    /// Assign each price to a bucket under this method.
    pub fn assign(&self, prices: &[f64]) -> Option<BucketAssignment> {
        self.strategy().assign(prices)
    }

    fn strategy(&self) -> &'static dyn SegmentationStrategy {
        match self {
            SegmentationMethod::Quantile => &QuantileStrategy,
            SegmentationMethod::PercentileEdges => &PercentileEdgesStrategy,
            SegmentationMethod::EqualWidth => &EqualWidthStrategy,
            SegmentationMethod::StdBased => &StdBasedStrategy,
        }
    }
}

impl fmt::Display for SegmentationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentationMethod::Quantile => write!(f, "quantile"),
            SegmentationMethod::PercentileEdges => write!(f, "percentile"),
            SegmentationMethod::EqualWidth => write!(f, "equal_width"),
            SegmentationMethod::StdBased => write!(f, "std_based"),
        }
    }
}

/// The strategy interface: a pure function from prices to an optional bucket
/// assignment. Implementations never error; an unusable partition is `None`.
pub trait SegmentationStrategy: Send + Sync {
    fn assign(&self, prices: &[f64]) -> Option<BucketAssignment>;
}

/// Minimum surviving buckets for a usable partition (2-point-minimum
/// regression needs 3 for a meaningful slope).
pub const MIN_SEGMENTS: usize = 3;

/// Segment one product's records under `method` and aggregate per bucket.
///
/// Buckets with fewer than `min_bucket_transactions` rows are dropped.
/// Returns `None` when fewer than [`MIN_SEGMENTS`] buckets survive or the
/// bucket-level mean prices have zero variance - both are degenerate inputs
/// for a log-log regression.
pub fn segment_records(
    records: &[&TransactionRecord],
    method: SegmentationMethod,
    min_bucket_transactions: usize,
) -> Option<Vec<PriceSegment>> {
    let prices: Vec<f64> = records.iter().map(|r| r.price.unwrap_or(f64::NAN)).collect();
    let assignment = method.assign(&prices)?;
    aggregate_segments(records, &assignment, min_bucket_transactions)
}

/// Aggregate records into per-bucket segments and apply the usability gates.
pub fn aggregate_segments(
    records: &[&TransactionRecord],
    assignment: &BucketAssignment,
    min_bucket_transactions: usize,
) -> Option<Vec<PriceSegment>> {
    debug_assert_eq!(records.len(), assignment.len());

    let bucket_count = assignment.iter().flatten().max().map(|m| m + 1)?;
    let mut sums = vec![(0.0f64, 0.0f64, 0.0f64, 0usize); bucket_count];
    for (record, bucket) in records.iter().zip(assignment) {
        if let Some(b) = bucket {
            let slot = &mut sums[*b];
            slot.0 += record.price.unwrap_or(0.0);
            slot.1 += record.quantity.unwrap_or(0.0);
            slot.2 += record.revenue.unwrap_or(0.0);
            slot.3 += 1;
        }
    }

    let segments: Vec<PriceSegment> = sums
        .into_iter()
        .enumerate()
        .filter(|(_, (_, _, _, n))| *n >= min_bucket_transactions && *n > 0)
        .map(|(bucket, (price_sum, qty, revenue, n))| PriceSegment {
            bucket,
            price_mean: price_sum / n as f64,
            quantity_total: qty,
            revenue_total: revenue,
            transactions: n,
        })
        .collect();

    if segments.len() < MIN_SEGMENTS {
        return None;
    }
    let means: Vec<f64> = segments.iter().map(|s| s.price_mean).collect();
    let mean = means.iter().sum::<f64>() / means.len() as f64;
    if !(sample_std(&means, mean) > 0.0) {
        return None;
    }
    Some(segments)
}

// ---------------------------------------------------------------------------
// Shared edge helpers
// ---------------------------------------------------------------------------

/// Linear-interpolated percentile of `sorted` (ascending), p in [0, 100].
pub(crate) fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}

/// Sort and exact-deduplicate candidate edges. Duplicate edges collapse
/// adjacent bins, mirroring quantile ties being dropped.
pub(crate) fn dedup_edges(mut edges: Vec<f64>) -> Vec<f64> {
    edges.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    edges.dedup();
    edges
}

/// Assign each price to a right-closed bin defined by ascending `edges`.
/// The lowest edge is included in the first bin. Fewer than 2 edges means no
/// bin exists; returns `None`.
pub(crate) fn assign_by_edges(prices: &[f64], edges: &[f64]) -> Option<BucketAssignment> {
    if edges.len() < 2 {
        return None;
    }
    let bins = edges.len() - 1;
    let assignment = prices
        .iter()
        .map(|&p| {
            if !p.is_finite() || p < edges[0] || p > edges[bins] {
                return None;
            }
            for i in 0..bins {
                if p <= edges[i + 1] {
                    return Some(i);
                }
            }
            None
        })
        .collect();
    Some(assignment)
}
